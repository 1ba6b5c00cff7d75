//! Host engine introspection boundary.
//!
//! The host registry is authoritative for logical names: which enums a type
//! declares, their constants in declaration order, and the integer constants
//! of a type. It is queried purely by value; a type it does not know answers
//! with empty lists.

use crate::errors::{Error, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

pub trait HostRegistry {
    /// Live engine version string.
    fn version(&self) -> String;

    fn list_enums(&self, type_name: &str) -> Vec<String>;

    /// Logical constant names of one enum, declaration order.
    fn list_enum_constants(&self, type_name: &str, enum_name: &str) -> Vec<String>;

    /// Every integer constant of a type, enum members included.
    fn list_integer_constants(&self, type_name: &str) -> Vec<String>;

    fn type_exists(&self, type_name: &str) -> bool;

    fn has_method(&self, type_name: &str, method_name: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct HostEnum {
    pub name: String,
    #[serde(default)]
    pub constants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct HostClass {
    #[serde(default)]
    pub enums: Vec<HostEnum>,
    #[serde(default)]
    pub integer_constants: Vec<String>,
    #[serde(default)]
    pub methods: Vec<String>,
}

/// Host registry answered from a JSON dump of the engine's class database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct StaticHostRegistry {
    pub version: String,
    #[serde(default)]
    pub classes: BTreeMap<String, HostClass>,
}

impl StaticHostRegistry {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            classes: BTreeMap::new(),
        }
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::file_system("Failed to read host registry dump", path, e))?;
        Self::from_json(&contents).context(format!("Failed to parse {}", path.display()))
    }

    pub fn with_class(mut self, name: impl Into<String>, class: HostClass) -> Self {
        self.classes.insert(name.into(), class);
        self
    }

    fn class(&self, type_name: &str) -> Option<&HostClass> {
        self.classes.get(type_name)
    }
}

impl HostRegistry for StaticHostRegistry {
    fn version(&self) -> String {
        self.version.clone()
    }

    fn list_enums(&self, type_name: &str) -> Vec<String> {
        self.class(type_name)
            .map(|c| c.enums.iter().map(|e| e.name.clone()).collect())
            .unwrap_or_default()
    }

    fn list_enum_constants(&self, type_name: &str, enum_name: &str) -> Vec<String> {
        self.class(type_name)
            .and_then(|c| c.enums.iter().find(|e| e.name == enum_name))
            .map(|e| e.constants.clone())
            .unwrap_or_default()
    }

    fn list_integer_constants(&self, type_name: &str) -> Vec<String> {
        self.class(type_name)
            .map(|c| c.integer_constants.clone())
            .unwrap_or_default()
    }

    fn type_exists(&self, type_name: &str) -> bool {
        self.classes.contains_key(type_name)
    }

    fn has_method(&self, type_name: &str, method_name: &str) -> bool {
        self.class(type_name)
            .is_some_and(|c| c.methods.iter().any(|m| m == method_name))
    }
}
