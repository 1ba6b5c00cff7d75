//! Compiled-module reflection boundary.
//!
//! The resolver never loads binaries itself. It consumes a
//! [`CompiledModule`] that hands out [`ReflectedType`]s: plain data
//! describing declared members, literal fields, enum values, nested types
//! and the static initializer body of each name-table type.
//! [`ModuleManifest`] is the serde-backed implementation used by the CLI.

mod manifest;

pub use manifest::ModuleManifest;

use crate::model::TypeReference;
use crate::scanner::InitializerBody;
use serde::{Deserialize, Serialize};

/// Nested type holding the method-name table.
pub const METHOD_NAME_TABLE: &str = "MethodName";
/// Nested type holding the property-name table.
pub const PROPERTY_NAME_TABLE: &str = "PropertyName";
/// Nested type holding the signal-name table.
pub const SIGNAL_NAME_TABLE: &str = "SignalName";

/// Source of exported types for one loaded module snapshot.
pub trait CompiledModule {
    fn exported_types(&self) -> Vec<&ReflectedType>;

    /// Version string of the host engine the module was built against.
    fn host_version(&self) -> Option<&str> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedParameter {
    pub name: String,
    pub position: usize,
    pub parameter_type: TypeReference,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default)]
    pub default_value: Option<String>,
    #[serde(default)]
    pub is_ref: bool,
    #[serde(default)]
    pub is_out: bool,
    #[serde(default)]
    pub is_in: bool,
    #[serde(default)]
    pub is_params: bool,
    #[serde(default)]
    pub is_nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedMethod {
    pub name: String,
    pub return_type: TypeReference,
    #[serde(default)]
    pub returns_nullable: bool,
    #[serde(default)]
    pub parameters: Vec<ReflectedParameter>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_generic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedProperty {
    pub name: String,
    pub property_type: TypeReference,
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub can_write: bool,
    #[serde(default)]
    pub is_static: bool,
}

/// Delegate shape behind an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedSignature {
    pub return_type: TypeReference,
    #[serde(default)]
    pub parameter_types: Vec<TypeReference>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedEvent {
    pub name: String,
    pub handler_type: TypeReference,
    #[serde(default)]
    pub invoke: Option<ReflectedSignature>,
}

/// A public literal (`const`) field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct LiteralField {
    pub name: String,
    pub field_type: TypeReference,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedEnumValue {
    pub name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct ReflectedType {
    pub name: String,
    #[serde(default)]
    pub namespace: String,
    #[serde(default)]
    pub base_type: Option<String>,
    /// Full name of the enclosing type for nested types
    #[serde(default)]
    pub declaring_type: Option<String>,
    /// Explicit logical-name annotation, when the type carries one
    #[serde(default)]
    pub logical_name: Option<String>,
    #[serde(default)]
    pub is_enum: bool,
    #[serde(default)]
    pub is_flags: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_value_type: bool,
    #[serde(default)]
    pub methods: Vec<ReflectedMethod>,
    #[serde(default)]
    pub properties: Vec<ReflectedProperty>,
    #[serde(default)]
    pub events: Vec<ReflectedEvent>,
    #[serde(default)]
    pub literal_fields: Vec<LiteralField>,
    /// Values in declaration order (enum types only)
    #[serde(default)]
    pub enum_values: Vec<ReflectedEnumValue>,
    #[serde(default)]
    pub nested_types: Vec<ReflectedType>,
    #[serde(default)]
    pub static_initializer: Option<InitializerBody>,
}

impl ReflectedType {
    pub fn full_name(&self) -> String {
        match (&self.declaring_type, self.namespace.is_empty()) {
            (Some(outer), _) => format!("{outer}+{}", self.name),
            (None, true) => self.name.clone(),
            (None, false) => format!("{}.{}", self.namespace, self.name),
        }
    }

    /// Logical name: the explicit annotation when present, else the binary name.
    pub fn logical_name(&self) -> &str {
        self.logical_name.as_deref().unwrap_or(&self.name)
    }

    pub fn nested_type(&self, name: &str) -> Option<&ReflectedType> {
        self.nested_types.iter().find(|t| t.name == name)
    }

    pub fn methods_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a ReflectedMethod> {
        self.methods.iter().filter(move |m| m.name == name)
    }

    pub fn property(&self, name: &str) -> Option<&ReflectedProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn event(&self, name: &str) -> Option<&ReflectedEvent> {
        self.events.iter().find(|e| e.name == name)
    }
}
