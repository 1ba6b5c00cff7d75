use super::members::{
    ConstantDescriptor, EnumDescriptor, MethodDescriptor, PropertyDescriptor, SignalDescriptor,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One binary variant of a logical type with all crosswalked members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TypeDescriptor {
    pub logical_name: String,
    pub binary_name: String,
    #[serde(default)]
    pub namespace: String,
    /// Binary full name of the enclosing type, for nested types
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub declaring_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_type: Option<String>,
    #[serde(default)]
    pub is_enum: bool,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_builtin_value_type: bool,
    /// Overload sets keyed by logical name, first-discovered order
    #[serde(default)]
    pub methods: BTreeMap<String, Vec<MethodDescriptor>>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDescriptor>,
    #[serde(default)]
    pub signals: BTreeMap<String, SignalDescriptor>,
    #[serde(default)]
    pub constants: BTreeMap<String, ConstantDescriptor>,
    #[serde(default)]
    pub enums: BTreeMap<String, EnumDescriptor>,
}

impl TypeDescriptor {
    /// Same spelling as the reflection side: `Ns.Outer+Inner` for nested types.
    pub fn binary_full_name(&self) -> String {
        match (&self.declaring_type, self.namespace.is_empty()) {
            (Some(outer), _) => format!("{outer}+{}", self.binary_name),
            (None, true) => self.binary_name.clone(),
            (None, false) => format!("{}.{}", self.namespace, self.binary_name),
        }
    }

    pub fn method_count(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }

    pub fn member_count(&self) -> usize {
        self.method_count()
            + self.properties.len()
            + self.signals.len()
            + self.constants.len()
            + self.enums.len()
    }
}

/// Binary variants of one logical type, keyed by binary full name.
pub type TypeVariants = BTreeMap<String, TypeDescriptor>;
