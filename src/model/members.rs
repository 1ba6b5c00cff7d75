//! Member-level descriptors: methods, parameters, properties, signals,
//! constants and enums.
//!
//! Every descriptor pairs a logical (script-side) name with the binary
//! (compiled-side) name and shape it was crosswalked to.

use serde::{Deserialize, Serialize};

/// A reference to a compiled type as it appears in a signature.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "PascalCase")]
pub struct TypeReference {
    /// Simple name (`Int64`)
    pub name: String,
    /// Namespace-qualified name (`System.Int64`)
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub generic_arguments: Vec<TypeReference>,
}

impl TypeReference {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            generic_arguments: Vec::new(),
        }
    }

    /// Build a reference from a full name, deriving the simple name from the
    /// last namespace segment.
    pub fn from_full_name(full_name: impl Into<String>) -> Self {
        let full_name = full_name.into();
        let name = full_name
            .rsplit('.')
            .next()
            .unwrap_or(full_name.as_str())
            .to_string();
        Self::new(name, full_name)
    }

    pub fn is_void(&self) -> bool {
        self.full_name == "System.Void"
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ParameterDescriptor {
    /// 0-based, unique within the owning method
    pub position: usize,
    pub name: String,
    pub logical_type: String,
    pub binary_type: TypeReference,
    #[serde(default)]
    pub has_default: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
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

/// Calling shape of one parameter, used to compare overloads.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterShape {
    pub binary_type: String,
    pub is_ref: bool,
    pub is_out: bool,
    pub is_in: bool,
    pub is_params: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct MethodDescriptor {
    pub logical_name: String,
    pub binary_name: String,
    pub return_type: TypeReference,
    pub logical_return_type: String,
    #[serde(default)]
    pub parameters: Vec<ParameterDescriptor>,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_virtual: bool,
    #[serde(default)]
    pub is_abstract: bool,
    #[serde(default)]
    pub is_generic: bool,
    #[serde(default)]
    pub returns_void: bool,
    #[serde(default)]
    pub returns_nullable: bool,
    /// Binary full name of the declaring type
    pub declaring_type: String,
}

impl MethodDescriptor {
    /// Declaring type plus parameter shapes. Two overloads with the same
    /// signature shape are the same binary method.
    pub fn signature_shape(&self) -> (&str, Vec<ParameterShape>) {
        let params = self
            .parameters
            .iter()
            .map(|p| ParameterShape {
                binary_type: p.binary_type.full_name.clone(),
                is_ref: p.is_ref,
                is_out: p.is_out,
                is_in: p.is_in,
                is_params: p.is_params,
            })
            .collect();
        (self.declaring_type.as_str(), params)
    }

    pub fn same_shape(&self, other: &MethodDescriptor) -> bool {
        self.signature_shape() == other.signature_shape()
    }

    /// Number of parameters a caller must supply.
    pub fn required_arity(&self) -> usize {
        self.parameters
            .iter()
            .filter(|p| !p.has_default && !p.is_params)
            .count()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PropertyDescriptor {
    pub logical_name: String,
    pub binary_name: String,
    pub logical_type: String,
    pub binary_type: TypeReference,
    #[serde(default)]
    pub can_read: bool,
    #[serde(default)]
    pub can_write: bool,
    #[serde(default)]
    pub is_static: bool,
    pub declaring_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignalDescriptor {
    pub logical_name: String,
    pub binary_name: String,
    /// Delegate return type
    pub return_type: TypeReference,
    /// Delegate parameter types, in order
    #[serde(default)]
    pub parameter_types: Vec<TypeReference>,
    pub declaring_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ConstantDescriptor {
    pub logical_name: String,
    pub binary_name: String,
    pub value_type: String,
    pub declaring_type: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumMember {
    pub logical_name: String,
    pub binary_name: String,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct EnumDescriptor {
    pub logical_name: String,
    /// Logical name of the containing type; `None` for global enums
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub containing_type: Option<String>,
    pub binary_full_name: String,
    pub binary_name: String,
    #[serde(default)]
    pub is_flags: bool,
    /// Declaration order
    #[serde(default)]
    pub values: Vec<EnumMember>,
}

impl EnumDescriptor {
    pub fn member(&self, logical_name: &str) -> Option<&EnumMember> {
        self.values.iter().find(|m| m.logical_name == logical_name)
    }
}

/// Receiver-less reference to a type, e.g. the script name `Vector2`
/// standing for `Godot.Vector2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TypeProxy {
    pub logical_name: String,
    pub binary_full_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(position: usize, full: &str) -> ParameterDescriptor {
        ParameterDescriptor {
            position,
            name: format!("p{position}"),
            logical_type: "int".into(),
            binary_type: TypeReference::from_full_name(full),
            has_default: false,
            default_value: None,
            is_ref: false,
            is_out: false,
            is_in: false,
            is_params: false,
            is_nullable: false,
        }
    }

    fn method(params: Vec<ParameterDescriptor>) -> MethodDescriptor {
        MethodDescriptor {
            logical_name: "abs".into(),
            binary_name: "Abs".into(),
            return_type: TypeReference::from_full_name("System.Int64"),
            logical_return_type: "int".into(),
            parameters: params,
            is_static: true,
            is_virtual: false,
            is_abstract: false,
            is_generic: false,
            returns_void: false,
            returns_nullable: false,
            declaring_type: "Godot.Mathf".into(),
        }
    }

    #[test]
    fn test_from_full_name_splits_namespace() {
        let t = TypeReference::from_full_name("Godot.Collections.Array");
        assert_eq!(t.name, "Array");
        assert_eq!(t.full_name, "Godot.Collections.Array");

        let bare = TypeReference::from_full_name("Variant");
        assert_eq!(bare.name, "Variant");
    }

    #[test]
    fn test_same_shape_ignores_parameter_names() {
        let a = method(vec![param(0, "System.Int64")]);
        let mut b = a.clone();
        b.parameters[0].name = "other".into();
        b.logical_name = "absi".into();
        assert!(a.same_shape(&b));
    }

    #[test]
    fn test_shape_differs_by_parameter_type() {
        let a = method(vec![param(0, "System.Int64")]);
        let b = method(vec![param(0, "System.Double")]);
        assert!(!a.same_shape(&b));
    }

    #[test]
    fn test_required_arity_skips_defaults_and_params() {
        let mut with_default = param(1, "System.Int64");
        with_default.has_default = true;
        let mut rest = param(2, "System.Object[]");
        rest.is_params = true;
        let m = method(vec![param(0, "System.Int64"), with_default, rest]);
        assert_eq!(m.required_arity(), 1);
    }
}
