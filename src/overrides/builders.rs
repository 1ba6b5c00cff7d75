//! Terse authoring helpers for override tables.

use crate::model::{
    ConstantDescriptor, EnumDescriptor, EnumMember, MethodDescriptor, ParameterDescriptor,
    PropertyDescriptor, TypeProxy, TypeReference,
};
use crate::naming::{logical_type_name, to_pascal_case, to_snake_case};

/// Builds one static overload.
///
/// ```ignore
/// let abs = MethodBuilder::new("abs", "Godot.Mathf")
///     .param("s", "System.Int64")
///     .returns("System.Int64")
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct MethodBuilder {
    method: MethodDescriptor,
}

impl MethodBuilder {
    /// Binary name derived from the logical one (`rand_range` -> `RandRange`).
    pub fn new(logical_name: &str, declaring_type: &str) -> Self {
        Self::named(logical_name, &to_pascal_case(logical_name), declaring_type)
    }

    /// Logical name derived from the binary one (`VarToStr` -> `var_to_str`).
    pub fn for_binary(binary_name: &str, declaring_type: &str) -> Self {
        Self::named(&to_snake_case(binary_name), binary_name, declaring_type)
    }

    pub fn named(logical_name: &str, binary_name: &str, declaring_type: &str) -> Self {
        let void = TypeReference::from_full_name("System.Void");
        Self {
            method: MethodDescriptor {
                logical_name: logical_name.to_string(),
                binary_name: binary_name.to_string(),
                logical_return_type: logical_type_name(&void),
                return_type: void,
                parameters: Vec::new(),
                is_static: true,
                is_virtual: false,
                is_abstract: false,
                is_generic: false,
                returns_void: true,
                returns_nullable: false,
                declaring_type: declaring_type.to_string(),
            },
        }
    }

    pub fn returns(mut self, full_name: &str) -> Self {
        let ty = TypeReference::from_full_name(full_name);
        self.method.logical_return_type = logical_type_name(&ty);
        self.method.returns_void = ty.is_void();
        self.method.return_type = ty;
        self
    }

    pub fn param(self, name: &str, full_name: &str) -> Self {
        self.push_param(name, full_name, |_| {})
    }

    pub fn optional_param(self, name: &str, full_name: &str, default_value: &str) -> Self {
        self.push_param(name, full_name, |p| {
            p.has_default = true;
            p.default_value = Some(default_value.to_string());
        })
    }

    /// Trailing variadic parameter (`params object[] what`).
    pub fn params_array(self, name: &str, element_full_name: &str) -> Self {
        self.push_param(name, &format!("{element_full_name}[]"), |p| {
            p.is_params = true;
        })
    }

    pub fn build(self) -> MethodDescriptor {
        self.method
    }

    fn push_param(
        mut self,
        name: &str,
        full_name: &str,
        tweak: impl FnOnce(&mut ParameterDescriptor),
    ) -> Self {
        let ty = TypeReference::from_full_name(full_name);
        let mut param = ParameterDescriptor {
            position: self.method.parameters.len(),
            name: name.to_string(),
            logical_type: logical_type_name(&ty),
            binary_type: ty,
            has_default: false,
            default_value: None,
            is_ref: false,
            is_out: false,
            is_in: false,
            is_params: false,
            is_nullable: false,
        };
        tweak(&mut param);
        self.method.parameters.push(param);
        self
    }
}

/// Builds a global enum. Member binary names are the logical name with the
/// shared prefix removed, PascalCased: `SIDE_TOP_LEFT` -> `TopLeft`.
#[derive(Debug, Clone)]
pub struct EnumBuilder {
    descriptor: EnumDescriptor,
    prefix: String,
}

impl EnumBuilder {
    pub fn new(logical_name: &str, binary_full_name: &str) -> Self {
        let binary_name = binary_full_name
            .rsplit(['.', '+'])
            .next()
            .unwrap_or(binary_full_name);
        Self {
            descriptor: EnumDescriptor {
                logical_name: logical_name.to_string(),
                containing_type: None,
                binary_full_name: binary_full_name.to_string(),
                binary_name: binary_name.to_string(),
                is_flags: false,
                values: Vec::new(),
            },
            prefix: String::new(),
        }
    }

    pub fn prefix(mut self, prefix: &str) -> Self {
        self.prefix = prefix.to_string();
        self
    }

    pub fn flags(mut self) -> Self {
        self.descriptor.is_flags = true;
        self
    }

    pub fn value(self, logical_name: &str, value: i64) -> Self {
        let stripped = logical_name
            .strip_prefix(self.prefix.as_str())
            .unwrap_or(logical_name);
        let binary = to_pascal_case(&stripped.to_lowercase());
        self.named_value(logical_name, &binary, value)
    }

    pub fn named_value(mut self, logical_name: &str, binary_name: &str, value: i64) -> Self {
        self.descriptor.values.push(EnumMember {
            logical_name: logical_name.to_string(),
            binary_name: binary_name.to_string(),
            value,
        });
        self
    }

    pub fn build(self) -> EnumDescriptor {
        self.descriptor
    }
}

pub fn constant(
    logical_name: &str,
    binary_name: &str,
    value_type: &str,
    declaring_type: &str,
    value: &str,
) -> ConstantDescriptor {
    ConstantDescriptor {
        logical_name: logical_name.to_string(),
        binary_name: binary_name.to_string(),
        value_type: value_type.to_string(),
        declaring_type: declaring_type.to_string(),
        value: value.to_string(),
    }
}

pub fn proxy(logical_name: &str, binary_full_name: &str) -> TypeProxy {
    TypeProxy {
        logical_name: logical_name.to_string(),
        binary_full_name: binary_full_name.to_string(),
    }
}

/// Read-only static property.
pub fn static_property(
    logical_name: &str,
    binary_name: &str,
    full_type: &str,
    declaring_type: &str,
) -> PropertyDescriptor {
    let ty = TypeReference::from_full_name(full_type);
    PropertyDescriptor {
        logical_name: logical_name.to_string(),
        binary_name: binary_name.to_string(),
        logical_type: logical_type_name(&ty),
        binary_type: ty,
        can_read: true,
        can_write: false,
        is_static: true,
        declaring_type: declaring_type.to_string(),
    }
}
