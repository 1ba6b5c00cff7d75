//! Methods, properties and signals: scanned bindings joined with the
//! reflected member list.

use crate::model::{
    MethodDescriptor, ParameterDescriptor, PropertyDescriptor, SignalDescriptor, TypeReference,
};
use crate::naming::logical_type_name;
use crate::reflection::{ReflectedMethod, ReflectedParameter, ReflectedType};
use crate::scanner::NameBinding;
use std::collections::BTreeMap;

/// Each binding maps to every overload whose binary name equals the bound
/// field. Bindings without a matching method are dropped.
pub(crate) fn resolve_methods(
    ty: &ReflectedType,
    bindings: &[NameBinding],
) -> BTreeMap<String, Vec<MethodDescriptor>> {
    let declaring = ty.full_name();
    let mut methods = BTreeMap::new();

    for binding in bindings {
        let overloads: Vec<_> = ty
            .methods_named(&binding.field_name)
            .map(|m| method_descriptor(&binding.logical_name, m, &declaring))
            .collect();
        if overloads.is_empty() {
            tracing::trace!(
                logical = %binding.logical_name,
                field = %binding.field_name,
                "No binary method for binding"
            );
            continue;
        }
        methods.insert(binding.logical_name.clone(), overloads);
    }

    methods
}

pub(crate) fn resolve_properties(
    ty: &ReflectedType,
    bindings: &[NameBinding],
) -> BTreeMap<String, PropertyDescriptor> {
    let declaring = ty.full_name();
    bindings
        .iter()
        .filter_map(|binding| {
            let property = ty.property(&binding.field_name)?;
            Some((
                binding.logical_name.clone(),
                PropertyDescriptor {
                    logical_name: binding.logical_name.clone(),
                    binary_name: property.name.clone(),
                    logical_type: logical_type_name(&property.property_type),
                    binary_type: property.property_type.clone(),
                    can_read: property.can_read,
                    can_write: property.can_write,
                    is_static: property.is_static,
                    declaring_type: declaring.clone(),
                },
            ))
        })
        .collect()
}

pub(crate) fn resolve_signals(
    ty: &ReflectedType,
    bindings: &[NameBinding],
) -> BTreeMap<String, SignalDescriptor> {
    let declaring = ty.full_name();
    bindings
        .iter()
        .filter_map(|binding| {
            let event = ty.event(&binding.field_name)?;
            let (return_type, parameter_types) = match &event.invoke {
                Some(sig) => (sig.return_type.clone(), sig.parameter_types.clone()),
                None => (TypeReference::from_full_name("System.Void"), Vec::new()),
            };
            Some((
                binding.logical_name.clone(),
                SignalDescriptor {
                    logical_name: binding.logical_name.clone(),
                    binary_name: event.name.clone(),
                    return_type,
                    parameter_types,
                    declaring_type: declaring.clone(),
                },
            ))
        })
        .collect()
}

pub(crate) fn method_descriptor(
    logical_name: &str,
    method: &ReflectedMethod,
    declaring_type: &str,
) -> MethodDescriptor {
    MethodDescriptor {
        logical_name: logical_name.to_string(),
        binary_name: method.name.clone(),
        logical_return_type: logical_type_name(&method.return_type),
        returns_void: method.return_type.is_void(),
        return_type: method.return_type.clone(),
        parameters: method.parameters.iter().map(parameter_descriptor).collect(),
        is_static: method.is_static,
        is_virtual: method.is_virtual,
        is_abstract: method.is_abstract,
        is_generic: method.is_generic,
        returns_nullable: method.returns_nullable,
        declaring_type: declaring_type.to_string(),
    }
}

fn parameter_descriptor(param: &ReflectedParameter) -> ParameterDescriptor {
    ParameterDescriptor {
        position: param.position,
        name: param.name.clone(),
        logical_type: logical_type_name(&param.parameter_type),
        binary_type: param.parameter_type.clone(),
        has_default: param.has_default,
        default_value: param.default_value.clone(),
        is_ref: param.is_ref,
        is_out: param.is_out,
        is_in: param.is_in,
        is_params: param.is_params,
        is_nullable: param.is_nullable,
    }
}
