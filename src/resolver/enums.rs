//! Enum crosswalk.
//!
//! Host constants and binary enum values are paired by position: both lists
//! are taken to be in declaration order. Nothing cross-checks the two
//! orderings.

use crate::config::ExtractionConfig;
use crate::host::HostRegistry;
use crate::model::{EnumDescriptor, EnumMember};
use crate::reflection::ReflectedType;
use crate::unresolved::UnresolvedTracker;
use std::collections::BTreeMap;

/// Enums the host reports for `logical_type`, each matched to a nested
/// binary enum of `ty`.
pub(crate) fn resolve_enums(
    host: &dyn HostRegistry,
    config: &ExtractionConfig,
    ty: &ReflectedType,
    logical_type: &str,
    unresolved: &mut UnresolvedTracker,
) -> BTreeMap<String, EnumDescriptor> {
    let mut enums = BTreeMap::new();

    for enum_name in host.list_enums(logical_type) {
        let Some(binary) = find_nested_enum(ty, &enum_name, &config.enum_suffix) else {
            if !config.is_instance_shadow(&ty.name) {
                tracing::debug!(ty = %ty.full_name(), %enum_name, "Enum not found");
                unresolved.enum_not_found(logical_type, ty.full_name(), enum_name);
            }
            continue;
        };

        let constants = host.list_enum_constants(logical_type, &enum_name);
        match pair_enum(Some(logical_type), &enum_name, &constants, binary) {
            Some(descriptor) => {
                enums.insert(enum_name, descriptor);
            }
            None => {
                tracing::debug!(
                    ty = %ty.full_name(),
                    %enum_name,
                    host = constants.len(),
                    binary = binary.enum_values.len(),
                    "Enum value count mismatch"
                );
                unresolved.constants_type_mismatch(logical_type, binary.full_name());
            }
        }
    }

    enums
}

/// Nested enum named `name` or `{name}{suffix}`.
pub(crate) fn find_nested_enum<'a>(
    ty: &'a ReflectedType,
    name: &str,
    suffix: &str,
) -> Option<&'a ReflectedType> {
    let suffixed = format!("{name}{suffix}");
    ty.nested_types
        .iter()
        .filter(|t| t.is_enum)
        .find(|t| t.name == name || t.name == suffixed)
}

/// Pair host constants with binary values positionally. `None` when the
/// counts differ; a partial mapping is never produced.
pub(crate) fn pair_enum(
    containing_type: Option<&str>,
    logical_name: &str,
    host_constants: &[String],
    binary: &ReflectedType,
) -> Option<EnumDescriptor> {
    if host_constants.len() != binary.enum_values.len() {
        return None;
    }

    let values = host_constants
        .iter()
        .zip(&binary.enum_values)
        .map(|(logical, value)| EnumMember {
            logical_name: logical.clone(),
            binary_name: value.name.clone(),
            value: value.value,
        })
        .collect();

    Some(EnumDescriptor {
        logical_name: logical_name.to_string(),
        containing_type: containing_type.map(str::to_string),
        binary_full_name: binary.full_name(),
        binary_name: binary.name.clone(),
        is_flags: binary.is_flags,
        values,
    })
}
