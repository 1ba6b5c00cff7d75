//! Integer constants.
//!
//! The host's constant list, minus constants owned by the type's enums, must
//! line up one-to-one with the type's public literal fields. Any count
//! difference discards every constant of the type.

use crate::host::HostRegistry;
use crate::model::ConstantDescriptor;
use crate::reflection::ReflectedType;
use crate::unresolved::UnresolvedTracker;
use std::collections::{BTreeMap, HashSet};

pub(crate) fn resolve_constants(
    host: &dyn HostRegistry,
    ty: &ReflectedType,
    logical_type: &str,
    unresolved: &mut UnresolvedTracker,
) -> BTreeMap<String, ConstantDescriptor> {
    let enum_owned: HashSet<String> = host
        .list_enums(logical_type)
        .iter()
        .flat_map(|e| host.list_enum_constants(logical_type, e))
        .collect();

    let host_constants: Vec<String> = host
        .list_integer_constants(logical_type)
        .into_iter()
        .filter(|c| !enum_owned.contains(c))
        .collect();

    if host_constants.len() != ty.literal_fields.len() {
        tracing::debug!(
            ty = %ty.full_name(),
            host = host_constants.len(),
            binary = ty.literal_fields.len(),
            "Constant count mismatch"
        );
        unresolved.constants_type_mismatch(logical_type, ty.full_name());
        return BTreeMap::new();
    }

    let declaring = ty.full_name();
    host_constants
        .into_iter()
        .zip(&ty.literal_fields)
        .map(|(logical, field)| {
            let descriptor = ConstantDescriptor {
                logical_name: logical.clone(),
                binary_name: field.name.clone(),
                value_type: field.field_type.full_name.clone(),
                declaring_type: declaring.clone(),
                value: field.value.clone(),
            };
            (logical, descriptor)
        })
        .collect()
}

/// Constants of an enum type are its own values. A declaring-type-less enum
/// is global and left for manual mapping.
///
/// `owner_resolved` is set when the declaring type is crosswalked in the same
/// run; its enum pass has then already reported a count mismatch for any
/// enum the host lists on it.
pub(crate) fn enum_type_constants(
    host: &dyn HostRegistry,
    ty: &ReflectedType,
    owner_logical: Option<&str>,
    owner_resolved: bool,
    host_enum_name: &str,
    logical_type: &str,
    unresolved: &mut UnresolvedTracker,
) -> BTreeMap<String, ConstantDescriptor> {
    let Some(owner) = owner_logical.filter(|_| ty.declaring_type.is_some()) else {
        tracing::debug!(ty = %ty.full_name(), "Global enum needs manual mapping");
        unresolved.global_enum_needs_manual_mapping(logical_type, ty.full_name());
        return BTreeMap::new();
    };

    let host_constants = host.list_enum_constants(owner, host_enum_name);
    if host_constants.len() != ty.enum_values.len() {
        let reported_by_owner =
            owner_resolved && host.list_enums(owner).iter().any(|e| e == host_enum_name);
        if !reported_by_owner {
            unresolved.constants_type_mismatch(logical_type, ty.full_name());
        }
        return BTreeMap::new();
    }

    let full_name = ty.full_name();
    host_constants
        .into_iter()
        .zip(&ty.enum_values)
        .map(|(logical, value)| {
            let descriptor = ConstantDescriptor {
                logical_name: logical.clone(),
                binary_name: value.name.clone(),
                value_type: full_name.clone(),
                declaring_type: full_name.clone(),
                value: value.value.to_string(),
            };
            (logical, descriptor)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostClass, HostEnum, StaticHostRegistry};
    use crate::model::TypeReference;
    use crate::reflection::{LiteralField, ReflectedEnumValue};
    use crate::unresolved::UnresolvedKind;

    fn literal(name: &str, value: i64) -> LiteralField {
        LiteralField {
            name: name.into(),
            field_type: TypeReference::from_full_name("System.Int64"),
            value: value.to_string(),
        }
    }

    fn host(integer_constants: &[&str], enums: Vec<HostEnum>) -> StaticHostRegistry {
        StaticHostRegistry::new("4.3").with_class(
            "Node",
            HostClass {
                enums,
                integer_constants: integer_constants.iter().map(|s| s.to_string()).collect(),
                methods: Vec::new(),
            },
        )
    }

    fn node(fields: Vec<LiteralField>) -> ReflectedType {
        ReflectedType {
            name: "Node".into(),
            namespace: "Godot".into(),
            literal_fields: fields,
            ..Default::default()
        }
    }

    #[test]
    fn test_enum_constants_are_subtracted_before_pairing() {
        let host = host(
            &[
                "NOTIFICATION_READY",
                "PROCESS_MODE_INHERIT",
                "NOTIFICATION_PAUSED",
            ],
            vec![HostEnum {
                name: "ProcessMode".into(),
                constants: vec!["PROCESS_MODE_INHERIT".into()],
            }],
        );
        let ty = node(vec![
            literal("NotificationReady", 13),
            literal("NotificationPaused", 14),
        ]);
        let mut unresolved = UnresolvedTracker::new();

        let constants = resolve_constants(&host, &ty, "Node", &mut unresolved);

        assert!(unresolved.is_empty());
        assert_eq!(constants.len(), 2);
        let paused = &constants["NOTIFICATION_PAUSED"];
        assert_eq!(paused.binary_name, "NotificationPaused");
        assert_eq!(paused.value, "14");
        assert_eq!(paused.value_type, "System.Int64");
        assert_eq!(paused.declaring_type, "Godot.Node");
    }

    #[test]
    fn test_count_mismatch_discards_all_constants() {
        let names: Vec<String> = (0..48).map(|i| format!("CONST_{i}")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let host = host(&refs, Vec::new());
        let ty = node((0..47).map(|i| literal(&format!("Const{i}"), i)).collect());
        let mut unresolved = UnresolvedTracker::new();

        let constants = resolve_constants(&host, &ty, "Node", &mut unresolved);

        assert!(constants.is_empty());
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved.count(UnresolvedKind::ConstantsTypeMismatch), 1);
        assert_eq!(unresolved.entries()[0].logical_type(), "Node");
    }

    #[test]
    fn test_type_without_constants_is_silent() {
        let host = host(&[], Vec::new());
        let mut unresolved = UnresolvedTracker::new();
        let constants = resolve_constants(&host, &node(Vec::new()), "Node", &mut unresolved);
        assert!(constants.is_empty());
        assert!(unresolved.is_empty());
    }

    #[test]
    fn test_global_enum_needs_manual_mapping() {
        let host = host(&[], Vec::new());
        let ty = ReflectedType {
            name: "Error".into(),
            namespace: "Godot".into(),
            is_enum: true,
            enum_values: vec![ReflectedEnumValue {
                name: "Ok".into(),
                value: 0,
            }],
            ..Default::default()
        };
        let mut unresolved = UnresolvedTracker::new();

        let constants =
            enum_type_constants(&host, &ty, None, false, "Error", "Error", &mut unresolved);

        assert!(constants.is_empty());
        assert_eq!(
            unresolved.count(UnresolvedKind::GlobalEnumNeedsManualMapping),
            1
        );
    }

    #[test]
    fn test_nested_enum_values_become_constants() {
        let host = host(
            &[],
            vec![HostEnum {
                name: "ProcessMode".into(),
                constants: vec!["PROCESS_MODE_INHERIT".into(), "PROCESS_MODE_ALWAYS".into()],
            }],
        );
        let ty = ReflectedType {
            name: "ProcessModeEnum".into(),
            namespace: "Godot".into(),
            declaring_type: Some("Godot.Node".into()),
            is_enum: true,
            enum_values: vec![
                ReflectedEnumValue {
                    name: "Inherit".into(),
                    value: 0,
                },
                ReflectedEnumValue {
                    name: "Always".into(),
                    value: 3,
                },
            ],
            ..Default::default()
        };
        let mut unresolved = UnresolvedTracker::new();

        let constants = enum_type_constants(
            &host,
            &ty,
            Some("Node"),
            true,
            "ProcessMode",
            "Node.ProcessMode",
            &mut unresolved,
        );

        assert!(unresolved.is_empty());
        assert_eq!(constants["PROCESS_MODE_ALWAYS"].value, "3");
        assert_eq!(
            constants["PROCESS_MODE_ALWAYS"].declaring_type,
            "Godot.Node+ProcessModeEnum"
        );
    }

    fn three_value_host() -> StaticHostRegistry {
        host(
            &[],
            vec![HostEnum {
                name: "ProcessMode".into(),
                constants: vec!["A".into(), "B".into(), "C".into()],
            }],
        )
    }

    fn two_value_enum() -> ReflectedType {
        ReflectedType {
            name: "ProcessModeEnum".into(),
            namespace: "Godot".into(),
            declaring_type: Some("Godot.Node".into()),
            is_enum: true,
            enum_values: ["A", "B"]
                .iter()
                .enumerate()
                .map(|(i, name)| ReflectedEnumValue {
                    name: (*name).into(),
                    value: i as i64,
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_mismatch_left_to_resolved_owner() {
        let mut unresolved = UnresolvedTracker::new();

        let constants = enum_type_constants(
            &three_value_host(),
            &two_value_enum(),
            Some("Node"),
            true,
            "ProcessMode",
            "Node.ProcessMode",
            &mut unresolved,
        );

        assert!(constants.is_empty());
        assert!(unresolved.is_empty());
    }

    #[test]
    fn test_mismatch_recorded_without_owner() {
        let mut unresolved = UnresolvedTracker::new();

        let constants = enum_type_constants(
            &three_value_host(),
            &two_value_enum(),
            Some("Node"),
            false,
            "ProcessMode",
            "Node.ProcessMode",
            &mut unresolved,
        );

        assert!(constants.is_empty());
        assert_eq!(unresolved.count(UnresolvedKind::ConstantsTypeMismatch), 1);
        assert_eq!(unresolved.entries()[0].logical_type(), "Node.ProcessMode");
    }
}
