//! Read-only lookups over a [`Registry`].

use crate::model::{EnumDescriptor, MethodDescriptor, Registry, TypeDescriptor};
use crate::naming::to_snake_case;
use serde::Serialize;

/// Every binary variant of a logical type.
pub fn find_types<'r>(registry: &'r Registry, logical_name: &str) -> Vec<&'r TypeDescriptor> {
    registry
        .variants(logical_name)
        .map(|variants| variants.values().collect())
        .unwrap_or_default()
}

/// Known either as a type or as a global type proxy.
pub fn type_exists(registry: &Registry, logical_name: &str) -> bool {
    registry.variants(logical_name).is_some() || registry.global.types.contains_key(logical_name)
}

/// Whether `method` is callable on `type_name` (any variant), or globally
/// when `type_name` is `None`. A PascalCase binary name is accepted too.
pub fn has_method(registry: &Registry, type_name: Option<&str>, method: &str) -> bool {
    let logical = logical_method_name(method);
    match type_name {
        None => registry
            .global
            .methods
            .get(logical.as_str())
            .is_some_and(|overloads| !overloads.is_empty()),
        Some(type_name) => find_types(registry, type_name).iter().any(|ty| {
            ty.methods
                .get(logical.as_str())
                .is_some_and(|overloads| !overloads.is_empty())
        }),
    }
}

pub fn global_methods<'r>(registry: &'r Registry, logical_name: &str) -> &'r [MethodDescriptor] {
    registry
        .global
        .methods
        .get(logical_name)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Global enums declaring a logical constant, via the flattened index.
pub fn enums_for_constant<'r>(registry: &'r Registry, constant: &str) -> Vec<&'r EnumDescriptor> {
    let Some(owners) = registry.global.enum_constants.get(constant) else {
        return Vec::new();
    };
    owners
        .iter()
        .filter_map(|name| registry.global.enums.get(name))
        .flatten()
        .filter(|descriptor| descriptor.member(constant).is_some())
        .collect()
}

fn logical_method_name(name: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_uppercase()) {
        to_snake_case(name)
    } else {
        name.to_string()
    }
}

/// Member counts of a registry, used for round-trip checks and reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistryStats {
    pub logical_types: usize,
    pub binary_variants: usize,
    pub methods: usize,
    pub properties: usize,
    pub signals: usize,
    pub constants: usize,
    pub enums: usize,
    pub global_methods: usize,
    pub global_constants: usize,
    pub global_enums: usize,
    pub global_types: usize,
}

impl RegistryStats {
    pub fn collect(registry: &Registry) -> Self {
        let mut stats = Self {
            logical_types: registry.type_count(),
            global_methods: registry.global.method_count(),
            global_constants: registry.global.constants.len(),
            global_enums: registry.global.enums.values().map(Vec::len).sum(),
            global_types: registry.global.types.len(),
            ..Default::default()
        };

        for ty in registry.descriptors() {
            stats.binary_variants += 1;
            stats.methods += ty.method_count();
            stats.properties += ty.properties.len();
            stats.signals += ty.signals.len();
            stats.constants += ty.constants.len();
            stats.enums += ty.enums.len();
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overrides::{apply_overrides, builtin_overrides, MethodBuilder};

    fn registry() -> Registry {
        let mut registry = Registry::default();
        let mut node = TypeDescriptor {
            logical_name: "Node".into(),
            binary_name: "Node".into(),
            namespace: "Godot".into(),
            ..Default::default()
        };
        node.methods.insert(
            "add_child".into(),
            vec![MethodBuilder::new("add_child", "Godot.Node")
                .param("node", "Godot.Node")
                .build()],
        );
        registry.insert_type(node);
        apply_overrides(&mut registry, builtin_overrides());
        registry
    }

    #[test]
    fn test_type_exists_covers_proxies() {
        let registry = registry();
        assert!(type_exists(&registry, "Node"));
        assert!(type_exists(&registry, "Vector2"));
        assert!(!type_exists(&registry, "Spatial"));
    }

    #[test]
    fn test_has_method_on_type_and_global() {
        let registry = registry();
        assert!(has_method(&registry, Some("Node"), "add_child"));
        assert!(has_method(&registry, Some("Node"), "AddChild"));
        assert!(!has_method(&registry, Some("Node"), "abs"));
        assert!(has_method(&registry, None, "abs"));
        assert!(!has_method(&registry, None, "add_child"));
    }

    #[test]
    fn test_global_methods_missing_is_empty() {
        let registry = registry();
        assert_eq!(global_methods(&registry, "range").len(), 3);
        assert!(global_methods(&registry, "nope").is_empty());
    }

    #[test]
    fn test_enums_for_constant() {
        let registry = registry();
        let enums = enums_for_constant(&registry, "SIDE_TOP");
        assert_eq!(enums.len(), 1);
        assert_eq!(enums[0].logical_name, "Side");
        assert!(enums_for_constant(&registry, "NOT_A_CONSTANT").is_empty());
    }

    #[test]
    fn test_stats() {
        let stats = RegistryStats::collect(&registry());
        assert_eq!(stats.logical_types, 1);
        assert_eq!(stats.binary_variants, 1);
        assert_eq!(stats.methods, 1);
        assert!(stats.global_methods > 0);
        assert_eq!(stats.global_constants, 4);
    }
}
