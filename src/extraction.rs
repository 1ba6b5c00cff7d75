//! Live extraction: crosswalk every exported type of a compiled module
//! against the host registry.
//!
//! Top-level types are resolved under their logical name. Nested enum types
//! are resolved as their own descriptors under `Owner.Enum`; other nested
//! types (the name tables among them) are only read through their owner.
//! Instance-shadow types are skipped entirely.

use crate::config::ExtractionConfig;
use crate::host::HostRegistry;
use crate::model::{Metadata, Registry};
use crate::observability::{increment_processed, set_phase, set_progress, PipelinePhase};
use crate::reflection::{CompiledModule, ReflectedType};
use crate::resolver::CrosswalkResolver;
use crate::unresolved::UnresolvedTracker;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info, info_span};

/// Result of one extraction run.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub registry: Registry,
    pub unresolved: UnresolvedTracker,
}

/// Main entry point for extraction.
pub fn extract(
    module: &dyn CompiledModule,
    host: &dyn HostRegistry,
    config: &ExtractionConfig,
) -> Extraction {
    extract_with_progress(module, host, config, |_, _, _| {})
}

/// Extraction with a per-type callback `(processed, total, binary full name)`.
pub fn extract_with_progress<F>(
    module: &dyn CompiledModule,
    host: &dyn HostRegistry,
    config: &ExtractionConfig,
    mut on_type: F,
) -> Extraction
where
    F: FnMut(usize, usize, &str),
{
    let span = info_span!("extraction", module_types = tracing::field::Empty);
    let _span = span.enter();

    let version = match host.version() {
        v if v.is_empty() => module.host_version().unwrap_or_default().to_string(),
        v => v,
    };
    let mut registry = Registry::new(Metadata::live(version));
    let mut unresolved = UnresolvedTracker::new();

    let work = {
        let _span = info_span!("collect_types").entered();
        collect_work(module.exported_types(), config)
    };
    span.record("module_types", work.len());

    let owner_names = work
        .iter()
        .filter(|item| !item.ty.is_enum)
        .map(|item| (item.ty.full_name(), item.logical_name.clone()))
        .collect::<HashMap<_, _>>();

    let resolver = CrosswalkResolver::new(host, config).with_owner_names(owner_names);

    {
        let _span = info_span!("resolve_types").entered();
        let _phase = set_phase(PipelinePhase::Resolving);
        let total = work.len();
        set_progress(0, total);

        for (index, item) in work.iter().enumerate() {
            if !resolver.resolve_into(item.ty, &item.logical_name, &mut registry, &mut unresolved)
            {
                debug!(ty = %item.ty.full_name(), "Type has an empty key, not stored");
            }
            increment_processed();
            on_type(index + 1, total, &item.ty.full_name());
        }
    }

    registry.global.rebuild_enum_constant_index();
    registry.prune_empty();

    info!(
        types = registry.type_count(),
        global_methods = registry.global.method_count(),
        unresolved = unresolved.len(),
        "Extraction complete"
    );

    Extraction {
        registry,
        unresolved,
    }
}

struct WorkItem<'m> {
    ty: &'m ReflectedType,
    logical_name: String,
}

/// Top-level types in module order, each followed by its nested enums.
/// Nested enums listed again at the top level are visited once.
fn collect_work<'m>(
    exported: Vec<&'m ReflectedType>,
    config: &ExtractionConfig,
) -> Vec<WorkItem<'m>> {
    let mut seen = HashSet::new();
    let mut work = Vec::new();

    let top_level: Vec<_> = exported
        .iter()
        .copied()
        .filter(|ty| ty.declaring_type.is_none())
        .collect();

    for ty in &top_level {
        if config.is_instance_shadow(&ty.name) {
            debug!(ty = %ty.full_name(), "Skipping instance-shadow type");
            continue;
        }
        if !seen.insert(ty.full_name()) {
            continue;
        }
        let logical = ty.logical_name().to_string();
        for nested in ty.nested_types.iter().filter(|n| n.is_enum) {
            if seen.insert(nested.full_name()) {
                work.push(WorkItem {
                    ty: nested,
                    logical_name: nested_enum_logical_name(&logical, nested, config),
                });
            }
        }
        work.push(WorkItem {
            ty,
            logical_name: logical,
        });
    }

    // Nested enums the module lists on their own but whose owner was not exported
    for ty in exported.iter().copied() {
        if ty.declaring_type.is_some() && ty.is_enum && seen.insert(ty.full_name()) {
            let owner = ty
                .declaring_type
                .as_deref()
                .and_then(|outer| outer.rsplit(['.', '+']).next())
                .unwrap_or_default();
            work.push(WorkItem {
                ty,
                logical_name: nested_enum_logical_name(owner, ty, config),
            });
        }
    }

    work
}

/// `Node` + `ProcessModeEnum` -> `Node.ProcessMode`
fn nested_enum_logical_name(owner: &str, ty: &ReflectedType, config: &ExtractionConfig) -> String {
    let name = ty.logical_name.as_deref().unwrap_or_else(|| {
        ty.name
            .strip_suffix(config.enum_suffix.as_str())
            .filter(|s| !s.is_empty())
            .unwrap_or(&ty.name)
    });
    format!("{owner}.{name}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{HostClass, HostEnum, StaticHostRegistry};
    use crate::reflection::{ModuleManifest, ReflectedEnumValue};

    fn node_with_enum() -> ReflectedType {
        ReflectedType {
            name: "Node".into(),
            namespace: "Godot".into(),
            nested_types: vec![ReflectedType {
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
            }],
            ..Default::default()
        }
    }

    fn host() -> StaticHostRegistry {
        StaticHostRegistry::new("4.3.stable").with_class(
            "Node",
            HostClass {
                enums: vec![HostEnum {
                    name: "ProcessMode".into(),
                    constants: vec!["PROCESS_MODE_INHERIT".into(), "PROCESS_MODE_ALWAYS".into()],
                }],
                integer_constants: vec!["PROCESS_MODE_INHERIT".into(), "PROCESS_MODE_ALWAYS".into()],
                methods: Vec::new(),
            },
        )
    }

    #[test]
    fn test_nested_enum_gets_its_own_descriptor() {
        let module = ModuleManifest {
            types: vec![node_with_enum()],
            ..Default::default()
        };

        let extraction = extract(&module, &host(), &ExtractionConfig::default());

        assert!(extraction.unresolved.is_empty());
        let registry = &extraction.registry;
        let node = &registry.variants("Node").unwrap()["Godot.Node"];
        assert_eq!(node.enums["ProcessMode"].values.len(), 2);
        let mode = &registry.variants("Node.ProcessMode").unwrap()["Godot.Node+ProcessModeEnum"];
        assert!(mode.is_enum);
        assert_eq!(mode.constants.len(), 2);
        assert_eq!(registry.metadata.godot_version, "4.3.stable");
    }

    #[test]
    fn test_instance_shadow_types_are_skipped() {
        let mut shadow = node_with_enum();
        shadow.name = "NodeInstance".into();
        shadow.nested_types.clear();
        let module = ModuleManifest {
            types: vec![shadow],
            ..Default::default()
        };

        let extraction = extract(&module, &host(), &ExtractionConfig::default());

        assert_eq!(extraction.registry.type_count(), 0);
        assert!(extraction.unresolved.is_empty());
    }

    #[test]
    fn test_nested_enum_listed_twice_is_resolved_once() {
        let node = node_with_enum();
        let nested = node.nested_types[0].clone();
        let module = ModuleManifest {
            types: vec![node, nested],
            ..Default::default()
        };
        let mut visited = Vec::new();

        extract_with_progress(&module, &host(), &ExtractionConfig::default(), |_, _, name| {
            visited.push(name.to_string())
        });

        assert_eq!(visited, vec!["Godot.Node+ProcessModeEnum", "Godot.Node"]);
    }

    #[test]
    fn test_progress_reports_total() {
        let module = ModuleManifest {
            types: vec![node_with_enum()],
            ..Default::default()
        };
        let mut last = (0, 0);

        extract_with_progress(&module, &host(), &ExtractionConfig::default(), |done, total, _| {
            last = (done, total)
        });

        assert_eq!(last, (2, 2));
    }

    #[test]
    fn test_promoted_provider_enum_is_indexed() {
        let gd = ReflectedType {
            name: "GD".into(),
            namespace: "Godot".into(),
            is_static: true,
            nested_types: vec![ReflectedType {
                name: "SeekModeEnum".into(),
                namespace: "Godot".into(),
                declaring_type: Some("Godot.GD".into()),
                is_enum: true,
                enum_values: vec![
                    ReflectedEnumValue {
                        name: "Begin".into(),
                        value: 0,
                    },
                    ReflectedEnumValue {
                        name: "End".into(),
                        value: 1,
                    },
                ],
                ..Default::default()
            }],
            ..Default::default()
        };
        let host = StaticHostRegistry::new("4.3.stable").with_class(
            "GD",
            HostClass {
                enums: vec![HostEnum {
                    name: "SeekMode".into(),
                    constants: vec!["SEEK_BEGIN".into(), "SEEK_END".into()],
                }],
                ..Default::default()
            },
        );
        let module = ModuleManifest {
            types: vec![gd],
            ..Default::default()
        };

        let extraction = extract(&module, &host, &ExtractionConfig::default());

        let global = &extraction.registry.global;
        assert_eq!(global.enums["SeekMode"].len(), 1);
        assert_eq!(global.enum_constants["SEEK_END"], vec!["SeekMode".to_string()]);
        assert_eq!(global.enum_constants.len(), 2);
    }

    #[test]
    fn test_module_version_used_when_host_reports_none() {
        let module = ModuleManifest {
            host_version: Some("4.2.stable".into()),
            ..Default::default()
        };
        let extraction = extract(
            &module,
            &StaticHostRegistry::new(""),
            &ExtractionConfig::default(),
        );
        assert_eq!(extraction.registry.metadata.godot_version, "4.2.stable");
    }
}
