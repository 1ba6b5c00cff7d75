//! Override / merge layer.
//!
//! A curated [`OverrideSet`] is folded into a [`Registry`]'s global bucket in
//! a fixed order:
//!
//! 1. enums (append)
//! 2. methods (append)
//! 3. constants (replace by key)
//! 4. global types (replace by key)
//! 5. properties (replace by key)
//! 6. language built-in methods (append)
//!
//! Appends never remove an existing entry. An incoming method whose
//! signature shape is already in the overload list is skipped, as is an
//! incoming enum whose binary full name is already present, so applying the
//! same set twice leaves the registry unchanged. The enum-constant index is
//! rebuilt after every merge.

mod builders;
mod builtins;

pub use builders::{constant, proxy, static_property, EnumBuilder, MethodBuilder};
pub use builtins::builtin_overrides;

use crate::model::{
    ConstantDescriptor, EnumDescriptor, GlobalData, MethodDescriptor, PropertyDescriptor,
    Registry, TypeProxy,
};
use crate::observability::{set_phase, PipelinePhase};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info_span};

/// Hand-authored global-scope symbols merged on top of extracted data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverrideSet {
    #[serde(default)]
    pub enums: BTreeMap<String, Vec<EnumDescriptor>>,
    #[serde(default)]
    pub methods: BTreeMap<String, Vec<MethodDescriptor>>,
    #[serde(default)]
    pub constants: BTreeMap<String, ConstantDescriptor>,
    #[serde(default)]
    pub global_types: BTreeMap<String, TypeProxy>,
    #[serde(default)]
    pub properties: BTreeMap<String, PropertyDescriptor>,
    /// Language built-ins, merged last so they can widen existing overloads
    #[serde(default)]
    pub builtins: BTreeMap<String, Vec<MethodDescriptor>>,
}

impl OverrideSet {
    pub fn is_empty(&self) -> bool {
        self.enums.is_empty()
            && self.methods.is_empty()
            && self.constants.is_empty()
            && self.global_types.is_empty()
            && self.properties.is_empty()
            && self.builtins.is_empty()
    }
}

/// What one merge changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeSummary {
    pub enums_added: usize,
    pub methods_added: usize,
    pub constants_set: usize,
    pub global_types_set: usize,
    pub properties_set: usize,
    pub builtins_added: usize,
    /// Incoming list entries already present
    pub duplicates_skipped: usize,
}

impl MergeSummary {
    pub fn total_changes(&self) -> usize {
        self.enums_added
            + self.methods_added
            + self.constants_set
            + self.global_types_set
            + self.properties_set
            + self.builtins_added
    }
}

/// Merge `overrides` into `registry.global`.
pub fn apply_overrides(registry: &mut Registry, overrides: &OverrideSet) -> MergeSummary {
    let _span = info_span!("apply_overrides").entered();
    let _phase = set_phase(PipelinePhase::Merging);

    let global = &mut registry.global;
    let mut summary = MergeSummary::default();

    for (name, incoming) in &overrides.enums {
        let (added, skipped) = append_enums(global, name, incoming);
        summary.enums_added += added;
        summary.duplicates_skipped += skipped;
    }

    for (name, incoming) in &overrides.methods {
        let (added, skipped) = append_methods(global, name, incoming);
        summary.methods_added += added;
        summary.duplicates_skipped += skipped;
    }

    summary.constants_set = replace_by_key(&mut global.constants, &overrides.constants);
    summary.global_types_set = replace_by_key(&mut global.types, &overrides.global_types);
    summary.properties_set = replace_by_key(&mut global.properties, &overrides.properties);

    for (name, incoming) in &overrides.builtins {
        let (added, skipped) = append_methods(global, name, incoming);
        summary.builtins_added += added;
        summary.duplicates_skipped += skipped;
    }

    global.rebuild_enum_constant_index();

    debug!(
        enums = summary.enums_added,
        methods = summary.methods_added,
        constants = summary.constants_set,
        global_types = summary.global_types_set,
        properties = summary.properties_set,
        builtins = summary.builtins_added,
        skipped = summary.duplicates_skipped,
        "Overrides applied"
    );

    summary
}

/// Returns (added, skipped).
fn append_methods(
    global: &mut GlobalData,
    name: &str,
    incoming: &[MethodDescriptor],
) -> (usize, usize) {
    let overloads = global.methods.entry(name.to_string()).or_default();
    let before = overloads.len();
    for method in incoming {
        if !overloads.iter().any(|existing| existing.same_shape(method)) {
            overloads.push(method.clone());
        }
    }
    let added = overloads.len() - before;
    if overloads.is_empty() {
        global.methods.remove(name);
    }
    (added, incoming.len() - added)
}

fn append_enums(
    global: &mut GlobalData,
    name: &str,
    incoming: &[EnumDescriptor],
) -> (usize, usize) {
    let variants = global.enums.entry(name.to_string()).or_default();
    let before = variants.len();
    for descriptor in incoming {
        if !variants
            .iter()
            .any(|existing| existing.binary_full_name == descriptor.binary_full_name)
        {
            variants.push(descriptor.clone());
        }
    }
    let added = variants.len() - before;
    if variants.is_empty() {
        global.enums.remove(name);
    }
    (added, incoming.len() - added)
}

fn replace_by_key<V: Clone>(
    target: &mut BTreeMap<String, V>,
    incoming: &BTreeMap<String, V>,
) -> usize {
    for (key, value) in incoming {
        target.insert(key.clone(), value.clone());
    }
    incoming.len()
}
