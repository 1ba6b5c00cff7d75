use super::members::{
    ConstantDescriptor, EnumDescriptor, MethodDescriptor, PropertyDescriptor, TypeProxy,
};
use super::types::{TypeDescriptor, TypeVariants};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Snapshot document format version. Bump when the schema changes shape.
pub const DATA_FORMAT_VERSION: u32 = 1;

/// Where a registry came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SnapshotOrigin {
    /// Bundled document shipped inside the binary
    Baseline,
    /// Document read from disk
    File,
    /// Extracted from a loaded module in this process
    #[default]
    Live,
}

impl std::fmt::Display for SnapshotOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Baseline => write!(f, "Baseline"),
            Self::File => write!(f, "File"),
            Self::Live => write!(f, "Live"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub godot_version: String,
    pub data_format_version: u32,
    pub extracted_at: DateTime<Utc>,
    pub source: SnapshotOrigin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_path: Option<String>,
}

impl Metadata {
    pub fn live(godot_version: impl Into<String>) -> Self {
        Self {
            godot_version: godot_version.into(),
            data_format_version: DATA_FORMAT_VERSION,
            extracted_at: Utc::now(),
            source: SnapshotOrigin::Live,
            source_path: None,
        }
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::live(String::new())
    }
}

/// Members visible without a receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GlobalData {
    #[serde(rename = "MethodDatas", default)]
    pub methods: BTreeMap<String, Vec<MethodDescriptor>>,
    #[serde(rename = "PropertyDatas", default)]
    pub properties: BTreeMap<String, PropertyDescriptor>,
    #[serde(rename = "Constants", default)]
    pub constants: BTreeMap<String, ConstantDescriptor>,
    #[serde(rename = "Enums", default)]
    pub enums: BTreeMap<String, Vec<EnumDescriptor>>,
    /// Flattened enum constant name -> names of the enums declaring it
    #[serde(rename = "EnumsConstants", default)]
    pub enum_constants: BTreeMap<String, Vec<String>>,
    #[serde(rename = "GlobalTypes", default)]
    pub types: BTreeMap<String, TypeProxy>,
}

impl GlobalData {
    /// Recompute `enum_constants` from the current enum set.
    pub fn rebuild_enum_constant_index(&mut self) {
        let mut index: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (enum_name, variants) in &self.enums {
            for descriptor in variants {
                for member in &descriptor.values {
                    let owners = index.entry(member.logical_name.clone()).or_default();
                    if !owners.contains(enum_name) {
                        owners.push(enum_name.clone());
                    }
                }
            }
        }
        self.enum_constants = index;
    }

    /// Append methods to an overload set, creating it if needed.
    pub fn append_methods(&mut self, logical_name: &str, methods: &[MethodDescriptor]) {
        if methods.is_empty() {
            return;
        }
        self.methods
            .entry(logical_name.to_string())
            .or_default()
            .extend(methods.iter().cloned());
    }

    pub fn method_count(&self) -> usize {
        self.methods.values().map(Vec::len).sum()
    }
}

/// Root aggregate: metadata, global bucket and the two-level type map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Registry {
    #[serde(rename = "Metadata")]
    pub metadata: Metadata,
    #[serde(rename = "GlobalData", default)]
    pub global: GlobalData,
    #[serde(
        rename = "TypeDatas",
        default,
        serialize_with = "serialize_non_empty_variants"
    )]
    types: BTreeMap<String, TypeVariants>,
}

impl Registry {
    pub fn new(metadata: Metadata) -> Self {
        Self {
            metadata,
            global: GlobalData::default(),
            types: BTreeMap::new(),
        }
    }

    /// Insert a binary variant under its logical name. Returns `false`
    /// (and stores nothing) when either key would be empty.
    pub fn insert_type(&mut self, descriptor: TypeDescriptor) -> bool {
        let full_name = descriptor.binary_full_name();
        if descriptor.logical_name.is_empty() || full_name.is_empty() {
            return false;
        }
        self.types
            .entry(descriptor.logical_name.clone())
            .or_default()
            .insert(full_name, descriptor);
        true
    }

    pub fn variants(&self, logical_name: &str) -> Option<&TypeVariants> {
        self.types
            .get(logical_name)
            .filter(|v| !logical_name.is_empty() && !v.is_empty())
    }

    /// Logical types with at least one variant. Empty keys read back from a
    /// hand-edited document are skipped, as on serialization.
    pub fn types(&self) -> impl Iterator<Item = (&String, &TypeVariants)> {
        self.types
            .iter()
            .filter(|(name, v)| !name.is_empty() && !v.is_empty())
    }

    /// Every binary variant of every logical type.
    pub fn descriptors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types().flat_map(|(_, v)| v.values())
    }

    pub fn type_count(&self) -> usize {
        self.types().count()
    }

    /// Drop logical keys whose variant map ended up empty.
    pub fn prune_empty(&mut self) {
        self.types.retain(|name, variants| {
            variants.retain(|full, _| !full.is_empty());
            !name.is_empty() && !variants.is_empty()
        });
    }
}

fn serialize_non_empty_variants<S>(
    types: &BTreeMap<String, TypeVariants>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    use serde::ser::SerializeMap;

    let non_empty: Vec<_> = types
        .iter()
        .filter(|(name, variants)| !name.is_empty() && !variants.is_empty())
        .collect();
    let mut map = serializer.serialize_map(Some(non_empty.len()))?;
    for (name, variants) in non_empty {
        map.serialize_entry(name, variants)?;
    }
    map.end()
}
