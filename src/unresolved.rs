//! Quarantine for crosswalks that could not be completed automatically.
//!
//! Entries are structured records, never free-text reasons, so diagnostics
//! can filter them. Recording an entry never affects control flow.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum UnresolvedEntry {
    /// Host constant count differs from the reflected literal/enum count
    ConstantsTypeMismatch {
        logical_type: String,
        binary_type: String,
    },
    /// Host reports an enum with no matching nested binary enum
    EnumNotFound {
        logical_type: String,
        binary_type: String,
        enum_name: String,
    },
    /// Enum without a declaring type; must be mapped by hand
    GlobalEnumNeedsManualMapping {
        logical_type: String,
        binary_type: String,
    },
}

impl UnresolvedEntry {
    pub fn logical_type(&self) -> &str {
        match self {
            Self::ConstantsTypeMismatch { logical_type, .. }
            | Self::EnumNotFound { logical_type, .. }
            | Self::GlobalEnumNeedsManualMapping { logical_type, .. } => logical_type,
        }
    }

    pub fn binary_type(&self) -> &str {
        match self {
            Self::ConstantsTypeMismatch { binary_type, .. }
            | Self::EnumNotFound { binary_type, .. }
            | Self::GlobalEnumNeedsManualMapping { binary_type, .. } => binary_type,
        }
    }

    pub fn kind(&self) -> UnresolvedKind {
        match self {
            Self::ConstantsTypeMismatch { .. } => UnresolvedKind::ConstantsTypeMismatch,
            Self::EnumNotFound { .. } => UnresolvedKind::EnumNotFound,
            Self::GlobalEnumNeedsManualMapping { .. } => {
                UnresolvedKind::GlobalEnumNeedsManualMapping
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnresolvedKind {
    ConstantsTypeMismatch,
    EnumNotFound,
    GlobalEnumNeedsManualMapping,
}

impl std::fmt::Display for UnresolvedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConstantsTypeMismatch => write!(f, "constants-type-mismatch"),
            Self::EnumNotFound => write!(f, "enum-not-found"),
            Self::GlobalEnumNeedsManualMapping => write!(f, "global-enum-needs-manual-mapping"),
        }
    }
}

/// Append-only accumulator. No dedup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnresolvedTracker {
    entries: Vec<UnresolvedEntry>,
}

impl UnresolvedTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constants_type_mismatch(
        &mut self,
        logical_type: impl Into<String>,
        binary_type: impl Into<String>,
    ) {
        self.entries.push(UnresolvedEntry::ConstantsTypeMismatch {
            logical_type: logical_type.into(),
            binary_type: binary_type.into(),
        });
    }

    pub fn enum_not_found(
        &mut self,
        logical_type: impl Into<String>,
        binary_type: impl Into<String>,
        enum_name: impl Into<String>,
    ) {
        self.entries.push(UnresolvedEntry::EnumNotFound {
            logical_type: logical_type.into(),
            binary_type: binary_type.into(),
            enum_name: enum_name.into(),
        });
    }

    pub fn global_enum_needs_manual_mapping(
        &mut self,
        logical_type: impl Into<String>,
        binary_type: impl Into<String>,
    ) {
        self.entries
            .push(UnresolvedEntry::GlobalEnumNeedsManualMapping {
                logical_type: logical_type.into(),
                binary_type: binary_type.into(),
            });
    }

    pub fn entries(&self) -> &[UnresolvedEntry] {
        &self.entries
    }

    pub fn of_kind(&self, kind: UnresolvedKind) -> impl Iterator<Item = &UnresolvedEntry> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }

    pub fn count(&self, kind: UnresolvedKind) -> usize {
        self.of_kind(kind).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
