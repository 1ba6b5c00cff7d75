//! Symbol crosswalk: map script-side (logical) symbol names onto the members
//! of a compiled binding module, checked against the host engine's own
//! symbol lists, with a curated override layer and JSON snapshots.
//!
//! Pipeline:
//!
//! 1. [`scanner`] recovers `logical name -> field` bindings from name-table
//!    static initializers.
//! 2. [`resolver`] joins those bindings with reflected members and the
//!    [`host`] registry's enum and constant lists.
//! 3. [`unresolved`] collects what could not be reconciled.
//! 4. [`overrides`] merges hand-curated global-scope symbols.
//! 5. [`snapshot`] loads and saves the resulting [`Registry`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod errors;
pub mod extraction;
pub mod host;
pub mod model;
pub mod naming;
pub mod observability;
pub mod overrides;
pub mod paths;
pub mod progress;
pub mod query;
pub mod reflection;
pub mod resolver;
pub mod scanner;
pub mod snapshot;
pub mod unresolved;

pub use crate::errors::{Error, Result};
pub use crate::extraction::{extract, extract_with_progress, Extraction};
pub use crate::host::{HostRegistry, StaticHostRegistry};
pub use crate::model::{
    GlobalData, Metadata, MethodDescriptor, Registry, SnapshotOrigin, TypeDescriptor,
};
pub use crate::overrides::{apply_overrides, builtin_overrides, MergeSummary, OverrideSet};
pub use crate::reflection::{CompiledModule, ModuleManifest, ReflectedType};
pub use crate::resolver::CrosswalkResolver;
pub use crate::scanner::{BindingScanner, LiteralStoreScanner, NameBinding};
pub use crate::snapshot::{SnapshotSource, SnapshotStore};
pub use crate::unresolved::{UnresolvedEntry, UnresolvedKind, UnresolvedTracker};
