//! Snapshot store: load a [`Registry`] from one of three sources and persist
//! it as a JSON document.
//!
//! | source             | overrides applied | `Metadata.source` |
//! |--------------------|-------------------|-------------------|
//! | `EmbeddedBaseline` | always            | `Baseline`        |
//! | `ExternalFile`     | never             | `File`            |
//! | `LiveExtraction`   | never             | `Live`            |
//!
//! A missing or unreadable document is an absence (`Ok(None)`), not an
//! error; so is a document written in another data format version. Invalid
//! arguments (empty paths, no live context) are errors.

mod baseline;

use crate::config::ExtractionConfig;
use crate::errors::{Error, Result};
use crate::extraction::extract;
use crate::host::HostRegistry;
use crate::model::{Registry, SnapshotOrigin, DATA_FORMAT_VERSION};
use crate::observability::{set_phase, PipelinePhase};
use crate::overrides::{apply_overrides, builtin_overrides};
use crate::reflection::CompiledModule;
use std::fs;
use std::path::{Path, PathBuf};

/// File name used when `save` is given no destination.
pub const DEFAULT_SNAPSHOT_FILE: &str = "AssemblyData.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotSource {
    EmbeddedBaseline,
    ExternalFile(PathBuf),
    LiveExtraction,
}

/// Module and host needed to answer [`SnapshotSource::LiveExtraction`].
pub struct LiveContext<'a> {
    pub module: &'a dyn CompiledModule,
    pub host: &'a dyn HostRegistry,
    pub config: ExtractionConfig,
}

#[derive(Default)]
pub struct SnapshotStore<'a> {
    live: Option<LiveContext<'a>>,
}

impl<'a> SnapshotStore<'a> {
    pub fn new() -> Self {
        Self { live: None }
    }

    pub fn with_live_context(
        mut self,
        module: &'a dyn CompiledModule,
        host: &'a dyn HostRegistry,
        config: ExtractionConfig,
    ) -> Self {
        self.live = Some(LiveContext {
            module,
            host,
            config,
        });
        self
    }

    pub fn load(&self, source: &SnapshotSource) -> Result<Option<Registry>> {
        let _phase = set_phase(PipelinePhase::Loading);
        match source {
            SnapshotSource::EmbeddedBaseline => Ok(self.load_baseline()),
            SnapshotSource::ExternalFile(path) => self.load_file(path),
            SnapshotSource::LiveExtraction => self.load_live().map(Some),
        }
    }

    fn load_baseline(&self) -> Option<Registry> {
        let mut registry = baseline::parse_baseline(baseline::BASELINE_DOCUMENT)?;
        let summary = apply_overrides(&mut registry, builtin_overrides());
        log::debug!(
            "Applied {} override changes to baseline snapshot",
            summary.total_changes()
        );
        registry.metadata.source = SnapshotOrigin::Baseline;
        registry.metadata.source_path = None;
        Some(registry)
    }

    fn load_file(&self, path: &Path) -> Result<Option<Registry>> {
        if path.as_os_str().is_empty() {
            return Err(Error::invalid_argument("snapshot path is empty"));
        }
        if !path.exists() {
            log::debug!("Snapshot file {} does not exist", path.display());
            return Ok(None);
        }

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Failed to read snapshot {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        let mut registry: Registry = match serde_json::from_str(&contents) {
            Ok(registry) => registry,
            Err(e) => {
                log::warn!("Failed to parse snapshot {}: {}", path.display(), e);
                return Ok(None);
            }
        };

        if registry.metadata.data_format_version != DATA_FORMAT_VERSION {
            log::warn!(
                "Snapshot {} has data format version {}, expected {}",
                path.display(),
                registry.metadata.data_format_version,
                DATA_FORMAT_VERSION
            );
            return Ok(None);
        }

        registry.metadata.source = SnapshotOrigin::File;
        registry.metadata.source_path = Some(path.display().to_string());
        log::info!(
            "Loaded {} types from {}",
            registry.type_count(),
            path.display()
        );
        Ok(Some(registry))
    }

    fn load_live(&self) -> Result<Registry> {
        let live = self.live.as_ref().ok_or_else(|| {
            Error::invalid_argument("live extraction requires a module and host registry")
        })?;

        let extraction = extract(live.module, live.host, &live.config);
        for entry in extraction.unresolved.entries() {
            log::debug!(
                "Unresolved {}: {} ({})",
                entry.kind(),
                entry.logical_type(),
                entry.binary_type()
            );
        }
        if !extraction.unresolved.is_empty() {
            log::info!(
                "Live extraction left {} unresolved entries",
                extraction.unresolved.len()
            );
        }
        Ok(extraction.registry)
    }

    /// Write `registry` as compact JSON. Without a destination, writes
    /// [`DEFAULT_SNAPSHOT_FILE`] next to the running executable. Returns the
    /// path written.
    pub fn save(registry: &Registry, path: Option<&Path>) -> Result<PathBuf> {
        let _phase = set_phase(PipelinePhase::Persisting);

        let path = match path {
            Some(p) if p.as_os_str().is_empty() => {
                return Err(Error::invalid_argument("snapshot path is empty"));
            }
            Some(p) => p.to_path_buf(),
            None => default_snapshot_path()?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                Error::file_system("Failed to create snapshot directory", parent, e)
            })?;
        }

        let json = serde_json::to_string(registry)?;
        fs::write(&path, json)
            .map_err(|e| Error::file_system("Failed to write snapshot", &path, e))?;

        log::info!(
            "Saved {} types to {}",
            registry.type_count(),
            path.display()
        );
        Ok(path)
    }
}

fn default_snapshot_path() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    let dir = exe
        .parent()
        .ok_or_else(|| Error::Configuration("executable has no parent directory".to_string()))?;
    Ok(dir.join(DEFAULT_SNAPSHOT_FILE))
}
