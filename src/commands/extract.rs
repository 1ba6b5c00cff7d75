use crate::config::{load_config, load_config_from, CrosswalkConfig};
use crate::extraction::{extract_with_progress, Extraction};
use crate::host::StaticHostRegistry;
use crate::overrides::{apply_overrides, builtin_overrides};
use crate::paths::PathResolver;
use crate::progress::{create_bar, ProgressConfig, TEMPLATE_TYPES};
use crate::query::RegistryStats;
use crate::reflection::ModuleManifest;
use crate::snapshot::SnapshotStore;
use crate::unresolved::{UnresolvedKind, UnresolvedTracker};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ExtractOptions {
    pub module: PathBuf,
    pub host: PathBuf,
    pub output: Option<String>,
    pub unresolved_report: Option<PathBuf>,
    pub apply_overrides: bool,
    pub config: Option<PathBuf>,
    pub progress: ProgressConfig,
}

pub fn run_extract(options: ExtractOptions) -> Result<()> {
    let config = match &options.config {
        Some(path) => load_config_from(path),
        None => load_config(),
    };

    let module = ModuleManifest::from_path(&options.module)
        .with_context(|| format!("Failed to load module {}", options.module.display()))?;
    let host = StaticHostRegistry::from_path(&options.host)
        .with_context(|| format!("Failed to load host registry {}", options.host.display()))?;

    let pb = create_bar(
        &options.progress,
        module.types.len() as u64,
        TEMPLATE_TYPES,
    );
    pb.set_message("Resolving");
    let verbose = options.progress.verbosity > 0;
    let Extraction {
        mut registry,
        unresolved,
    } = extract_with_progress(&module, &host, &config.extraction, |done, total, name| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
        if verbose {
            pb.set_message(name.to_string());
        }
    });
    pb.finish_and_clear();

    if options.apply_overrides {
        let summary = apply_overrides(&mut registry, builtin_overrides());
        log::info!("Override merge changed {} entries", summary.total_changes());
    }

    let output = resolve_output(&config, options.output.as_deref())?;
    let written = SnapshotStore::save(&registry, output.as_deref())
        .context("Failed to save snapshot")?;

    if let Some(report) = &options.unresolved_report {
        write_report(report, &unresolved)?;
    }

    print_summary(&RegistryStats::collect(&registry), &unresolved, &written);
    Ok(())
}

/// CLI flag first, then `[output] path`, else the store's default location.
fn resolve_output(config: &CrosswalkConfig, flag: Option<&str>) -> Result<Option<PathBuf>> {
    let Some(raw) = flag.or(config.output.path.as_deref()) else {
        return Ok(None);
    };
    let resolver = PathResolver::from_config(&config.output)?;
    Ok(Some(resolver.resolve(raw)?))
}

fn write_report(path: &Path, unresolved: &UnresolvedTracker) -> Result<()> {
    let json = serde_json::to_string_pretty(unresolved.entries())?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write unresolved report {}", path.display()))?;
    Ok(())
}

fn print_summary(
    stats: &RegistryStats,
    unresolved: &UnresolvedTracker,
    written: &Path,
) {
    println!("{}", "Extraction complete".green().bold());
    println!(
        "  {} logical types, {} binary variants",
        stats.logical_types, stats.binary_variants
    );
    println!(
        "  {} methods, {} properties, {} signals, {} constants, {} enums",
        stats.methods, stats.properties, stats.signals, stats.constants, stats.enums
    );
    println!("  {} global methods", stats.global_methods);

    if unresolved.is_empty() {
        println!("  {}", "no unresolved entries".green());
    } else {
        println!(
            "  {} unresolved: {} constants mismatches, {} enums not found, {} global enums",
            unresolved.len().to_string().yellow(),
            unresolved.count(UnresolvedKind::ConstantsTypeMismatch),
            unresolved.count(UnresolvedKind::EnumNotFound),
            unresolved.count(UnresolvedKind::GlobalEnumNeedsManualMapping)
        );
    }

    println!("  saved to {}", written.display().to_string().cyan());
}
