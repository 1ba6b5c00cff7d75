use crate::model::Registry;
use crate::query::RegistryStats;
use crate::snapshot::{SnapshotSource, SnapshotStore};
use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InspectTarget {
    Baseline,
    File(PathBuf),
}

impl InspectTarget {
    fn source(&self) -> SnapshotSource {
        match self {
            Self::Baseline => SnapshotSource::EmbeddedBaseline,
            Self::File(path) => SnapshotSource::ExternalFile(path.clone()),
        }
    }
}

pub fn run_inspect(target: InspectTarget) -> Result<()> {
    let Some(registry) = SnapshotStore::new().load(&target.source())? else {
        anyhow::bail!("No readable snapshot at {}", describe(&target));
    };
    print_report(&registry);
    Ok(())
}

fn describe(target: &InspectTarget) -> String {
    match target {
        InspectTarget::Baseline => "bundled baseline".to_string(),
        InspectTarget::File(path) => path.display().to_string(),
    }
}

fn print_report(registry: &Registry) {
    let meta = &registry.metadata;
    let stats = RegistryStats::collect(registry);

    println!("{}", "Snapshot".bold());
    println!("  source:         {}", meta.source.to_string().cyan());
    if let Some(path) = &meta.source_path {
        println!("  path:           {path}");
    }
    println!("  godot version:  {}", meta.godot_version);
    println!("  format version: {}", meta.data_format_version);
    println!("  extracted at:   {}", meta.extracted_at.to_rfc3339());
    println!();
    println!("{}", "Types".bold());
    println!(
        "  {} logical, {} binary variants",
        stats.logical_types, stats.binary_variants
    );
    println!(
        "  {} methods, {} properties, {} signals, {} constants, {} enums",
        stats.methods, stats.properties, stats.signals, stats.constants, stats.enums
    );
    println!("{}", "Global scope".bold());
    println!(
        "  {} methods, {} constants, {} enums, {} type proxies",
        stats.global_methods, stats.global_constants, stats.global_enums, stats.global_types
    );
}
