use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "crosswalk")]
#[command(about = "Crosswalk script-side symbol names to compiled binding members", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file (defaults to .crosswalk.toml discovered upwards)
    #[arg(long, global = true, env = "CROSSWALK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract a snapshot from a reflected module and a host class dump
    Extract {
        /// Reflected module manifest (JSON)
        #[arg(long)]
        module: PathBuf,

        /// Host registry dump (JSON)
        #[arg(long)]
        host: PathBuf,

        /// Snapshot destination; accepts res:// and user:// paths
        #[arg(short, long)]
        output: Option<String>,

        /// Write unresolved entries to this file as JSON
        #[arg(long = "unresolved-report")]
        unresolved_report: Option<PathBuf>,

        /// Merge the builtin override set before saving
        #[arg(long = "apply-overrides")]
        apply_overrides: bool,
    },

    /// Print statistics for a snapshot
    Inspect {
        /// Snapshot file to read
        #[arg(long, conflicts_with = "baseline")]
        file: Option<PathBuf>,

        /// Inspect the bundled baseline snapshot
        #[arg(long)]
        baseline: bool,
    },

    /// Write a default .crosswalk.toml
    Init {
        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },
}
