use anyhow::Result;
use clap::Parser;
use symbol_crosswalk::cli::{Cli, Commands};
use symbol_crosswalk::commands::{self, ExtractOptions, InspectTarget};
use symbol_crosswalk::observability::install_panic_hook;
use symbol_crosswalk::progress::ProgressConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    install_panic_hook();

    match cli.command {
        Commands::Extract {
            module,
            host,
            output,
            unresolved_report,
            apply_overrides,
        } => commands::run_extract(ExtractOptions {
            module,
            host,
            output,
            unresolved_report,
            apply_overrides,
            config: cli.config,
            progress: ProgressConfig::from_env(cli.quiet, cli.verbose),
        }),
        Commands::Inspect { file, baseline: _ } => commands::run_inspect(match file {
            Some(path) => InspectTarget::File(path),
            None => InspectTarget::Baseline,
        }),
        Commands::Init { force } => commands::init_config(force),
    }
}

/// `RUST_LOG` wins; otherwise `-v` count picks the level.
fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("symbol_crosswalk={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
