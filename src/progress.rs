//! Terminal progress for extraction runs, via `indicatif`.
//!
//! Bars are hidden in quiet mode (`--quiet` or `CROSSWALK_QUIET`) and when
//! stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;

pub const TEMPLATE_TYPES: &str = "{msg} [{bar:40}] {pos}/{len} types ({percent}%) - {eta}";

#[derive(Debug, Clone, Default)]
pub struct ProgressConfig {
    pub quiet_mode: bool,
    /// 0 = bars only, 1+ = also name the type being resolved
    pub verbosity: u8,
}

impl ProgressConfig {
    pub fn from_env(quiet: bool, verbosity: u8) -> Self {
        Self {
            quiet_mode: quiet || std::env::var("CROSSWALK_QUIET").is_ok(),
            verbosity,
        }
    }

    pub fn should_show_progress(&self) -> bool {
        !self.quiet_mode && std::io::stderr().is_terminal()
    }
}

/// Bar over `len` types, or a hidden bar when progress is suppressed.
pub fn create_bar(config: &ProgressConfig, len: u64, template: &str) -> ProgressBar {
    if !config.should_show_progress() {
        return ProgressBar::hidden();
    }

    let style = ProgressStyle::default_bar()
        .template(template)
        .map(|s| s.progress_chars("█▓▒░  "))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    let pb = ProgressBar::new(len);
    pb.set_style(style);
    pb
}
