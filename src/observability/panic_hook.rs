//! Custom panic hook for structured crash reports.
//!
//! A crash mid-extraction should say which phase was running and which
//! compiled type was being resolved, so the offending metadata can be
//! isolated.

use super::context::{get_current_context, get_progress, PipelineContext};
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Install the custom panic hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    let (processed, total) = get_progress();

    eprintln!();
    eprintln!("==================== CROSSWALK CRASH REPORT ====================");
    eprintln!("  Version:  {}", VERSION);
    eprintln!("  Platform: {}", std::env::consts::OS);
    eprintln!(
        "  Time:     {}",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    );
    eprintln!("  PANIC:    {}", extract_panic_message(info));
    if let Some(location) = info.location() {
        eprintln!(
            "  Location: {}:{}:{}",
            location.file(),
            location.line(),
            location.column()
        );
    }
    for line in context_lines(&context, processed, total) {
        eprintln!("  {}", line);
    }
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!("{}", std::backtrace::Backtrace::capture());
    } else {
        eprintln!("  Run with RUST_BACKTRACE=1 for stack trace");
    }
    eprintln!("================================================================");
}

fn context_lines(context: &PipelineContext, processed: usize, total: usize) -> Vec<String> {
    let mut lines = Vec::new();

    match &context.phase {
        Some(phase) => lines.push(format!("Phase:    {}", phase)),
        None => lines.push("Phase:    (not set)".to_string()),
    }

    let span = Span::current();
    if let Some(metadata) = span.metadata() {
        lines.push(format!("Span:     {}", metadata.name()));
    }

    if let Some(ty) = &context.current_type {
        lines.push(format!("Type:     {}", ty));
    }

    if total > 0 {
        let pct = processed * 100 / total;
        lines.push(format!(
            "Progress: {} / {} types ({}%)",
            processed, total, pct
        ));
    }

    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}
