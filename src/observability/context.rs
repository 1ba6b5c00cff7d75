//! Thread-local context tracking for crash reports.
//!
//! Records which pipeline phase is running and which compiled type is being
//! crosswalked, plus atomic counters for overall extraction progress. Guards
//! restore the previous context on drop.

use std::cell::RefCell;
use std::sync::atomic::{AtomicUsize, Ordering};

static TYPES_PROCESSED: AtomicUsize = AtomicUsize::new(0);
static TYPES_TOTAL: AtomicUsize = AtomicUsize::new(0);

thread_local! {
    static CURRENT_CONTEXT: RefCell<PipelineContext> = const { RefCell::new(PipelineContext::new()) };
}

/// Snapshot of what the pipeline was doing.
#[derive(Debug, Clone, Default)]
pub struct PipelineContext {
    pub phase: Option<PipelinePhase>,
    /// Binary full name of the type being resolved
    pub current_type: Option<String>,
}

impl PipelineContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_type: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Reading a snapshot document
    Loading,
    /// Walking name-table initializers
    Scanning,
    /// Reconciling against the host registry
    Resolving,
    /// Applying the curated override set
    Merging,
    /// Writing a snapshot document
    Persisting,
}

impl std::fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Scanning => write!(f, "scanning"),
            Self::Resolving => write!(f, "resolving"),
            Self::Merging => write!(f, "merging"),
            Self::Persisting => write!(f, "persisting"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: PipelineContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

/// Set the current phase until the guard drops.
#[must_use]
pub fn set_phase(phase: PipelinePhase) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().phase = Some(phase);
        ContextGuard { previous }
    })
}

/// Set the type being resolved until the guard drops.
#[must_use]
pub fn set_current_type(full_name: impl Into<String>) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        ctx.borrow_mut().current_type = Some(full_name.into());
        ContextGuard { previous }
    })
}

pub fn set_progress(processed: usize, total: usize) {
    TYPES_PROCESSED.store(processed, Ordering::Relaxed);
    TYPES_TOTAL.store(total, Ordering::Relaxed);
}

pub fn increment_processed() {
    TYPES_PROCESSED.fetch_add(1, Ordering::Relaxed);
}

#[must_use]
pub fn get_current_context() -> PipelineContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// (processed, total)
#[must_use]
pub fn get_progress() -> (usize, usize) {
    (
        TYPES_PROCESSED.load(Ordering::Relaxed),
        TYPES_TOTAL.load(Ordering::Relaxed),
    )
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = PipelineContext::new();
    });
}
