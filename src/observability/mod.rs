//! Observability infrastructure for crash reports and debugging.
//!
//! - **Panic Hook**: structured crash report naming phase and type
//! - **Context Tracking**: thread-local pipeline phase and current type
//! - **Progress Tracking**: atomic counters for types resolved
//!
//! ```ignore
//! use symbol_crosswalk::observability::{set_phase, set_current_type, PipelinePhase};
//!
//! let _phase = set_phase(PipelinePhase::Resolving);
//! for ty in module.exported_types() {
//!     let _ty = set_current_type(ty.full_name());
//!     // a panic here reports the phase and type
//! }
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, get_progress, increment_processed, reset_context, set_current_type,
    set_phase, set_progress, ContextGuard, PipelineContext, PipelinePhase,
};
pub use panic_hook::install_panic_hook;
