//! Error handling and failure statistics.
//!
//! This module provides:
//! - Error type definitions for initialization and tracing
//! - Failure categorization by kind
//! - Per-run failure counters

mod stats;
mod types;

// Re-export public API
pub use stats::TraceStats;
pub use types::{InitializationError, TraceError, TraceErrorKind, TraceFailure};
