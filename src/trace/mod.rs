//! Redirect chain tracing.
//!
//! This module provides:
//! - The hop and trace data types
//! - The tracer that follows a chain one request at a time
//! - `Location` resolution against the current hop

mod models;
mod redirects;

// Re-export public API
pub use models::{HopRecord, Trace};
pub use redirects::{resolve_location, trace, RedirectTracer};
