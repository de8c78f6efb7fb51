//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (hop limit, timeouts, URL pattern)
//! - CLI option types and parsing
//! - Transport settings for the tracer

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{Config, LogFormat, LogLevel, OutputFormat, TracerConfig};
