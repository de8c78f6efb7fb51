//! Trace rendering.
//!
//! Renders a finished trace to any writer as JSON or as a colored table.

mod json;
mod table;

use std::io::Write;

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::trace::Trace;

pub use json::render_json;
pub use table::{format_millis, render_table};

/// Renders a trace in the selected format.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn render<W: Write>(trace: &Trace, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Json => render_json(trace, out),
        OutputFormat::Table => render_table(trace, out).context("Failed to write table"),
    }
}
