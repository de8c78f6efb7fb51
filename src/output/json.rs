//! JSON rendering.

use std::io::Write;

use anyhow::{Context, Result};

use crate::trace::Trace;

/// Writes a trace as a pretty-printed JSON array followed by a newline.
///
/// Each element has `url`, `status_code` and `duration` (nanoseconds).
pub fn render_json<W: Write>(trace: &Trace, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, trace).context("Failed to serialize trace")?;
    writeln!(out).context("Failed to write trace")?;
    Ok(())
}
