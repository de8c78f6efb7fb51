//! Colored table rendering.
//!
//! Colors follow `colored`'s terminal detection: they are emitted on a TTY and
//! dropped when stdout is piped, so redirected output stays plain text.
//! `CLICOLOR_FORCE=1` forces them on and `NO_COLOR` turns them off. The logger
//! never overrides this setting.

use std::io::{self, Write};
use std::time::Duration;

use chrono::Local;
use colored::*;

use crate::trace::{HopRecord, Trace};

const ARROW_EMOJI: &str = "➡️";
const CHECK_EMOJI: &str = "✅";
const ROCKET_EMOJI: &str = "🚀";

// RFC 1123, e.g. `Mon, 02 Jan 2006 15:04:05 +01:00`
const FOOTER_TIME_FORMAT: &str = "%a, %d %b %Y %H:%M:%S %Z";

/// Formats a duration as whole milliseconds, e.g. `123ms`.
pub fn format_millis(duration: Duration) -> String {
    format!("{}ms", duration.as_millis())
}

/// Writes a trace as a table, one row per hop, followed by a completion line.
///
/// Redirect hops have their status and duration in yellow, terminal hops in
/// green. The last row is marked with a check emoji, earlier rows with an arrow.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render_table<W: Write>(trace: &Trace, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        " {}",
        format!("{:<3} {:<50} {:<12} {:<15}", "#", "URL", "Status", "Duration").yellow()
    )?;

    let last = trace.len().saturating_sub(1);
    for (i, hop) in trace.iter().enumerate() {
        let emoji = if i == last { CHECK_EMOJI } else { ARROW_EMOJI };
        write_row(out, i + 1, hop, emoji)?;
    }

    writeln!(out)?;
    writeln!(
        out,
        "{} Finished at {}",
        ROCKET_EMOJI,
        Local::now().format(FOOTER_TIME_FORMAT)
    )
}

fn write_row<W: Write>(out: &mut W, position: usize, hop: &HopRecord, emoji: &str) -> io::Result<()> {
    let status = format!("{:<12}", hop.status_code);
    let duration = format!("{:<15}", format_millis(hop.duration));
    let (status, duration) = if hop.is_redirect() {
        (status.yellow(), duration.yellow())
    } else {
        (status.green(), duration.green())
    };

    writeln!(
        out,
        " {} {:<50} {} {} {}",
        format!("{position:<3}").green(),
        hop.url,
        emoji,
        status,
        duration
    )
}
