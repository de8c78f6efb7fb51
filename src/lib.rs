//! redir library: HTTP redirect chain tracing
//!
//! This library follows a URL's redirect chain one request at a time, with an
//! HTTP client that never follows redirects on its own, and records the URL,
//! status code and timing of every hop.
//!
//! # Example
//!
//! ```no_run
//! use redir::{RedirectTracer, TracerConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tracer = RedirectTracer::new(&TracerConfig::default())?;
//! match tracer.trace("http://example.com", 10).await {
//!     Ok(trace) => {
//!         for hop in &trace {
//!             println!("{} {} {:?}", hop.status_code, hop.url, hop.duration);
//!         }
//!     }
//!     Err(failure) => {
//!         eprintln!("{} (after {} hops)", failure.error, failure.trace.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

pub mod config;
mod error_handling;
pub mod initialization;
pub mod input;
pub mod output;
mod trace;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel, OutputFormat, TracerConfig};
pub use error_handling::{
    InitializationError, TraceError, TraceErrorKind, TraceFailure, TraceStats,
};
pub use run::{run_traces, run_traces_with, RunReport};
pub use trace::{resolve_location, trace, HopRecord, RedirectTracer, Trace};

// Internal run module (drives input, tracing and output for every target)
mod run {
    use std::io::Write;
    use std::time::Instant;

    use anyhow::{Context, Result};
    use colored::*;
    use log::{debug, info, warn};
    use tokio::io::{AsyncBufRead, BufReader};

    use crate::config::{Config, TracerConfig};
    use crate::error_handling::{TraceErrorKind, TraceStats};
    use crate::input::UrlLines;
    use crate::output::render;
    use crate::trace::RedirectTracer;

    /// Results of a tracing run.
    #[derive(Debug, Clone)]
    pub struct RunReport {
        /// Number of targets traced
        pub total_urls: usize,
        /// Targets whose trace finished without error
        pub successful: usize,
        /// Targets whose trace stopped with an error
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
        /// Failure counts per error kind, omitting kinds that never occurred
        pub errors: Vec<(TraceErrorKind, usize)>,
    }

    /// Traces the configured target, or every URL found on stdin, writing results to stdout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, stdin cannot be
    /// read, or output cannot be written. Failed traces are reported per target
    /// and do not abort the run.
    pub async fn run_traces(config: Config) -> Result<RunReport> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut stdout = std::io::stdout();
        run_traces_with(config, stdin, &mut stdout).await
    }

    /// Like [`run_traces`], with explicit input and output.
    ///
    /// `input` is only read when `config.url` is `None` or empty.
    ///
    /// # Errors
    ///
    /// Same as [`run_traces`].
    pub async fn run_traces_with<R, W>(config: Config, input: R, out: &mut W) -> Result<RunReport>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let tracer = RedirectTracer::new(&TracerConfig::from(&config))
            .context("Failed to initialize HTTP client")?;
        let stats = TraceStats::new();
        let start_time = Instant::now();
        let mut total_urls = 0usize;
        let mut failed = 0usize;

        match config.url.as_deref().filter(|url| !url.trim().is_empty()) {
            Some(url) => {
                total_urls += 1;
                if !process_url(&tracer, url, &config, &stats, out).await? {
                    failed += 1;
                }
            }
            None => {
                info!("Reading URLs from stdin");
                let mut urls = UrlLines::new(input);
                while let Some(url) = urls
                    .next_url()
                    .await
                    .context("Failed to read URLs from stdin")?
                {
                    total_urls += 1;
                    if !process_url(&tracer, &url, &config, &stats, out).await? {
                        failed += 1;
                    }
                }
                debug!("Skipped {} line(s) without a URL", urls.skipped());
            }
        }

        print_error_statistics(&stats);

        Ok(RunReport {
            total_urls,
            successful: total_urls - failed,
            failed,
            elapsed_seconds: start_time.elapsed().as_secs_f64(),
            errors: stats.non_zero(),
        })
    }

    /// Traces one target and renders it. Returns false if the trace failed.
    async fn process_url<W: Write>(
        tracer: &RedirectTracer,
        url: &str,
        config: &Config,
        stats: &TraceStats,
        out: &mut W,
    ) -> Result<bool> {
        match tracer.trace(url, config.max_hops).await {
            Ok(trace) => {
                if !trace.is_complete() {
                    info!(
                        "Stopped {} after {} hop(s) without reaching a final response",
                        url,
                        trace.len()
                    );
                }
                render(&trace, config.output, out)?;
                out.flush().context("Failed to flush output")?;
                Ok(true)
            }
            Err(failure) => {
                stats.increment_error(failure.error.kind());
                warn!(
                    "Failed to trace {} after {} hop(s): {}",
                    url,
                    failure.trace.len(),
                    failure.error
                );
                for hop in &failure.trace {
                    debug!("  {} {} ({:?})", hop.status_code, hop.url, hop.duration);
                }
                eprintln!(
                    "{}",
                    format!("Error processing {}: {}", url, failure.error).red()
                );
                Ok(false)
            }
        }
    }

    fn print_error_statistics(stats: &TraceStats) {
        for (kind, count) in stats.non_zero() {
            info!("{}: {}", kind, count);
        }
    }
}
