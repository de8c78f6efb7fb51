//! HTTP redirect chain tracing.
//!
//! This module follows redirect chains manually, one request per hop, so every
//! intermediate response is observed and timed instead of being swallowed by
//! the HTTP client's own redirect handling.

use std::time::Instant;

use log::{debug, warn};
use reqwest::header::LOCATION;
use url::Url;

use crate::config::TracerConfig;
use crate::error_handling::{InitializationError, TraceError, TraceFailure};
use crate::initialization::init_redirect_client;

use super::models::{is_redirect_status, HopRecord, Trace};

/// Follows redirect chains with a client that never redirects on its own.
///
/// Each tracer owns its HTTP client. Tracers share no state, so independent
/// traces can run on separate tracers without contending on configuration.
#[derive(Debug, Clone)]
pub struct RedirectTracer {
    client: reqwest::Client,
}

impl RedirectTracer {
    /// Builds a tracer with its own non-following client.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if the client cannot be built.
    pub fn new(config: &TracerConfig) -> Result<Self, InitializationError> {
        let client = init_redirect_client(config)?;
        Ok(Self { client })
    }

    /// Wraps an existing client.
    ///
    /// The client must be built with `redirect::Policy::none()`; otherwise the
    /// client follows redirects itself and every trace has a single hop.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Traces the redirect chain starting at `start_url`, issuing at most `max_hops` requests.
    ///
    /// # Arguments
    ///
    /// * `start_url` - Absolute URL of the first hop
    /// * `max_hops` - Maximum number of requests to issue
    ///
    /// # Returns
    ///
    /// The hops in request order. The trace ends at the first non-redirect
    /// response, or silently after `max_hops` requests; use
    /// [`Trace::is_complete`] to tell the two apart.
    ///
    /// # Errors
    ///
    /// Returns a [`TraceFailure`] holding the hops recorded so far if a hop's URL
    /// cannot be requested, the request fails at the transport level, or a
    /// redirect response has no `Location` header.
    pub async fn trace(&self, start_url: &str, max_hops: usize) -> Result<Trace, TraceFailure> {
        let mut trace = Trace::new();
        match self.follow(start_url, max_hops, &mut trace).await {
            Ok(()) => Ok(trace),
            Err(error) => Err(TraceFailure::new(trace, error)),
        }
    }

    async fn follow(
        &self,
        start_url: &str,
        max_hops: usize,
        trace: &mut Trace,
    ) -> Result<(), TraceError> {
        let mut current = start_url.to_string();

        for _ in 0..max_hops {
            let target = Url::parse(&current).map_err(|e| TraceError::RequestConstruction {
                url: current.clone(),
                source: Box::new(e),
            })?;

            let start = Instant::now();
            let resp = self
                .client
                .get(target.clone())
                .send()
                .await
                .map_err(|e| classify_send_error(&current, e))?;
            let duration = start.elapsed();

            let status_code = resp.status().as_u16();
            let location = resp
                .headers()
                .get(LOCATION)
                .map(|value| String::from_utf8_lossy(value.as_bytes()).trim().to_string());
            // The body is never read; dropping the response releases the connection
            drop(resp);

            debug!("Hop {}: {} -> {} ({:?})", trace.len() + 1, current, status_code, duration);
            trace.push(HopRecord {
                url: current.clone(),
                status_code,
                duration,
            });

            if !is_redirect_status(status_code) {
                return Ok(());
            }

            let Some(location) = location.filter(|loc| !loc.is_empty()) else {
                warn!(
                    "Redirect status {} for {} but no Location header",
                    status_code, current
                );
                return Err(TraceError::MissingRedirectTarget {
                    url: current,
                    status_code,
                });
            };

            current = resolve_location(&target, &location)?.to_string();
        }

        debug!("Stopped after {} hop(s) at {}", max_hops, current);
        Ok(())
    }
}

/// Traces `start_url` with a tracer built from the default configuration.
///
/// # Errors
///
/// Same as [`RedirectTracer::trace`]. A client that cannot be built is reported
/// as a transport error with an empty trace.
pub async fn trace(start_url: &str, max_hops: usize) -> Result<Trace, TraceFailure> {
    let tracer = match init_redirect_client(&TracerConfig::default()) {
        Ok(client) => RedirectTracer::with_client(client),
        Err(e) => {
            return Err(TraceFailure::new(
                Trace::new(),
                TraceError::Transport {
                    url: start_url.to_string(),
                    source: e,
                },
            ))
        }
    };
    tracer.trace(start_url, max_hops).await
}

/// Resolves a `Location` header value against the URL that returned it.
///
/// Absolute URLs replace the base; root-relative, path-relative,
/// protocol-relative, query-only and fragment-only references are resolved per
/// RFC 3986.
///
/// # Errors
///
/// Returns `TraceError::RequestConstruction` if the reference cannot be resolved.
pub fn resolve_location(base: &Url, location: &str) -> Result<Url, TraceError> {
    base.join(location)
        .map_err(|e| TraceError::RequestConstruction {
            url: location.to_string(),
            source: Box::new(e),
        })
}

/// Builder errors (such as an unsupported scheme) mean the request never went
/// out; everything else happened on the wire.
fn classify_send_error(url: &str, err: reqwest::Error) -> TraceError {
    if err.is_builder() {
        TraceError::RequestConstruction {
            url: url.to_string(),
            source: Box::new(err),
        }
    } else {
        TraceError::Transport {
            url: url.to_string(),
            source: err,
        }
    }
}
