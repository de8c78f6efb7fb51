//! Error type definitions.
//!
//! This module defines the error types used throughout the application.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::config::MISSING_LOCATION_MESSAGE;
use crate::trace::Trace;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Reasons a redirect trace stops early.
///
/// None of these are retried; the trace ends at the hop where the error occurred.
#[derive(Error, Debug)]
pub enum TraceError {
    /// The URL for a hop could not be turned into a request.
    ///
    /// Covers an unparseable start URL, an unsupported scheme, and a
    /// `Location` value that cannot be resolved against the current URL.
    #[error("invalid request URL `{url}`: {source}")]
    RequestConstruction {
        /// URL (or `Location` value) that was rejected
        url: String,
        /// Underlying parse or builder error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// Network-level failure while issuing a hop's request.
    #[error("request to {url} failed: {source}")]
    Transport {
        /// URL being requested
        url: String,
        /// Error reported by the HTTP client
        #[source]
        source: ReqwestError,
    },

    /// A redirect response had no usable `Location` header.
    #[error("{}", MISSING_LOCATION_MESSAGE)]
    MissingRedirectTarget {
        /// URL that answered with the redirect
        url: String,
        /// Redirect status code that was received
        status_code: u16,
    },
}

impl TraceError {
    /// Returns the category of this error, used for run statistics.
    pub fn kind(&self) -> TraceErrorKind {
        match self {
            TraceError::RequestConstruction { .. } => TraceErrorKind::RequestConstruction,
            TraceError::Transport { source, .. } if source.is_timeout() => {
                TraceErrorKind::TransportTimeout
            }
            TraceError::Transport { source, .. } if source.is_connect() => {
                TraceErrorKind::TransportConnect
            }
            TraceError::Transport { .. } => TraceErrorKind::TransportOther,
            TraceError::MissingRedirectTarget { .. } => TraceErrorKind::MissingRedirectTarget,
        }
    }
}

/// Categories of trace failures.
///
/// Transport failures are split by cause so the end-of-run summary shows
/// whether targets were unreachable or just slow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum TraceErrorKind {
    /// Unparseable URL, unsupported scheme or unresolvable `Location`
    RequestConstruction,
    /// Request did not complete within the configured timeout
    TransportTimeout,
    /// Connection could not be established (refused, DNS failure)
    TransportConnect,
    /// Any other transport failure
    TransportOther,
    /// Redirect response without a usable `Location` header
    MissingRedirectTarget,
}

impl std::fmt::Display for TraceErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TraceErrorKind {
    /// Human-readable label used in run summaries.
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceErrorKind::RequestConstruction => "Request construction error",
            TraceErrorKind::TransportTimeout => "Transport timeout",
            TraceErrorKind::TransportConnect => "Transport connect error",
            TraceErrorKind::TransportOther => "Transport error",
            TraceErrorKind::MissingRedirectTarget => "Redirect without Location header",
        }
    }
}

/// A trace that ended in an error, together with the hops completed before it.
///
/// The partial trace includes the hop that triggered the error when a response
/// was received (for example the redirect that lacked a `Location` header).
#[derive(Error, Debug)]
#[error("trace stopped after {} hop(s)", .trace.len())]
pub struct TraceFailure {
    /// Hops recorded before the trace stopped
    pub trace: Trace,
    /// Why the trace stopped
    #[source]
    pub error: TraceError,
}

impl TraceFailure {
    pub(crate) fn new(trace: Trace, error: TraceError) -> Self {
        Self { trace, error }
    }

    /// Splits the failure into the partial trace and the error.
    pub fn into_parts(self) -> (Trace, TraceError) {
        (self.trace, self.error)
    }
}
