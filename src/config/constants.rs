//! Configuration constants.
//!
//! This module defines the defaults used by the tracer and the CLI, including
//! the hop limit, timeouts, and the pattern used to pick URLs out of input lines.

// Redirect handling
/// Maximum number of hops (requests) issued per trace when the caller doesn't say otherwise.
/// Reaching this limit ends the trace silently; it is not reported as an error.
pub const DEFAULT_MAX_HOPS: usize = 10;

// Network operation timeouts
/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default User-Agent string for HTTP requests.
///
/// Users can override this via the `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str = concat!("redir/", env!("CARGO_PKG_VERSION"));

// URL extraction
/// Pattern for the first http(s) URL on an input line.
/// Everything up to the next whitespace character belongs to the URL.
pub const URL_PATTERN: &str = r"https?://[^\s]+";

/// Message carried by a redirect response that has no usable `Location` header.
pub const MISSING_LOCATION_MESSAGE: &str =
    "redirection status code received but no Location header found";
