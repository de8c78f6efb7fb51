//! HTTP client initialization.
//!
//! This module builds the HTTP client used for redirect tracing.

use reqwest::ClientBuilder;

use crate::config::TracerConfig;

/// Initializes an HTTP client for redirect tracing.
///
/// Creates a `reqwest::Client` with redirects disabled so every hop of the
/// chain is returned to the caller, including 3xx responses and their headers.
///
/// # Arguments
///
/// * `config` - Transport settings (timeout and User-Agent)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_redirect_client(config: &TracerConfig) -> Result<reqwest::Client, reqwest::Error> {
    ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
}
