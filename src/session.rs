//! Shared HTTP session for page, API, and media requests.
//!
//! A single pooled client backs every request the tool makes so that
//! cookies set on the detail pages carry over to the API and media hosts,
//! matching how the site behaves in a browser.

use std::time::Duration;

use reqwest::{Client, Response};

/// Default connection timeout in seconds.
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default read timeout in seconds. Media files can be large, so this is
/// intentionally generous.
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Shared HTTP session with connection pooling, a cookie store, and
/// sensible timeouts.
///
/// Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Session {
    client: Client,
}

impl Session {
    /// Creates a session with default timeouts.
    #[must_use]
    pub fn new() -> Self {
        Self::with_timeouts(CONNECT_TIMEOUT_SECS, READ_TIMEOUT_SECS)
    }

    /// Creates a session with custom timeouts (useful for tests).
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed. This only happens
    /// with invalid TLS configuration, not from any input this crate passes.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn with_timeouts(connect_timeout_secs: u64, read_timeout_secs: u64) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(connect_timeout_secs))
            .timeout(Duration::from_secs(read_timeout_secs))
            .cookie_store(true)
            .gzip(true)
            .user_agent(user_agent())
            .build()
            .expect("Failed to build HTTP client - static configuration is valid");
        Self { client }
    }

    /// Issues a GET request. Status handling stays with the caller so each
    /// component can attach its own context to failures.
    ///
    /// # Errors
    ///
    /// Returns the transport-level [`reqwest::Error`] on connection, DNS,
    /// TLS, or timeout failures.
    pub async fn get(&self, url: &str) -> Result<Response, reqwest::Error> {
        self.client.get(url).send().await
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// User-Agent string sent with every request: tool name plus crate version.
#[must_use]
fn user_agent() -> String {
    format!("iwara-dl/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_contains_tool_name_and_version() {
        let ua = user_agent();
        assert!(ua.starts_with("iwara-dl/"));
        assert!(
            ua.trim_start_matches("iwara-dl/")
                .chars()
                .next()
                .unwrap()
                .is_ascii_digit(),
            "version should follow the slash: {ua}"
        );
    }

    #[test]
    fn test_session_construction_does_not_panic() {
        let _session = Session::new();
        let _custom = Session::with_timeouts(5, 10);
    }
}
