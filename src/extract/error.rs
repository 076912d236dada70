//! Error types for metadata extraction.

use thiserror::Error;

/// Errors that can occur while extracting video metadata.
///
/// Page-structure failures (`Parse`) are kept distinct from transport
/// failures (`Network`, `Fetch`): the former mean the site layout changed
/// and a retry will not help, the latter are environmental.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network-level failure reaching the site (DNS, connection, TLS, timeout)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that was being fetched
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response from the page or API endpoint
    #[error("HTTP {status} fetching {url}")]
    Fetch {
        /// The URL that was being fetched
        url: String,
        /// HTTP status code of the response
        status: u16,
    },

    /// A required markup region was absent from the detail page
    #[error("page field '{field}' not found - the site layout may have changed")]
    Parse {
        /// Name of the field whose extraction rule found nothing
        field: &'static str,
    },

    /// The format API returned a body that is not a well-formed format list
    #[error("malformed format list from {url}: {source}")]
    Api {
        /// The API URL that was queried
        url: String,
        /// The underlying body or deserialization error
        #[source]
        source: reqwest::Error,
    },

    /// No format variant carries the requested quality label
    #[error("quality '{quality}' is not available for this video")]
    QualityUnavailable {
        /// The quality label that was requested
        quality: String,
    },
}

impl ExtractError {
    /// Creates a `Network` error.
    #[must_use]
    pub fn network(url: &str, source: reqwest::Error) -> Self {
        Self::Network {
            url: url.to_string(),
            source,
        }
    }

    /// Creates a `Fetch` error from a non-success HTTP status.
    #[must_use]
    pub fn fetch(url: &str, status: u16) -> Self {
        Self::Fetch {
            url: url.to_string(),
            status,
        }
    }

    /// Creates a `Parse` error for a missing page field.
    #[must_use]
    pub fn parse(field: &'static str) -> Self {
        Self::Parse { field }
    }

    /// Creates an `Api` error for a malformed format list.
    #[must_use]
    pub fn api(url: &str, source: reqwest::Error) -> Self {
        Self::Api {
            url: url.to_string(),
            source,
        }
    }

    /// Creates a `QualityUnavailable` error.
    #[must_use]
    pub fn quality_unavailable(quality: &str) -> Self {
        Self::QualityUnavailable {
            quality: quality.to_string(),
        }
    }
}
