//! Error types for the transfer engine.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during a media transfer.
///
/// No `From` impls for `reqwest::Error` or `std::io::Error`: the variants
/// need URL or path context the source errors do not carry, so the
/// constructors below are the only conversion points.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Network-level failure (DNS, connection, TLS, or mid-stream transport)
    #[error("network error downloading {url}: {source}")]
    Network {
        /// The URL that was being downloaded
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response (4xx, 5xx)
    #[error("HTTP {status} downloading {url}")]
    Fetch {
        /// The URL that was being downloaded
        url: String,
        /// HTTP status code of the response
        status: u16,
    },

    /// File system failure while staging or finalizing the download
    #[error("IO error at {path}: {source}")]
    Io {
        /// The path that was being written or renamed
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The download URL is not a valid absolute URL
    #[error("invalid download URL: {url}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
    },
}

impl TransferError {
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

    /// Creates an `Io` error with the affected path.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Creates an `InvalidUrl` error.
    #[must_use]
    pub fn invalid_url(url: &str) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
        }
    }
}
