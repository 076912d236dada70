//! Sidecar files written next to completed downloads.
//!
//! Two kinds: a metadata JSON dump of the extracted record, and the video
//! thumbnail saved as a JPEG. Both derive their path from the media file by
//! swapping its extension, and both are strictly post-transfer: a sidecar
//! failure never rolls back the downloaded media.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::download::replace_extension;
use crate::extract::VideoRecord;
use crate::session::Session;

/// Extension of the metadata sidecar.
const METADATA_EXTENSION: &str = "json";

/// Extension of the thumbnail sidecar.
const THUMBNAIL_EXTENSION: &str = "jpg";

/// Errors produced while writing sidecar files.
#[derive(Debug, Error)]
pub enum SidecarError {
    /// File system failure writing a sidecar
    #[error("IO error writing sidecar {path}: {source}")]
    Io {
        /// The sidecar path that was being written
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The record could not be serialized to JSON
    #[error("metadata serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Network-level failure fetching the thumbnail
    #[error("network error fetching thumbnail {url}: {source}")]
    Network {
        /// The thumbnail URL
        url: String,
        /// The underlying transport error
        #[source]
        source: reqwest::Error,
    },

    /// HTTP error response fetching the thumbnail
    #[error("HTTP {status} fetching thumbnail {url}")]
    Fetch {
        /// The thumbnail URL
        url: String,
        /// HTTP status code of the response
        status: u16,
    },
}

impl SidecarError {
    /// Creates an `Io` error with the affected path.
    #[must_use]
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

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
}

/// Writes the record as pretty-printed JSON next to the media file.
///
/// Keys are emitted in sorted order so dumps diff cleanly across runs.
/// Returns the sidecar path.
///
/// # Errors
///
/// Returns [`SidecarError`] on serialization or write failure.
#[instrument(skip(record), fields(id = %record.id))]
pub async fn write_metadata(
    record: &VideoRecord,
    media_path: &Path,
) -> Result<PathBuf, SidecarError> {
    let sidecar_path = replace_extension(media_path, METADATA_EXTENSION);
    // Round-trip through Value: its object map keeps keys sorted.
    let value = serde_json::to_value(record)?;
    let json = serde_json::to_string_pretty(&value)?;
    tokio::fs::write(&sidecar_path, json)
        .await
        .map_err(|e| SidecarError::io(&sidecar_path, e))?;
    debug!(path = %sidecar_path.display(), "Metadata sidecar written");
    Ok(sidecar_path)
}

/// Fetches the record's thumbnail into a JPEG next to the media file.
///
/// A plain GET with no size check and no progress reporting; thumbnails
/// are small. Returns the sidecar path.
///
/// # Errors
///
/// Returns [`SidecarError`] on transport, status, or write failure.
#[instrument(skip(session, record), fields(id = %record.id))]
pub async fn fetch_thumbnail(
    session: &Session,
    record: &VideoRecord,
    media_path: &Path,
) -> Result<PathBuf, SidecarError> {
    let sidecar_path = replace_extension(media_path, THUMBNAIL_EXTENSION);
    let url = record.thumbnail_url.as_str();

    let response = session
        .get(url)
        .await
        .map_err(|e| SidecarError::network(url, e))?;
    let status = response.status();
    if !status.is_success() {
        return Err(SidecarError::fetch(url, status.as_u16()));
    }
    let bytes = response
        .bytes()
        .await
        .map_err(|e| SidecarError::network(url, e))?;

    tokio::fs::write(&sidecar_path, &bytes)
        .await
        .map_err(|e| SidecarError::io(&sidecar_path, e))?;
    debug!(
        path = %sidecar_path.display(),
        bytes = bytes.len(),
        "Thumbnail sidecar written"
    );
    Ok(sidecar_path)
}
