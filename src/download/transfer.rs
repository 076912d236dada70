//! Streaming transfer engine with temp-file staging.
//!
//! Bodies are streamed chunk-by-chunk into a `.part` staging file next to
//! the destination and only renamed into place once fully written, so the
//! destination path never holds a truncated file. A destination that
//! already exists at full size is detected up front and skipped.

use std::path::{Path, PathBuf};

use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::TransferError;
use super::filename::{TEMP_EXTENSION, replace_extension};
use crate::session::Session;

/// How transfer progress is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProgressMode {
    /// Draw a progress bar while streaming
    #[default]
    Bar,
    /// No progress output (quiet runs and tests)
    Hidden,
}

/// Outcome of a completed transfer call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// The body was streamed to disk and the destination finalized
    Downloaded {
        /// Final destination path
        path: PathBuf,
        /// Number of body bytes written
        bytes: u64,
    },
    /// An existing destination at least as large as the declared size was
    /// found; nothing was read or written
    SkippedExisting {
        /// The untouched destination path
        path: PathBuf,
        /// Size of the existing file
        existing_bytes: u64,
    },
}

/// Streams HTTP bodies to disk through a staging file.
#[derive(Debug, Clone)]
pub struct Transfer {
    session: Session,
    progress: ProgressMode,
}

impl Transfer {
    /// Creates a transfer engine over the given session.
    #[must_use]
    pub fn new(session: Session, progress: ProgressMode) -> Self {
        Self { session, progress }
    }

    /// Downloads `url` into `destination`, staging through a temp file.
    ///
    /// When the response declares a Content-Length, an existing destination
    /// at least that large is left untouched and reported as skipped, while
    /// a smaller one is removed and re-downloaded in full. Without the
    /// header the size check is disabled and the download always proceeds.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidUrl`] for a malformed URL,
    /// [`TransferError::Fetch`] on a non-success status, and
    /// [`TransferError::Network`] / [`TransferError::Io`] for failures while
    /// streaming. A mid-stream failure leaves the staging file on disk;
    /// only a fully streamed body is renamed to `destination`.
    #[instrument(skip(self), fields(url = %url, destination = %destination.display()))]
    pub async fn perform_download(
        &self,
        url: &str,
        destination: &Path,
    ) -> Result<TransferOutcome, TransferError> {
        Url::parse(url).map_err(|_| TransferError::invalid_url(url))?;

        let response = self
            .session
            .get(url)
            .await
            .map_err(|e| TransferError::network(url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::fetch(url, status.as_u16()));
        }

        let expected_size = response
            .headers()
            .get(CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok());

        if let Some(expected) = expected_size
            && let Ok(metadata) = tokio::fs::metadata(destination).await
        {
            let existing_bytes = metadata.len();
            if existing_bytes >= expected {
                info!(
                    path = %destination.display(),
                    existing_bytes,
                    expected,
                    "Destination already complete, skipping transfer"
                );
                // Response body is dropped unread.
                return Ok(TransferOutcome::SkippedExisting {
                    path: destination.to_path_buf(),
                    existing_bytes,
                });
            }
            warn!(
                path = %destination.display(),
                existing_bytes,
                expected,
                "Existing file smaller than expected, re-downloading"
            );
            tokio::fs::remove_file(destination)
                .await
                .map_err(|e| TransferError::io(destination, e))?;
        }

        let temp_path = replace_extension(destination, TEMP_EXTENSION);
        debug!(temp = %temp_path.display(), "Staging transfer");

        let progress = self.progress_bar(expected_size);
        let mut file = File::create(&temp_path)
            .await
            .map_err(|e| TransferError::io(&temp_path, e))?;

        let bytes = match stream_to_file(&mut file, response, url, &temp_path, &progress).await {
            Ok(bytes) => bytes,
            Err(e) => {
                // No cleanup: the partial staging file stays on disk, and a
                // later run re-evaluates the destination only.
                progress.abandon();
                warn!(
                    temp = %temp_path.display(),
                    "Transfer interrupted, staging file left in place"
                );
                return Err(e);
            }
        };
        progress.finish_and_clear();

        tokio::fs::rename(&temp_path, destination)
            .await
            .map_err(|e| TransferError::io(destination, e))?;

        info!(path = %destination.display(), bytes, "Download complete");
        Ok(TransferOutcome::Downloaded {
            path: destination.to_path_buf(),
            bytes,
        })
    }

    /// Builds the progress bar for one transfer: 25 cells plus a whole-number
    /// percentage, or a hidden bar in quiet mode.
    fn progress_bar(&self, expected_size: Option<u64>) -> ProgressBar {
        let bar = match (self.progress, expected_size) {
            (ProgressMode::Hidden, _) => ProgressBar::hidden(),
            (ProgressMode::Bar, Some(size)) => ProgressBar::new(size),
            (ProgressMode::Bar, None) => ProgressBar::no_length(),
        };
        bar.set_style(
            ProgressStyle::with_template("|{bar:25}| {percent}% ")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█ "),
        );
        bar
    }
}

/// Streams the response body into `file`, returning the bytes written.
async fn stream_to_file(
    file: &mut File,
    response: reqwest::Response,
    url: &str,
    temp_path: &Path,
    progress: &ProgressBar,
) -> Result<u64, TransferError> {
    let mut writer = BufWriter::new(file);
    let mut stream = response.bytes_stream();
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| TransferError::network(url, e))?;
        writer
            .write_all(&chunk)
            .await
            .map_err(|e| TransferError::io(temp_path, e))?;
        bytes_written += chunk.len() as u64;
        progress.set_position(bytes_written);
    }

    writer
        .flush()
        .await
        .map_err(|e| TransferError::io(temp_path, e))?;
    Ok(bytes_written)
}
