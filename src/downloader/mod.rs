//! Per-reference download orchestration.
//!
//! Composes the extractor, filename builder, transfer engine, and sidecar
//! writers into the flow for a single resource reference. The steps chain:
//! page extraction, format selection, filename construction, media transfer,
//! then optional sidecars. The first failing step ends processing for that
//! reference; the caller decides whether the batch continues.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{info, instrument};

use crate::download::{
    FilenameError, ProgressMode, Transfer, TransferError, TransferOutcome, create_filename,
};
use crate::extract::{ExtractError, MetadataExtractor, select_variant};
use crate::parser::{ResourceKind, ResourceRef};
use crate::session::Session;
use crate::sidecar::{self, SidecarError};

/// Quality label requested when the user supplies none.
pub const DEFAULT_QUALITY: &str = "Source";

/// Options controlling a downloader run.
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Quality label to select from the format list
    pub quality: String,
    /// Output filename template with `{field}` placeholders
    pub filename_template: Option<String>,
    /// Write a metadata JSON sidecar next to each download
    pub dump_metadata: bool,
    /// Save the thumbnail as a JPEG sidecar next to each download
    pub save_thumbnail: bool,
    /// Suppress progress output
    pub quiet: bool,
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            quality: DEFAULT_QUALITY.to_string(),
            filename_template: None,
            dump_metadata: false,
            save_thumbnail: false,
            quiet: false,
        }
    }
}

/// Errors covering the full per-reference flow.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The resource kind is recognized but has no download flow yet
    #[error("{kind} downloads are not implemented")]
    NotImplemented {
        /// The unsupported resource kind
        kind: ResourceKind,
    },

    /// Metadata or format extraction failed
    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    /// Output path construction failed
    #[error("filename construction failed: {0}")]
    Filename(#[from] FilenameError),

    /// The media transfer failed
    #[error("transfer failed: {0}")]
    Transfer(#[from] TransferError),

    /// A sidecar write failed after the media transfer completed
    #[error("sidecar failed: {0}")]
    Sidecar(#[from] SidecarError),
}

/// Result of processing one reference.
#[derive(Debug)]
pub struct Outcome {
    /// Final media path
    pub path: PathBuf,
    /// Whether the media was freshly transferred or skipped as complete
    pub transfer: TransferOutcome,
}

/// Drives the download flow for parsed resource references.
#[derive(Debug)]
pub struct Downloader {
    session: Session,
    extractor: MetadataExtractor,
    transfer: Transfer,
    options: DownloadOptions,
}

impl Downloader {
    /// Creates a downloader against the production site endpoints.
    #[must_use]
    pub fn new(options: DownloadOptions) -> Self {
        let session = Session::new();
        let extractor = MetadataExtractor::new(session.clone());
        Self::with_parts(session, extractor, options)
    }

    /// Creates a downloader from explicit parts. Tests use this to point
    /// the extractor at mock endpoints.
    #[must_use]
    pub fn with_parts(
        session: Session,
        extractor: MetadataExtractor,
        options: DownloadOptions,
    ) -> Self {
        let progress = if options.quiet {
            ProgressMode::Hidden
        } else {
            ProgressMode::Bar
        };
        let transfer = Transfer::new(session.clone(), progress);
        Self {
            session,
            extractor,
            transfer,
            options,
        }
    }

    /// Processes one resource reference end to end.
    ///
    /// # Errors
    ///
    /// [`DownloadError::NotImplemented`] for non-video kinds; otherwise the
    /// error of the first step that failed.
    #[instrument(skip(self), fields(kind = %reference.kind, id = %reference.id))]
    pub async fn run(&self, reference: &ResourceRef) -> Result<Outcome, DownloadError> {
        match reference.kind {
            ResourceKind::Video => self.download_video(&reference.id).await,
            kind => Err(DownloadError::NotImplemented { kind }),
        }
    }

    async fn download_video(&self, id: &str) -> Result<Outcome, DownloadError> {
        let mut record = self.extractor.video(id).await?;
        info!(id = %record.id, title = %record.title, "Processing video");

        let variants = self.extractor.formats(id).await?;
        let variant = select_variant(&variants, &self.options.quality)
            .ok_or_else(|| ExtractError::quality_unavailable(&self.options.quality))?;
        let download_url = record.apply_variant(variant);

        let destination = create_filename(
            &record.template_fields(),
            self.options.filename_template.as_deref(),
        )?;

        let transfer = self
            .transfer
            .perform_download(&download_url, &destination)
            .await?;

        if self.options.dump_metadata {
            sidecar::write_metadata(&record, &destination).await?;
        }
        if self.options.save_thumbnail {
            sidecar::fetch_thumbnail(&self.session, &record, &destination).await?;
        }

        Ok(Outcome {
            path: destination,
            transfer,
        })
    }
}
