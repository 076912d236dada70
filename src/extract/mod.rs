//! Metadata extraction from video detail pages and the format API.
//!
//! Extraction is two-phase because the site splits its data: identity
//! fields (title, uploader, date, counters, thumbnail) appear only in the
//! page HTML, while the downloadable format list is served only by the
//! JSON API. A complete record therefore needs one fetch of each.

mod error;
mod fields;
mod video;

pub use error::ExtractError;
pub use fields::absolute_url;
pub use video::{FormatVariant, VideoRecord, extension_for_mime};

use tracing::{debug, instrument};

use crate::session::Session;

/// Host serving the HTML detail pages.
pub const DEFAULT_PAGE_BASE_URL: &str = "https://ecchi.iwara.tv";

/// Host serving the JSON format API.
pub const DEFAULT_API_BASE_URL: &str = "https://www.iwara.tv";

/// Extracts video metadata from the site's detail pages and format API.
#[derive(Debug, Clone)]
pub struct MetadataExtractor {
    session: Session,
    page_base_url: String,
    api_base_url: String,
}

impl MetadataExtractor {
    /// Creates an extractor against the production site endpoints.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self::with_base_urls(session, DEFAULT_PAGE_BASE_URL, DEFAULT_API_BASE_URL)
    }

    /// Creates an extractor with custom base URLs (useful for tests).
    #[must_use]
    pub fn with_base_urls(
        session: Session,
        page_base_url: impl Into<String>,
        api_base_url: impl Into<String>,
    ) -> Self {
        let page_base_url = page_base_url.into();
        let api_base_url = api_base_url.into();
        Self {
            session,
            page_base_url: page_base_url.trim_end_matches('/').to_string(),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Detail page URL for a video id.
    #[must_use]
    pub fn video_page_url(&self, id: &str) -> String {
        format!("{}/videos/{id}", self.page_base_url)
    }

    /// Format API URL for a video id.
    #[must_use]
    pub fn video_api_url(&self, id: &str) -> String {
        format!("{}/api/video/{id}", self.api_base_url)
    }

    /// Fetches the detail page for `id` and extracts the identity fields.
    ///
    /// The returned record has no transfer fields set; apply a variant from
    /// [`MetadataExtractor::formats`] to complete it.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Network`] on transport failure, [`ExtractError::Fetch`]
    /// on a non-success status, and [`ExtractError::Parse`] naming the first
    /// required field whose markup region is missing.
    #[instrument(skip(self))]
    pub async fn video(&self, id: &str) -> Result<VideoRecord, ExtractError> {
        let url = self.video_page_url(id);
        let response = self
            .session
            .get(&url)
            .await
            .map_err(|e| ExtractError::network(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::fetch(&url, status.as_u16()));
        }
        let html = response
            .text()
            .await
            .map_err(|e| ExtractError::network(&url, e))?;

        let title = fields::title(&html)?;
        let (uploader, uploader_id) = fields::uploader(&html)?;
        let upload_date = fields::upload_date(&html)?;
        let (likes_count, views_count) = fields::stats(&html);
        let comments_count = fields::comments_count(&html);
        let thumbnail_url = fields::thumbnail_url(&html)?;

        debug!(id, title = %title, "Page fields extracted");

        Ok(VideoRecord {
            id: id.to_string(),
            url,
            title,
            uploader,
            uploader_id,
            upload_date,
            likes_count,
            views_count,
            comments_count,
            thumbnail_url,
            download_url: None,
            mimetype: None,
            ext: None,
        })
    }

    /// Fetches the downloadable format list for `id` from the JSON API.
    ///
    /// # Errors
    ///
    /// [`ExtractError::Network`] on transport failure, [`ExtractError::Fetch`]
    /// on a non-success status, and [`ExtractError::Api`] when the body is
    /// not a well-formed format list.
    #[instrument(skip(self))]
    pub async fn formats(&self, id: &str) -> Result<Vec<FormatVariant>, ExtractError> {
        let url = self.video_api_url(id);
        let response = self
            .session
            .get(&url)
            .await
            .map_err(|e| ExtractError::network(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::fetch(&url, status.as_u16()));
        }
        let variants = response
            .json::<Vec<FormatVariant>>()
            .await
            .map_err(|e| ExtractError::api(&url, e))?;

        debug!(id, count = variants.len(), "Format list fetched");
        Ok(variants)
    }
}

/// Returns the first variant whose resolution label equals `quality` exactly.
/// Labels are case-sensitive; `"source"` does not match `"Source"`.
#[must_use]
pub fn select_variant<'a>(
    variants: &'a [FormatVariant],
    quality: &str,
) -> Option<&'a FormatVariant> {
    variants.iter().find(|variant| variant.resolution == quality)
}
