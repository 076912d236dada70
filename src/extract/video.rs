//! Video metadata record and format variant types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::fields::absolute_url;

/// One downloadable encoding of a video, as listed by the format API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatVariant {
    /// Quality label, e.g. `"Source"` or `"360p"`
    pub resolution: String,
    /// Media URI, possibly protocol-relative
    pub uri: String,
    /// MIME type of the encoded media
    pub mime: String,
}

/// Metadata for a single video, populated in two phases.
///
/// The identity fields come from the HTML detail page. The transfer fields
/// (`download_url`, `mimetype`, `ext`) stay unset until a format variant is
/// applied via [`VideoRecord::apply_variant`].
#[derive(Debug, Clone, Serialize)]
pub struct VideoRecord {
    /// Site-assigned video id from the page URL
    pub id: String,
    /// Detail page URL the record was extracted from
    pub url: String,
    /// Video title with the site suffix removed
    pub title: String,
    /// Uploader display name
    pub uploader: String,
    /// Uploader id from the profile link, percent-decoded
    pub uploader_id: String,
    /// Upload timestamp as rendered on the page
    pub upload_date: String,
    /// Like count, unset when the counter strip is absent or incomplete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub likes_count: Option<u64>,
    /// View count, unset when the counter strip is absent or incomplete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views_count: Option<u64>,
    /// Comment count from the comments section heading
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments_count: Option<u64>,
    /// Absolutized thumbnail URL from the player poster
    pub thumbnail_url: String,
    /// Resolved media URL of the selected format variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
    /// MIME type of the selected format variant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mimetype: Option<String>,
    /// File extension derived from the variant's MIME type, no leading dot
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ext: Option<String>,
}

impl VideoRecord {
    /// Applies a selected format variant, populating the transfer fields.
    /// Returns the resolved (absolutized) download URL.
    pub fn apply_variant(&mut self, variant: &FormatVariant) -> String {
        let url = absolute_url(&variant.uri);
        self.download_url = Some(url.clone());
        self.mimetype = Some(variant.mime.clone());
        self.ext = Some(extension_for_mime(&variant.mime));
        url
    }

    /// Field name to value mapping for the filename template renderer.
    ///
    /// Unset and empty fields are omitted so the renderer can substitute
    /// its missing-field placeholder for them.
    #[must_use]
    pub fn template_fields(&self) -> HashMap<&'static str, String> {
        let pairs = [
            ("id", self.id.clone()),
            ("url", self.url.clone()),
            ("title", self.title.clone()),
            ("uploader", self.uploader.clone()),
            ("uploader_id", self.uploader_id.clone()),
            ("upload_date", self.upload_date.clone()),
            ("likes_count", optional_count(self.likes_count)),
            ("views_count", optional_count(self.views_count)),
            ("comments_count", optional_count(self.comments_count)),
            ("thumbnail_url", self.thumbnail_url.clone()),
            ("download_url", self.download_url.clone().unwrap_or_default()),
            ("mimetype", self.mimetype.clone().unwrap_or_default()),
            ("ext", self.ext.clone().unwrap_or_default()),
        ];
        let mut fields = HashMap::new();
        for (key, value) in pairs {
            if !value.is_empty() {
                fields.insert(key, value);
            }
        }
        fields
    }
}

fn optional_count(value: Option<u64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// File extension (without a leading dot) for a MIME type.
///
/// Looks the type up in the shared MIME registry; unknown types fall back
/// to the bare subtype so `video/x-custom` still yields a usable `x-custom`.
#[must_use]
pub fn extension_for_mime(mime: &str) -> String {
    let essence = mime.split(';').next().unwrap_or(mime).trim();
    mime_guess::get_mime_extensions_str(essence)
        .and_then(|extensions| extensions.first())
        .map_or_else(
            || essence.rsplit('/').next().unwrap_or(essence).to_string(),
            |extension| (*extension).to_string(),
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample_record() -> VideoRecord {
        VideoRecord {
            id: "abc123".to_string(),
            url: "https://ecchi.iwara.tv/videos/abc123".to_string(),
            title: "My Clip".to_string(),
            uploader: "Dance Maker".to_string(),
            uploader_id: "dance maker".to_string(),
            upload_date: "2019-03-14 09:22".to_string(),
            likes_count: Some(1234),
            views_count: Some(56789),
            comments_count: None,
            thumbnail_url: "https://i.iwara.tv/thumb.jpg".to_string(),
            download_url: None,
            mimetype: None,
            ext: None,
        }
    }

    #[test]
    fn test_apply_variant_populates_transfer_fields() {
        let mut record = sample_record();
        let variant = FormatVariant {
            resolution: "Source".to_string(),
            uri: "//cdn.example.com/media/abc123_source.mp4".to_string(),
            mime: "video/mp4".to_string(),
        };
        let url = record.apply_variant(&variant);
        assert_eq!(url, "https://cdn.example.com/media/abc123_source.mp4");
        assert_eq!(record.download_url.as_deref(), Some(url.as_str()));
        assert_eq!(record.mimetype.as_deref(), Some("video/mp4"));
        assert_eq!(record.ext.as_deref(), Some("mp4"));
    }

    #[test]
    fn test_template_fields_includes_set_values() {
        let fields = sample_record().template_fields();
        assert_eq!(fields.get("id").map(String::as_str), Some("abc123"));
        assert_eq!(fields.get("title").map(String::as_str), Some("My Clip"));
        assert_eq!(fields.get("likes_count").map(String::as_str), Some("1234"));
    }

    #[test]
    fn test_template_fields_omits_unset_values() {
        let fields = sample_record().template_fields();
        assert!(!fields.contains_key("comments_count"));
        assert!(!fields.contains_key("download_url"));
        assert!(!fields.contains_key("ext"));
    }

    #[test]
    fn test_extension_for_mime_known_types() {
        assert_eq!(extension_for_mime("video/mp4"), "mp4");
        assert_eq!(extension_for_mime("video/webm"), "webm");
    }

    #[test]
    fn test_extension_for_mime_ignores_parameters() {
        assert_eq!(extension_for_mime("video/mp4; codecs=avc1"), "mp4");
    }

    #[test]
    fn test_extension_for_mime_unknown_type_uses_subtype() {
        assert_eq!(extension_for_mime("video/x-custom"), "x-custom");
    }

    #[test]
    fn test_format_variant_deserializes_from_api_shape() {
        let json = r#"{"resolution":"Source","uri":"//cdn/x.mp4","mime":"video/mp4"}"#;
        let variant: FormatVariant = serde_json::from_str(json).unwrap();
        assert_eq!(variant.resolution, "Source");
        assert_eq!(variant.uri, "//cdn/x.mp4");
    }
}
