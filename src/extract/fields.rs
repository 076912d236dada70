//! Per-field extraction rules for the video detail page.
//!
//! Each metadata field is pulled by its own named rule over the raw HTML,
//! so a site layout change surfaces as a single-field [`ExtractError::Parse`]
//! naming exactly what broke instead of a monolithic extraction failure.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ExtractError;

/// Site suffix appended to every page `<title>`.
const TITLE_SUFFIX: &str = " | Iwara";

/// Compiles a static regex pattern, panicking on invalid patterns.
/// Only for use with compile-time constant patterns.
fn compile_static_regex(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| panic!("invalid static regex '{pattern}': {e}"))
}

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"(?is)<title[^>]*>(.*?)</title>"));

/// The byline region under the video: uploader link plus upload date.
static SUBMITTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<div\s[^>]*\bclass\s*=\s*["'][^"']*submitted[^"']*["'][^>]*>(.*?)</div>"#,
    )
});

/// First profile link within a region: captures the id from the href and
/// the display name from the anchor text.
static USER_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)<a\s[^>]*\bhref\s*=\s*["']/users/([^"'?#]+)["'][^>]*>(.*?)</a>"#)
});

/// Upload timestamps as rendered in the byline, e.g. `2019-03-14 09:22`.
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r"\d+-\d{2}-\d{2} \d{2}:\d{2}"));

/// The likes/views counter strip.
static NODE_VIEWS_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<div\s[^>]*\bclass\s*=\s*["'][^"']*node-views[^"']*["'][^>]*>(.*?)</div>"#,
    )
});

/// Heading of the comments section, e.g. `42 comments`.
static COMMENTS_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(
        r#"(?is)<div\s[^>]*\bid\s*=\s*["']comments["'][^>]*>.*?<h2[^>]*>(.*?)</h2>"#,
    )
});

/// The player element carrying the poster (thumbnail) attribute.
static VIDEO_PLAYER_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    compile_static_regex(r#"(?is)<video\b[^>]*\bid\s*=\s*["']video-player["'][^>]*>"#)
});

static POSTER_ATTR_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_static_regex(r#"(?is)\bposter\s*=\s*["']([^"']+)["']"#));

/// Grouped digits with optional thousands separators, e.g. `56,789`.
static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| compile_static_regex(r"[\d,]+"));

/// Returns the first capture group of the first match, trimmed.
fn first_capture(html: &str, re: &Regex) -> Option<String> {
    re.captures(html)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Parses a separator-grouped count like `1,234` into a number.
fn parse_count(text: &str) -> Option<u64> {
    text.replace(',', "").parse().ok()
}

/// Page `<title>` text with the trailing site suffix removed.
pub(crate) fn title(html: &str) -> Result<String, ExtractError> {
    let raw = first_capture(html, &TITLE_RE).ok_or_else(|| ExtractError::parse("title"))?;
    let value = raw.strip_suffix(TITLE_SUFFIX).unwrap_or(&raw).trim();
    if value.is_empty() {
        return Err(ExtractError::parse("title"));
    }
    Ok(value.to_string())
}

/// Uploader display name and id from the byline's profile link.
///
/// The id is the link target with the `/users/` prefix removed and any
/// percent-encoding decoded, so `dance%20maker` becomes `dance maker`.
pub(crate) fn uploader(html: &str) -> Result<(String, String), ExtractError> {
    let region =
        first_capture(html, &SUBMITTED_RE).ok_or_else(|| ExtractError::parse("uploader"))?;
    let captures = USER_ANCHOR_RE
        .captures(&region)
        .ok_or_else(|| ExtractError::parse("uploader"))?;
    let encoded_id = captures.get(1).map_or("", |m| m.as_str());
    let name = captures.get(2).map_or("", |m| m.as_str()).trim().to_string();
    let id = urlencoding::decode(encoded_id)
        .map_or_else(|_| encoded_id.to_string(), Cow::into_owned);
    Ok((name, id))
}

/// Upload timestamp from the byline region.
pub(crate) fn upload_date(html: &str) -> Result<String, ExtractError> {
    let region =
        first_capture(html, &SUBMITTED_RE).ok_or_else(|| ExtractError::parse("upload_date"))?;
    DATE_RE
        .find(&region)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractError::parse("upload_date"))
}

/// Likes and views from the counter strip, in that order.
///
/// Both stay unset when the strip is absent or carries fewer than two
/// numbers; a half-parsed pair would be worse than none.
pub(crate) fn stats(html: &str) -> (Option<u64>, Option<u64>) {
    let Some(region) = first_capture(html, &NODE_VIEWS_RE) else {
        return (None, None);
    };
    let numbers: Vec<u64> = COUNT_RE
        .find_iter(&region)
        .filter_map(|m| parse_count(m.as_str()))
        .collect();
    match numbers.as_slice() {
        [likes, views, ..] => (Some(*likes), Some(*views)),
        _ => (None, None),
    }
}

/// Comment count from the comments section heading, if present.
pub(crate) fn comments_count(html: &str) -> Option<u64> {
    let heading = first_capture(html, &COMMENTS_HEADER_RE)?;
    COUNT_RE
        .find(&heading)
        .and_then(|m| parse_count(m.as_str()))
}

/// Thumbnail URL from the player's poster attribute, absolutized.
pub(crate) fn thumbnail_url(html: &str) -> Result<String, ExtractError> {
    let tag = VIDEO_PLAYER_TAG_RE
        .find(html)
        .ok_or_else(|| ExtractError::parse("thumbnail_url"))?;
    let poster = POSTER_ATTR_RE
        .captures(tag.as_str())
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim().to_string())
        .ok_or_else(|| ExtractError::parse("thumbnail_url"))?;
    Ok(absolute_url(&poster))
}

/// Prefixes protocol-relative URLs with `https:`; anything else is
/// returned unchanged.
#[must_use]
pub fn absolute_url(value: &str) -> String {
    if value.starts_with("//") {
        return format!("https:{value}");
    }
    value.to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const SUBMITTED_SNIPPET: &str = concat!(
        r#"<div class="submitted"><a class="username" "#,
        r#"href="/users/dance%20maker">Dance Maker</a> on 2019-03-14 09:22</div>"#,
    );

    // ==================== title ====================

    #[test]
    fn test_title_strips_site_suffix() {
        let html = "<html><head><title>My Dance Clip | Iwara</title></head></html>";
        assert_eq!(title(html).unwrap(), "My Dance Clip");
    }

    #[test]
    fn test_title_without_suffix_kept_verbatim() {
        let html = "<title>Plain Title</title>";
        assert_eq!(title(html).unwrap(), "Plain Title");
    }

    #[test]
    fn test_title_suffix_only_stripped_from_end() {
        // The suffix text occurring inside the title must survive.
        let html = "<title>About | Iwara Fans | Iwara</title>";
        assert_eq!(title(html).unwrap(), "About | Iwara Fans");
    }

    #[test]
    fn test_title_missing_is_parse_error() {
        let err = title("<html><body>no title here</body></html>").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { field: "title" }));
    }

    // ==================== uploader ====================

    #[test]
    fn test_uploader_name_and_decoded_id() {
        let (name, id) = uploader(SUBMITTED_SNIPPET).unwrap();
        assert_eq!(name, "Dance Maker");
        assert_eq!(id, "dance maker");
    }

    #[test]
    fn test_uploader_plain_id_passes_through() {
        let html = r#"<div class="submitted"><a href="/users/simple_user">Simple</a></div>"#;
        let (name, id) = uploader(html).unwrap();
        assert_eq!(name, "Simple");
        assert_eq!(id, "simple_user");
    }

    #[test]
    fn test_uploader_missing_region_is_parse_error() {
        let err = uploader("<div>nothing relevant</div>").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { field: "uploader" }));
    }

    #[test]
    fn test_uploader_region_without_profile_link_is_parse_error() {
        let html = r#"<div class="submitted">anonymous on 2019-03-14 09:22</div>"#;
        let err = uploader(html).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { field: "uploader" }));
    }

    // ==================== upload_date ====================

    #[test]
    fn test_upload_date_found_in_byline() {
        assert_eq!(upload_date(SUBMITTED_SNIPPET).unwrap(), "2019-03-14 09:22");
    }

    #[test]
    fn test_upload_date_missing_timestamp_is_parse_error() {
        let html = r#"<div class="submitted"><a href="/users/x">X</a> sometime ago</div>"#;
        let err = upload_date(html).unwrap_err();
        assert!(matches!(err, ExtractError::Parse { field: "upload_date" }));
    }

    // ==================== stats ====================

    #[test]
    fn test_stats_likes_then_views_with_separators() {
        let html = r#"<div class="node-views"><i></i> 1,234 <i></i> 56,789</div>"#;
        assert_eq!(stats(html), (Some(1234), Some(56789)));
    }

    #[test]
    fn test_stats_region_absent_leaves_both_unset() {
        assert_eq!(stats("<div>no counters</div>"), (None, None));
    }

    #[test]
    fn test_stats_single_number_leaves_both_unset() {
        let html = r#"<div class="node-views">42</div>"#;
        assert_eq!(stats(html), (None, None));
    }

    // ==================== comments_count ====================

    #[test]
    fn test_comments_count_from_section_heading() {
        let html = r#"<div id="comments"><h2 class="title">42 comments</h2></div>"#;
        assert_eq!(comments_count(html), Some(42));
    }

    #[test]
    fn test_comments_count_absent_section() {
        assert_eq!(comments_count("<div>no comments section</div>"), None);
    }

    // ==================== thumbnail_url ====================

    #[test]
    fn test_thumbnail_from_poster_attribute_absolutized() {
        let html = r#"<video id="video-player" poster="//i.iwara.tv/thumb.jpg"></video>"#;
        assert_eq!(
            thumbnail_url(html).unwrap(),
            "https://i.iwara.tv/thumb.jpg"
        );
    }

    #[test]
    fn test_thumbnail_poster_before_id_attribute() {
        let html = r#"<video poster="//i.iwara.tv/t.jpg" id="video-player"></video>"#;
        assert_eq!(thumbnail_url(html).unwrap(), "https://i.iwara.tv/t.jpg");
    }

    #[test]
    fn test_thumbnail_missing_player_is_parse_error() {
        let err = thumbnail_url("<video poster=\"/t.jpg\"></video>").unwrap_err();
        assert!(matches!(err, ExtractError::Parse { field: "thumbnail_url" }));
    }

    // ==================== absolute_url ====================

    #[test]
    fn test_absolute_url_prefixes_protocol_relative() {
        assert_eq!(
            absolute_url("//cdn.example.com/x.jpg"),
            "https://cdn.example.com/x.jpg"
        );
    }

    #[test]
    fn test_absolute_url_keeps_absolute_unchanged() {
        assert_eq!(
            absolute_url("https://cdn.example.com/x.jpg"),
            "https://cdn.example.com/x.jpg"
        );
        assert_eq!(
            absolute_url("http://cdn.example.com/x.jpg"),
            "http://cdn.example.com/x.jpg"
        );
    }
}
