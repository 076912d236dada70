//! Resource reference recognition for iwara.tv page URLs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::error::ReferenceError;

/// Regex pattern for qualified resource URLs.
///
/// Matches http or https on the bare or `ecchi.`-prefixed host, one of the
/// four resource path segments, and an id drawn from alphanumerics plus
/// `%`, `-`, and `_`. Trailing content (query strings, fragments) is
/// permitted; the id simply stops at the first character outside its set.
#[allow(clippy::expect_used)]
static REFERENCE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://(?:ecchi\.)?iwara\.tv/(videos|images|playlist|users)/([%\-\w]+)")
        .expect("reference regex pattern is valid") // Static pattern, safe to panic
});

/// Kind of resource a reference points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// A single video detail page
    Video,
    /// A single image detail page
    Image,
    /// A playlist page
    Playlist,
    /// A user profile page
    User,
}

impl ResourceKind {
    fn from_path_segment(segment: &str) -> Option<Self> {
        match segment {
            "videos" => Some(Self::Video),
            "images" => Some(Self::Image),
            "playlist" => Some(Self::Playlist),
            "users" => Some(Self::User),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Video => "video",
            Self::Image => "image",
            Self::Playlist => "playlist",
            Self::User => "user",
        };
        write!(f, "{name}")
    }
}

/// A recognized resource reference: what kind of page it is plus the
/// site-assigned id extracted from the URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRef {
    /// Kind of resource the URL points at
    pub kind: ResourceKind,
    /// Resource id as it appears in the URL path (may be percent-encoded)
    pub id: String,
}

impl ResourceRef {
    /// Parses a single qualified resource URL.
    ///
    /// # Errors
    ///
    /// Returns [`ReferenceError::NotRecognized`] when the input does not
    /// start with a qualified iwara.tv resource URL.
    pub fn parse(input: &str) -> Result<Self, ReferenceError> {
        let trimmed = input.trim();
        let Some(captures) = REFERENCE_PATTERN.captures(trimmed) else {
            return Err(ReferenceError::not_recognized(trimmed));
        };
        let segment = captures.get(1).map_or("", |m| m.as_str());
        let Some(kind) = ResourceKind::from_path_segment(segment) else {
            return Err(ReferenceError::not_recognized(trimmed));
        };
        let id = captures.get(2).map_or("", |m| m.as_str()).to_string();
        Ok(Self { kind, id })
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.id)
    }
}
