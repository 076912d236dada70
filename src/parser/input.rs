//! Batch input parsing: one resource reference per line.

use std::fmt;

use tracing::{debug, info, instrument};

use super::reference::ResourceRef;

/// Result of parsing a block of input text.
///
/// Lines that parse become `items`; non-blank lines that do not are
/// collected in `skipped` so callers can report them without aborting
/// the rest of the batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseResult {
    /// Successfully recognized references, in input order
    pub items: Vec<ResourceRef>,
    /// Non-blank lines that were not recognized
    pub skipped: Vec<String>,
}

impl ParseResult {
    /// Creates an empty parse result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no references were recognized.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of recognized references.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Number of skipped lines.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parsed {} references ({} skipped)",
            self.len(),
            self.skipped_count()
        )
    }
}

/// Parses text input into resource references, one per line.
///
/// Blank lines are ignored. Leading and trailing whitespace on each line
/// is trimmed before matching. Unrecognized lines are recorded as skipped
/// rather than failing the whole batch.
#[instrument(skip(input), fields(input_len = input.len()))]
#[must_use]
pub fn parse_input(input: &str) -> ParseResult {
    let mut result = ParseResult::new();

    if input.trim().is_empty() {
        debug!("Empty input provided");
        return result;
    }

    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }
        match ResourceRef::parse(line) {
            Ok(reference) => {
                debug!(reference = %reference, "Recognized reference");
                result.items.push(reference);
            }
            Err(e) => {
                debug!(line = %line, error = %e, "Line not recognized");
                result.skipped.push(line.to_string());
            }
        }
    }

    info!(
        references = result.len(),
        skipped = result.skipped_count(),
        "Parsing complete"
    );
    result
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::super::reference::ResourceKind;
    use super::*;

    #[test]
    fn test_parse_input_empty_string() {
        let result = parse_input("");
        assert!(result.is_empty());
        assert_eq!(result.skipped_count(), 0);
    }

    #[test]
    fn test_parse_input_whitespace_only() {
        let result = parse_input("   \n\t\n  ");
        assert!(result.is_empty());
        assert_eq!(result.skipped_count(), 0);
    }

    #[test]
    fn test_parse_input_single_reference() {
        let result = parse_input("https://ecchi.iwara.tv/videos/abc123");
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].kind, ResourceKind::Video);
        assert_eq!(result.items[0].id, "abc123");
    }

    #[test]
    fn test_parse_input_multiple_lines_preserve_order() {
        let input = "https://ecchi.iwara.tv/videos/first\n\
                     https://iwara.tv/videos/second\n\
                     https://ecchi.iwara.tv/users/third";
        let result = parse_input(input);
        assert_eq!(result.len(), 3);
        assert_eq!(result.items[0].id, "first");
        assert_eq!(result.items[1].id, "second");
        assert_eq!(result.items[2].id, "third");
        assert_eq!(result.items[2].kind, ResourceKind::User);
    }

    #[test]
    fn test_parse_input_skips_blank_lines() {
        let input = "\nhttps://ecchi.iwara.tv/videos/abc123\n\n\n";
        let result = parse_input(input);
        assert_eq!(result.len(), 1);
        assert_eq!(result.skipped_count(), 0);
    }

    #[test]
    fn test_parse_input_collects_unrecognized_lines() {
        let input = "https://ecchi.iwara.tv/videos/good\n\
                     not a url\n\
                     https://example.com/other";
        let result = parse_input(input);
        assert_eq!(result.len(), 1);
        assert_eq!(result.items[0].id, "good");
        assert_eq!(result.skipped, vec!["not a url", "https://example.com/other"]);
    }

    #[test]
    fn test_parse_input_batch_continues_past_bad_lines() {
        let input = "garbage\nhttps://ecchi.iwara.tv/videos/abc123\nmore garbage";
        let result = parse_input(input);
        assert_eq!(result.len(), 1);
        assert_eq!(result.skipped_count(), 2);
    }

    #[test]
    fn test_parse_result_display() {
        let result = parse_input("https://ecchi.iwara.tv/videos/abc123\njunk");
        assert_eq!(result.to_string(), "Parsed 1 references (1 skipped)");
    }
}
