//! Error types for resource reference parsing.

use thiserror::Error;

/// Maximum input length shown back to the user in error messages.
/// Anything longer is truncated to keep log lines readable.
pub const MAX_INPUT_PREVIEW: usize = 80;

/// Errors that can occur while parsing resource references.
#[derive(Debug, Clone, Error)]
pub enum ReferenceError {
    /// Input does not match the qualified resource URL shape
    #[error("unrecognized reference '{input_preview}': {reason}\n  Suggestion: {suggestion}")]
    NotRecognized {
        /// The input that failed to match, truncated for display
        input_preview: String,
        /// Why the input was rejected
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },
}

impl ReferenceError {
    /// Creates a `NotRecognized` error for input matching no resource pattern.
    #[must_use]
    pub fn not_recognized(input: &str) -> Self {
        Self::NotRecognized {
            input_preview: input.chars().take(MAX_INPUT_PREVIEW).collect(),
            reason: "not a fully qualified iwara.tv resource URL".to_string(),
            suggestion: "Use a page URL like https://ecchi.iwara.tv/videos/<id>".to_string(),
        }
    }
}
