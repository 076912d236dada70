//! Input parsing module for recognizing downloadable resource references.
//!
//! Input arrives either as command-line arguments or as a newline-delimited
//! list file. Each non-blank line must be a fully qualified iwara.tv page
//! URL; anything else is reported as skipped rather than aborting the batch.

mod error;
mod input;
mod reference;

pub use error::{MAX_INPUT_PREVIEW, ReferenceError};
pub use input::{ParseResult, parse_input};
pub use reference::{ResourceKind, ResourceRef};
