//! Download module: output naming and the streaming transfer engine.
//!
//! [`create_filename`] turns extracted metadata into a sanitized output
//! path; [`Transfer`] streams the media body into that path through a
//! `.part` staging file.

mod error;
mod filename;
mod transfer;

pub use error::TransferError;
pub use filename::{
    DEFAULT_FILENAME_TEMPLATE, FilenameError, MISSING_FIELD_SENTINEL, TEMP_EXTENSION,
    create_filename, replace_extension, sanitize_for_path,
};
pub use transfer::{ProgressMode, Transfer, TransferOutcome};
