//! Iwara Download Library
//!
//! This library provides the core functionality for the iwara-dl tool,
//! which fetches video metadata and media files from iwara.tv by combining
//! the site's HTML detail pages with its JSON format API.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`parser`] - Resource reference parsing for page URLs and batch lists
//! - [`session`] - Shared HTTP session for page, API, and media requests
//! - [`extract`] - Metadata extraction from detail pages and the format API
//! - [`download`] - Filename construction and the streaming transfer engine
//! - [`sidecar`] - Metadata JSON and thumbnail files written next to downloads
//! - [`downloader`] - Per-reference orchestration of the full flow

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod download;
pub mod downloader;
pub mod extract;
pub mod parser;
pub mod session;
pub mod sidecar;

// Re-export commonly used types
pub use download::{
    MISSING_FIELD_SENTINEL, ProgressMode, TEMP_EXTENSION, Transfer, TransferError,
    TransferOutcome, create_filename, sanitize_for_path,
};
pub use downloader::{DEFAULT_QUALITY, DownloadError, DownloadOptions, Downloader, Outcome};
pub use extract::{ExtractError, FormatVariant, MetadataExtractor, VideoRecord, select_variant};
pub use parser::{ParseResult, ReferenceError, ResourceKind, ResourceRef, parse_input};
pub use session::Session;
