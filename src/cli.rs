//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use iwara_dl::downloader::{DEFAULT_QUALITY, DownloadOptions};

/// Download videos and metadata from iwara.tv.
///
/// Pass fully qualified video page URLs directly, or a newline-delimited
/// list file with -f. The selected quality is streamed into the current
/// directory (or along a custom -o template), with optional metadata and
/// thumbnail sidecars next to each file.
#[derive(Parser, Debug)]
#[command(name = "iwara-dl", version, about)]
pub struct Args {
    /// Resource page URLs to download
    #[arg(value_name = "URL")]
    pub references: Vec<String>,

    /// Read URLs from a text file, one per line (overrides URL arguments)
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Quality label to download, e.g. "Source" or "360p"
    #[arg(long, default_value = DEFAULT_QUALITY, value_name = "LABEL")]
    pub quality: String,

    /// Output filename template with {field} placeholders
    #[arg(short = 'o', long = "output-template", value_name = "TEMPLATE")]
    pub output_template: Option<String>,

    /// Write extracted metadata to a JSON sidecar
    #[arg(short = 'm', long)]
    pub dump_metadata: bool,

    /// Save the video thumbnail as a JPEG sidecar
    #[arg(short = 't', long)]
    pub save_thumbnail: bool,

    /// Suppress progress bars and informational output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Maps parsed arguments onto downloader options.
    #[must_use]
    pub fn download_options(&self) -> DownloadOptions {
        DownloadOptions {
            quality: self.quality.clone(),
            filename_template: self.output_template.clone(),
            dump_metadata: self.dump_metadata,
            save_thumbnail: self.save_thumbnail,
            quiet: self.quiet,
        }
    }
}
