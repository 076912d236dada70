//! CLI entry point for the iwara-dl tool.

use std::process::ExitCode;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use iwara_dl::TransferOutcome;
use iwara_dl::downloader::Downloader;
use iwara_dl::parser::parse_input;

mod cli;

use cli::Args;

/// Exit status of a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunOutcome {
    /// Every reference completed (downloads and skips both count)
    Success,
    /// Some references completed, some failed
    Partial,
    /// No reference completed
    Failure,
}

impl RunOutcome {
    fn from_counts(completed: usize, failed: usize) -> Self {
        if failed == 0 {
            Self::Success
        } else if completed > 0 {
            Self::Partial
        } else {
            Self::Failure
        }
    }

    fn exit_code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::Partial => 3,
            Self::Failure => 1,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<RunOutcome> {
    let args = Args::parse();
    init_tracing(&args);
    debug!(?args, "CLI arguments parsed");

    let input_text = gather_input(&args)?;
    let parsed = parse_input(&input_text);
    for line in &parsed.skipped {
        warn!(line = %line, "Skipped unrecognized input");
    }
    if parsed.is_empty() {
        bail!("no qualified resource URL provided; pass page URLs or -f <file>");
    }
    info!(
        references = parsed.len(),
        skipped = parsed.skipped_count(),
        "Input parsed"
    );

    let downloader = Downloader::new(args.download_options());
    let mut completed = 0usize;
    let mut failed = 0usize;

    for reference in &parsed.items {
        match downloader.run(reference).await {
            Ok(outcome) => {
                completed += 1;
                match &outcome.transfer {
                    TransferOutcome::Downloaded { path, bytes } => {
                        info!(path = %path.display(), bytes, "Downloaded");
                    }
                    TransferOutcome::SkippedExisting { path, .. } => {
                        info!(path = %path.display(), "Already complete, skipped");
                    }
                }
            }
            Err(e) => {
                failed += 1;
                warn!(reference = %reference, error = %e, "Reference failed");
            }
        }
    }

    info!(completed, failed, total = parsed.len(), "Run complete");
    Ok(RunOutcome::from_counts(completed, failed))
}

/// Collects the raw input text: the list file when given (URL arguments
/// are then ignored with a warning), otherwise the URL arguments.
fn gather_input(args: &Args) -> anyhow::Result<String> {
    if let Some(path) = &args.file {
        if !args.references.is_empty() {
            warn!("Ignoring URL arguments and processing -f/--file.");
        }
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read list file {}", path.display()));
    }
    Ok(args.references.join("\n"))
}

/// Initializes the tracing subscriber. An explicit RUST_LOG wins; otherwise
/// verbosity flags choose the level (quiet=error, default=info, -v=debug,
/// -vv=trace).
fn init_tracing(args: &Args) {
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
