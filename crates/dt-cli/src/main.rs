//! CLI entry point for the detype converter.
//!
//! This binary converts a TypeScript project directory to plain
//! JavaScript in place: types are erased, module syntax is normalized,
//! and project configuration is migrated.
//!
//! # Usage
//!
//! ```bash
//! detype [OPTIONS] <DIRECTORY>
//!
//! # Convert a project in place
//! detype ./my-project
//!
//! # Skip extra directories and write a JSON report
//! detype ./my-project --skip-dir fixtures --report report.json
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dt_convert::convert_directory;
use dt_core::{ConversionReport, ConvertOptions};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Converts a TypeScript project to plain JavaScript, in place.
///
/// Walks the directory, rewrites every recognized file, renames typed
/// sources to their JavaScript extensions, and prints a summary. Files
/// that fail to convert are left untouched and listed at the end.
#[derive(Parser)]
#[command(name = "detype", version, about, long_about = None)]
struct Cli {
    /// Directory to convert.
    directory: Utf8PathBuf,

    /// Directory names to skip, in addition to the built-in list.
    ///
    /// May be given multiple times.
    #[arg(long = "skip-dir", value_name = "NAME", env = "DETYPE_SKIP_DIRS", value_delimiter = ',')]
    skip_dirs: Vec<String>,

    /// Follow symbolic links during discovery.
    #[arg(long)]
    follow_links: bool,

    /// Write the report as JSON to this file.
    #[arg(long, value_name = "FILE")]
    report: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level.to_owned())
    });

    // Colors are off when the flag or the NO_COLOR env var says so
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints a summary of the conversion report.
fn print_summary(report: &ConversionReport) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(handle);
    let _ = writeln!(handle, "Conversion Summary");
    let _ = writeln!(handle, "==================");
    let _ = writeln!(handle);
    let _ = writeln!(handle, "Files processed: {}", report.total());
    let _ = writeln!(handle, "  Converted:     {}", report.converted);
    let _ = writeln!(handle, "  Unchanged:     {}", report.unchanged);
    let _ = writeln!(handle, "  Failed:        {}", report.failed());

    if !report.failures.is_empty() {
        let _ = writeln!(handle);
        let _ = writeln!(handle, "Failures ({}):", report.failures.len());
        for (path, message) in &report.failures {
            let _ = writeln!(handle, "  {path} - {message}");
        }
    }
}

/// Writes the report as JSON to the given file.
fn write_report(report: &ConversionReport, path: &Utf8PathBuf) -> color_eyre::Result<()> {
    let content = serde_json::to_string_pretty(report)?;
    std::fs::write(path.as_std_path(), content)?;
    info!(path = %path, "Report written");
    Ok(())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let skip_dirs: Vec<&str> = cli.skip_dirs.iter().map(String::as_str).collect();
    let options = ConvertOptions::new(&cli.directory)
        .with_skip_dirs(&skip_dirs)
        .with_follow_links(cli.follow_links);

    let report = convert_directory(&options)?;

    print_summary(&report);
    if let Some(path) = &cli.report {
        write_report(&report, path)?;
    }

    if report.is_clean() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
