//! Cleansplit: train/val/test splitting for class-folder image datasets.
//!
//! The expected source layout is one class folder per label (for example
//! `raw_images/Plastic Images/*.jpg`); `split` partitions each class into
//! `train/val/test` trees by target ratios, and `scan` reports what a split
//! run would see without writing anything.
//!
//! # Modules
//!
//! - [`dataset`]: source tree scanning (class folders, clean names, filtering)
//! - [`split`]: split planning and materialization
//! - [`scan`]: read-only source tree inspection
//! - [`classify`]: the inference-side classifier boundary (library only)
//! - [`error`]: error types for cleansplit operations

pub mod classify;
pub mod dataset;
pub mod error;
pub mod scan;
pub mod split;

use std::fmt;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

pub use error::CleansplitError;

/// The cleansplit CLI application.
#[derive(Parser)]
#[command(name = "cleansplit")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Partition class folders of images into train/val/test trees.
    Split(SplitArgs),
    /// Inspect a source tree without writing anything.
    Scan(ScanArgs),
}

/// Arguments for the split subcommand.
#[derive(clap::Args)]
struct SplitArgs {
    /// Directory whose immediate subdirectories are class folders.
    source: PathBuf,

    /// Output directory for the train/val/test trees.
    destination: PathBuf,

    /// Fraction of each class assigned to train.
    #[arg(long, default_value_t = 0.70)]
    train: f64,

    /// Fraction of each class assigned to val.
    #[arg(long, default_value_t = 0.15)]
    val: f64,

    /// Fraction of each class assigned to test.
    #[arg(long, default_value_t = 0.15)]
    test: f64,

    /// Shuffle seed for a reproducible split.
    #[arg(long)]
    seed: Option<u64>,

    /// Replace a non-empty pre-existing destination tree.
    #[arg(long)]
    force: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Arguments for the scan subcommand.
#[derive(clap::Args)]
struct ScanArgs {
    /// Directory whose immediate subdirectories are class folders.
    source: PathBuf,

    /// Output format for the report.
    #[arg(long, value_enum, default_value = "text")]
    output: OutputFormat,
}

/// Report output formats, rejected by clap before any work happens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Run the cleansplit CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), CleansplitError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Split(args)) => run_split(args),
        Some(Commands::Scan(args)) => run_scan(args),
        None => {
            println!("cleansplit {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Train/val/test splitter for image classification datasets.");
            println!();
            println!("Run 'cleansplit --help' for usage information.");
            Ok(())
        }
    }
}

/// Execute the split subcommand.
fn run_split(args: SplitArgs) -> Result<(), CleansplitError> {
    // Ratio validation happens here, before any filesystem access.
    let ratios = split::SplitRatios::new(args.train, args.val, args.test)?;

    let options = split::SplitOptions {
        source: args.source,
        destination: args.destination,
        ratios,
        seed: args.seed,
        force: args.force,
    };

    let report = split::run_split(&options)?;
    print_report(&report, args.output)?;

    if report.has_failures() {
        return Err(CleansplitError::SplitFailed {
            failure_count: report.failures.len(),
            report,
        });
    }
    Ok(())
}

/// Execute the scan subcommand.
fn run_scan(args: ScanArgs) -> Result<(), CleansplitError> {
    let report = scan::scan_report(&args.source)?;
    print_report(&report, args.output)
}

fn print_report<T: fmt::Display + Serialize>(
    report: &T,
    output: OutputFormat,
) -> Result<(), CleansplitError> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(report)?),
        OutputFormat::Text => print!("{report}"),
    }
    Ok(())
}
