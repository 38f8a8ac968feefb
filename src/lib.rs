//! Boxdedup: overlap-based duplicate resolution for object detections.
//!
//! Detectors often emit several boxes for the same physical object. For a
//! single image, boxdedup groups candidate boxes whose Intersection over
//! Union (IoU) reaches a threshold and keeps only the highest-scoring box
//! of each group.
//!
//! # Modules
//!
//! - [`overlap`]: IoU between one box and a set of boxes
//! - [`dedup`]: the duplicate resolver and its [`ResolutionResult`]
//! - [`ir`]: box and detection types plus JSON I/O
//! - [`validation`]: geometry checks, also used by strict resolution
//! - [`process`]: applying resolution to whole detection files
//! - [`config`]: YAML run configuration
//! - [`error`]: the crate error type

pub mod config;
pub mod dedup;
pub mod error;
pub mod ir;
pub mod overlap;
pub mod process;
pub mod validation;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

pub use dedup::{resolve_duplicates, resolve_duplicates_with, ResolutionResult, ResolveOptions};
pub use error::DedupError;
pub use overlap::compute_iou;

use config::DedupConfig;
use process::{DedupOutput, DedupReport};

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "BOXDEDUP_LOG";

/// The boxdedup CLI application.
#[derive(Parser)]
#[command(name = "boxdedup")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Remove duplicate boxes from detection files.
    Dedup(DedupArgs),
    /// Check detection files for malformed boxes and records.
    Validate(ValidateArgs),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(clap::Args)]
struct DedupArgs {
    /// Detections JSON file, or a directory searched recursively for them.
    input: PathBuf,

    /// Where to write kept detections (a directory when INPUT is one).
    /// Without it, only the report is printed.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// YAML config file; flags given here override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Minimum IoU for two boxes to count as duplicates, in (0, 1].
    #[arg(long)]
    threshold: Option<f64>,

    /// Reject reversed or non-finite boxes.
    #[arg(long)]
    strict: bool,

    /// Write kept boxes divided by image width/height.
    #[arg(long)]
    normalize: bool,

    /// Directory of images, used to read sizes missing from the records.
    #[arg(long)]
    images_dir: Option<PathBuf>,

    /// Report format.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    report: ReportFormat,
}

#[derive(clap::Args)]
struct ValidateArgs {
    /// Detections JSON file or directory.
    input: PathBuf,

    /// Report warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    output: ReportFormat,
}

/// Run the boxdedup CLI.
///
/// This is the entry point called from `main.rs`.
pub fn run() -> Result<(), DedupError> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Some(Commands::Dedup(args)) => run_dedup(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("boxdedup {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Overlap-based duplicate resolution for object detections.");
            println!();
            println!("Run 'boxdedup --help' for usage information.");
            Ok(())
        }
    }
}

/// Sets up the stderr log subscriber.
///
/// `BOXDEDUP_LOG` wins over `-v` when set.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(level));

    // Ignored when a subscriber is already installed.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Lists the detection files named by `input`, with each one's path
/// relative to `input` (used to mirror directory layouts on output).
fn input_files(input: &Path) -> Result<Vec<(PathBuf, PathBuf)>, DedupError> {
    if input.is_dir() {
        let files = ir::io_json::collect_json_files(input)?;
        Ok(files
            .into_iter()
            .map(|path| {
                let rel = path.strip_prefix(input).unwrap_or(path.as_path()).to_path_buf();
                (path, rel)
            })
            .collect())
    } else {
        let rel = input
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| input.to_path_buf());
        Ok(vec![(input.to_path_buf(), rel)])
    }
}

fn run_dedup(args: DedupArgs) -> Result<(), DedupError> {
    let mut config = match &args.config {
        Some(path) => DedupConfig::from_yaml_file(path)?,
        None => DedupConfig::default(),
    };
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    config.strict |= args.strict;
    config.normalize |= args.normalize;
    if args.images_dir.is_some() {
        config.images_dir = args.images_dir.clone();
    }
    config.validate()?;

    let input_is_dir = args.input.is_dir();
    let files = input_files(&args.input)?;
    info!(count = files.len(), threshold = config.threshold, "deduplicating");

    // Resolve everything before writing anything.
    let mut results: Vec<(PathBuf, DedupOutput, DedupReport)> = Vec::with_capacity(files.len());
    for (path, rel) in files {
        let detections = ir::io_json::read_detections_json(&path)?;
        let (output, report) = process::dedup_detections(&detections, &config)?;
        debug!(path = %path.display(), kept = output.detection_count(), "resolved file");
        results.push((rel, output, report.with_source(path.display().to_string())));
    }

    if let Some(out) = &args.output {
        for (rel, output, _) in &results {
            let target = if input_is_dir {
                out.join(rel)
            } else {
                out.clone()
            };
            output.write_json(&target)?;
            info!(path = %target.display(), "wrote kept detections");
        }
    }

    let reports: Vec<&DedupReport> = results.iter().map(|(_, _, report)| report).collect();
    match args.report {
        ReportFormat::Json => {
            let json = if input_is_dir {
                ir::io_json::to_json_string(&reports)
            } else {
                ir::io_json::to_json_string(&reports[0])
            }
            .map_err(|source| DedupError::DetectionJsonWrite {
                path: PathBuf::from("<stdout>"),
                source,
            })?;
            println!("{}", json);
        }
        ReportFormat::Text => {
            for report in reports {
                print!("{}", report);
            }
        }
    }

    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), DedupError> {
    let opts = validation::ValidateOptions {
        strict: args.strict,
    };

    let mut report = validation::ValidationReport::new();
    for (path, _) in input_files(&args.input)? {
        let detections = ir::io_json::read_detections_json(&path)?;
        report.extend(validation::validate_detection_file(&detections, &opts));
    }

    match args.output {
        ReportFormat::Json => {
            let json = ir::io_json::to_json_string(&report.summary()).map_err(|source| {
                DedupError::DetectionJsonWrite {
                    path: PathBuf::from("<stdout>"),
                    source,
                }
            })?;
            println!("{}", json);
        }
        ReportFormat::Text => print!("{}", report),
    }

    if !report.is_ok() {
        Err(DedupError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
