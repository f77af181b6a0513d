//! labelimg2train: turn per-image YOLO label files into train/val manifests.
//!
//! Every image in a folder has a companion `<stem>.txt` holding boxes as
//! normalized `id cx cy w h` rows. This crate resolves those boxes against
//! a single reference image size and writes two manifests, `train.txt` and
//! `val.txt`, with one line per image:
//!
//! ```text
//! <label_path> x1,y1,x2,y2,id x1,y1,x2,y2,id ...
//! ```
//!
//! # Modules
//!
//! - [`discover`]: Image discovery, natural ordering and the reference image size
//! - [`label`]: Label file parsing and box conversion
//! - [`manifest`]: Manifest line assembly
//! - [`split`]: Train/validation partitioning and the run report
//! - [`writer`]: Manifest file output
//! - [`pipeline`]: The end-to-end conversion
//! - [`error`]: Error types

pub mod discover;
pub mod error;
pub mod label;
pub mod manifest;
pub mod pipeline;
pub mod split;
pub mod writer;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Parser, ValueEnum};

pub use error::ManifestError;
pub use pipeline::{run_conversion, ConvertOptions};
pub use split::SamplingMode;

/// Convert YOLO label files into train.txt and val.txt manifests.
///
/// All images are assumed to share the size of the first one.
#[derive(Parser, Debug)]
#[command(name = "labelimg2train")]
#[command(version, about)]
struct Cli {
    /// Folder containing the images
    #[arg(short = 'i', long = "img_folder")]
    img_folder: PathBuf,

    /// Fraction of images to use for validation, between 0 and 1
    #[arg(short = 'v', long = "val_percentage", value_parser = parse_fraction)]
    val_percentage: f64,

    /// Folder containing the label files [default: the image folder]
    #[arg(short = 'l', long = "label_folder")]
    label_folder: Option<PathBuf>,

    /// Folder to write train.txt and val.txt to [default: the label folder]
    #[arg(short = 'o', long = "output_folder")]
    output_folder: Option<PathBuf>,

    /// Treat images without a label file as having no boxes
    #[arg(long = "ignore_missing_labels")]
    ignore_missing_labels: bool,

    /// Replace train.txt and val.txt if they already exist
    #[arg(long = "overwrite_files")]
    overwrite_files: bool,

    /// Seed for validation sampling [default: system entropy]
    #[arg(long, env = "LABELIMG2TRAIN_SEED")]
    seed: Option<u64>,

    /// How validation images are drawn
    #[arg(long, value_enum, default_value = "with-replacement")]
    sampling: SamplingArg,

    /// Format of the summary printed after writing
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum SamplingArg {
    WithReplacement,
    WithoutReplacement,
}

impl From<SamplingArg> for SamplingMode {
    fn from(arg: SamplingArg) -> Self {
        match arg {
            SamplingArg::WithReplacement => SamplingMode::WithReplacement,
            SamplingArg::WithoutReplacement => SamplingMode::WithoutReplacement,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

fn parse_fraction(s: &str) -> Result<f64, String> {
    match f64::from_str(s) {
        Ok(val) if (0.0..=1.0).contains(&val) => Ok(val),
        _ => Err("must be a number between 0.0 and 1.0".to_string()),
    }
}

/// Run the labelimg2train CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ManifestError> {
    let cli = Cli::parse();

    let opts = ConvertOptions {
        img_dir: cli.img_folder,
        label_dir: cli.label_folder,
        output_dir: cli.output_folder,
        val_fraction: cli.val_percentage,
        ignore_missing_labels: cli.ignore_missing_labels,
        overwrite: cli.overwrite_files,
        sampling: cli.sampling.into(),
        seed: cli.seed,
    };

    let report = run_conversion(&opts)?;

    match cli.report {
        ReportFormat::Json => println!("{}", report.to_json()?),
        ReportFormat::Text => print!("{}", report),
    }

    Ok(())
}
