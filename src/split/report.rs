//! Summary of one conversion run.
//!
//! Printed to stdout after the manifests are written, either as a short
//! text block or as JSON for programmatic use.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use super::{DatasetSplit, SamplingMode};
use crate::discover::ImageDimensions;
use crate::manifest::ManifestLine;

/// Counts and outputs of a finished run.
#[derive(Clone, Debug, Serialize)]
pub struct SplitReport {
    /// Images discovered (one manifest line each).
    pub images: usize,
    /// Size measured from the first image and applied to all.
    pub reference_dimensions: ImageDimensions,
    /// Images whose label file was absent and treated as empty.
    pub missing_labels: usize,
    /// Boxes across all manifest lines.
    pub boxes: usize,
    pub sampling: SamplingMode,
    pub train: usize,
    pub val: usize,
    pub distinct_val: usize,
    pub duplicate_val_draws: usize,
    pub train_file: PathBuf,
    pub val_file: PathBuf,
}

impl SplitReport {
    pub fn new(
        lines: &[ManifestLine],
        dims: ImageDimensions,
        split: &DatasetSplit,
        sampling: SamplingMode,
        train_file: PathBuf,
        val_file: PathBuf,
    ) -> Self {
        Self {
            images: lines.len(),
            reference_dimensions: dims,
            missing_labels: lines.iter().filter(|line| line.label_missing).count(),
            boxes: lines.iter().map(|line| line.boxes.len()).sum(),
            sampling,
            train: split.train.len(),
            val: split.val.len(),
            distinct_val: split.distinct_val_indices(),
            duplicate_val_draws: split.duplicate_draws(),
            train_file,
            val_file,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Converted {} image(s) with {} box(es) at {}x{}",
            self.images, self.boxes, self.reference_dimensions.width, self.reference_dimensions.height
        )?;
        if self.missing_labels > 0 {
            writeln!(f, "  {} image(s) had no label file", self.missing_labels)?;
        }
        writeln!(f, "  train: {} -> {}", self.train, self.train_file.display())?;
        writeln!(f, "  val:   {} -> {}", self.val, self.val_file.display())?;
        if self.duplicate_val_draws > 0 {
            writeln!(
                f,
                "  note: {} duplicate validation draw(s) ({} distinct image(s) in val)",
                self.duplicate_val_draws, self.distinct_val
            )?;
        }
        Ok(())
    }
}
