//! Train/validation partitioning.
//!
//! The validation set is `round(v * N)` indices drawn uniformly from
//! `[0, N)`. Training is every index that was never drawn, in original
//! order. With the default [`SamplingMode::WithReplacement`] the same index
//! may be drawn more than once: the validation set then repeats that line
//! and `train.len() + val.len()` falls short of `N`.

pub mod report;

pub use report::SplitReport;

use std::collections::HashSet;

use log::{info, warn};
use rand::seq::SliceRandom;
use rand::{rngs::StdRng, Rng, RngExt, SeedableRng};
use serde::Serialize;

use crate::error::ManifestError;
use crate::manifest::ManifestLine;

/// How validation indices are drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SamplingMode {
    /// Independent uniform draws; duplicates are possible.
    #[default]
    WithReplacement,
    /// A distinct subset, giving a true disjoint split.
    WithoutReplacement,
}

impl SamplingMode {
    pub fn name(&self) -> &'static str {
        match self {
            SamplingMode::WithReplacement => "with-replacement",
            SamplingMode::WithoutReplacement => "without-replacement",
        }
    }
}

/// The two manifest sequences produced by one run.
#[derive(Clone, Debug, Default)]
pub struct DatasetSplit {
    pub train: Vec<ManifestLine>,
    pub val: Vec<ManifestLine>,
    /// Indices into the input sequence, in draw order.
    pub val_indices: Vec<usize>,
}

impl DatasetSplit {
    /// Number of different indices that ended up in validation.
    pub fn distinct_val_indices(&self) -> usize {
        self.val_indices.iter().collect::<HashSet<_>>().len()
    }

    /// Draws that repeated an index already drawn.
    pub fn duplicate_draws(&self) -> usize {
        self.val_indices.len() - self.distinct_val_indices()
    }
}

/// Reject fractions outside `[0, 1]`.
pub fn validate_val_fraction(fraction: f64) -> Result<(), ManifestError> {
    if (0.0..=1.0).contains(&fraction) {
        Ok(())
    } else {
        Err(ManifestError::InvalidValFraction { value: fraction })
    }
}

/// Number of validation draws for `total` lines: `round(total * fraction)`.
pub fn val_count(total: usize, fraction: f64) -> usize {
    let raw = (total as f64 * fraction).round() as usize;
    raw.min(total)
}

/// Draw `k` indices from `[0, total)` according to `mode`.
pub fn draw_val_indices<R: Rng + ?Sized>(
    total: usize,
    k: usize,
    mode: SamplingMode,
    rng: &mut R,
) -> Vec<usize> {
    if total == 0 || k == 0 {
        return Vec::new();
    }

    match mode {
        SamplingMode::WithReplacement => (0..k).map(|_| rng.random_range(0..total)).collect(),
        SamplingMode::WithoutReplacement => {
            let mut indices: Vec<usize> = (0..total).collect();
            indices.shuffle(rng);
            indices.truncate(k.min(total));
            indices
        }
    }
}

/// Split `lines` into training and validation using the given generator.
pub fn partition<R: Rng + ?Sized>(
    lines: &[ManifestLine],
    fraction: f64,
    mode: SamplingMode,
    rng: &mut R,
) -> Result<DatasetSplit, ManifestError> {
    validate_val_fraction(fraction)?;

    let k = val_count(lines.len(), fraction);
    let val_indices = draw_val_indices(lines.len(), k, mode, rng);
    let drawn: HashSet<usize> = val_indices.iter().copied().collect();

    let val = val_indices.iter().map(|&i| lines[i].clone()).collect();
    let train = lines
        .iter()
        .enumerate()
        .filter(|(i, _)| !drawn.contains(i))
        .map(|(_, line)| line.clone())
        .collect();

    let split = DatasetSplit {
        train,
        val,
        val_indices,
    };

    let duplicates = split.duplicate_draws();
    if duplicates > 0 {
        warn!(
            "{} validation draw(s) repeated an image; val.txt contains duplicate lines",
            duplicates
        );
    }
    info!(
        "Split {} image(s) into {} train / {} val ({})",
        lines.len(),
        split.train.len(),
        split.val.len(),
        mode.name()
    );

    Ok(split)
}

/// Split with a seeded generator when `seed` is set, system entropy otherwise.
pub fn partition_seeded(
    lines: &[ManifestLine],
    fraction: f64,
    mode: SamplingMode,
    seed: Option<u64>,
) -> Result<DatasetSplit, ManifestError> {
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        partition(lines, fraction, mode, &mut rng)
    } else {
        let mut rng = rand::rng();
        partition(lines, fraction, mode, &mut rng)
    }
}
