//! End-to-end conversion: discover, convert, split, write.

use std::path::{Path, PathBuf};

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::discover::{discover_images, read_reference_dimensions};
use crate::error::ManifestError;
use crate::manifest::collect_manifest;
use crate::split::{self, SamplingMode, SplitReport};
use crate::writer::write_manifests;

/// Settings for one conversion run.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    pub img_dir: PathBuf,
    /// Defaults to `img_dir`.
    pub label_dir: Option<PathBuf>,
    /// Defaults to the label directory.
    pub output_dir: Option<PathBuf>,
    pub val_fraction: f64,
    pub ignore_missing_labels: bool,
    pub overwrite: bool,
    pub sampling: SamplingMode,
    pub seed: Option<u64>,
}

impl ConvertOptions {
    pub fn new(img_dir: impl Into<PathBuf>, val_fraction: f64) -> Self {
        Self {
            img_dir: img_dir.into(),
            label_dir: None,
            output_dir: None,
            val_fraction,
            ignore_missing_labels: false,
            overwrite: false,
            sampling: SamplingMode::default(),
            seed: None,
        }
    }

    pub fn label_dir(&self) -> &Path {
        self.label_dir.as_deref().unwrap_or(&self.img_dir)
    }

    pub fn output_dir(&self) -> &Path {
        self.output_dir.as_deref().unwrap_or_else(|| self.label_dir())
    }
}

/// Run the conversion, seeding from `opts.seed` or system entropy.
pub fn run_conversion(opts: &ConvertOptions) -> Result<SplitReport, ManifestError> {
    if let Some(seed) = opts.seed {
        let mut rng = StdRng::seed_from_u64(seed);
        run_conversion_with_rng(opts, &mut rng)
    } else {
        let mut rng = rand::rng();
        run_conversion_with_rng(opts, &mut rng)
    }
}

/// Run the conversion drawing validation indices from `rng`.
///
/// Nothing is written unless every image converts successfully.
pub fn run_conversion_with_rng<R: Rng + ?Sized>(
    opts: &ConvertOptions,
    rng: &mut R,
) -> Result<SplitReport, ManifestError> {
    split::validate_val_fraction(opts.val_fraction)?;

    let images = discover_images(&opts.img_dir)?;
    let dims = read_reference_dimensions(&images[0])?;
    info!(
        "Using {}x{} from {} for all images",
        dims.width,
        dims.height,
        images[0].path.display()
    );

    let lines = collect_manifest(
        &images,
        opts.label_dir(),
        dims,
        opts.ignore_missing_labels,
    )?;

    let split = split::partition(&lines, opts.val_fraction, opts.sampling, rng)?;
    let paths = write_manifests(opts.output_dir(), &split, opts.overwrite)?;

    Ok(SplitReport::new(
        &lines,
        dims,
        &split,
        opts.sampling,
        paths.train,
        paths.val,
    ))
}
