//! Manifest line assembly.
//!
//! Each discovered image becomes one line: the path of its label file
//! followed by every box as `x1,y1,x2,y2,id`, space separated.

use std::fmt;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::discover::{ImageDimensions, ImageFile};
use crate::error::ManifestError;
use crate::label::{self, PixelBox};

/// One row of `train.txt` / `val.txt`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ManifestLine {
    /// Path of the label file, not of the image.
    pub label_path: PathBuf,
    pub boxes: Vec<PixelBox>,
    /// Set when the label file was absent and treated as empty.
    pub label_missing: bool,
}

impl ManifestLine {
    /// Render the line including its trailing newline.
    ///
    /// An image without boxes renders as `<label_path> \n`.
    pub fn render(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for ManifestLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.label_path.display())?;
        for (i, pixel_box) in self.boxes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{pixel_box}")?;
        }
        Ok(())
    }
}

/// Build the manifest line for a single image.
///
/// `dims` is the reference size measured once per run; it is applied to
/// every image regardless of that image's real size.
pub fn convert(
    image: &ImageFile,
    label_dir: &Path,
    dims: ImageDimensions,
    ignore_missing: bool,
) -> Result<ManifestLine, ManifestError> {
    let label_path = image.label_path(label_dir);

    if !label_path.is_file() {
        if !ignore_missing {
            return Err(ManifestError::MissingLabelFile { path: label_path });
        }
        warn!(
            "No label file for {}, treating it as empty",
            image.path.display()
        );
        return Ok(ManifestLine {
            label_path,
            boxes: Vec::new(),
            label_missing: true,
        });
    }

    let boxes: Vec<PixelBox> = label::read_label_file(&label_path)?
        .iter()
        .map(|norm| norm.to_pixel(dims))
        .collect();
    debug!("{}: {} box(es)", label_path.display(), boxes.len());

    Ok(ManifestLine {
        label_path,
        boxes,
        label_missing: false,
    })
}

/// Convert every image in order, stopping at the first failure.
pub fn collect_manifest(
    images: &[ImageFile],
    label_dir: &Path,
    dims: ImageDimensions,
    ignore_missing: bool,
) -> Result<Vec<ManifestLine>, ManifestError> {
    images
        .iter()
        .map(|image| convert(image, label_dir, dims, ignore_missing))
        .collect()
}
