//! Image discovery and the single reference-size measurement.
//!
//! Images are the direct children of the image folder with a `jpg`, `jpeg`
//! or `png` extension (lower- or upper-case), ordered with a numeric-aware
//! comparison so that `img2` comes before `img10`.

use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

use log::{debug, info};
use serde::Serialize;
use walkdir::WalkDir;

use crate::error::ManifestError;

const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "png", "jpeg"];
const LABEL_EXTENSION: &str = "txt";

/// An image found on disk.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageFile {
    pub path: PathBuf,
}

impl ImageFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The label file expected for this image: its file name with a `.txt`
    /// extension, inside `label_dir`.
    pub fn label_path(&self, label_dir: &Path) -> PathBuf {
        let file_name = self.path.file_name().unwrap_or(self.path.as_os_str());
        label_dir.join(file_name).with_extension(LABEL_EXTENSION)
    }
}

/// Pixel size shared by every image of one run.
///
/// Only the first image is measured; all label conversions reuse the result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Find all images in `dir`, naturally sorted by full path.
///
/// Fails with [`ManifestError::NoImagesFound`] when nothing matches.
pub fn discover_images(dir: &Path) -> Result<Vec<ImageFile>, ManifestError> {
    if !dir.is_dir() {
        return Err(ManifestError::ImageDirInvalid {
            path: dir.to_path_buf(),
            message: "not a directory".to_string(),
        });
    }

    let mut files: Vec<(String, PathBuf)> = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
        let entry = entry.map_err(|source| ManifestError::ImageDirInvalid {
            path: dir.to_path_buf(),
            message: format!("failed while traversing directory: {source}"),
        })?;

        if entry.file_type().is_file() && is_image(entry.path()) {
            let path = entry.into_path();
            files.push((path.to_string_lossy().into_owned(), path));
        }
    }

    if files.is_empty() {
        return Err(ManifestError::NoImagesFound {
            path: dir.to_path_buf(),
        });
    }

    files.sort_by(|a, b| natural_cmp(&a.0, &b.0).then_with(|| a.1.cmp(&b.1)));
    info!("Found {} image(s) in {}", files.len(), dir.display());

    Ok(files.into_iter().map(|(_, path)| ImageFile::new(path)).collect())
}

/// Measure the first image. Every other image is assumed to share its size.
pub fn read_reference_dimensions(image: &ImageFile) -> Result<ImageDimensions, ManifestError> {
    let path = &image.path;
    let size = imagesize::size(path).map_err(|source| ManifestError::ImageDimensionRead {
        path: path.to_path_buf(),
        source,
    })?;

    let dims = dimensions_from_size(path, size.width, size.height)?;
    debug!(
        "Reference image {} is {}x{}",
        path.display(),
        dims.width,
        dims.height
    );
    Ok(dims)
}

fn dimensions_from_size(
    path: &Path,
    width: usize,
    height: usize,
) -> Result<ImageDimensions, ManifestError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(width), Ok(height)) => Ok(ImageDimensions { width, height }),
        _ => Err(ManifestError::ImageDimensionOverflow {
            path: path.to_path_buf(),
            width,
            height,
        }),
    }
}

fn is_image(path: &Path) -> bool {
    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
        return false;
    };

    // Only the all-lower and all-upper spellings count, e.g. `Jpg` does not.
    IMAGE_EXTENSIONS
        .iter()
        .any(|allowed| ext == *allowed || ext == allowed.to_ascii_uppercase())
}

/// Compare two strings treating runs of ASCII digits as numbers.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_run = take_digits(&mut left);
                let r_run = take_digits(&mut right);
                match compare_digit_runs(&l_run, &r_run) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
            (Some(l), Some(r)) => {
                left.next();
                right.next();
                match l.cmp(&r) {
                    Ordering::Equal => {}
                    other => return other,
                }
            }
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.next_if(|c| c.is_ascii_digit()) {
        run.push(c);
    }
    run
}

// Digit runs of any length compare by value; `007` and `7` tie on value and
// fall back to the shorter run first.
fn compare_digit_runs(a: &str, b: &str) -> Ordering {
    let a_value = a.trim_start_matches('0');
    let b_value = b.trim_start_matches('0');
    a_value
        .len()
        .cmp(&b_value.len())
        .then_with(|| a_value.cmp(b_value))
        .then_with(|| a.len().cmp(&b.len()))
}
