use std::path::PathBuf;
use thiserror::Error;

/// The main error type for manifest conversion.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid image folder {path}: {message}")]
    ImageDirInvalid { path: PathBuf, message: String },

    #[error("No .jpg, .jpeg or .png images found in {path}")]
    NoImagesFound { path: PathBuf },

    #[error("Failed to read image dimensions from {path}: {source}")]
    ImageDimensionRead {
        path: PathBuf,
        #[source]
        source: imagesize::ImageError,
    },

    #[error("Image {path} is {width}x{height}, which does not fit in u32")]
    ImageDimensionOverflow {
        path: PathBuf,
        width: usize,
        height: usize,
    },

    #[error("Label file {path} does not exist")]
    MissingLabelFile { path: PathBuf },

    #[error("Malformed label line in {path}:{line}: {message}")]
    MalformedLabelLine {
        path: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Validation fraction must be within [0.0, 1.0], got {value}")]
    InvalidValFraction { value: f64 },

    #[error("{path} {message}")]
    OutputConflict { path: PathBuf, message: String },

    #[error("Failed to serialize run report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}
