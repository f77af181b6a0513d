//! Per-image YOLO label files and the boxes they describe.
//!
//! A label file holds one box per line as `<id> <cx> <cy> <w> <h>`, with
//! coordinates normalized to the image size. [`NormalizedBox`] is that row;
//! [`PixelBox`] is the same box resolved to integer pixel corners.

mod boxes;
pub mod parse;

pub use boxes::{NormalizedBox, PixelBox};
pub use parse::{parse_label_str, read_label_file};
