//! Box types for the two coordinate spaces a label passes through.

use std::fmt;

use crate::discover::ImageDimensions;

/// One row of a YOLO label file: a class token plus a center-relative box.
///
/// All four coordinates are fractions of the image size. The class id is
/// kept as the raw token from the file and never parsed as a number.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedBox {
    pub class_id: String,
    pub cx: f64,
    pub cy: f64,
    pub w: f64,
    pub h: f64,
}

impl NormalizedBox {
    /// Resolve this box against the shared reference dimensions.
    ///
    /// The first corner is always the center plus half the extent and the
    /// second the center minus half the extent, so for positive sizes
    /// `x1 >= x2` and `y1 >= y2`. Consumers of the manifest depend on this
    /// order, so it is not normalised to min/max. Each coordinate is
    /// truncated toward zero.
    pub fn to_pixel(&self, dims: ImageDimensions) -> PixelBox {
        let width = dims.width as f64;
        let height = dims.height as f64;
        let half_w = self.w / 2.0;
        let half_h = self.h / 2.0;

        PixelBox {
            x1: truncate((self.cx + half_w) * width),
            y1: truncate((self.cy + half_h) * height),
            x2: truncate((self.cx - half_w) * width),
            y2: truncate((self.cy - half_h) * height),
            class_id: self.class_id.clone(),
        }
    }
}

/// A label resolved to integer pixel coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PixelBox {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
    pub class_id: String,
}

/// Formats as `x1,y1,x2,y2,id`, the manifest group syntax.
impl fmt::Display for PixelBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{},{}",
            self.x1, self.y1, self.x2, self.y2, self.class_id
        )
    }
}

#[inline]
fn truncate(value: f64) -> i64 {
    // Toward zero; parsing already rejects non-finite input.
    value as i64
}
