//! Detection records in target-image coordinates.

use crate::template::base_symbol_name;
use crate::util::math::overlap_1d;

/// One placement of a symbol template in the target image.
#[derive(Clone, Debug, PartialEq)]
pub struct Detection {
    /// X coordinate (column) of the top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the top-left corner.
    pub y: usize,
    /// Width of the resized template in pixels.
    pub width: usize,
    /// Height of the resized template in pixels.
    pub height: usize,
    /// Normalized cross-correlation score in `[-1, 1]`.
    pub score: f32,
    /// Name of the template that produced the detection.
    pub symbol: String,
    /// Scale factor the template was resized by.
    pub scale: f32,
}

impl Detection {
    /// Exclusive right edge.
    pub fn right(&self) -> usize {
        self.x + self.width
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> usize {
        self.y + self.height
    }

    /// Box area in pixels.
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// Symbol identity with any extension or variant suffix removed.
    pub fn base_symbol(&self) -> &str {
        base_symbol_name(&self.symbol)
    }

    /// Intersection over union of the two axis-aligned boxes.
    ///
    /// Boxes that only touch along an edge do not intersect.
    pub fn iou(&self, other: &Detection) -> f32 {
        let iw = overlap_1d(self.x, self.right(), other.x, other.right());
        let ih = overlap_1d(self.y, self.bottom(), other.y, other.bottom());
        let inter = iw * ih;
        if inter == 0 {
            return 0.0;
        }
        let union = self.area() + other.area() - inter;
        (inter as f64 / union as f64) as f32
    }
}
