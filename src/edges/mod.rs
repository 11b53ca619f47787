//! Two-threshold edge extraction from the binarized grid.
//!
//! The stage is a Canny-style chain with fixed constants:
//!
//! - Sobel 3×3 gradients with border clamping (replicate).
//! - Non-maximum suppression with a direction-aligned 4-neighborhood.
//! - Hysteresis linking: magnitudes at or above the high threshold seed
//!   edges; weaker pixels at or above the low threshold are kept only when
//!   8-connected to a seed.
//!
//! Thresholds are expressed in 8-bit Sobel magnitude units (the input keeps
//! its 0–255 range when converted to float). The stage is deterministic.

pub mod grad;
pub mod hysteresis;
pub mod nms;

pub use grad::{sobel_gradients, Grad};
pub use hysteresis::link_edges;
pub use nms::suppress_nonmax;

use crate::image::{Gray8, ImageF32, ImageU8, ImageView, ImageViewMut};

/// Low hysteresis threshold: minimum magnitude for a weak edge pixel.
pub const EDGE_LOW_THRESHOLD: f32 = 50.0;
/// High hysteresis threshold: minimum magnitude for a strong seed pixel.
pub const EDGE_HIGH_THRESHOLD: f32 = 150.0;

/// Parameters for the edge extraction stage.
#[derive(Clone, Copy, Debug)]
pub struct EdgeParams {
    /// Weak-edge gate (kept only when linked to a strong seed).
    pub low_threshold: f32,
    /// Strong-seed gate.
    pub high_threshold: f32,
}

impl Default for EdgeParams {
    fn default() -> Self {
        Self {
            low_threshold: EDGE_LOW_THRESHOLD,
            high_threshold: EDGE_HIGH_THRESHOLD,
        }
    }
}

/// Produce a binary edge map ({0, 255}) of the same dimensions as `binary`.
pub fn detect_edges(binary: &Gray8, params: &EdgeParams) -> Gray8 {
    let luma = to_f32(binary.as_view());
    let grad = sobel_gradients(&luma);
    let suppressed = suppress_nonmax(&grad);
    link_edges(&suppressed, params.low_threshold, params.high_threshold)
}

fn to_f32(img: ImageU8<'_>) -> ImageF32 {
    let mut out = ImageF32::new(img.w, img.h);
    for y in 0..img.h {
        let src = img.row(y);
        let dst = out.row_mut(y);
        for x in 0..img.w {
            dst[x] = src[x] as f32;
        }
    }
    out
}
