//! Parameter types configuring the detector stages.
//!
//! Defaults: binarization at 30, hysteresis thresholds 50/150, five-point
//! fitting floor, ten-pixel axis gate. Parameters are global: every image
//! in a run is processed with the same values.

use crate::edges::EdgeParams;
use crate::fit::FitParams;
use crate::preprocess::PreprocessParams;

/// Detector-wide parameters controlling the per-image pipeline.
#[derive(Clone, Copy, Debug, Default)]
pub struct CraterParams {
    /// Smoothing/binarization stage.
    pub preprocess: PreprocessParams,
    /// Edge extraction stage.
    pub edges: EdgeParams,
    /// Ellipse fitting policy.
    pub fit: FitParams,
}
