//! Crater detector orchestrating the per-image pipeline.
//!
//! Overview
//! - Smooths and binarizes the grayscale input with a fixed global
//!   threshold.
//! - Extracts a binary edge map with Sobel gradients, direction-aligned
//!   non-maximum suppression, and two-threshold hysteresis linking.
//! - Traces the external boundary of every edge component.
//! - Fits a least-squares ellipse to each sufficiently long boundary and
//!   applies the size/ordering policy.
//!
//! Modules
//! - [`params`] – configuration types used by the detector and CLI.
//! - `pipeline` – the [`CraterDetector`] implementation.
//!
//! Processing one image is fully independent of every other image: the
//! detector holds only parameters and may be shared across worker threads.

pub mod params;
mod pipeline;

pub use params::CraterParams;
pub use pipeline::{CraterDetector, DetectionReport};
