#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod dataset;
pub mod detector;
pub mod image;
pub mod report;
pub mod types;

// “Expert” modules – still public, but considered unstable internals.
pub mod boundary;
pub mod edges;
pub mod fit;
pub mod preprocess;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{CraterDetector, CraterParams, DetectionReport};
pub use crate::types::Ellipse;

// Row building and the CSV sink.
pub use crate::report::{build_records, DetectionRecord, ReportWriter};

// Identifier derivation used alongside the detector.
pub use crate::dataset::{collect_images, image_id_from_path};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use crater_detector::prelude::*;
///
/// # fn main() {
/// let (w, h) = (640usize, 480usize);
/// let gray = vec![0u8; w * h];
/// let img = ImageU8 { w, h, stride: w, data: &gray };
///
/// let det = CraterDetector::new(CraterParams::default());
/// let report = det.process(img);
/// println!(
///     "craters={} latency_ms={:.3}",
///     report.ellipses.len(),
///     report.latency_ms
/// );
/// # }
/// ```
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{CraterDetector, CraterParams, DetectionReport, Ellipse};
}
