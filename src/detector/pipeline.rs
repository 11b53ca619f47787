use log::debug;
use std::time::Instant;

use super::params::CraterParams;
use crate::boundary::extract_boundaries;
use crate::edges::detect_edges;
use crate::fit::fit_crater_ellipse;
use crate::image::ImageU8;
use crate::preprocess::smooth_and_binarize;
use crate::types::Ellipse;

/// Per-image detection outcome with stage counts and latency.
#[derive(Clone, Debug, Default)]
pub struct DetectionReport {
    /// Ellipses surviving the fitting policy, in discovery order.
    pub ellipses: Vec<Ellipse>,
    /// Number of boundary curves handed to the fitter.
    pub boundary_count: usize,
    /// Wall-clock time spent on this image in milliseconds.
    pub latency_ms: f64,
}

/// Runs the detection pipeline on one grayscale image at a time.
pub struct CraterDetector {
    params: CraterParams,
}

impl CraterDetector {
    pub fn new(params: CraterParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &CraterParams {
        &self.params
    }

    /// Run the full pipeline and return the ellipses plus stage counts.
    pub fn process(&self, img: ImageU8<'_>) -> DetectionReport {
        let start = Instant::now();

        let binary = smooth_and_binarize(img.clone(), &self.params.preprocess);
        let edges = detect_edges(&binary, &self.params.edges);
        let boundaries = extract_boundaries(&edges);
        let boundary_count = boundaries.len();

        let ellipses: Vec<Ellipse> = boundaries
            .iter()
            .filter_map(|curve| fit_crater_ellipse(curve, &self.params.fit))
            .collect();

        let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "CraterDetector::process {}x{} boundaries={} ellipses={} latency_ms={:.3}",
            img.w,
            img.h,
            boundary_count,
            ellipses.len(),
            latency_ms
        );

        DetectionReport {
            ellipses,
            boundary_count,
            latency_ms,
        }
    }

    /// Convenience wrapper returning only the surviving ellipses.
    pub fn detect(&self, img: ImageU8<'_>) -> Vec<Ellipse> {
        self.process(img).ellipses
    }
}
