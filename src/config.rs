//! Run configuration loaded from a JSON file.
//!
//! The binary takes a single config path; dataset root and output
//! destination are explicit values here rather than process-wide state.
//! The `detector` table is optional; every field falls back to the
//! stage defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::detector::CraterParams;
use crate::edges::{EdgeParams, EDGE_HIGH_THRESHOLD, EDGE_LOW_THRESHOLD};
use crate::fit::{FitParams, MIN_AXIS_PX, MIN_BOUNDARY_POINTS};
use crate::preprocess::{PreprocessParams, BINARY_THRESHOLD};

#[derive(Debug, Deserialize)]
pub struct RunConfig {
    /// Directory holding the dataset (two levels of subdirectories, then
    /// image files).
    pub dataset_root: PathBuf,
    /// Destination CSV file.
    pub output_csv: PathBuf,
    #[serde(default)]
    pub detector: DetectorConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Global binarization threshold (samples strictly above are foreground).
    pub binary_threshold: u8,
    /// Weak-edge hysteresis gate.
    pub edge_low_threshold: f32,
    /// Strong-seed hysteresis gate.
    pub edge_high_threshold: f32,
    /// Minimum boundary points for an ellipse fit.
    pub min_boundary_points: usize,
    /// Minimum accepted full axis length in pixels.
    pub min_axis_px: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            binary_threshold: BINARY_THRESHOLD,
            edge_low_threshold: EDGE_LOW_THRESHOLD,
            edge_high_threshold: EDGE_HIGH_THRESHOLD,
            min_boundary_points: MIN_BOUNDARY_POINTS,
            min_axis_px: MIN_AXIS_PX,
        }
    }
}

impl DetectorConfig {
    pub fn to_params(&self) -> CraterParams {
        CraterParams {
            preprocess: PreprocessParams {
                threshold: self.binary_threshold,
            },
            edges: EdgeParams {
                low_threshold: self.edge_low_threshold,
                high_threshold: self.edge_high_threshold,
            },
            fit: FitParams {
                min_boundary_points: self.min_boundary_points,
                min_axis_px: self.min_axis_px,
            },
        }
    }
}

pub fn load_config(path: &Path) -> Result<RunConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    serde_json::from_str(&data)
        .map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detector_table_is_optional() {
        let config: RunConfig = serde_json::from_str(
            r#"{"dataset_root": "/data/test", "output_csv": "out.csv"}"#,
        )
        .expect("minimal config");
        assert_eq!(config.detector.binary_threshold, BINARY_THRESHOLD);
        assert_eq!(config.detector.min_axis_px, MIN_AXIS_PX);
    }

    #[test]
    fn detector_overrides_are_applied() {
        let config: RunConfig = serde_json::from_str(
            r#"{
                "dataset_root": "/data/test",
                "output_csv": "out.csv",
                "detector": {"binary_threshold": 42, "min_axis_px": 6.5}
            }"#,
        )
        .expect("config with overrides");
        let params = config.detector.to_params();
        assert_eq!(params.preprocess.threshold, 42);
        assert_eq!(params.fit.min_axis_px, 6.5);
        // Untouched fields keep their defaults.
        assert_eq!(params.edges.high_threshold, EDGE_HIGH_THRESHOLD);
    }
}
