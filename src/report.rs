//! Output records and the CSV sink.
//!
//! Every processed image contributes a contiguous block of rows: one row
//! per surviving ellipse, or exactly one sentinel row when nothing
//! survived. The sentinel encodes "processed, zero craters" with `-1` in
//! all five geometric columns – downstream scoring distinguishes it from a
//! missing image, so it is mandatory.
//!
//! Geometric fields of real detections are rendered with two decimal
//! places; sentinel fields are the bare integer `-1`. The classification
//! column is a fixed placeholder, never computed.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::types::Ellipse;

/// Output column names, in order. The header must match the scoring tools
/// byte for byte.
pub const CSV_HEADER: [&str; 7] = [
    "ellipseCenterX(px)",
    "ellipseCenterY(px)",
    "ellipseSemimajor(px)",
    "ellipseSemiminor(px)",
    "ellipseRotation(deg)",
    "inputImage",
    "crater_classification",
];

/// Placeholder written to the classification column of every row.
pub const CLASSIFICATION_PLACEHOLDER: &str = "-1";

/// Sentinel value for the geometric columns of a zero-detection row.
pub const SENTINEL_FIELD: &str = "-1";

/// One output row: a fitted ellipse, or the zero-detection sentinel when
/// `ellipse` is `None`.
#[derive(Clone, Debug)]
pub struct DetectionRecord {
    pub image_id: String,
    pub ellipse: Option<Ellipse>,
}

impl DetectionRecord {
    /// Render the seven output fields.
    pub fn to_row(&self) -> [String; 7] {
        match &self.ellipse {
            Some(e) => [
                format!("{:.2}", e.cx),
                format!("{:.2}", e.cy),
                format!("{:.2}", e.semi_major),
                format!("{:.2}", e.semi_minor),
                format!("{:.2}", e.rotation_deg),
                self.image_id.clone(),
                CLASSIFICATION_PLACEHOLDER.to_string(),
            ],
            None => [
                SENTINEL_FIELD.to_string(),
                SENTINEL_FIELD.to_string(),
                SENTINEL_FIELD.to_string(),
                SENTINEL_FIELD.to_string(),
                SENTINEL_FIELD.to_string(),
                self.image_id.clone(),
                CLASSIFICATION_PLACEHOLDER.to_string(),
            ],
        }
    }
}

/// Convert one image's detections into its output records, applying the
/// sentinel rule. Record order follows discovery order.
pub fn build_records(image_id: &str, ellipses: &[Ellipse]) -> Vec<DetectionRecord> {
    if ellipses.is_empty() {
        return vec![DetectionRecord {
            image_id: image_id.to_string(),
            ellipse: None,
        }];
    }
    ellipses
        .iter()
        .map(|e| DetectionRecord {
            image_id: image_id.to_string(),
            ellipse: Some(*e),
        })
        .collect()
}

/// CSV sink writing the fixed header up front and one row per record.
pub struct ReportWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl ReportWriter<File> {
    /// Create the output file and write the header row.
    pub fn from_path(path: &Path) -> Result<Self, String> {
        let writer = csv::Writer::from_path(path)
            .map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        Self::with_writer(writer)
    }
}

impl<W: Write> ReportWriter<W> {
    /// Wrap an existing writer; writes the header immediately.
    pub fn from_writer(sink: W) -> Result<Self, String> {
        Self::with_writer(csv::Writer::from_writer(sink))
    }

    fn with_writer(mut inner: csv::Writer<W>) -> Result<Self, String> {
        inner
            .write_record(CSV_HEADER)
            .map_err(|e| format!("Failed to write CSV header: {e}"))?;
        Ok(Self { inner })
    }

    /// Write one image's record block.
    pub fn write_records(&mut self, records: &[DetectionRecord]) -> Result<(), String> {
        for record in records {
            self.inner
                .write_record(record.to_row())
                .map_err(|e| format!("Failed to write CSV row: {e}"))?;
        }
        Ok(())
    }

    /// Flush buffered rows to the sink.
    pub fn flush(&mut self) -> Result<(), String> {
        self.inner
            .flush()
            .map_err(|e| format!("Failed to flush CSV output: {e}"))
    }
}
