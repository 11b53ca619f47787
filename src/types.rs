use serde::Serialize;

/// Fitted crater rim ellipse in image pixel coordinates.
///
/// Invariant: `semi_major >= semi_minor > 0`. `rotation_deg` is the
/// direction of the first fitted axis measured from +x, folded into
/// `[0, 180)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Ellipse {
    /// Center x in pixels.
    pub cx: f64,
    /// Center y in pixels.
    pub cy: f64,
    /// Semi-major axis length in pixels.
    pub semi_major: f64,
    /// Semi-minor axis length in pixels.
    pub semi_minor: f64,
    /// Rotation in degrees, `[0, 180)`.
    pub rotation_deg: f64,
}
