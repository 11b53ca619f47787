//! Ellipse fitting policy for boundary curves.
//!
//! The conic fit itself lives in [`conic`]; this module wraps it with the
//! acceptance rules that turn raw fits into reported crater rims:
//!
//! 1. curves with fewer than [`MIN_BOUNDARY_POINTS`] points are skipped
//!    (the fit is underdetermined below 5 points);
//! 2. fits whose smaller full axis is below [`MIN_AXIS_PX`] are skipped as
//!    noise artifacts;
//! 3. axis lengths are swapped when the fit returns them minor-first, so
//!    `semi_major >= semi_minor` always holds downstream;
//! 4. full axis lengths are halved into the semi-axes the output schema
//!    uses.
//!
//! Every rejection is silent: a rejected curve contributes no record and no
//! error.

pub mod conic;

pub use conic::{fit_conic_ellipse, ConicFit};

use crate::boundary::BoundaryCurve;
use crate::types::Ellipse;

/// Minimum number of boundary points for a determined ellipse fit.
pub const MIN_BOUNDARY_POINTS: usize = 5;
/// Minimum accepted full axis length in pixels.
pub const MIN_AXIS_PX: f64 = 10.0;

/// Parameters for the fitting policy.
#[derive(Clone, Copy, Debug)]
pub struct FitParams {
    /// Curves shorter than this are skipped.
    pub min_boundary_points: usize,
    /// Fits with a full axis below this length are skipped.
    pub min_axis_px: f64,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            min_boundary_points: MIN_BOUNDARY_POINTS,
            min_axis_px: MIN_AXIS_PX,
        }
    }
}

/// Fit one boundary curve, applying the full acceptance policy.
pub fn fit_crater_ellipse(curve: &BoundaryCurve, params: &FitParams) -> Option<Ellipse> {
    if curve.len() < params.min_boundary_points {
        return None;
    }
    let points: Vec<[f64; 2]> = curve
        .points
        .iter()
        .map(|p| [p[0] as f64, p[1] as f64])
        .collect();
    let fit = fit_conic_ellipse(&points)?;
    finalize(fit, params)
}

/// Apply the size filter, axis ordering, and full→semi conversion.
fn finalize(fit: ConicFit, params: &FitParams) -> Option<Ellipse> {
    let (mut major, mut minor) = (fit.axis1, fit.axis2);
    if major.min(minor) < params.min_axis_px {
        return None;
    }
    if minor > major {
        std::mem::swap(&mut major, &mut minor);
    }
    Some(Ellipse {
        cx: fit.cx,
        cy: fit.cy,
        semi_major: major / 2.0,
        semi_minor: minor / 2.0,
        rotation_deg: fit.angle_deg,
    })
}
