//! Direct least-squares ellipse fitting (Fitzgibbon et al., 1999).
//!
//! Solves the constrained eigenvalue problem that enforces the ellipse
//! condition (B² − 4AC < 0) on the general conic
//! `A x² + B xy + C y² + D x + E y + F = 0`, then converts the winning
//! conic into geometric parameters. Points are shifted to their centroid
//! and scaled so the mean distance is √2 before building the scatter
//! matrix; without this the fit collapses for rims far from the origin.

use nalgebra::{DMatrix, Matrix3, Vector3, Vector6};

/// Geometric result of one conic fit.
///
/// Axis lengths are **full** lengths (diameters), not semi-axes, and carry
/// no ordering guarantee: `axis1` lies along `angle_deg`, `axis2` is
/// perpendicular. The acceptance policy downstream orders and halves them.
#[derive(Clone, Copy, Debug)]
pub struct ConicFit {
    pub cx: f64,
    pub cy: f64,
    /// Full axis length along `angle_deg`.
    pub axis1: f64,
    /// Full axis length perpendicular to `angle_deg`.
    pub axis2: f64,
    /// Direction of `axis1` from +x in degrees, `[0, 180)`.
    pub angle_deg: f64,
}

/// Fit the least-squares ellipse through `points`.
///
/// Returns `None` for fewer than 5 points (underdetermined), for point sets
/// whose best conic is not an ellipse (collinear or hyperbolic
/// configurations), and on numerical failure. Rejection carries no further
/// diagnosis; the pipeline treats every `None` the same way.
pub fn fit_conic_ellipse(points: &[[f64; 2]]) -> Option<ConicFit> {
    let n = points.len();
    if n < 5 {
        return None;
    }

    let (mean_x, mean_y, scale) = centroid_scale(points);

    // Design matrix D = [x², xy, y², x, y, 1] in normalized coordinates.
    let mut d = DMatrix::<f64>::zeros(n, 6);
    for (i, &[px, py]) in points.iter().enumerate() {
        let x = (px - mean_x) * scale;
        let y = (py - mean_y) * scale;
        d[(i, 0)] = x * x;
        d[(i, 1)] = x * y;
        d[(i, 2)] = y * y;
        d[(i, 3)] = x;
        d[(i, 4)] = y;
        d[(i, 5)] = 1.0;
    }

    // Scatter matrix S = Dᵀ D, partitioned into 3×3 blocks
    //   S = [S11  S12]
    //       [S12ᵀ S22]
    let s = d.transpose() * &d;
    let s11 = s.fixed_view::<3, 3>(0, 0).into_owned();
    let s12 = s.fixed_view::<3, 3>(0, 3).into_owned();
    let s22 = s.fixed_view::<3, 3>(3, 3).into_owned();

    // Constraint matrix for 4AC − B² > 0.
    let c1 = Matrix3::new(0.0, 0.0, 2.0, 0.0, -1.0, 0.0, 2.0, 0.0, 0.0);

    // Reduce to the 3×3 generalized eigensystem
    //   (S11 − S12 S22⁻¹ S12ᵀ) a1 = λ C1 a1.
    let s22_inv = s22.try_inverse()?;
    let m = s11 - s12 * s22_inv * s12.transpose();

    // C1⁻¹ M is not symmetric, so the eigensystem is solved explicitly via
    // the characteristic cubic and adjugate null vectors.
    let c1_inv = c1.try_inverse()?;
    let a1 = constrained_eigenvector(&(c1_inv * m))?;
    let a2 = -s22_inv * s12.transpose() * a1;

    let coeffs_norm = Vector6::new(a1[0], a1[1], a1[2], a2[0], a2[1], a2[2]);
    let coeffs = denormalize_conic(&coeffs_norm, mean_x, mean_y, scale);

    conic_to_geometry(&coeffs)
}

/// Centroid and √2 mean-distance scale for numerical conditioning.
fn centroid_scale(points: &[[f64; 2]]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    let mean_x: f64 = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let mean_y: f64 = points.iter().map(|p| p[1]).sum::<f64>() / n;

    let mean_dist: f64 = points
        .iter()
        .map(|p| ((p[0] - mean_x).powi(2) + (p[1] - mean_y).powi(2)).sqrt())
        .sum::<f64>()
        / n;

    let scale = if mean_dist > 1e-15 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };

    (mean_x, mean_y, scale)
}

/// Map conic coefficients fitted in normalized coordinates
/// (x' = s(x − mx), y' = s(y − my)) back to image coordinates.
fn denormalize_conic(c: &Vector6<f64>, mx: f64, my: f64, s: f64) -> [f64; 6] {
    let [a_, b_, c_, d_, e_, f_] = [c[0], c[1], c[2], c[3], c[4], c[5]];
    let s2 = s * s;

    let a = a_ * s2;
    let b = b_ * s2;
    let c = c_ * s2;
    let d = -2.0 * a_ * s2 * mx - b_ * s2 * my + d_ * s;
    let e = -b_ * s2 * mx - 2.0 * c_ * s2 * my + e_ * s;
    let f =
        a_ * s2 * mx * mx + b_ * s2 * mx * my + c_ * s2 * my * my - d_ * s * mx - e_ * s * my + f_;

    [a, b, c, d, e, f]
}

/// Eigenvector of `system` whose coefficients satisfy the ellipse
/// constraint 4 v₀ v₂ − v₁² > 0. Among several candidates the smallest
/// |eigenvalue| wins.
fn constrained_eigenvector(system: &Matrix3<f64>) -> Option<Vector3<f64>> {
    // Characteristic polynomial λ³ − tr λ² + (minor sum) λ − det = 0.
    let a = system;
    let tr = a[(0, 0)] + a[(1, 1)] + a[(2, 2)];
    let minor_sum = a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)] + a[(0, 0)] * a[(2, 2)]
        - a[(0, 2)] * a[(2, 0)]
        + a[(1, 1)] * a[(2, 2)]
        - a[(1, 2)] * a[(2, 1)];
    let det = a.determinant();

    let mut best: Option<(f64, Vector3<f64>)> = None;
    for ev in solve_cubic_real(1.0, -tr, minor_sum, -det) {
        let shifted = system - Matrix3::identity() * ev;
        let Some(v) = null_vector_3x3(&shifted) else {
            continue;
        };
        if 4.0 * v[0] * v[2] - v[1] * v[1] > 0.0
            && best.map_or(true, |(b_ev, _)| ev.abs() < b_ev)
        {
            best = Some((ev.abs(), v));
        }
    }

    best.map(|(_, v)| v)
}

/// Null vector of a near-singular 3×3 matrix: the largest-norm row of the
/// adjugate (each row of the adjugate of a rank-2 matrix is proportional to
/// the null vector).
fn null_vector_3x3(m: &Matrix3<f64>) -> Option<Vector3<f64>> {
    let cofactors = [
        Vector3::new(
            m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)],
            -(m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)]),
            m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)],
        ),
        Vector3::new(
            -(m[(0, 1)] * m[(2, 2)] - m[(0, 2)] * m[(2, 1)]),
            m[(0, 0)] * m[(2, 2)] - m[(0, 2)] * m[(2, 0)],
            -(m[(0, 0)] * m[(2, 1)] - m[(0, 1)] * m[(2, 0)]),
        ),
        Vector3::new(
            m[(0, 1)] * m[(1, 2)] - m[(0, 2)] * m[(1, 1)],
            -(m[(0, 0)] * m[(1, 2)] - m[(0, 2)] * m[(1, 0)]),
            m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
        ),
    ];

    let mut best = &cofactors[0];
    let mut best_norm = best.norm_squared();
    for c in &cofactors[1..] {
        let n = c.norm_squared();
        if n > best_norm {
            best = c;
            best_norm = n;
        }
    }

    if best_norm < 1e-30 {
        return None;
    }
    Some(best / best_norm.sqrt())
}

/// Solve a real cubic a x³ + b x² + c x + d = 0, returning all real roots.
fn solve_cubic_real(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    // Depressed cubic t³ + pt + q = 0 with x = t − b/(3a).
    let a_inv = 1.0 / a;
    let b_ = b * a_inv;
    let c_ = c * a_inv;
    let d_ = d * a_inv;

    let p = c_ - b_ * b_ / 3.0;
    let q = 2.0 * b_ * b_ * b_ / 27.0 - b_ * c_ / 3.0 + d_;

    let disc = -4.0 * p * p * p - 27.0 * q * q;
    let shift = -b_ / 3.0;

    if disc >= 0.0 {
        // Three real roots (trigonometric form).
        let r = (-p / 3.0).sqrt();
        let cos_arg = if r.abs() < 1e-15 {
            0.0
        } else {
            (-q / (2.0 * r * r * r)).clamp(-1.0, 1.0)
        };
        let theta = cos_arg.acos();
        let two_r = 2.0 * r;
        vec![
            two_r * (theta / 3.0).cos() + shift,
            two_r * ((theta + 2.0 * std::f64::consts::PI) / 3.0).cos() + shift,
            two_r * ((theta + 4.0 * std::f64::consts::PI) / 3.0).cos() + shift,
        ]
    } else {
        // One real root (Cardano).
        let sqrt_disc = (q * q / 4.0 + p * p * p / 27.0).sqrt();
        let u = (-q / 2.0 + sqrt_disc).cbrt();
        let v = (-q / 2.0 - sqrt_disc).cbrt();
        vec![u + v + shift]
    }
}

/// Convert conic coefficients `[A, B, C, D, E, F]` into center, full axis
/// lengths, and first-axis direction. `None` when the conic is not a
/// finite-area ellipse.
fn conic_to_geometry(coeffs: &[f64; 6]) -> Option<ConicFit> {
    let [a, b, c, d, e, f] = *coeffs;

    let disc = b * b - 4.0 * a * c;
    if disc >= 0.0 {
        return None;
    }

    // Center: stationary point of the quadratic form.
    let denom = -disc; // 4AC − B² > 0
    let cx = (b * e - 2.0 * c * d) / denom;
    let cy = (b * d - 2.0 * a * e) / denom;

    // Eigenvalues of the quadratic part [[A, B/2], [B/2, C]]. The smaller
    // one belongs to the longer axis.
    let sum = a + c;
    let diff = ((a - c).powi(2) + b * b).sqrt();
    let lambda_lo = (sum - diff) / 2.0;
    let lambda_hi = (sum + diff) / 2.0;

    // Conic value at the center.
    let f_center = a * cx * cx + b * cx * cy + c * cy * cy + d * cx + e * cy + f;
    if f_center.abs() < 1e-15 {
        return None;
    }

    let axis1_sq = -f_center / lambda_lo;
    let axis2_sq = -f_center / lambda_hi;
    if axis1_sq <= 0.0 || axis2_sq <= 0.0 {
        return None;
    }

    // Direction of the low-eigenvalue eigenvector (the axis1 direction).
    let angle = if b.abs() < 1e-12 {
        if a <= c {
            0.0
        } else {
            std::f64::consts::FRAC_PI_2
        }
    } else {
        (lambda_lo - a).atan2(b / 2.0)
    };
    let mut angle_deg = angle.to_degrees() % 180.0;
    if angle_deg < 0.0 {
        angle_deg += 180.0;
    }

    let fit = ConicFit {
        cx,
        cy,
        axis1: 2.0 * axis1_sq.sqrt(),
        axis2: 2.0 * axis2_sq.sqrt(),
        angle_deg,
    };
    if !fit.cx.is_finite()
        || !fit.cy.is_finite()
        || !fit.axis1.is_finite()
        || !fit.axis2.is_finite()
    {
        return None;
    }
    Some(fit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ellipse_points(
        cx: f64,
        cy: f64,
        semi_a: f64,
        semi_b: f64,
        angle_deg: f64,
        n: usize,
    ) -> Vec<[f64; 2]> {
        let angle = angle_deg.to_radians();
        let (sin_t, cos_t) = angle.sin_cos();
        (0..n)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * i as f64 / n as f64;
                let px = semi_a * t.cos();
                let py = semi_b * t.sin();
                [
                    cx + cos_t * px - sin_t * py,
                    cy + sin_t * px + cos_t * py,
                ]
            })
            .collect()
    }

    #[test]
    fn recovers_synthetic_ellipse() {
        let pts = ellipse_points(50.0, 30.0, 18.0, 9.0, 25.0, 40);
        let fit = fit_conic_ellipse(&pts).expect("fit must succeed");
        assert!((fit.cx - 50.0).abs() < 1e-4, "cx={}", fit.cx);
        assert!((fit.cy - 30.0).abs() < 1e-4, "cy={}", fit.cy);
        let major = fit.axis1.max(fit.axis2);
        let minor = fit.axis1.min(fit.axis2);
        assert!((major - 36.0).abs() < 1e-4, "major={major}");
        assert!((minor - 18.0).abs() < 1e-4, "minor={minor}");
    }

    #[test]
    fn angle_tracks_the_major_axis() {
        let pts = ellipse_points(0.0, 0.0, 20.0, 8.0, 130.0, 36);
        let fit = fit_conic_ellipse(&pts).expect("fit must succeed");
        assert!(fit.axis1 > fit.axis2, "axis1 carries the low eigenvalue");
        assert!((fit.angle_deg - 130.0).abs() < 1e-3, "angle={}", fit.angle_deg);
    }

    #[test]
    fn too_few_points_are_rejected() {
        let pts = ellipse_points(0.0, 0.0, 10.0, 5.0, 0.0, 4);
        assert!(fit_conic_ellipse(&pts).is_none());
    }

    #[test]
    fn collinear_points_are_rejected() {
        let pts: Vec<[f64; 2]> = (0..12).map(|i| [i as f64, 2.0 * i as f64]).collect();
        assert!(fit_conic_ellipse(&pts).is_none());
    }

    #[test]
    fn circle_fit_has_equal_axes() {
        let pts = ellipse_points(5.0, -3.0, 12.0, 12.0, 0.0, 30);
        let fit = fit_conic_ellipse(&pts).expect("fit must succeed");
        assert!((fit.axis1 - fit.axis2).abs() < 1e-4);
    }
}
