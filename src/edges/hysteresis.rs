//! Two-threshold hysteresis linking of suppressed gradient magnitudes.
//!
//! Pixels at or above the high threshold are strong seeds; pixels at or
//! above the low threshold are kept only when reachable from a seed through
//! 8-connected low-or-stronger pixels. Everything else is dropped.
use crate::image::{Gray8, ImageF32, ImageView};

/// Link suppressed magnitudes into a binary edge map ({0, 255}).
pub fn link_edges(nms: &ImageF32, low: f32, high: f32) -> Gray8 {
    let w = nms.w;
    let h = nms.h;
    let mut out = Gray8::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let mut stack: Vec<(usize, usize)> = Vec::new();
    for y in 0..h {
        let row = nms.row(y);
        for (x, &mag) in row.iter().enumerate() {
            if mag >= high {
                out.set(x, y, 255);
                stack.push((x, y));
            }
        }
    }

    while let Some((x, y)) = stack.pop() {
        let x0 = x.saturating_sub(1);
        let y0 = y.saturating_sub(1);
        let x1 = (x + 1).min(w - 1);
        let y1 = (y + 1).min(h - 1);
        for ny in y0..=y1 {
            for nx in x0..=x1 {
                if out.get(nx, ny) == 0 && nms.get(nx, ny) >= low {
                    out.set(nx, ny, 255);
                    stack.push((nx, ny));
                }
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn magnitude_map(w: usize, h: usize, cells: &[(usize, usize, f32)]) -> ImageF32 {
        let mut img = ImageF32::new(w, h);
        for &(x, y, v) in cells {
            img.set(x, y, v);
        }
        img
    }

    #[test]
    fn weak_pixels_survive_only_next_to_strong_ones() {
        // A strong seed with a weak run attached, plus an isolated weak pixel.
        let nms = magnitude_map(
            10,
            3,
            &[(1, 1, 200.0), (2, 1, 80.0), (3, 1, 60.0), (7, 1, 80.0)],
        );
        let edges = link_edges(&nms, 50.0, 150.0);
        assert_eq!(edges.get(1, 1), 255);
        assert_eq!(edges.get(2, 1), 255);
        assert_eq!(edges.get(3, 1), 255);
        assert_eq!(edges.get(7, 1), 0, "isolated weak pixel must be dropped");
    }

    #[test]
    fn sub_threshold_pixels_never_link() {
        let nms = magnitude_map(5, 3, &[(1, 1, 200.0), (2, 1, 30.0), (3, 1, 80.0)]);
        let edges = link_edges(&nms, 50.0, 150.0);
        assert_eq!(edges.get(2, 1), 0);
        assert_eq!(edges.get(3, 1), 0, "weak pixel behind a gap must be dropped");
    }
}
