//! Denoising and binarization of the raw sample grid.
//!
//! The first pipeline stage smooths sensor noise with a fixed 5×5 Gaussian
//! (applied as two separable 5-tap passes) and then binarizes the result
//! with a single global intensity threshold. Border samples clamp to the
//! image extents so the blur introduces no spurious boundary response.
//! The threshold is global and constant; there is no per-image adaptation.

use crate::image::{Gray8, ImageF32, ImageU8, ImageView, ImageViewMut};

/// Global binarization threshold: samples strictly above map to foreground.
pub const BINARY_THRESHOLD: u8 = 30;

/// Normalised 5-tap Gaussian kernel `[1, 4, 6, 4, 1] / 16`.
const GAUSSIAN_5TAP: [f32; 5] = [0.0625, 0.25, 0.375, 0.25, 0.0625];

/// Parameters for the smoothing/binarization stage.
#[derive(Clone, Copy, Debug)]
pub struct PreprocessParams {
    /// Samples strictly above this value become foreground (255).
    pub threshold: u8,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            threshold: BINARY_THRESHOLD,
        }
    }
}

/// Smooth the input grid and binarize it to {0, 255}.
///
/// Output dimensions equal the input dimensions. Always succeeds for
/// non-empty grids; empty grids yield an empty buffer.
pub fn smooth_and_binarize(img: ImageU8<'_>, params: &PreprocessParams) -> Gray8 {
    let mut out = gaussian_blur_5x5(img);
    binarize_in_place(&mut out, params.threshold);
    out
}

/// Apply the fixed 5×5 Gaussian as two separable passes with replicate
/// borders, rounding back to 8 bits.
fn gaussian_blur_5x5(img: ImageU8<'_>) -> Gray8 {
    let w = img.w;
    let h = img.h;
    let mut horiz = ImageF32::new(w, h);
    let mut out = Gray8::new(w, h);
    if w == 0 || h == 0 {
        return out;
    }

    let radius = GAUSSIAN_5TAP.len() / 2;
    for y in 0..h {
        let src = img.row(y);
        let dst = horiz.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                let sx = (x + k).saturating_sub(radius).min(w - 1);
                acc += src[sx] as f32 * tap;
            }
            dst[x] = acc;
        }
    }

    for y in 0..h {
        let y_idx: Vec<usize> = (0..GAUSSIAN_5TAP.len())
            .map(|k| (y + k).saturating_sub(radius).min(h - 1))
            .collect();
        let dst = out.row_mut(y);
        for x in 0..w {
            let mut acc = 0.0f32;
            for (k, &tap) in GAUSSIAN_5TAP.iter().enumerate() {
                acc += horiz.get(x, y_idx[k]) * tap;
            }
            dst[x] = acc.round().clamp(0.0, 255.0) as u8;
        }
    }

    out
}

/// Map every sample to 255 when strictly above `threshold`, else 0.
fn binarize_in_place(img: &mut Gray8, threshold: u8) {
    for v in img.data.iter_mut() {
        *v = if *v > threshold { 255 } else { 0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(w: usize, h: usize, v: u8) -> Vec<u8> {
        vec![v; w * h]
    }

    #[test]
    fn uniform_image_is_preserved_by_blur() {
        let buf = uniform(16, 12, 200);
        let img = ImageU8 {
            w: 16,
            h: 12,
            stride: 16,
            data: &buf,
        };
        let blurred = gaussian_blur_5x5(img);
        assert!(blurred.data.iter().all(|&v| v == 200));
    }

    #[test]
    fn threshold_is_strict() {
        let mut img = Gray8::from_raw(3, 1, vec![29, 30, 31]);
        binarize_in_place(&mut img, BINARY_THRESHOLD);
        assert_eq!(img.data, vec![0, 0, 255]);
    }

    #[test]
    fn output_dimensions_match_input() {
        let buf = uniform(7, 5, 80);
        let img = ImageU8 {
            w: 7,
            h: 5,
            stride: 7,
            data: &buf,
        };
        let out = smooth_and_binarize(img, &PreprocessParams::default());
        assert_eq!((out.w, out.h), (7, 5));
        assert!(out.data.iter().all(|&v| v == 0 || v == 255));
    }

    #[test]
    fn blank_dark_image_binarizes_to_background() {
        let buf = uniform(9, 9, 12);
        let img = ImageU8 {
            w: 9,
            h: 9,
            stride: 9,
            data: &buf,
        };
        let out = smooth_and_binarize(img, &PreprocessParams::default());
        assert!(out.data.iter().all(|&v| v == 0));
    }
}
