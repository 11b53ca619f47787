//! Decoding helpers for grayscale images.
use super::Gray8;
use std::path::Path;

/// Load an image from disk and convert to an 8-bit grayscale buffer.
pub fn load_grayscale_image(path: &Path) -> Result<Gray8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    let data = img.into_raw();
    Ok(Gray8::from_raw(width, height, data))
}
