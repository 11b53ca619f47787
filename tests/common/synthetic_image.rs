/// Generates a dark filled ellipse on a uniformly bright background.
///
/// Semi-axes are in pixels, `angle_deg` rotates the major axis from +x.
pub fn ellipse_disk_u8(
    width: usize,
    height: usize,
    cx: f64,
    cy: f64,
    semi_a: f64,
    semi_b: f64,
    angle_deg: f64,
) -> Vec<u8> {
    assert!(width > 0 && height > 0, "image dimensions must be positive");
    assert!(semi_a > 0.0 && semi_b > 0.0, "semi-axes must be positive");

    let angle = angle_deg.to_radians();
    let (sin_t, cos_t) = angle.sin_cos();
    let mut img = vec![200u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let dx = x as f64 - cx;
            let dy = y as f64 - cy;
            // Project into the ellipse frame.
            let u = dx * cos_t + dy * sin_t;
            let v = -dx * sin_t + dy * cos_t;
            let r = (u / semi_a).powi(2) + (v / semi_b).powi(2);
            if r <= 1.0 {
                img[y * width + x] = 10;
            }
        }
    }
    img
}

/// Generates a uniform single-intensity image.
pub fn blank_u8(width: usize, height: usize, value: u8) -> Vec<u8> {
    vec![value; width * height]
}
