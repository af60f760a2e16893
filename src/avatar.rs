use image::{DynamicImage, Rgba, RgbaImage, imageops};

/// Turn an arbitrary photo into a paste-ready circular avatar.
///
/// Non-square sources are first cropped to the largest centered square
/// (odd margins truncate toward the top-left), then resized to the target
/// box. The result keeps the source's alpha inside the inscribed ellipse
/// and is fully transparent outside it, so pasting never paints corners.
pub fn make_circular(source: &DynamicImage, width: u32, height: u32) -> RgbaImage {
    if width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }

    let rgba = source.to_rgba8();
    let min_dim = rgba.width().min(rgba.height());
    let left = (rgba.width() - min_dim) / 2;
    let top = (rgba.height() - min_dim) / 2;
    let square = imageops::crop_imm(&rgba, left, top, min_dim, min_dim).to_image();
    let resized = imageops::resize(&square, width, height, imageops::FilterType::Lanczos3);

    // Inscribed ellipse over the full target box; a circle when square.
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    let mut out = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    for y in 0..height {
        for x in 0..width {
            let nx = (x as f32 + 0.5 - cx) / cx;
            let ny = (y as f32 + 0.5 - cy) / cy;
            if nx * nx + ny * ny <= 1.0 {
                out.put_pixel(x, y, *resized.get_pixel(x, y));
            }
        }
    }
    out
}
