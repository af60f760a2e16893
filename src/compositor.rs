use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use rusttype::{Font, Scale, point};

use crate::error::{StridecardError, StridecardResult};

/// Font, point size and fill color for one text draw.
#[derive(Clone, Debug)]
pub struct TextStyle {
    pub font: PathBuf,
    pub size: f32,
    pub color: [u8; 3],
}

impl TextStyle {
    pub fn new(font: impl Into<PathBuf>, size: f32, color: [u8; 3]) -> Self {
        Self {
            font: font.into(),
            size,
            color,
        }
    }
}

/// Owns one RGBA canvas for the duration of a render and issues all
/// pixel writes against it.
///
/// Fonts are decoded once per path and cached for the compositor's
/// lifetime; a fresh compositor starts with a cold cache.
pub struct Compositor {
    canvas: RgbaImage,
    fonts: HashMap<PathBuf, Font<'static>>,
}

impl Compositor {
    pub fn new(canvas: RgbaImage) -> Self {
        Self {
            canvas,
            fonts: HashMap::new(),
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.canvas.dimensions()
    }

    pub fn image(&self) -> &RgbaImage {
        &self.canvas
    }

    pub fn into_image(self) -> RgbaImage {
        self.canvas
    }

    /// Alpha-composite `sub` with its top-left corner at `(x, y)`.
    ///
    /// Pixels falling outside the canvas are clipped; fully transparent
    /// source pixels leave the canvas untouched.
    pub fn paste(&mut self, sub: &RgbaImage, x: i64, y: i64) {
        let (cw, ch) = self.canvas.dimensions();
        for (ox, oy, px) in sub.enumerate_pixels() {
            let cx = x + i64::from(ox);
            let cy = y + i64::from(oy);
            if cx < 0 || cy < 0 || cx >= i64::from(cw) || cy >= i64::from(ch) {
                continue;
            }
            let dst = self.canvas.get_pixel_mut(cx as u32, cy as u32);
            over_straight(dst, [px[0], px[1], px[2]], px[3]);
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    ///
    /// No wrapping and no alignment; the caller owns layout. Glyph
    /// coverage blends the style color over whatever is already on the
    /// canvas.
    pub fn draw_text(
        &mut self,
        text: &str,
        x: i64,
        y: i64,
        style: &TextStyle,
    ) -> StridecardResult<()> {
        let font = cached_font(&mut self.fonts, &style.font)?;
        let (cw, ch) = self.canvas.dimensions();

        let scale = Scale::uniform(style.size);
        let v_metrics = font.v_metrics(scale);
        let origin = point(x as f32, y as f32 + v_metrics.ascent);
        for glyph in font.layout(text, scale, origin) {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = i64::from(bb.min.x) + i64::from(gx);
                let py = i64::from(bb.min.y) + i64::from(gy);
                if px < 0 || py < 0 || px >= i64::from(cw) || py >= i64::from(ch) {
                    return;
                }
                let a = (coverage * 255.0).round() as u8;
                let dst = self.canvas.get_pixel_mut(px as u32, py as u32);
                over_straight(dst, style.color, a);
            });
        }
        Ok(())
    }

    /// Encode the canvas to `path`, creating parent directories; the
    /// format follows the file extension.
    pub fn save(&self, path: &Path) -> StridecardResult<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                StridecardError::asset(format!("create output dir '{}': {e}", parent.display()))
            })?;
        }
        self.canvas.save(path).map_err(|e| {
            StridecardError::asset(format!("write image '{}': {e}", path.display()))
        })?;
        Ok(())
    }
}

fn cached_font<'a>(
    fonts: &'a mut HashMap<PathBuf, Font<'static>>,
    path: &Path,
) -> StridecardResult<&'a Font<'static>> {
    match fonts.entry(path.to_path_buf()) {
        Entry::Occupied(e) => Ok(e.into_mut()),
        Entry::Vacant(v) => {
            let bytes = crate::assets::read_font_bytes(path)?;
            let font = Font::try_from_vec(bytes).ok_or_else(|| {
                StridecardError::asset(format!("font '{}' is not a usable TTF/OTF", path.display()))
            })?;
            Ok(v.insert(font))
        }
    }
}

/// Straight-alpha "over" of an RGB source at alpha `sa` onto `dst`.
fn over_straight(dst: &mut Rgba<u8>, rgb: [u8; 3], sa: u8) {
    if sa == 0 {
        return;
    }
    if sa == 255 {
        *dst = Rgba([rgb[0], rgb[1], rgb[2], 255]);
        return;
    }
    let sa = u32::from(sa);
    let d_w = mul_div255(u32::from(dst[3]), 255 - sa);
    let out_a = sa + d_w;
    if out_a == 0 {
        return;
    }
    for c in 0..3 {
        let sc = u32::from(rgb[c]);
        let dc = u32::from(dst[c]);
        dst[c] = ((sc * sa + dc * d_w + out_a / 2) / out_a) as u8;
    }
    dst[3] = out_a as u8;
}

fn mul_div255(x: u32, y: u32) -> u32 {
    (x * y + 127) / 255
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red_canvas(width: u32, height: u32) -> Compositor {
        Compositor::new(RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, 255])))
    }

    #[test]
    fn paste_opaque_replaces_pixels() {
        let mut comp = red_canvas(10, 10);
        let sub = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255]));
        comp.paste(&sub, 3, 4);
        assert_eq!(comp.image().get_pixel(3, 4), &Rgba([0, 0, 255, 255]));
        assert_eq!(comp.image().get_pixel(4, 5), &Rgba([0, 0, 255, 255]));
        assert_eq!(comp.image().get_pixel(2, 4), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn paste_transparent_pixels_leave_canvas_untouched() {
        let mut comp = red_canvas(4, 4);
        let sub = RgbaImage::from_pixel(4, 4, Rgba([0, 255, 0, 0]));
        comp.paste(&sub, 0, 0);
        assert_eq!(comp.image().get_pixel(1, 1), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn paste_blends_half_alpha() {
        let mut comp = red_canvas(1, 1);
        let sub = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 255, 128]));
        comp.paste(&sub, 0, 0);
        let px = comp.image().get_pixel(0, 0);
        assert_eq!(px[0], 127);
        assert_eq!(px[2], 128);
        assert_eq!(px[3], 255);
    }

    #[test]
    fn paste_clips_at_edges_and_negative_offsets() {
        let mut comp = red_canvas(4, 4);
        let sub = RgbaImage::from_pixel(3, 3, Rgba([0, 0, 255, 255]));
        comp.paste(&sub, -2, -2);
        comp.paste(&sub, 3, 3);
        assert_eq!(comp.image().get_pixel(0, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(comp.image().get_pixel(3, 3), &Rgba([0, 0, 255, 255]));
        assert_eq!(comp.image().get_pixel(2, 2), &Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn missing_font_is_an_asset_error() {
        let mut comp = red_canvas(8, 8);
        let style = TextStyle::new("/nonexistent/font.ttf", 12.0, [0, 0, 0]);
        let err = comp.draw_text("x", 0, 0, &style).unwrap_err();
        assert!(matches!(err, StridecardError::Asset(_)), "got {err:?}");
    }

    #[test]
    fn draw_text_paints_with_requested_color() {
        let Some(font) = system_font() else {
            eprintln!("skipping: no system font found");
            return;
        };
        let mut comp = Compositor::new(RgbaImage::from_pixel(120, 50, Rgba([255, 255, 255, 255])));
        let style = TextStyle::new(&font, 32.0, [10, 20, 200]);
        comp.draw_text("run", 4, 4, &style).unwrap();

        let mut touched = 0usize;
        for (_, _, px) in comp.image().enumerate_pixels() {
            if px[2] > px[0] {
                touched += 1;
            }
        }
        assert!(touched > 20, "text painted only {touched} pixels");
    }

    fn system_font() -> Option<PathBuf> {
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
            "C:\\Windows\\Fonts\\arial.ttf",
        ]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.is_file())
    }
}
