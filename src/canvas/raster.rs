//! Software rasterizer backed by tiny-skia.

use std::io::Cursor;

use image::{ImageFormat, Rgba, RgbaImage};
use resvg::tiny_skia::{
    BlendMode, FillRule, LineCap, Paint, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

use super::{ArcSweep, Canvas, RectF, inset_radii, stroke_endpoints};
use crate::error::{Error, Result};
use crate::layout::{BoundingBox, Point};
use crate::theme::Color;

/// An RGBA pixel canvas.
///
/// Shapes are anti-aliased except for rectangle fills, which are
/// pixel-aligned by construction. Fully covered pixels take the shape's
/// color as is, alpha included; only partially covered edge pixels mix with
/// what was underneath.
pub struct RasterCanvas {
    pixmap: Pixmap,
}

impl RasterCanvas {
    /// Allocates a transparent `size x size` canvas.
    pub fn new(size: u32) -> Result<Self> {
        let pixmap = Pixmap::new(size, size).ok_or(Error::CanvasAllocation(size))?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Copies the canvas into a straight-alpha RGBA image.
    pub fn to_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }

    fn brush(color: Color, anti_alias: bool) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(color.r, color.g, color.b, color.a);
        paint.anti_alias = anti_alias;
        paint.blend_mode = BlendMode::Source;
        paint
    }
}

impl Canvas for RasterCanvas {
    fn fill_rect(&mut self, rect: BoundingBox, color: Color) {
        let extent = RectF::from_half_open(rect);
        let Some(rect) = Rect::from_ltrb(extent.left, extent.top, extent.right, extent.bottom)
        else {
            return;
        };
        self.pixmap
            .fill_rect(rect, &Self::brush(color, false), Transform::identity(), None);
    }

    fn fill_ellipse(&mut self, bbox: BoundingBox, color: Color) {
        let extent = RectF::from_inclusive(bbox);
        let Some(path) = Rect::from_ltrb(extent.left, extent.top, extent.right, extent.bottom)
            .and_then(PathBuilder::from_oval)
        else {
            return;
        };
        self.pixmap.fill_path(
            &path,
            &Self::brush(color, true),
            FillRule::Winding,
            Transform::identity(),
            None,
        );
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) {
        let ((x0, y0), (x1, y1)) = stroke_endpoints(from, to, width);

        let mut pb = PathBuilder::new();
        pb.move_to(x0, y0);
        pb.line_to(x1, y1);
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::brush(color, true),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn draw_arc(&mut self, bbox: BoundingBox, start: f32, end: f32, color: Color, width: u32) {
        let arc = ArcSweep::new(start, end);
        let extent = RectF::from_inclusive(bbox);
        let Some((rx, ry)) = inset_radii(&extent, width) else {
            return;
        };
        let segments = arc.cubic_segments(extent.center(), rx, ry);
        let Some(first) = segments.first() else {
            return;
        };

        let mut pb = PathBuilder::new();
        pb.move_to(first[0].0, first[0].1);
        for [_, c1, c2, p] in &segments {
            pb.cubic_to(c1.0, c1.1, c2.0, c2.1, p.0, p.1);
        }
        let Some(path) = pb.finish() else {
            return;
        };

        let stroke = Stroke {
            width: width as f32,
            line_cap: LineCap::Butt,
            ..Stroke::default()
        };
        self.pixmap.stroke_path(
            &path,
            &Self::brush(color, true),
            &stroke,
            Transform::identity(),
            None,
        );
    }

    fn encode(&self) -> Result<Vec<u8>> {
        let image = self.to_image();
        let mut bytes = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|source| Error::Encode {
                size: self.width(),
                source,
            })?;
        Ok(bytes)
    }
}

/// Converts a tiny-skia pixmap to an `image::RgbaImage`.
pub(crate) fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny-skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(src.red(), src.green(), src.blue(), src.alpha());
        *dst = Rgba([r, g, b, a]);
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render;
    use crate::theme::IconTheme;
    use std::num::NonZeroU32;

    fn rendered(size: u32) -> RgbaImage {
        let mut canvas = RasterCanvas::new(size).unwrap();
        canvas.paint(&render(NonZeroU32::new(size).unwrap()));
        canvas.to_image()
    }

    #[test]
    fn rect_fill_is_exact() {
        let mut canvas = RasterCanvas::new(8).unwrap();
        canvas.fill_rect(BoundingBox::new(0, 0, 8, 8), Color::rgba(24, 30, 46, 255));
        let img = canvas.to_image();
        assert!(img.pixels().all(|p| p.0 == [24, 30, 46, 255]));
    }

    #[test]
    fn layers_paint_in_order() {
        let theme = IconTheme::default();
        let img = rendered(32);

        // Corner: background only.
        assert_eq!(img.get_pixel(0, 0).0, theme.background.as_array());

        // Between inner core and outer edge, away from lines and arc.
        assert_eq!(img.get_pixel(16, 5).0, theme.outer_disk.as_array());

        // Inside the core, off both crosshair lines.
        assert_eq!(img.get_pixel(12, 12).0, theme.inner_core.as_array());
    }

    #[test]
    fn crosshair_is_painted_over_core() {
        let img = rendered(32);
        let center = img.get_pixel(16, 16);
        assert!(center[0] >= 254, "crosshair should be white: {center:?}");
        assert!(center[2] >= 254);
        assert_eq!(center[3], 230);
    }

    #[test]
    fn crosshair_replaces_alpha_instead_of_blending() {
        let img = rendered(32);
        // On the vertical line, inside the core.
        let p = img.get_pixel(16, 10);
        assert_eq!(p[3], 230, "crosshair alpha should be kept: {p:?}");
        assert!(p[0] >= 254 && p[1] >= 254 && p[2] >= 254, "{p:?}");
        // On the horizontal line, over the outer disk.
        assert_eq!(img.get_pixel(9, 16)[3], 230);
    }

    #[test]
    fn line_covers_exactly_its_end_pixels() {
        let mut canvas = RasterCanvas::new(32).unwrap();
        canvas.draw_line(
            Point::new(8, 16),
            Point::new(24, 16),
            Color::rgba(255, 255, 255, 255),
            2,
        );
        let img = canvas.to_image();

        for x in 8..=24 {
            assert_eq!(img.get_pixel(x, 15)[3], 255, "column {x}, row 15");
            assert_eq!(img.get_pixel(x, 16)[3], 255, "column {x}, row 16");
        }
        assert_eq!(img.get_pixel(7, 16)[3], 0);
        assert_eq!(img.get_pixel(25, 16)[3], 0);
        assert_eq!(img.get_pixel(16, 14)[3], 0);
        assert_eq!(img.get_pixel(16, 17)[3], 0);
    }

    #[test]
    fn highlight_arc_crosses_east() {
        let img = rendered(32);
        let east = img.get_pixel(27, 16);
        // Highlight green channel is 214, the outer disk's is 140.
        assert!(east[1] > 170, "arc should tint the east edge: {east:?}");
    }

    #[test]
    fn highlight_arc_skips_west() {
        let theme = IconTheme::default();
        let img = rendered(32);
        assert_eq!(img.get_pixel(5, 16).0, theme.outer_disk.as_array());
    }

    #[test]
    fn only_crosshair_pixels_are_translucent() {
        let img = rendered(16);
        for (x, y, p) in img.enumerate_pixels() {
            if p[3] != 255 {
                assert!(x == 8 || y == 8, "unexpected translucent pixel ({x}, {y}): {p:?}");
            }
        }
        assert_eq!(img.get_pixel(0, 0)[3], 255);
    }

    #[test]
    fn encode_produces_png() {
        let mut canvas = RasterCanvas::new(16).unwrap();
        canvas.paint(&render(NonZeroU32::new(16).unwrap()));
        let bytes = canvas.encode().unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.width(), 16);
        assert_eq!(decoded.height(), 16);
        assert_eq!(decoded.color(), image::ColorType::Rgba8);
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(128, 32, 0, 128), (255, 64, 0, 128));
    }
}
