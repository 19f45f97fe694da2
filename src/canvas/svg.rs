//! SVG emitter.
//!
//! [`SvgCanvas`] records primitives as SVG elements using the same pixel
//! conventions as the raster backend, so rasterizing its output with resvg
//! reproduces the raster geometry up to anti-aliasing differences. SVG has no
//! replace-the-pixel compositing, so translucent strokes blend with the
//! shapes below them here.

use image::RgbaImage;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use super::raster::pixmap_to_rgba_image;
use super::{ArcSweep, Canvas, RectF, inset_radii, stroke_endpoints};
use crate::error::{Error, Result};
use crate::layout::{BoundingBox, Point};
use crate::theme::Color;

/// A canvas that accumulates SVG markup.
#[derive(Debug, Clone)]
pub struct SvgCanvas {
    size: u32,
    elements: Vec<String>,
}

impl SvgCanvas {
    /// Creates an empty `size x size` document.
    pub fn new(size: u32) -> Self {
        Self {
            size,
            elements: Vec::new(),
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Returns the complete SVG document.
    pub fn to_markup(&self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{0}" viewBox="0 0 {0} {0}">"#,
            self.size
        );
        svg.push('\n');
        for element in &self.elements {
            svg.push_str("  ");
            svg.push_str(element);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Renders the document through resvg into an RGBA image.
    pub fn rasterize(&self) -> Result<RgbaImage> {
        render_svg(&self.to_markup(), self.size)
    }
}

impl Canvas for SvgCanvas {
    fn fill_rect(&mut self, rect: BoundingBox, color: Color) {
        let r = RectF::from_half_open(rect);
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return;
        }
        self.elements.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}"{}/>"#,
            num(r.left),
            num(r.top),
            num(r.width()),
            num(r.height()),
            fill_attrs(color),
        ));
    }

    fn fill_ellipse(&mut self, bbox: BoundingBox, color: Color) {
        let r = RectF::from_inclusive(bbox);
        if r.width() <= 0.0 || r.height() <= 0.0 {
            return;
        }
        let (cx, cy) = r.center();
        self.elements.push(format!(
            r#"<ellipse cx="{}" cy="{}" rx="{}" ry="{}"{}/>"#,
            num(cx),
            num(cy),
            num(r.width() / 2.0),
            num(r.height() / 2.0),
            fill_attrs(color),
        ));
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32) {
        let ((x1, y1), (x2, y2)) = stroke_endpoints(from, to, width);
        self.elements.push(format!(
            r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-linecap="butt"/>"#,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            stroke_attrs(color, width),
        ));
    }

    fn draw_arc(&mut self, bbox: BoundingBox, start: f32, end: f32, color: Color, width: u32) {
        let arc = ArcSweep::new(start, end);
        if arc.is_empty() {
            return;
        }
        let extent = RectF::from_inclusive(bbox);
        let Some((rx, ry)) = inset_radii(&extent, width) else {
            return;
        };
        let center = extent.center();

        // SVG arcs cannot close a full turn in one command; split in halves.
        let pieces = if arc.sweep > 180.0 { 2 } else { 1 };
        let step = arc.sweep / pieces as f32;
        let (sx, sy) = ArcSweep::point_at(arc.start, center, rx, ry);

        let mut d = format!("M {} {}", num(sx), num(sy));
        for i in 1..=pieces {
            let (x, y) = ArcSweep::point_at(arc.start + step * i as f32, center, rx, ry);
            d.push_str(&format!(" A {} {} 0 0 1 {} {}", num(rx), num(ry), num(x), num(y)));
        }

        self.elements.push(format!(
            r#"<path d="{}" fill="none"{} stroke-linecap="butt"/>"#,
            d,
            stroke_attrs(color, width),
        ));
    }

    fn encode(&self) -> Result<Vec<u8>> {
        Ok(self.to_markup().into_bytes())
    }
}

/// Formats a coordinate with at most three decimals and no trailing zeros.
fn num(value: f32) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

fn fill_attrs(color: Color) -> String {
    let mut attrs = format!(r#" fill="{}""#, color.to_hex_rgb());
    if color.a != 255 {
        attrs.push_str(&format!(r#" fill-opacity="{}""#, num(color.opacity())));
    }
    attrs
}

fn stroke_attrs(color: Color, width: u32) -> String {
    let mut attrs = format!(r#" stroke="{}" stroke-width="{}""#, color.to_hex_rgb(), width);
    if color.a != 255 {
        attrs.push_str(&format!(r#" stroke-opacity="{}""#, num(color.opacity())));
    }
    attrs
}

/// Renders an SVG string to an RGBA image at the specified size.
///
/// The SVG is scaled to fit within `size x size` pixels while preserving
/// aspect ratio.
pub fn render_svg(svg_data: &str, size: u32) -> Result<RgbaImage> {
    let opts = Options::default();
    let tree = Tree::from_str(svg_data, &opts)?;

    let svg_size = tree.size();
    let scale = (size as f32) / svg_size.width().max(svg_size.height());
    let width = (svg_size.width() * scale).ceil() as u32;
    let height = (svg_size.height() * scale).ceil() as u32;

    let mut pixmap = Pixmap::new(width, height).ok_or(Error::CanvasAllocation(size))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::RasterCanvas;
    use crate::renderer::render;
    use crate::theme::IconTheme;
    use std::num::NonZeroU32;

    fn icon_svg(size: u32) -> SvgCanvas {
        let mut canvas = SvgCanvas::new(size);
        canvas.paint(&render(NonZeroU32::new(size).unwrap()));
        canvas
    }

    #[test]
    fn number_formatting() {
        assert_eq!(num(16.5), "16.5");
        assert_eq!(num(3.0), "3");
        assert_eq!(num(0.902), "0.902");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn markup_has_one_element_per_command() {
        let markup = icon_svg(32).to_markup();
        assert!(markup.starts_with("<svg"));
        assert!(markup.contains(r#"viewBox="0 0 32 32""#));
        assert_eq!(markup.matches("<rect").count(), 1);
        assert_eq!(markup.matches("<ellipse").count(), 2);
        assert_eq!(markup.matches("<line").count(), 2);
        assert_eq!(markup.matches("<path").count(), 1);
    }

    #[test]
    fn ellipse_geometry_matches_raster_convention() {
        let markup = icon_svg(32).to_markup();
        assert!(markup.contains(r##"<ellipse cx="16.5" cy="16.5" rx="13.5" ry="13.5" fill="#ff8c00"/>"##));
    }

    #[test]
    fn crosshair_carries_opacity() {
        let markup = icon_svg(32).to_markup();
        assert!(markup.contains(r#"stroke-opacity="0.902""#));
        assert!(markup.contains(r#"<line x1="8" y1="16" x2="25" y2="16""#));
        assert!(markup.contains(r#"<line x1="16" y1="8" x2="16" y2="25""#));
        assert!(!markup.contains("square"));
    }

    #[test]
    fn arc_uses_clockwise_sweep() {
        let markup = icon_svg(32).to_markup();
        assert!(markup.contains(" A 11 11 0 0 1 "));
    }

    #[test]
    fn full_turn_arc_is_split() {
        let mut canvas = SvgCanvas::new(16);
        canvas.draw_arc(BoundingBox::new(2, 2, 13, 13), 0.0, 360.0, Color::rgba(0, 0, 0, 255), 1);
        assert_eq!(canvas.to_markup().matches(" A ").count(), 2);
    }

    #[test]
    fn encode_is_utf8_markup() {
        let canvas = icon_svg(16);
        let bytes = canvas.encode().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), canvas.to_markup());
    }

    #[test]
    fn rasterized_svg_matches_raster_backend() {
        let theme = IconTheme::default();
        let from_svg = icon_svg(32).rasterize().unwrap();
        assert_eq!(from_svg.dimensions(), (32, 32));

        let mut raster = RasterCanvas::new(32).unwrap();
        raster.paint(&render(NonZeroU32::new(32).unwrap()));
        let from_raster = raster.to_image();

        // Interior sample points are unaffected by anti-aliasing.
        for (x, y) in [(0, 0), (16, 5), (12, 12), (5, 16)] {
            assert_eq!(
                from_svg.get_pixel(x, y),
                from_raster.get_pixel(x, y),
                "pixel ({x}, {y}) differs"
            );
        }
        assert_eq!(from_svg.get_pixel(0, 0).0, theme.background.as_array());
    }

    #[test]
    fn render_svg_rejects_garbage() {
        assert!(matches!(render_svg("not svg", 16), Err(Error::Svg(_))));
    }
}
