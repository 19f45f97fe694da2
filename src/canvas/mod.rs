//! Drawing backends.
//!
//! The renderer only produces [`DrawCommand`]s; a [`Canvas`] turns them into
//! pixels or markup. Two backends ship:
//!
//! - [`RasterCanvas`]: anti-aliased software rasterizer, encodes to PNG
//! - [`SvgCanvas`]: emits SVG markup with the same geometry
//!
//! # Pixel conventions
//!
//! Both backends map integer pixel coordinates onto a continuous plane the
//! same way, so their output lines up:
//!
//! - Ellipse and arc bounding boxes are inclusive: `[3, 3, 29, 29]` spans the
//!   continuous square `3.0..30.0`.
//! - Canvas fill rectangles are half-open: `[0, 0, 32, 32]` spans `0.0..32.0`.
//! - Arc strokes are inset so their outer edge touches the bounding box.
//! - Lines cover both endpoint pixels exactly: along the segment the stroke
//!   runs from the outer edge of the first pixel to the outer edge of the
//!   last, with butt caps. Across it, odd widths are centered on the pixel
//!   row and even widths on the corner above it, so axis-aligned lines stay
//!   crisp.
//! - Every primitive replaces the pixels it covers, including their alpha.
//!   A translucent crosshair leaves translucent pixels behind rather than
//!   blending into the core.

pub mod raster;
pub mod svg;

pub use raster::RasterCanvas;
pub use svg::SvgCanvas;

use std::f32::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::layout::{BoundingBox, Point};
use crate::renderer::DrawCommand;
use crate::theme::Color;

// ============================================================================
// Canvas Trait
// ============================================================================

/// A drawing target that can replay [`DrawCommand`]s and encode the result.
pub trait Canvas {
    /// Fills a half-open rectangle.
    fn fill_rect(&mut self, rect: BoundingBox, color: Color);

    /// Fills the ellipse inscribed in an inclusive bounding box.
    fn fill_ellipse(&mut self, bbox: BoundingBox, color: Color);

    /// Strokes a segment between two pixels.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: u32);

    /// Strokes an arc of the ellipse inscribed in `bbox`.
    ///
    /// Implementations receive the raw angles and must treat
    /// `end < start` as a sweep through 0 degrees; [`ArcSweep`] does this.
    fn draw_arc(&mut self, bbox: BoundingBox, start: f32, end: f32, color: Color, width: u32);

    /// Encodes the canvas into the backend's file format.
    fn encode(&self) -> Result<Vec<u8>>;

    /// Dispatches a single command to the matching primitive.
    fn apply(&mut self, command: &DrawCommand) {
        match *command {
            DrawCommand::FillCanvas { rect, color } => self.fill_rect(rect, color),
            DrawCommand::FillEllipse { bbox, color } => self.fill_ellipse(bbox, color),
            DrawCommand::DrawLine {
                from,
                to,
                color,
                width,
            } => self.draw_line(from, to, color, width),
            DrawCommand::DrawArc {
                bbox,
                start_angle,
                end_angle,
                color,
                width,
            } => self.draw_arc(bbox, start_angle, end_angle, color, width),
        }
    }

    /// Replays `commands` in order.
    fn paint(&mut self, commands: &[DrawCommand]) {
        for command in commands {
            self.apply(command);
        }
    }
}

// ============================================================================
// Output Format
// ============================================================================

/// File format written by the generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ============================================================================
// Shared Geometry
// ============================================================================

/// A rectangle on the continuous plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    /// Continuous extent of an inclusive pixel box.
    pub fn from_inclusive(bbox: BoundingBox) -> Self {
        Self {
            left: bbox.left as f32,
            top: bbox.top as f32,
            right: (bbox.right + 1) as f32,
            bottom: (bbox.bottom + 1) as f32,
        }
    }

    /// Continuous extent of a half-open pixel box.
    pub fn from_half_open(rect: BoundingBox) -> Self {
        Self {
            left: rect.left as f32,
            top: rect.top as f32,
            right: rect.right as f32,
            bottom: rect.bottom as f32,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Maps a pixel to the point a stroke of `width` should pass through.
pub fn snap_to_stroke(point: Point, width: u32) -> (f32, f32) {
    let shift = if width % 2 == 1 { 0.5 } else { 0.0 };
    (point.x as f32 + shift, point.y as f32 + shift)
}

/// Endpoints of a butt-capped stroke covering the pixels `from` through `to`.
///
/// Along the segment the endpoints move half a pixel out from the pixel
/// centers. The perpendicular axis of a horizontal or vertical segment keeps
/// the [`snap_to_stroke`] offset.
pub fn stroke_endpoints(from: Point, to: Point, width: u32) -> ((f32, f32), (f32, f32)) {
    let (sx0, sy0) = snap_to_stroke(from, width);
    let (sx1, sy1) = snap_to_stroke(to, width);
    let (cx0, cy0) = (from.x as f32 + 0.5, from.y as f32 + 0.5);
    let (cx1, cy1) = (to.x as f32 + 0.5, to.y as f32 + 0.5);

    let (dx, dy) = (cx1 - cx0, cy1 - cy0);
    let len = dx.hypot(dy);
    // A single pixel is stroked as a horizontal run.
    let (ux, uy) = if len > 0.0 { (dx / len, dy / len) } else { (1.0, 0.0) };
    let (ex, ey) = (ux * 0.5, uy * 0.5);

    let vertical = ux == 0.0;
    let horizontal = uy == 0.0;
    let (x0, x1) = if vertical { (sx0, sx1) } else { (cx0 - ex, cx1 + ex) };
    let (y0, y1) = if horizontal { (sy0, sy1) } else { (cy0 - ey, cy1 + ey) };
    ((x0, y0), (x1, y1))
}

/// An arc with its sweep normalized to a non-negative clockwise extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSweep {
    /// Start angle in degrees, `0.0..360.0`.
    pub start: f32,
    /// Clockwise extent in degrees, `0.0..=360.0`.
    pub sweep: f32,
}

impl ArcSweep {
    /// Normalizes a `start`/`end` pair.
    ///
    /// An `end` numerically below `start` continues past 360, so
    /// `(300, 60)` sweeps 120 degrees through 0. Sweeps longer than a full
    /// turn are clamped to one. Non-finite angles give an empty arc.
    pub fn new(start: f32, end: f32) -> Self {
        if !start.is_finite() || !end.is_finite() {
            return Self::EMPTY;
        }
        let delta = end - start;
        let sweep = if delta >= 360.0 {
            360.0
        } else {
            wrap_degrees(delta)
        };
        Self {
            start: wrap_degrees(start),
            sweep,
        }
    }

    const EMPTY: Self = Self {
        start: 0.0,
        sweep: 0.0,
    };

    pub fn end(&self) -> f32 {
        self.start + self.sweep
    }

    pub fn is_empty(&self) -> bool {
        self.sweep <= 0.0
    }

    /// Splits the arc into cubic Bézier segments of at most 90 degrees on an
    /// ellipse centered at `center` with radii `(rx, ry)`.
    ///
    /// Each segment is `[p0, c1, c2, p3]`; consecutive segments share
    /// endpoints.
    pub fn cubic_segments(&self, center: (f32, f32), rx: f32, ry: f32) -> Vec<[(f32, f32); 4]> {
        if self.is_empty() {
            return Vec::new();
        }

        let count = (self.sweep / 90.0).ceil().max(1.0) as usize;
        let step = self.sweep.to_radians() / count as f32;
        let k = 4.0 / 3.0 * (step / 4.0).tan();
        let (cx, cy) = center;

        let point = |a: f32| (cx + rx * a.cos(), cy + ry * a.sin());
        let tangent = |a: f32| (-rx * a.sin(), ry * a.cos());

        (0..count)
            .map(|i| {
                let a0 = self.start.to_radians() + step * i as f32;
                let a1 = a0 + step;
                let p0 = point(a0);
                let p3 = point(a1);
                let t0 = tangent(a0);
                let t1 = tangent(a1);
                [
                    p0,
                    (p0.0 + k * t0.0, p0.1 + k * t0.1),
                    (p3.0 - k * t1.0, p3.1 - k * t1.1),
                    p3,
                ]
            })
            .collect()
    }

    /// Point on the ellipse at `degrees`.
    pub fn point_at(degrees: f32, center: (f32, f32), rx: f32, ry: f32) -> (f32, f32) {
        let a = degrees * PI / 180.0;
        (center.0 + rx * a.cos(), center.1 + ry * a.sin())
    }
}

/// Reduces an angle to `0.0..360.0`.
fn wrap_degrees(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Radii of an arc's stroke centerline, inset by half the stroke width.
///
/// Returns `None` when the stroke would not fit inside the box.
pub fn inset_radii(extent: &RectF, width: u32) -> Option<(f32, f32)> {
    let half = width as f32 / 2.0;
    let rx = extent.width() / 2.0 - half;
    let ry = extent.height() / 2.0 - half;
    (rx > 0.0 && ry > 0.0).then_some((rx, ry))
}

// ============================================================================
// Tests
// ============================================================================
