//! Geometry derived from an icon's pixel size.
//!
//! Every coordinate and radius of the icon is a pure integer function of
//! the requested size. [`IconSpec`] captures those values for one size so
//! they can be inspected and tested apart from any rasterizer.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The icon sizes generated when no explicit list is configured.
pub const DEFAULT_SIZES: [u32; 6] = [16, 32, 48, 64, 96, 128];

/// A point in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Returns this point shifted by `(dx, dy)`.
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// A `[left, top, right, bottom]` rectangle in pixel coordinates.
///
/// Whether `right`/`bottom` are inclusive depends on the primitive that
/// carries the box: ellipse and arc boxes are inclusive pixel bounds, canvas
/// fills are half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: i64,
    pub top: i64,
    pub right: i64,
    pub bottom: i64,
}

impl BoundingBox {
    pub fn new(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The square of the given radius around `center`.
    pub fn centered(center: Point, radius: i64) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    /// Returns `[left, top, right, bottom]`.
    pub fn as_array(&self) -> [i64; 4] {
        [self.left, self.top, self.right, self.bottom]
    }

    pub fn width(&self) -> i64 {
        self.right - self.left
    }

    pub fn height(&self) -> i64 {
        self.bottom - self.top
    }
}

/// Layout of a single icon, fully determined by its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSpec {
    pub size: u32,
    pub center: Point,
    pub outer_radius: i64,
    pub inner_radius: i64,
    pub crosshair_offset: i64,
    pub crosshair_line_width: u32,
    pub arc_radius: i64,
    pub arc_line_width: u32,
}

impl IconSpec {
    /// Computes the layout for `size`.
    ///
    /// Coordinates are `i64`, so every `u32` size has a layout.
    pub fn new(size: NonZeroU32) -> Self {
        let size = size.get();
        let s = i64::from(size);
        let half = s / 2;

        Self {
            size,
            center: Point::new(half, half),
            outer_radius: percent_of(s, 42),
            inner_radius: percent_of(s, 20).max(2),
            crosshair_offset: percent_of(s, 28),
            crosshair_line_width: (size / 16).max(1),
            arc_radius: percent_of(s, 36),
            arc_line_width: (size / 20).max(1),
        }
    }

    /// Like [`IconSpec::new`], but rejects a size of zero.
    pub fn for_size(size: u32) -> Result<Self> {
        NonZeroU32::new(size)
            .map(Self::new)
            .ok_or(Error::InvalidSize(size))
    }

    /// Canvas dimensions as `(width, height)`.
    pub fn canvas_dim(&self) -> (u32, u32) {
        (self.size, self.size)
    }

    pub fn outer_bbox(&self) -> BoundingBox {
        BoundingBox::centered(self.center, self.outer_radius)
    }

    pub fn inner_bbox(&self) -> BoundingBox {
        BoundingBox::centered(self.center, self.inner_radius)
    }

    pub fn arc_bbox(&self) -> BoundingBox {
        BoundingBox::centered(self.center, self.arc_radius)
    }

    /// Endpoints of the horizontal crosshair segment.
    pub fn horizontal_crosshair(&self) -> (Point, Point) {
        let d = self.crosshair_offset;
        (self.center.offset(-d, 0), self.center.offset(d, 0))
    }

    /// Endpoints of the vertical crosshair segment.
    pub fn vertical_crosshair(&self) -> (Point, Point) {
        let d = self.crosshair_offset;
        (self.center.offset(0, -d), self.center.offset(0, d))
    }
}

/// `floor(value * pct / 100)` in exact integer arithmetic.
fn percent_of(value: i64, pct: i64) -> i64 {
    value * pct / 100
}
