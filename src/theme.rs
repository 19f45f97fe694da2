//! Icon colors and recoloring.

use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

/// An 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn as_array(&self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// `#rrggbb`, ignoring alpha.
    pub fn to_hex_rgb(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a fraction in `0.0..=1.0`.
    pub fn opacity(&self) -> f32 {
        self.a as f32 / 255.0
    }

    /// Rotates the hue of this color, keeping saturation, lightness and alpha.
    pub fn hue_rotated(&self, degrees: f32) -> Self {
        let rgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let mut hsl: Hsl = rgb.into_color();
        hsl.hue += degrees;
        let rotated: Srgb = hsl.into_color();

        Self::rgba(
            channel(rotated.red),
            channel(rotated.green),
            channel(rotated.blue),
            self.a,
        )
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// The palette an icon is painted with.
///
/// The default theme is the stock navy-and-amber reticle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IconTheme {
    pub background: Color,
    pub outer_disk: Color,
    pub inner_core: Color,
    pub crosshair: Color,
    pub highlight: Color,
}

impl Default for IconTheme {
    fn default() -> Self {
        Self {
            background: Color::rgba(24, 30, 46, 255),
            outer_disk: Color::rgba(255, 140, 0, 255),
            inner_core: Color::rgba(35, 39, 55, 255),
            crosshair: Color::rgba(255, 255, 255, 230),
            highlight: Color::rgba(255, 214, 170, 255),
        }
    }
}

impl IconTheme {
    /// Returns a copy with every color's hue rotated by `degrees`.
    ///
    /// Achromatic colors (the white crosshair) come back unchanged.
    pub fn hue_rotated(&self, degrees: f32) -> Self {
        let degrees = degrees.rem_euclid(360.0);
        Self {
            background: self.background.hue_rotated(degrees),
            outer_disk: self.outer_disk.hue_rotated(degrees),
            inner_core: self.inner_core.hue_rotated(degrees),
            crosshair: self.crosshair.hue_rotated(degrees),
            highlight: self.highlight.hue_rotated(degrees),
        }
    }
}
