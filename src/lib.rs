//! reticle-icons: procedural reticle icon generator
//!
//! This crate draws a small "detection" icon (an amber disk with a dark
//! core, a white crosshair and a highlight arc) at any pixel size and
//! writes the results as PNG or SVG files.
//!
//! The geometry is a pure function of the icon size: [`IconRenderer`]
//! turns a size into an ordered list of [`DrawCommand`]s, and a [`Canvas`]
//! backend turns the commands into pixels or markup.
//!
//! # Example
//!
//! ```
//! use std::num::NonZeroU32;
//! use reticle_icons::{Canvas, IconRenderer, RasterCanvas};
//!
//! let size = NonZeroU32::new(32).unwrap();
//! let commands = IconRenderer::default().render(size);
//!
//! let mut canvas = RasterCanvas::new(32)?;
//! canvas.paint(&commands);
//! let png = canvas.encode()?;
//! assert!(png.starts_with(b"\x89PNG"));
//! # Ok::<(), reticle_icons::Error>(())
//! ```
//!
//! # Generating Files
//!
//! [`IconGenerator`] runs the whole pipeline for every size in a
//! [`GeneratorConfig`]:
//!
//! ```no_run
//! use reticle_icons::{GeneratorConfig, IconGenerator, IconTheme};
//!
//! let config = GeneratorConfig::new()
//!     .with_output_dir("assets/icons")
//!     .with_theme(IconTheme::default().hue_rotated(120.0));
//!
//! for path in IconGenerator::new(config).generate()? {
//!     println!("Generated {}", path.display());
//! }
//! # Ok::<(), reticle_icons::Error>(())
//! ```

mod canvas;
mod config;
mod error;
mod generator;
mod icon;
mod layout;
mod renderer;
mod theme;

pub use canvas::{ArcSweep, Canvas, OutputFormat, RasterCanvas, RectF, SvgCanvas};
pub use config::{DEFAULT_OUTPUT_DIR, GeneratorConfig};
pub use error::{Error, Result};
pub use generator::IconGenerator;
pub use icon::{IconImage, IconSet};
pub use layout::{BoundingBox, DEFAULT_SIZES, IconSpec, Point};
pub use renderer::{
    DrawCommand, HIGHLIGHT_END_DEGREES, HIGHLIGHT_START_DEGREES, IconRenderer, render,
};
pub use theme::{Color, IconTheme};
