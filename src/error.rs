//! Error types for icon generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while rendering, encoding, or writing icons.
#[derive(Debug, Error)]
pub enum Error {
    /// A size of zero was requested.
    #[error("icon size must be a positive integer, got {0}")]
    InvalidSize(u32),

    /// The rasterizer could not allocate a pixel buffer.
    #[error("failed to allocate a {0}x{0} canvas")]
    CanvasAllocation(u32),

    /// The output directory could not be created.
    #[error("failed to create output directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The image encoder rejected a rendered icon.
    #[error("failed to encode {size}px icon")]
    Encode {
        size: u32,
        #[source]
        source: image::ImageError,
    },

    /// An encoded icon could not be written to disk.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A configuration file could not be read.
    #[error("failed to read config {}", path.display())]
    ReadConfig {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A JSON document could not be parsed or produced.
    #[error("invalid JSON")]
    Json(#[from] serde_json::Error),

    /// Emitted SVG markup could not be parsed back for rasterization.
    #[error("failed to parse SVG")]
    Svg(#[from] resvg::usvg::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
