//! Runs the renderer for every configured size and writes the results.

use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::canvas::{Canvas, OutputFormat, RasterCanvas, SvgCanvas};
use crate::config::GeneratorConfig;
use crate::error::{Error, Result};
use crate::icon::{IconImage, IconSet};
use crate::renderer::{DrawCommand, IconRenderer};

/// Generates the icon set described by a [`GeneratorConfig`].
///
/// Each size is drawn on its own canvas; nothing carries over between
/// sizes. The first failure stops the run.
///
/// # Example
///
/// ```no_run
/// use reticle_icons::{GeneratorConfig, IconGenerator};
///
/// let generator = IconGenerator::new(GeneratorConfig::new().with_output_dir("out/icons"));
/// let written = generator.generate()?;
/// assert_eq!(written.len(), 6);
/// # Ok::<(), reticle_icons::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct IconGenerator {
    config: GeneratorConfig,
    renderer: IconRenderer,
}

impl IconGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        let renderer = IconRenderer::new(config.theme);
        Self { config, renderer }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// The draw commands for `size`.
    pub fn commands(&self, size: u32) -> Result<Vec<DrawCommand>> {
        Ok(self.renderer.render(nonzero(size)?))
    }

    /// Rasterizes a single icon in memory.
    ///
    /// Always uses the raster backend, regardless of the configured format.
    pub fn render(&self, size: u32) -> Result<IconImage> {
        let size = nonzero(size)?;
        let mut canvas = RasterCanvas::new(size.get())?;
        canvas.paint(&self.renderer.render(size));
        Ok(IconImage::new(size.get(), canvas.to_image()))
    }

    /// Rasterizes every configured size in memory.
    pub fn render_all(&self) -> Result<IconSet> {
        let images = self
            .config
            .validated_sizes()?
            .into_iter()
            .map(|size| self.render(size.get()))
            .collect::<Result<Vec<_>>>()?;
        Ok(IconSet::from_images(images))
    }

    /// Draws `size` and encodes it in the configured format.
    pub fn encode(&self, size: u32) -> Result<Vec<u8>> {
        let size = nonzero(size)?;
        let commands = self.renderer.render(size);
        debug!(size = size.get(), format = %self.config.format, "drawing icon");

        match self.config.format {
            OutputFormat::Png => {
                let mut canvas = RasterCanvas::new(size.get())?;
                canvas.paint(&commands);
                canvas.encode()
            }
            OutputFormat::Svg => {
                let mut canvas = SvgCanvas::new(size.get());
                canvas.paint(&commands);
                canvas.encode()
            }
        }
    }

    /// Writes every configured size to the output directory.
    ///
    /// Returns the written paths in generation order.
    pub fn generate(&self) -> Result<Vec<PathBuf>> {
        self.generate_with(|_| {})
    }

    /// Like [`generate`](Self::generate), calling `on_written` after each
    /// file lands on disk.
    pub fn generate_with<F>(&self, mut on_written: F) -> Result<Vec<PathBuf>>
    where
        F: FnMut(&Path),
    {
        let sizes = self.config.validated_sizes()?;
        let dir = &self.config.output_dir;
        fs::create_dir_all(dir).map_err(|source| Error::CreateDir {
            path: dir.clone(),
            source,
        })?;

        let mut written = Vec::with_capacity(sizes.len());
        for size in sizes {
            let bytes = self.encode(size.get())?;
            let path = self.config.output_path(size.get());
            fs::write(&path, &bytes).map_err(|source| Error::Write {
                path: path.clone(),
                source,
            })?;

            info!(path = %path.display(), size = size.get(), bytes = bytes.len(), "generated icon");
            on_written(&path);
            written.push(path);
        }

        Ok(written)
    }
}

impl Default for IconGenerator {
    fn default() -> Self {
        Self::new(GeneratorConfig::default())
    }
}

fn nonzero(size: u32) -> Result<NonZeroU32> {
    NonZeroU32::new(size).ok_or(Error::InvalidSize(size))
}
