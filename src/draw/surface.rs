//! Offscreen drawing surface handed to the canvas at construction.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use thiserror::Error;

/// Errors raised while creating or exporting a surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("surface size {0}x{1} is invalid")]
    InvalidSize(i32, i32),

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),

    #[error("surface has no pixels to export")]
    Empty,
}

/// Backing store for the canvas.
///
/// Sizes are in device pixels. A zero-sized surface is legal (a collapsed
/// container) and simply has nothing to draw on.
pub struct CanvasSurface {
    image: Option<cairo::ImageSurface>,
    width: i32,
    height: i32,
}

impl CanvasSurface {
    /// Creates an ARGB32 surface of the given size.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        let image = Self::create_image(width, height)?;
        Ok(Self {
            image,
            width,
            height,
        })
    }

    fn create_image(width: i32, height: i32) -> Result<Option<cairo::ImageSurface>, SurfaceError> {
        if width < 0 || height < 0 {
            return Err(SurfaceError::InvalidSize(width, height));
        }
        if width == 0 || height == 0 {
            return Ok(None);
        }
        Ok(Some(cairo::ImageSurface::create(
            cairo::Format::ARgb32,
            width,
            height,
        )?))
    }

    /// Reallocates the backing store. Previous pixels are discarded.
    pub fn resize(&mut self, width: i32, height: i32) -> Result<(), SurfaceError> {
        if width == self.width && height == self.height {
            return Ok(());
        }
        self.image = Self::create_image(width, height)?;
        self.width = width;
        self.height = height;
        log::debug!("Surface resized to {width}x{height}");
        Ok(())
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Opens a drawing context, or `None` for a zero-sized surface.
    pub fn context(&self) -> Result<Option<cairo::Context>, SurfaceError> {
        match &self.image {
            Some(image) => Ok(Some(cairo::Context::new(image)?)),
            None => Ok(None),
        }
    }

    /// Raw ARGB32 pixel data (premultiplied, native endian).
    pub fn pixels(&mut self) -> Option<Vec<u8>> {
        let image = self.image.as_mut()?;
        image.flush();
        image.data().ok().map(|data| data.to_vec())
    }

    /// Encodes the current contents as PNG.
    pub fn write_png(&self, path: &Path) -> Result<(), SurfaceError> {
        let image = self.image.as_ref().ok_or(SurfaceError::Empty)?;
        let mut writer = BufWriter::new(File::create(path)?);
        image.write_to_png(&mut writer)?;
        log::info!("Wrote {}x{} PNG to {}", self.width, self.height, path.display());
        Ok(())
    }
}
