//! Mosaic rendering with independent tile size
//!
//! Each mapped point becomes a solid `block_size` square of the source color at
//! the target position. Block sizes larger than the sampling stride overlap
//! (later ranks win); smaller ones leave transparent gaps.

use crate::io::error::{Result, check_dimensions, invalid_parameter};
use crate::mapping::rank::Correspondence;
use crate::sampling::pixel::Rgba;
use image::RgbaImage;

/// Fixed-size RGBA buffer, initially fully transparent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRaster {
    image: RgbaImage,
}

impl OutputRaster {
    /// Allocate a transparent raster
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            image: RgbaImage::new(width, height),
        })
    }

    /// Raster width in pixels
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Raster height in pixels
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Color at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    /// Overwrite `[x, x+size) x [y, y+size)` with `color`, clipped to bounds
    pub fn fill_block(&mut self, x: u32, y: u32, size: u32, color: Rgba) {
        let x_end = x.saturating_add(size).min(self.width());
        let y_end = y.saturating_add(size).min(self.height());

        for py in y..y_end {
            for px in x..x_end {
                if let Some(pixel) = self.image.get_pixel_mut_checked(px, py) {
                    pixel.0 = color;
                }
            }
        }
    }

    /// Row-major RGBA bytes
    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    /// Borrow the underlying image for encoding
    pub const fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take ownership of the underlying image
    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

/// Writes mosaic tiles for every mapped point
#[derive(Debug, Clone, Copy)]
pub struct MosaicRenderer {
    block_size: u32,
}

impl MosaicRenderer {
    /// Create a renderer with the given tile edge length
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `block_size` is zero
    pub fn new(block_size: u32) -> Result<Self> {
        if block_size == 0 {
            return Err(invalid_parameter(
                "mosaic_block_size",
                &block_size,
                &"must be a positive integer",
            ));
        }
        Ok(Self { block_size })
    }

    /// Tile edge length in pixels
    pub const fn block_size(&self) -> u32 {
        self.block_size
    }

    /// Render the correspondence into a fresh raster
    ///
    /// Tiles are written in rank order, so on overlap the brighter source
    /// rank is the one left visible.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either output dimension is zero
    pub fn render(
        &self,
        correspondence: &Correspondence,
        width: u32,
        height: u32,
    ) -> Result<OutputRaster> {
        let mut raster = OutputRaster::new(width, height)?;

        for point in correspondence {
            let (x, y) = point.destination();
            raster.fill_block(x, y, self.block_size, point.color());
        }

        log::debug!(
            "rendered {} mosaic tiles of size {} into {width}x{height}",
            correspondence.len(),
            self.block_size
        );

        Ok(raster)
    }
}
