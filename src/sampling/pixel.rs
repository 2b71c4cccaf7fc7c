//! Strided extraction of positioned, brightness-keyed samples from raw RGBA buffers

use crate::io::error::{MorphError, Result, check_dimensions, invalid_parameter};
use crate::sampling::luminance::LuminanceWeights;

/// Straight (non-premultiplied) RGBA color
pub type Rgba = [u8; 4];

/// A single pixel read from a raster
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Column in the raster
    pub x: u32,
    /// Row in the raster
    pub y: u32,
    /// Color at the sampled position
    pub color: Rgba,
    /// Luminance computed once at extraction
    pub brightness: f64,
}

impl Sample {
    /// Create a sample, computing its brightness with the given weights
    pub fn new(x: u32, y: u32, color: Rgba, luminance: LuminanceWeights) -> Self {
        Self {
            x,
            y,
            color,
            brightness: luminance.brightness(color),
        }
    }

    /// Alpha channel of the sampled color
    pub const fn alpha(&self) -> u8 {
        self.color[3]
    }

    /// Position as `(x, y)`
    pub const fn position(&self) -> (u32, u32) {
        (self.x, self.y)
    }
}

/// Samples in raster scan order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleSet {
    samples: Vec<Sample>,
}

impl SampleSet {
    /// Wrap samples that are already in scan order
    pub const fn new(samples: Vec<Sample>) -> Self {
        Self { samples }
    }

    /// Number of samples
    pub const fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the set holds no samples
    pub const fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at a scan-order index
    pub fn get(&self, index: usize) -> Option<&Sample> {
        self.samples.get(index)
    }

    /// Iterate samples in scan order
    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    /// Borrow all samples
    pub fn as_slice(&self) -> &[Sample] {
        &self.samples
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

impl FromIterator<Sample> for SampleSet {
    fn from_iter<I: IntoIterator<Item = Sample>>(iter: I) -> Self {
        Self {
            samples: iter.into_iter().collect(),
        }
    }
}

/// Borrowed, validated view over a decoded RGBA buffer
#[derive(Debug, Clone, Copy)]
pub struct RasterView<'a> {
    width: u32,
    height: u32,
    pixels: &'a [u8],
}

impl<'a> RasterView<'a> {
    /// Wrap a row-major RGBA buffer
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Either dimension is zero
    /// - The buffer length is not `width * height * 4`
    pub fn new(width: u32, height: u32, pixels: &'a [u8]) -> Result<Self> {
        check_dimensions(width, height)?;

        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(MorphError::BufferSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap a decoded image
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the image is empty
    pub fn from_image(image: &'a image::RgbaImage) -> Result<Self> {
        Self::new(image.width(), image.height(), image.as_raw())
    }

    /// Raster width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Color at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        self.pixels
            .get(offset..offset + 4)
            .and_then(|channels| channels.try_into().ok())
    }
}

/// Visits every `stride`-th row and column of a raster
#[derive(Debug, Clone, Copy)]
pub struct PixelSampler {
    stride: u32,
    luminance: LuminanceWeights,
}

impl PixelSampler {
    /// Create a sampler with the given stride and luminance weights
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if `stride` is zero
    pub fn new(stride: u32, luminance: LuminanceWeights) -> Result<Self> {
        if stride == 0 {
            return Err(invalid_parameter(
                "sample_stride",
                &stride,
                &"must be a positive integer",
            ));
        }
        Ok(Self { stride, luminance })
    }

    /// Distance between sampled rows and columns
    pub const fn stride(&self) -> u32 {
        self.stride
    }

    /// Weights used to compute sample brightness
    pub const fn luminance(&self) -> LuminanceWeights {
        self.luminance
    }

    /// Sample the raster in scan order, keeping every visited pixel
    pub fn sample(&self, raster: &RasterView<'_>) -> SampleSet {
        let step = self.stride as usize;
        let columns = raster.width().div_ceil(self.stride) as usize;
        let rows = raster.height().div_ceil(self.stride) as usize;
        let mut samples = Vec::with_capacity(columns * rows);

        for y in (0..raster.height()).step_by(step) {
            for x in (0..raster.width()).step_by(step) {
                if let Some(color) = raster.pixel(x, y) {
                    samples.push(Sample::new(x, y, color, self.luminance));
                }
            }
        }

        log::debug!(
            "sampled {} pixels from {}x{} raster at stride {}",
            samples.len(),
            raster.width(),
            raster.height(),
            self.stride
        );

        SampleSet::new(samples)
    }

    /// Validate a raw buffer and sample it
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are zero or do not match the buffer length
    pub fn sample_buffer(&self, width: u32, height: u32, pixels: &[u8]) -> Result<SampleSet> {
        let raster = RasterView::new(width, height, pixels)?;
        Ok(self.sample(&raster))
    }
}
