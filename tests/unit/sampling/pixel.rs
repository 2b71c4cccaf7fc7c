//! Tests for raster views and strided pixel sampling

#[cfg(test)]
mod tests {
    use pixelmorph::MorphError;
    use pixelmorph::sampling::{LuminanceWeights, PixelSampler, RasterView};

    fn gradient(width: u32, height: u32) -> Vec<u8> {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 10) as u8, (y * 10) as u8, 0, 255]);
            }
        }
        pixels
    }

    // Tests zero width or height is rejected before sampling
    // Verified by removing the dimension check from RasterView::new
    #[test]
    fn test_zero_dimensions_rejected() {
        let sampler = PixelSampler::new(1, LuminanceWeights::Rec601).unwrap();

        assert!(matches!(
            sampler.sample_buffer(0, 3, &[]),
            Err(MorphError::InvalidDimensions {
                width: 0,
                height: 3
            })
        ));
        assert!(matches!(
            sampler.sample_buffer(3, 0, &[]),
            Err(MorphError::InvalidDimensions { .. })
        ));
    }

    // Tests buffer length must match the dimensions
    // Verified by skipping the length comparison
    #[test]
    fn test_buffer_size_mismatch() {
        let result = RasterView::new(2, 2, &[0; 12]);
        assert!(matches!(
            result,
            Err(MorphError::BufferSizeMismatch {
                expected: 16,
                actual: 12
            })
        ));
    }

    // Tests zero stride is an invalid parameter
    // Verified by accepting any stride
    #[test]
    fn test_zero_stride_rejected() {
        assert!(matches!(
            PixelSampler::new(0, LuminanceWeights::Rec601),
            Err(MorphError::InvalidParameter {
                parameter: "sample_stride",
                ..
            })
        ));
    }

    // Tests stride 1 visits every pixel in row-major scan order
    // Verified by swapping the row and column loops
    #[test]
    fn test_stride_one_scan_order() {
        let pixels = gradient(3, 2);
        let sampler = PixelSampler::new(1, LuminanceWeights::Rec601).unwrap();
        let samples = sampler.sample_buffer(3, 2, &pixels).unwrap();

        let positions: Vec<(u32, u32)> = samples.iter().map(|s| s.position()).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!(samples.get(4).map(|s| s.color), Some([10, 10, 0, 255]));
    }

    // Tests larger strides skip rows and columns but always include the origin
    // Verified by starting the iteration at the stride instead of zero
    #[test]
    fn test_stride_skips_rows_and_columns() {
        let pixels = gradient(5, 4);
        let sampler = PixelSampler::new(2, LuminanceWeights::Rec601).unwrap();
        let samples = sampler.sample_buffer(5, 4, &pixels).unwrap();

        let positions: Vec<(u32, u32)> = samples.iter().map(|s| s.position()).collect();
        assert_eq!(
            positions,
            vec![(0, 0), (2, 0), (4, 0), (0, 2), (2, 2), (4, 2)]
        );
    }

    // Tests transparent pixels are kept by the plain sampler
    // Verified by filtering on alpha inside sample()
    #[test]
    fn test_no_alpha_filtering() {
        let pixels = [10, 20, 30, 0, 40, 50, 60, 255];
        let sampler = PixelSampler::new(1, LuminanceWeights::Rec601).unwrap();
        let samples = sampler.sample_buffer(2, 1, &pixels).unwrap();

        assert_eq!(samples.len(), 2);
        assert_eq!(samples.get(0).map(|s| s.alpha()), Some(0));
    }

    // Tests brightness is computed with the sampler's weights at extraction
    // Verified by hardcoding Rec601 weights in Sample::new
    #[test]
    fn test_brightness_uses_configured_weights() {
        let pixels = [255, 0, 0, 255];
        let rec601 = PixelSampler::new(1, LuminanceWeights::Rec601).unwrap();
        let rec709 = PixelSampler::new(1, LuminanceWeights::Rec709).unwrap();

        let a = rec601.sample_buffer(1, 1, &pixels).unwrap();
        let b = rec709.sample_buffer(1, 1, &pixels).unwrap();

        let brightness_601 = a.get(0).map_or(0.0, |s| s.brightness);
        let brightness_709 = b.get(0).map_or(0.0, |s| s.brightness);
        assert!((brightness_601 - 0.299 * 255.0).abs() < 1e-9);
        assert!((brightness_709 - 0.2126 * 255.0).abs() < 1e-9);
    }

    // Tests out-of-range pixel reads return None
    // Verified by removing the bounds check in pixel()
    #[test]
    fn test_pixel_out_of_bounds() {
        let pixels = gradient(2, 2);
        let view = RasterView::new(2, 2, &pixels).unwrap();
        assert_eq!(view.pixel(1, 1), Some([10, 10, 0, 255]));
        assert_eq!(view.pixel(2, 0), None);
        assert_eq!(view.pixel(0, 2), None);
    }
}
