//! Tests for the sampling, mapping and rendering pipeline

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use pixelmorph::MorphError;
    use pixelmorph::io::configuration::MorphConfig;
    use pixelmorph::pipeline::MorphPipeline;
    use pixelmorph::sampling::RasterView;

    fn gradient(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let v = ((x + y * width) * 255 / (width * height)) as u8;
            Rgba([v, v / 2, 255 - v, 255])
        })
    }

    // Tests invalid configurations are rejected at construction
    // Verified by skipping validation in new()
    #[test]
    fn test_new_validates_config() {
        let mut config = MorphConfig::new(8, 8);
        config.sample_stride = 0;
        assert!(MorphPipeline::new(config).is_err());
        assert!(MorphPipeline::new(MorphConfig::new(8, 8)).is_ok());
    }

    // Tests a target with the wrong size is rejected
    // Verified by removing the target size check
    #[test]
    fn test_correspond_requires_output_sized_target() {
        let pipeline = MorphPipeline::new(MorphConfig::new(8, 8)).unwrap();
        let source = gradient(8, 8);
        let target = gradient(4, 4);

        let result = pipeline.correspond(
            &RasterView::from_image(&source).unwrap(),
            &RasterView::from_image(&target).unwrap(),
        );
        assert!(matches!(
            result,
            Err(MorphError::InvalidParameter {
                parameter: "target",
                ..
            })
        ));
    }

    // Tests images of any size are cover-fitted before mapping
    // Verified by mapping the unfitted images
    #[test]
    fn test_correspond_images_fits_both() {
        let pipeline = MorphPipeline::new(MorphConfig::new(6, 6)).unwrap();
        let correspondence = pipeline
            .correspond_images(&gradient(12, 9), &gradient(20, 30))
            .unwrap();

        assert_eq!(correspondence.len(), 36);
        assert!(correspondence.iter().all(|point| {
            let (sx, sy) = point.origin();
            let (tx, ty) = point.destination();
            sx < 6 && sy < 6 && tx < 6 && ty < 6
        }));
    }

    // Tests a fully transparent target fails to map
    // Verified by keeping samples below the alpha threshold
    #[test]
    fn test_transparent_target_fails() {
        let pipeline = MorphPipeline::new(MorphConfig::new(4, 4)).unwrap();
        let target = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 10]));
        assert!(matches!(
            pipeline.correspond_images(&gradient(4, 4), &target),
            Err(MorphError::EmptySampleSet { set: "target" })
        ));
    }

    // Tests the mosaic and animation consume the same correspondence
    // Verified by building a second correspondence for the animation
    #[test]
    fn test_render_and_animate_share_mapping() {
        let pipeline = MorphPipeline::new(MorphConfig::new(4, 4)).unwrap();
        let correspondence = pipeline
            .correspond_images(&gradient(4, 4), &gradient(4, 4))
            .unwrap();

        let raster = pipeline.render_mosaic(&correspondence).unwrap();
        assert_eq!((raster.width(), raster.height()), (4, 4));

        let engine = pipeline.start_animation(&correspondence).unwrap();
        assert_eq!(engine.particles().len(), correspondence.len());
        for (particle, point) in engine.particles().iter().zip(&correspondence) {
            assert_eq!(particle.color, point.color());
        }
    }
}
