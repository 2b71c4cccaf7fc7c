//! Tests for image loading, cover-fit resizing and PNG export

#[cfg(test)]
mod tests {
    use image::{Rgba, RgbaImage};
    use pixelmorph::MorphError;
    use pixelmorph::io::image::{cover_fit, load_rgba, save_png};
    use tempfile::TempDir;

    // Tests images at the requested size pass through unchanged
    // Verified by always resampling
    #[test]
    fn test_cover_fit_identity() {
        let image = RgbaImage::from_fn(4, 3, |x, y| Rgba([x as u8, y as u8, 7, 255]));
        let fitted = cover_fit(&image, 4, 3).unwrap();
        assert_eq!(fitted, image);
    }

    // Tests a wide image is cropped to the requested aspect
    // Verified by using the min scale ratio instead of max
    #[test]
    fn test_cover_fit_wide_source() {
        let image = RgbaImage::from_pixel(40, 10, Rgba([200, 10, 10, 255]));
        let fitted = cover_fit(&image, 16, 16).unwrap();

        assert_eq!(fitted.dimensions(), (16, 16));
        assert_eq!(*fitted.get_pixel(8, 8), Rgba([200, 10, 10, 255]));
    }

    // Tests cropping keeps the centre of the scaled image
    // Verified by cropping from the top-left corner
    #[test]
    fn test_cover_fit_centered_crop() {
        let image = RgbaImage::from_fn(30, 10, |x, _| {
            if (10..20).contains(&x) {
                Rgba([255, 255, 255, 255])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let fitted = cover_fit(&image, 10, 10).unwrap();

        assert_eq!(fitted.dimensions(), (10, 10));
        assert_eq!(*fitted.get_pixel(5, 5), Rgba([255, 255, 255, 255]));
    }

    // Tests empty inputs and empty requested sizes are rejected
    // Verified by removing the dimension checks
    #[test]
    fn test_cover_fit_rejects_empty() {
        let image = RgbaImage::new(4, 4);
        assert!(matches!(
            cover_fit(&image, 0, 4),
            Err(MorphError::InvalidDimensions { .. })
        ));
        assert!(cover_fit(&RgbaImage::new(0, 0), 4, 4).is_err());
    }

    // Tests saved PNGs load back with identical pixels
    // Verified by saving in a lossy format
    #[test]
    fn test_save_and_load_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("out.png");
        let image = RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 40, y as u8 * 90, 5, 128]));

        save_png(&image, &path).unwrap();
        assert_eq!(load_rgba(&path).unwrap(), image);
    }

    // Tests missing files report the failing path
    // Verified by returning a generic error
    #[test]
    fn test_load_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing.png");

        match load_rgba(&path) {
            Err(MorphError::ImageLoad { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected ImageLoad error, got {other:?}"),
        }
    }
}
