//! Image decode, cover-fit resizing and PNG export

use crate::io::error::{MorphError, Result, check_dimensions};
use image::RgbaImage;
use image::imageops::{self, FilterType};
use std::path::Path;

/// Decode any supported image format into straight RGBA
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_rgba(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path).map_err(|e| MorphError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(img.to_rgba8())
}

/// Scale to cover `width x height`, then crop the centered overflow
///
/// # Errors
///
/// Returns `InvalidDimensions` if the image or the requested size is empty
pub fn cover_fit(image: &RgbaImage, width: u32, height: u32) -> Result<RgbaImage> {
    check_dimensions(image.width(), image.height())?;
    check_dimensions(width, height)?;

    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    let scale = (f64::from(width) / f64::from(image.width()))
        .max(f64::from(height) / f64::from(image.height()));
    let scaled_width = (f64::from(image.width()) * scale).ceil().max(f64::from(width)) as u32;
    let scaled_height = (f64::from(image.height()) * scale)
        .ceil()
        .max(f64::from(height)) as u32;

    let scaled = imageops::resize(image, scaled_width, scaled_height, FilterType::Triangle);
    let left = (scaled_width - width) / 2;
    let top = (scaled_height - height) / 2;

    Ok(imageops::crop_imm(&scaled, left, top, width, height).to_image())
}

/// Encode an image as PNG, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_png(image: &RgbaImage, output_path: &Path) -> Result<()> {
    if let Some(parent) = output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| MorphError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|e| MorphError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })
}
