//! Error types for sampling, mapping, rendering and animation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all morph operations
#[derive(Debug)]
pub enum MorphError {
    /// A raster has a zero width or height
    InvalidDimensions {
        /// Width that was supplied
        width: u32,
        /// Height that was supplied
        height: u32,
    },

    /// Raw pixel buffer length does not match `width * height * 4`
    BufferSizeMismatch {
        /// Length implied by the dimensions
        expected: usize,
        /// Length actually supplied
        actual: usize,
    },

    /// A sample set ended up with no entries
    ///
    /// Occurs when:
    /// - Every target sample falls below the alpha threshold
    /// - A source or target set handed to the mapper is empty
    EmptySampleSet {
        /// Which set was empty (`"source"` or `"target"`)
        set: &'static str,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An animation tick arrived with less elapsed time than its predecessor
    OutOfOrderTick {
        /// Elapsed time of the last accepted tick
        previous_ms: f64,
        /// Elapsed time of the rejected tick
        received_ms: f64,
    },

    /// Failed to load an image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for MorphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid raster dimensions {width}x{height}: width and height must be positive"
                )
            }
            Self::BufferSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "Pixel buffer holds {actual} bytes but the dimensions require {expected}"
                )
            }
            Self::EmptySampleSet { set } => {
                write!(f, "The {set} sample set is empty")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::OutOfOrderTick {
                previous_ms,
                received_ms,
            } => {
                write!(
                    f,
                    "Tick at {received_ms}ms arrived after a tick at {previous_ms}ms"
                )
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MorphError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for morph results
pub type Result<T> = std::result::Result<T, MorphError>;

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MorphError {
    MorphError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Check that both raster dimensions are positive
///
/// # Errors
///
/// Returns `InvalidDimensions` if either dimension is zero
pub const fn check_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        Err(MorphError::InvalidDimensions { width, height })
    } else {
        Ok(())
    }
}
