//! Rasterisation of correspondences and animation frames

/// Software presentation surface for animation render commands
pub mod canvas;
/// Mosaic tile rendering of a correspondence
pub mod mosaic;

pub use canvas::FrameCanvas;
pub use mosaic::{MosaicRenderer, OutputRaster};
