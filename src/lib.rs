//! Brightness-rank pixel remapping
//!
//! Every sampled source pixel is paired with a target position of equal
//! brightness rank. The resulting correspondence is either rendered once as a
//! mosaic or played back as a particle animation that holds, scatters and then
//! converges exactly onto the target layout.

#![forbid(unsafe_code)]

/// Phase-driven particle convergence animation
pub mod animation;
/// Input/output, configuration and error handling
pub mod io;
/// Brightness-rank correspondence between sample sets
pub mod mapping;
/// End-to-end orchestration of sampling, mapping and rendering
pub mod pipeline;
/// Mosaic rasterisation and animation frame drawing
pub mod render;
/// Sample extraction from raw RGBA rasters
pub mod sampling;

pub use io::error::{MorphError, Result};
