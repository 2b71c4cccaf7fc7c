//! Software presentation surface for animation frames
//!
//! Draws [`RenderCommand`]s as filled squares with an optional alpha-blended
//! halo. Glow never affects simulation state; it only shapes the exported frame.

use crate::animation::engine::{Glow, RenderCommand};
use crate::io::error::{Result, check_dimensions};
use crate::sampling::pixel::Rgba;
use image::RgbaImage;

/// Owned RGBA frame that render commands are drawn onto
#[derive(Debug, Clone)]
pub struct FrameCanvas {
    image: RgbaImage,
    background: Rgba,
}

impl FrameCanvas {
    /// Create a canvas filled with `background`
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if either dimension is zero
    pub fn new(width: u32, height: u32, background: Rgba) -> Result<Self> {
        check_dimensions(width, height)?;
        Ok(Self {
            image: RgbaImage::from_pixel(width, height, image::Rgba(background)),
            background,
        })
    }

    /// Reset every pixel to the background color
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            pixel.0 = self.background;
        }
    }

    /// Clear, then draw all commands in order
    pub fn draw_frame(&mut self, commands: &[RenderCommand]) {
        self.clear();
        for command in commands {
            self.draw(command);
        }
    }

    /// Draw a single command: halo first, then the opaque square on top
    pub fn draw(&mut self, command: &RenderCommand) {
        if let Some(glow) = command.glow {
            self.draw_glow(command, glow);
        }
        let size = i64::from(command.size);
        self.fill_rect(
            command.x,
            command.y,
            command.x.saturating_add(size),
            command.y.saturating_add(size),
            |_| command.color,
        );
    }

    /// Borrow the frame for encoding
    pub const fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Color at `(x, y)`, or `None` outside the canvas
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.image.get_pixel_checked(x, y).map(|pixel| pixel.0)
    }

    fn draw_glow(&mut self, command: &RenderCommand, glow: Glow) {
        // Float to int casts saturate; the rectangle is clipped in fill_rect
        let reach = (glow.radius.ceil() as i64).max(0);
        let size = i64::from(command.size);
        let alpha = glow.intensity.clamp(0.0, 1.0) * f64::from(command.color[3]) / 255.0;
        let extent = size.saturating_add(reach);

        self.fill_rect(
            command.x.saturating_sub(reach),
            command.y.saturating_sub(reach),
            command.x.saturating_add(extent),
            command.y.saturating_add(extent),
            |under| blend(under, command.color, alpha),
        );
    }

    // Half-open rectangle clipped to the canvas
    fn fill_rect(
        &mut self,
        x0: i64,
        y0: i64,
        x1: i64,
        y1: i64,
        mut shade: impl FnMut(Rgba) -> Rgba,
    ) {
        let width = i64::from(self.image.width());
        let height = i64::from(self.image.height());

        for y in y0.max(0)..y1.min(height) {
            for x in x0.max(0)..x1.min(width) {
                if let Some(pixel) = self.image.get_pixel_mut_checked(x as u32, y as u32) {
                    pixel.0 = shade(pixel.0);
                }
            }
        }
    }
}

fn blend(under: Rgba, over: Rgba, alpha: f64) -> Rgba {
    let mix = |a: u8, b: u8| {
        alpha
            .mul_add(f64::from(b) - f64::from(a), f64::from(a))
            .round()
            .clamp(0.0, 255.0) as u8
    };
    [
        mix(under[0], over[0]),
        mix(under[1], over[1]),
        mix(under[2], over[2]),
        mix(under[3], 255),
    ]
}
