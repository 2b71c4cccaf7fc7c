//! Luminance weights for converting RGB channels into a single brightness key

use clap::ValueEnum;

/// Named sets of RGB luminance weights, each summing to 1
///
/// A single set is chosen per run and applied to both source and target
/// samples so that brightness ranks are comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LuminanceWeights {
    /// ITU-R BT.601 weights (0.299, 0.587, 0.114)
    #[default]
    Rec601,
    /// ITU-R BT.709 weights (0.2126, 0.7152, 0.0722)
    Rec709,
}

impl LuminanceWeights {
    /// Red, green and blue weights
    pub const fn coefficients(self) -> [f64; 3] {
        match self {
            Self::Rec601 => [0.299, 0.587, 0.114],
            Self::Rec709 => [0.2126, 0.7152, 0.0722],
        }
    }

    /// Brightness of a color on the 0-255 scale; alpha is ignored
    pub fn brightness(self, color: [u8; 4]) -> f64 {
        let [wr, wg, wb] = self.coefficients();
        let [r, g, b, _] = color;
        wb.mul_add(f64::from(b), wr.mul_add(f64::from(r), wg * f64::from(g)))
    }
}
