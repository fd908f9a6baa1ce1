//! Global brightness
//!
//! Brightness is configured as a float in 0.0-1.0 and applied as a fade
//! toward black of `(1 - brightness) * 255` steps.

use super::Filter;
use crate::{color::Rgb, math8::scale8};

/// Brightness scaling shared by every LED write
#[derive(Debug, Clone, Copy)]
pub struct BrightnessFilter {
    brightness: f32,
    /// Fade-to-black amount derived from `brightness`
    fade: u8,
}

impl BrightnessFilter {
    /// Create a new brightness filter
    ///
    /// The value is clamped to 0.0-1.0, NaN counts as 0.0.
    pub fn new(brightness: f32) -> Self {
        let brightness = if brightness.is_nan() {
            0.0
        } else {
            brightness.clamp(0.0, 1.0)
        };
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let fade = ((1.0 - brightness) * 255.0) as u8;
        Self { brightness, fade }
    }

    /// Configured brightness (0.0-1.0)
    pub const fn brightness(&self) -> f32 {
        self.brightness
    }

    /// Number of steps the color is faded toward black
    pub const fn fade(&self) -> u8 {
        self.fade
    }

    /// Scale a color toward black
    pub const fn scale(&self, color: Rgb) -> Rgb {
        let scale = 255 - self.fade;
        Rgb {
            r: scale8(color.r, scale),
            g: scale8(color.g, scale),
            b: scale8(color.b, scale),
        }
    }
}

impl Filter for BrightnessFilter {
    fn apply(&mut self, frame: &mut [Rgb]) {
        if self.fade == 0 {
            return;
        }
        for pixel in frame {
            *pixel = self.scale(*pixel);
        }
    }
}

impl Default for BrightnessFilter {
    fn default() -> Self {
        Self::new(1.0)
    }
}
