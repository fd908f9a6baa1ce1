//! Output filters applied to resolved colors before they reach the strip

use embassy_time::Instant;

use crate::color::Rgb;

mod brightness;

pub use brightness::BrightnessFilter;

/// Whole-frame color transform
pub trait Filter {
    /// Apply the filter to a frame in place
    fn apply(&mut self, frame: &mut [Rgb]);

    fn tick(&mut self, _now: Instant) {}
}
