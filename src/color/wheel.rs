//! Hue wheel conversion
//!
//! Eight 32-step sectors with linear ramps between the primary and
//! secondary colors, followed by a quadratic desaturation and a value scale.
//! Everything is 8-bit fixed point.

use super::{Hsv, Rgb};
use crate::math8::{qadd8, scale8};

/// Convert a hue/saturation/value triple (all 0-255) to RGB
pub fn hsv_to_rgb(hue: u8, sat: u8, val: u8) -> Rgb {
    // Upper 3 bits select the sector, lower 5 bits position inside it
    let offset = (hue & 0x1F) << 3;
    let third = scale8(offset, 85);
    let two_thirds = scale8(offset, 170);

    let (r, g, b) = match hue >> 5 {
        0 => (255 - third, third, 0),
        1 => (171, 85 + third, 0),
        2 => (171 - two_thirds, 170 + third, 0),
        3 => (0, 255 - third, third),
        4 => (0, 171 - two_thirds, 85 + two_thirds),
        5 => (third, 0, 255 - third),
        6 => (85 + third, 0, 171 - third),
        _ => (170 + third, 0, 85 - third),
    };

    let desat = 255 - sat;
    let gray = scale8(desat, desat);
    let channel = |c: u8| scale8(qadd8(scale8(c, sat), gray), val);

    Rgb {
        r: channel(r),
        g: channel(g),
        b: channel(b),
    }
}

/// Convert an [`Hsv`] value with [`hsv_to_rgb`]
#[inline]
pub fn hsv2rgb(hsv: Hsv) -> Rgb {
    hsv_to_rgb(hsv.hue, hsv.sat, hsv.val)
}
