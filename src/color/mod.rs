mod hex;
mod wheel;

use smart_leds::{RGB8, hsv::Hsv as HSV};

pub use hex::{HexColor, format_hex_color, parse_hex_color, rgb_from_u32};
pub use wheel::{hsv_to_rgb, hsv2rgb};

pub type Rgb = RGB8;
pub type Hsv = HSV;

/// Fully dark pixel
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
/// Full intensity white
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
/// Pure red
pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
/// Pure blue
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
