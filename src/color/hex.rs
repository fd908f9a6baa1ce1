//! Textual `#RRGGBB` color codes
//!
//! Parsing never fails: anything that is not exactly `#` followed by six hex
//! digits maps to black.

use core::fmt::Write;

use heapless::String;

use super::{BLACK, Rgb};

/// Formatted `#RRGGBB` color code
pub type HexColor = String<7>;

/// Create an RGB color from a u32 value (0xRRGGBB format)
pub const fn rgb_from_u32(color: u32) -> Rgb {
    Rgb {
        r: ((color >> 16) & 0xFF) as u8,
        g: ((color >> 8) & 0xFF) as u8,
        b: (color & 0xFF) as u8,
    }
}

/// Parse a `#RRGGBB` color code (hex digits are case-insensitive)
///
/// Returns black for any other input, including strings of the right
/// length with non-hex digits.
pub fn parse_hex_color(text: &str) -> Rgb {
    let bytes = text.as_bytes();
    if bytes.len() != 7 || bytes[0] != b'#' {
        return BLACK;
    }
    if !bytes[1..].iter().all(u8::is_ascii_hexdigit) {
        return BLACK;
    }
    // All bytes are ASCII here, so the slice is on a char boundary
    match u32::from_str_radix(&text[1..], 16) {
        Ok(value) => rgb_from_u32(value),
        Err(_) => BLACK,
    }
}

/// Format a color as an uppercase `#RRGGBB` code
pub fn format_hex_color(color: Rgb) -> HexColor {
    let mut out = HexColor::new();
    // Seven characters always fit
    let _ = write!(out, "#{:02X}{:02X}{:02X}", color.r, color.g, color.b);
    out
}
