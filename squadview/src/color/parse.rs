use std::str::FromStr;
use std::sync::LazyLock;

use palette::Srgb;
use regex::Regex;

use crate::error::ColorError;

/// An 8-bit sRGB triple.
pub type Rgb = Srgb<u8>;

static RGB_FUNCTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\((\d+),\s*(\d+),\s*(\d+)\)$").expect("Invalid regex pattern")
});

/// Normalize `#RRGGBB`, `#RGB` (leading `#` optional) or `rgb(r, g, b)`.
pub fn parse_color(color: &str) -> Result<Rgb, ColorError> {
    let color = color.trim();
    if color.is_empty() {
        return Err(ColorError::Empty);
    }

    let hex = color.strip_prefix('#').unwrap_or(color);
    if matches!(hex.len(), 3 | 6) && hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Srgb::from_str(hex).map_err(|_| ColorError::Unrecognized(color.to_string()));
    }

    if let Some(caps) = RGB_FUNCTION.captures(hex) {
        let channel = |index: usize, name: &'static str| -> Result<u8, ColorError> {
            let value = &caps[index];
            value.parse::<u8>().map_err(|_| ColorError::ChannelOutOfRange {
                channel: name,
                value: value.to_string(),
            })
        };
        return Ok(Srgb::new(channel(1, "red")?, channel(2, "green")?, channel(3, "blue")?));
    }

    Err(ColorError::Unrecognized(color.to_string()))
}

/// Parse exactly six hex digits, with or without a leading `#`.
pub fn parse_hex6(color: &str) -> Result<Rgb, ColorError> {
    let hex = color.strip_prefix('#').unwrap_or(color);
    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(ColorError::Unrecognized(color.to_string()));
    }
    Srgb::from_str(hex).map_err(|_| ColorError::Unrecognized(color.to_string()))
}

/// Lowercase `#rrggbb`.
pub fn to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.red, rgb.green, rgb.blue)
}
