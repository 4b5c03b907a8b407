// src/models/color.rs
//
// Turns the color strings handed to a surface into RGBA pixels.
// Accepts #rgb, #rgba, #rrggbb, #rrggbbaa and a set of CSS color names.

use nannou::image::Rgba;
use regex::Regex;
use std::sync::OnceLock;

static HEX_COLOR: OnceLock<Regex> = OnceLock::new();

const NAMED_COLORS: &[(&str, [u8; 4])] = &[
    ("black", [0, 0, 0, 255]),
    ("silver", [192, 192, 192, 255]),
    ("gray", [128, 128, 128, 255]),
    ("grey", [128, 128, 128, 255]),
    ("white", [255, 255, 255, 255]),
    ("maroon", [128, 0, 0, 255]),
    ("red", [255, 0, 0, 255]),
    ("purple", [128, 0, 128, 255]),
    ("fuchsia", [255, 0, 255, 255]),
    ("magenta", [255, 0, 255, 255]),
    ("green", [0, 128, 0, 255]),
    ("lime", [0, 255, 0, 255]),
    ("olive", [128, 128, 0, 255]),
    ("yellow", [255, 255, 0, 255]),
    ("navy", [0, 0, 128, 255]),
    ("blue", [0, 0, 255, 255]),
    ("teal", [0, 128, 128, 255]),
    ("aqua", [0, 255, 255, 255]),
    ("cyan", [0, 255, 255, 255]),
    ("orange", [255, 165, 0, 255]),
    ("pink", [255, 192, 203, 255]),
    ("brown", [165, 42, 42, 255]),
    ("gold", [255, 215, 0, 255]),
    ("indigo", [75, 0, 130, 255]),
    ("violet", [238, 130, 238, 255]),
    ("steelblue", [70, 130, 180, 255]),
    ("dodgerblue", [30, 144, 255, 255]),
    ("crimson", [220, 20, 60, 255]),
    ("coral", [255, 127, 80, 255]),
    ("salmon", [250, 128, 114, 255]),
    ("khaki", [240, 230, 140, 255]),
    ("turquoise", [64, 224, 208, 255]),
    ("transparent", [0, 0, 0, 0]),
];

/// Parses a hex code or color name. Returns `None` for anything unrecognised,
/// which surfaces treat as "keep the current color".
pub fn parse_color(color: &str) -> Option<Rgba<u8>> {
    let color = color.trim();
    if color.starts_with('#') {
        return parse_hex(color);
    }

    let lower = color.to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(name, _)| *name == lower)
        .map(|(_, rgba)| Rgba(*rgba))
}

fn parse_hex(color: &str) -> Option<Rgba<u8>> {
    let re = HEX_COLOR.get_or_init(|| {
        Regex::new(r"^#([0-9a-fA-F]{3,4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
            .expect("hex color pattern is valid")
    });
    let caps = re.captures(color)?;
    let digits = &caps[1];

    let channels: Vec<u8> = match digits.len() {
        // short form, each nibble is doubled: #f80 == #ff8800
        3 | 4 => digits
            .chars()
            .map(|c| c.to_digit(16).map(|n| (n * 17) as u8))
            .collect::<Option<Vec<u8>>>()?,
        _ => (0..digits.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect::<Option<Vec<u8>>>()?,
    };

    let alpha = channels.get(3).copied().unwrap_or(255);
    Some(Rgba([channels[0], channels[1], channels[2], alpha]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_hex() {
        assert_eq!(parse_color("#1e90ff"), Some(Rgba([30, 144, 255, 255])));
        assert_eq!(parse_color("#FF000080"), Some(Rgba([255, 0, 0, 128])));
    }

    #[test]
    fn test_parse_short_hex() {
        assert_eq!(parse_color("#f80"), Some(Rgba([255, 136, 0, 255])));
        assert_eq!(parse_color("#0000"), Some(Rgba([0, 0, 0, 0])));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(parse_color("red"), Some(Rgba([255, 0, 0, 255])));
        assert_eq!(parse_color("  SteelBlue "), Some(Rgba([70, 130, 180, 255])));
    }

    #[test]
    fn test_invalid_colors() {
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#gggggg"), None);
        assert_eq!(parse_color("not-a-color"), None);
        assert_eq!(parse_color(""), None);
    }
}
