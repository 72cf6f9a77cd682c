/*
 *  display/color.rs
 *
 *  HeapLogViewer - worth the squeeze
 *  (c) 2020-26 Stuart Hunter
 *
 *  Hex color parsing and the allocator palette
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// Default box colors, one per allocator, wrapping around
pub const DEFAULT_PALETTE: [Rgb888; 6] = [
    Rgb888::new(0x08, 0x3D, 0x77), // navy
    Rgb888::new(0xEE, 0x96, 0x4B), // orange
    Rgb888::new(0x2A, 0x9D, 0x8F), // teal
    Rgb888::new(0xDA, 0x41, 0x67), // raspberry
    Rgb888::new(0x6A, 0x4C, 0x93), // purple
    Rgb888::new(0x8A, 0xC9, 0x26), // lime
];

/// Parse a CSS style `#RRGGBB` or `#RGB` color.
pub fn parse_hex_color(text: &str) -> Option<Rgb888> {
    let hex = text.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let v = u32::from_str_radix(hex, 16).ok()?;
            Some(Rgb888::new((v >> 16) as u8, (v >> 8) as u8, v as u8))
        }
        3 => {
            let v = u16::from_str_radix(hex, 16).ok()?;
            // #abc is shorthand for #aabbcc
            let expand = |n: u16| ((n & 0xF) as u8) * 0x11;
            Some(Rgb888::new(expand(v >> 8), expand(v >> 4), expand(v)))
        }
        _ => None,
    }
}

/// Format as `#RRGGBB`
pub fn to_hex(color: Rgb888) -> String {
    format!("#{:02X}{:02X}{:02X}", color.r(), color.g(), color.b())
}

/// Colors assigned to allocators by index
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb888>,
}

impl Default for Palette {
    fn default() -> Self {
        Self { colors: DEFAULT_PALETTE.to_vec() }
    }
}

impl Palette {
    /// Build from hex strings. Returns the first entry that does not parse.
    ///
    /// An empty list falls back to the default palette.
    pub fn from_hex<S: AsRef<str>>(entries: &[S]) -> Result<Self, String> {
        if entries.is_empty() {
            return Ok(Self::default());
        }
        let colors = entries
            .iter()
            .map(|e| parse_hex_color(e.as_ref()).ok_or_else(|| e.as_ref().to_string()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { colors })
    }

    /// Color for `allocator`, wrapping around the palette
    pub fn for_allocator(&self, allocator: u32) -> Rgb888 {
        self.colors[allocator as usize % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        assert_eq!(parse_hex_color("#F9DC5C"), Some(Rgb888::new(0xF9, 0xDC, 0x5C)));
        assert_eq!(parse_hex_color("#000000"), Some(Rgb888::BLACK));
        assert_eq!(parse_hex_color(" #ffffff "), Some(Rgb888::WHITE));
    }

    #[test]
    fn test_parse_short_form() {
        assert_eq!(parse_hex_color("#f00"), Some(Rgb888::RED));
        assert_eq!(parse_hex_color("#1a2"), Some(Rgb888::new(0x11, 0xAA, 0x22)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_hex_color("F9DC5C"), None);
        assert_eq!(parse_hex_color("#F9DC5"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
        assert_eq!(parse_hex_color("#+12345"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(to_hex(Rgb888::new(0xF9, 0xDC, 0x5C)), "#F9DC5C");
    }

    #[test]
    fn test_palette_wraps() {
        let palette = Palette::from_hex(&["#ff0000", "#00ff00"]).unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.for_allocator(0), Rgb888::RED);
        assert_eq!(palette.for_allocator(1), Rgb888::GREEN);
        assert_eq!(palette.for_allocator(2), Rgb888::RED);
    }

    #[test]
    fn test_palette_reports_bad_entry() {
        assert_eq!(Palette::from_hex(&["#ff0000", "teal"]), Err("teal".to_string()));
        let empty: [&str; 0] = [];
        assert_eq!(Palette::from_hex(&empty).unwrap(), Palette::default());
    }
}
