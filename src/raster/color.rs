//! RGB color triple used as the background reference

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use lazy_static::lazy_static;
use regex::Regex;

use crate::errors::{SpriteError, SpriteResult};

lazy_static! {
    // "#ABD4E6" or "ABD4E6"
    static ref HEX_COLOR: Regex =
        Regex::new(r"^#?([0-9a-fA-F]{2})([0-9a-fA-F]{2})([0-9a-fA-F]{2})$")
            .expect("hex color pattern is valid");
}

/// An 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Color channels of an RGBA pixel, alpha dropped
    pub fn from_pixel(pixel: &Rgba<u8>) -> Self {
        Rgb::new(pixel[0], pixel[1], pixel[2])
    }

    /// Parse a color from a hex string (format: "#RRGGBB" or "RRGGBB")
    ///
    /// # Arguments
    /// * `hex` - Hex string, case insensitive
    ///
    /// # Returns
    /// The parsed color or an `InvalidInput` error
    pub fn from_hex(hex: &str) -> SpriteResult<Self> {
        let caps = HEX_COLOR.captures(hex.trim()).ok_or_else(|| {
            SpriteError::InvalidInput(format!("Invalid hex color '{}'. Expected '#RRGGBB'", hex))
        })?;

        let channel = |i: usize| -> SpriteResult<u8> {
            u8::from_str_radix(&caps[i], 16)
                .map_err(|e| SpriteError::InvalidInput(format!("Invalid hex channel '{}': {}", &caps[i], e)))
        };

        Ok(Rgb::new(channel(1)?, channel(2)?, channel(3)?))
    }

    /// Format as a lowercase "#rrggbb" string
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Largest per-channel absolute difference to another color
    pub fn max_channel_distance(&self, other: &Rgb) -> u8 {
        self.r.abs_diff(other.r)
            .max(self.g.abs_diff(other.g))
            .max(self.b.abs_diff(other.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RGB({}, {}, {})", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = SpriteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Rgb::from_hex(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_with_and_without_hash() {
        assert_eq!(Rgb::from_hex("#ABD4E6").unwrap(), Rgb::new(171, 212, 230));
        assert_eq!(Rgb::from_hex("abd4e6").unwrap(), Rgb::new(171, 212, 230));
        assert_eq!("  #ff0000 ".parse::<Rgb>().unwrap(), Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(Rgb::from_hex("#ABD4E").is_err());
        assert!(Rgb::from_hex("#GGGGGG").is_err());
        assert!(Rgb::from_hex("").is_err());
    }

    #[test]
    fn test_hex_formatting() {
        assert_eq!(Rgb::new(171, 212, 230).to_hex(), "#abd4e6");
        assert_eq!(Rgb::new(171, 212, 230).to_string(), "RGB(171, 212, 230)");
    }

    #[test]
    fn test_max_channel_distance() {
        let bg = Rgb::new(171, 212, 230);
        assert_eq!(bg.max_channel_distance(&bg), 0);
        assert_eq!(bg.max_channel_distance(&Rgb::new(181, 210, 230)), 10);
        assert_eq!(bg.max_channel_distance(&Rgb::new(0, 0, 0)), 230);
    }
}
