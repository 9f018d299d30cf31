//! Colour and pixel types, plus hex parsing.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{GovError, Result};

/// An opaque 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Colour {
    /// Create a colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Magenta (the default chroma key).
    pub const MAGENTA: Self = Self::rgb(255, 0, 255);

    /// Parse a hex colour string strictly.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RRGGBB` (6 digits)
    ///
    /// The leading `#` is optional and digits are case-insensitive.
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 => {
                // #RGB -> #RRGGBB
                let mut digits = [0u8; 3];
                for (slot, c) in digits.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b] = digits;
                Ok(Self::rgb(r << 4 | r, g << 4 | g, b << 4 | b))
            }
            6 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                Ok(Self::rgb(r, g, b))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Parse a hex colour string, falling back to black on malformed input.
    ///
    /// Accepts the same forms as [`Colour::from_hex`]: 3-digit `#RGB`
    /// shorthand is expanded (`#FFF` is white), not treated as malformed.
    pub fn from_hex_lossy(s: &str) -> Self {
        Self::from_hex(s).unwrap_or(Self::BLACK)
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        self.to_string()
    }

    /// Convert to an opaque RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }
}

impl FromStr for Colour {
    type Err = GovError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl Serialize for Colour {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Colour {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(Self::from_hex_lossy(&s))
    }
}

/// A single sprite pixel: either a colour or the `transparent` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Pixel {
    #[default]
    Transparent,
    Opaque(Colour),
}

impl Pixel {
    /// The text form of the transparent sentinel.
    pub const TRANSPARENT_TAG: &'static str = "transparent";

    /// Build a pixel from RGBA bytes. Only alpha 0 counts as transparent.
    pub fn from_rgba(rgba: [u8; 4]) -> Self {
        if rgba[3] == 0 {
            Pixel::Transparent
        } else {
            Pixel::Opaque(Colour::rgb(rgba[0], rgba[1], rgba[2]))
        }
    }

    /// Parse a pixel leniently: `transparent` or empty is transparent,
    /// anything else goes through [`Colour::from_hex_lossy`].
    pub fn parse_lossy(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case(Self::TRANSPARENT_TAG) {
            Pixel::Transparent
        } else {
            Pixel::Opaque(Colour::from_hex_lossy(s))
        }
    }

    /// The colour, if this pixel is opaque.
    pub fn colour(self) -> Option<Colour> {
        match self {
            Pixel::Transparent => None,
            Pixel::Opaque(c) => Some(c),
        }
    }

    pub fn is_transparent(self) -> bool {
        matches!(self, Pixel::Transparent)
    }

    /// RGBA bytes for encoding; transparent maps to all zeros.
    pub fn to_rgba(self) -> [u8; 4] {
        match self {
            Pixel::Transparent => [0, 0, 0, 0],
            Pixel::Opaque(c) => c.to_rgba(),
        }
    }
}

impl From<Colour> for Pixel {
    fn from(colour: Colour) -> Self {
        Pixel::Opaque(colour)
    }
}

impl fmt::Display for Pixel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pixel::Transparent => f.write_str(Self::TRANSPARENT_TAG),
            Pixel::Opaque(c) => c.fmt(f),
        }
    }
}

impl Serialize for Pixel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Pixel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        // Missing colours arrive as null from some producers.
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.map_or(Pixel::Transparent, |s| Pixel::parse_lossy(&s)))
    }
}

fn invalid_hex(s: &str) -> GovError {
    GovError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB or #RRGGBB format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| GovError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| GovError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}
