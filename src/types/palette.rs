//! Ordered palettes and the builtin retro palette catalog.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::Colour;

/// An ordered set of unique colours.
///
/// Order carries priority (after quantization the first entries are the
/// most frequent), but membership alone decides what snapping may produce.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    /// Create an empty palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from colours, keeping the first occurrence of each.
    pub fn from_colours(colours: impl IntoIterator<Item = Colour>) -> Self {
        let mut palette = Self::new();
        for colour in colours {
            palette.push(colour);
        }
        palette
    }

    /// Append a colour. Returns false if it was already present.
    pub fn push(&mut self, colour: Colour) -> bool {
        if self.contains(colour) {
            return false;
        }
        self.colours.push(colour);
        true
    }

    pub fn contains(&self, colour: Colour) -> bool {
        self.colours.contains(&colour)
    }

    pub fn len(&self) -> usize {
        self.colours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Colour> + '_ {
        self.colours.iter().copied()
    }

    pub fn as_slice(&self) -> &[Colour] {
        &self.colours
    }

    /// Look up a builtin palette by name (case-insensitive).
    pub fn builtin(name: &str) -> Option<Self> {
        let colours: &[Colour] = match name.to_ascii_lowercase().as_str() {
            "pico8" | "pico-8" => &PICO8[..],
            "gameboy" | "gb" => &GAMEBOY[..],
            "c64" => &C64[..],
            "cga" => &CGA[..],
            _ => return None,
        };
        Some(Self::from_colours(colours.iter().copied()))
    }

    /// Names of all builtin palettes.
    pub fn builtin_names() -> &'static [&'static str] {
        &["pico8", "gameboy", "c64", "cga"]
    }
}

impl FromIterator<Colour> for Palette {
    fn from_iter<I: IntoIterator<Item = Colour>>(iter: I) -> Self {
        Self::from_colours(iter)
    }
}

impl<'a> IntoIterator for &'a Palette {
    type Item = &'a Colour;
    type IntoIter = std::slice::Iter<'a, Colour>;

    fn into_iter(self) -> Self::IntoIter {
        self.colours.iter()
    }
}

impl fmt::Display for Palette {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, colour) in self.colours.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", colour)?;
        }
        Ok(())
    }
}

impl<'de> Deserialize<'de> for Palette {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Duplicates in a claimed palette are dropped rather than rejected.
        let colours = Vec::<Colour>::deserialize(deserializer)?;
        let mut seen = HashSet::with_capacity(colours.len());
        Ok(Self {
            colours: colours.into_iter().filter(|c| seen.insert(*c)).collect(),
        })
    }
}

/// The standard PICO-8 16-colour palette.
pub const PICO8: [Colour; 16] = [
    Colour::rgb(0, 0, 0),       // 0  black
    Colour::rgb(29, 43, 83),    // 1  dark blue
    Colour::rgb(126, 37, 83),   // 2  dark purple
    Colour::rgb(0, 135, 81),    // 3  dark green
    Colour::rgb(171, 82, 54),   // 4  brown
    Colour::rgb(95, 87, 79),    // 5  dark grey
    Colour::rgb(194, 195, 199), // 6  light grey
    Colour::rgb(255, 241, 232), // 7  white
    Colour::rgb(255, 0, 77),    // 8  red
    Colour::rgb(255, 163, 0),   // 9  orange
    Colour::rgb(255, 236, 39),  // 10 yellow
    Colour::rgb(0, 228, 54),    // 11 green
    Colour::rgb(41, 173, 255),  // 12 blue
    Colour::rgb(131, 118, 156), // 13 indigo
    Colour::rgb(255, 119, 168), // 14 pink
    Colour::rgb(255, 204, 170), // 15 peach
];

/// Original Game Boy DMG greens, darkest first.
pub const GAMEBOY: [Colour; 4] = [
    Colour::rgb(0x0F, 0x38, 0x0F),
    Colour::rgb(0x30, 0x62, 0x30),
    Colour::rgb(0x8B, 0xAC, 0x0F),
    Colour::rgb(0x9B, 0xBC, 0x0F),
];

/// Commodore 64 (Pepto) palette.
pub const C64: [Colour; 16] = [
    Colour::rgb(0x00, 0x00, 0x00), // black
    Colour::rgb(0xFF, 0xFF, 0xFF), // white
    Colour::rgb(0x68, 0x37, 0x2B), // red
    Colour::rgb(0x70, 0xA4, 0xB2), // cyan
    Colour::rgb(0x6F, 0x3D, 0x86), // purple
    Colour::rgb(0x58, 0x8D, 0x43), // green
    Colour::rgb(0x35, 0x28, 0x79), // blue
    Colour::rgb(0xB8, 0xC7, 0x6F), // yellow
    Colour::rgb(0x6F, 0x4F, 0x25), // orange
    Colour::rgb(0x43, 0x39, 0x00), // brown
    Colour::rgb(0x9A, 0x67, 0x59), // light red
    Colour::rgb(0x44, 0x44, 0x44), // dark grey
    Colour::rgb(0x6C, 0x6C, 0x6C), // grey
    Colour::rgb(0x9A, 0xD2, 0x84), // light green
    Colour::rgb(0x6C, 0x5E, 0xB5), // light blue
    Colour::rgb(0x95, 0x95, 0x95), // light grey
];

/// IBM CGA 16-colour palette.
pub const CGA: [Colour; 16] = [
    Colour::rgb(0x00, 0x00, 0x00),
    Colour::rgb(0x00, 0x00, 0xAA),
    Colour::rgb(0x00, 0xAA, 0x00),
    Colour::rgb(0x00, 0xAA, 0xAA),
    Colour::rgb(0xAA, 0x00, 0x00),
    Colour::rgb(0xAA, 0x00, 0xAA),
    Colour::rgb(0xAA, 0x55, 0x00),
    Colour::rgb(0xAA, 0xAA, 0xAA),
    Colour::rgb(0x55, 0x55, 0x55),
    Colour::rgb(0x55, 0x55, 0xFF),
    Colour::rgb(0x55, 0xFF, 0x55),
    Colour::rgb(0x55, 0xFF, 0xFF),
    Colour::rgb(0xFF, 0x55, 0x55),
    Colour::rgb(0xFF, 0x55, 0xFF),
    Colour::rgb(0xFF, 0xFF, 0x55),
    Colour::rgb(0xFF, 0xFF, 0xFF),
];
