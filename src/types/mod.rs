//! Core domain types for pxgov.
//!
//! - `Colour` / `Pixel` - RGB values and the transparent sentinel
//! - `Palette` - Ordered unique colour sets, plus builtin retro palettes
//! - `ParsedMask` - Segmentation masks at native resolution
//! - `RawSprite` / `Sprite` - Pipeline input and validated output

mod colour;
mod mask;
mod palette;
mod sprite;

pub use colour::{Colour, Pixel};
pub use mask::ParsedMask;
pub use palette::{Palette, C64, CGA, GAMEBOY, PICO8};
pub use sprite::{RawSprite, Sprite};
