//! Output encoding for validated sprites.
//!
//! PNG images (with nearest-neighbour upscaling) and sprite JSON.

mod json;
mod png;

pub use json::{sprite_to_json, write_sprite_json};
pub use png::{scale_pixels, sprite_to_image, write_png};
