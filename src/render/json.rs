//! Sprite JSON output.
//!
//! The shape is `{ "width", "height", "pixels": [...], "palette": [...] }`
//! with pixels as `#RRGGBB` or `"transparent"`.

use std::fs;
use std::path::Path;

use crate::error::{GovError, Result};
use crate::types::Sprite;

/// Serialize a sprite as pretty-printed JSON.
pub fn sprite_to_json(sprite: &Sprite) -> Result<String> {
    serde_json::to_string_pretty(sprite).map_err(|e| GovError::Output {
        message: format!("Failed to serialize sprite: {}", e),
        help: None,
    })
}

/// Write a sprite as JSON.
pub fn write_sprite_json(sprite: &Sprite, path: &Path) -> Result<()> {
    let json = sprite_to_json(sprite)?;
    fs::write(path, json).map_err(|e| GovError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write sprite JSON: {}", e),
    })?;
    Ok(())
}
