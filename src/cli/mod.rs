pub mod completions;
pub mod palette;
pub mod palettes;
pub mod process;
pub mod validate;

use clap::{Parser, Subcommand};

use crate::error::{GovError, Result};

/// pxgov - Palette governance for generated pixel art
#[derive(Parser, Debug)]
#[command(name = "pxgov")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Remove backgrounds, quantize, and snap images to a palette
    Process(process::ProcessArgs),

    /// Print the quantized palette of an image
    Palette(palette::PaletteArgs),

    /// Validate a raw sprite JSON file
    Validate(validate::ValidateArgs),

    /// List builtin palettes
    Palettes,

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Parse a "WxH" dimension string into (width, height).
pub fn parse_dimensions(s: &str) -> Result<(u32, u32)> {
    let parts: Vec<&str> = s.splitn(2, |c| c == 'x' || c == 'X').collect();
    if parts.len() != 2 {
        return Err(GovError::Parse {
            message: format!("Invalid dimensions '{}': expected WxH (e.g. 64x64)", s),
            help: Some("Use the format WxH, for example: 32x32, 64x48".to_string()),
        });
    }

    let w: u32 = parts[0].parse().map_err(|_| GovError::Parse {
        message: format!("Invalid width '{}' in dimensions '{}'", parts[0], s),
        help: Some("Width must be a positive integer".to_string()),
    })?;

    let h: u32 = parts[1].parse().map_err(|_| GovError::Parse {
        message: format!("Invalid height '{}' in dimensions '{}'", parts[1], s),
        help: Some("Height must be a positive integer".to_string()),
    })?;

    if w == 0 || h == 0 {
        return Err(GovError::Parse {
            message: format!("Dimensions must be non-zero, got {}x{}", w, h),
            help: Some("Both width and height must be at least 1".to_string()),
        });
    }

    Ok((w, h))
}
