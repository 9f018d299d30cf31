//! Validate command: repair and govern a raw sprite JSON file.

use std::path::PathBuf;

use clap::Args;

use crate::discovery::{load_manifest, load_palette, load_raw_sprite};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::render::{sprite_to_json, write_sprite_json};
use crate::validation::{validate_sprite_with, ValidationResult};

/// Validate a raw sprite JSON file
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Raw sprite JSON ({ width, height, pixels, palette })
    #[arg(required = true)]
    pub file: PathBuf,

    /// Locked palette: builtin name or palette file
    #[arg(long)]
    pub palette: Option<String>,

    /// Colour budget for auto-quantized palettes
    #[arg(long)]
    pub max_colors: Option<usize>,

    /// Write the validated sprite here instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Path to a pxgov.yaml manifest
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: ValidateArgs, printer: &Printer) -> Result<()> {
    let manifest = load_manifest(args.config.as_deref())?;
    let mut options = manifest.quantize_options();
    if let Some(max) = args.max_colors {
        options.max_colors = max;
    }

    let palette_spec = args.palette.as_ref().or(manifest.palette.as_ref());
    let locked = palette_spec.map(|s| load_palette(s)).transpose()?;

    let raw = load_raw_sprite(&args.file)?;
    let mut result = ValidationResult::new();
    let sprite = validate_sprite_with(raw, locked.as_ref(), &options, &mut result);

    for diagnostic in result.iter() {
        printer.diagnostic(diagnostic);
    }

    match &args.output {
        Some(path) => {
            write_sprite_json(&sprite, path)?;
            printer.success(
                "Validated",
                &format!(
                    "{} -> {} ({})",
                    display_path(&args.file),
                    display_path(path),
                    plural(result.warning_count(), "warning", "warnings")
                ),
            );
        }
        None => println!("{}", sprite_to_json(&sprite)?),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use crate::types::Sprite;

    #[test]
    fn test_validate_writes_repaired_sprite() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.json");
        let output = dir.path().join("out.json");
        let config = dir.path().join("pxgov.yaml");
        fs::write(&config, "").unwrap();
        fs::write(
            &input,
            r##"{"width": 2, "height": 2, "pixels": ["#FFF"], "palette": []}"##,
        )
        .unwrap();

        let args = ValidateArgs {
            file: input,
            palette: None,
            max_colors: None,
            output: Some(output.clone()),
            config: Some(config),
        };
        run(args, &Printer::new()).unwrap();

        let sprite: Sprite = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(sprite.pixels.len(), 4);
        assert_eq!(sprite.opaque_count(), 1);
        assert_eq!(sprite.palette.len(), 1);
    }

    #[test]
    fn test_validate_missing_file() {
        let args = ValidateArgs {
            file: PathBuf::from("/nonexistent/raw.json"),
            palette: None,
            max_colors: None,
            output: None,
            config: None,
        };
        assert!(run(args, &Printer::new()).is_err());
    }
}
