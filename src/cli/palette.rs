use std::path::PathBuf;

use clap::Args;

use crate::discovery::{load_manifest, load_pixels};
use crate::error::Result;
use crate::output::{display_path, plural, Printer};
use crate::quantize::quantize;
use crate::types::Palette;

/// Print the quantized palette of an image
#[derive(Args, Debug)]
pub struct PaletteArgs {
    /// Image to quantize
    #[arg(required = true)]
    pub file: PathBuf,

    /// Colour budget (default: max_colors from pxgov.yaml)
    #[arg(long)]
    pub max: Option<usize>,

    /// Path to a pxgov.yaml manifest
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: PaletteArgs, printer: &Printer) -> Result<()> {
    let manifest = load_manifest(args.config.as_deref())?;
    let mut options = manifest.quantize_options();
    if let Some(max) = args.max {
        options.max_colors = max;
    }

    let raw = load_pixels(&args.file, None)?;
    let palette = quantize(&raw.pixels, &options);

    printer.status(
        "Quantized",
        &format!(
            "{} from {}",
            plural(palette.len(), "colour", "colours"),
            display_path(&args.file)
        ),
    );

    print!("{}", format_palette(&palette));
    Ok(())
}

/// One `$colour-N: #RRGGBB` line per palette entry.
pub fn format_palette(palette: &Palette) -> String {
    palette
        .iter()
        .enumerate()
        .map(|(i, colour)| format!("$colour-{}: {}\n", i + 1, colour))
        .collect()
}
