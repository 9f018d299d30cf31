//! Process command implementation.
//!
//! Decodes images, removes backgrounds, governs the palette, and writes
//! PNG (and optionally JSON) sprites.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{
    load_manifest, load_mask, load_palette, load_pixels, scan_inputs, InputJob, Manifest,
};
use crate::error::{GovError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{govern_with, PipelineOptions};
use crate::render::{write_png, write_sprite_json};
use crate::types::{ParsedMask, Sprite};
use crate::validation::{Diagnostic, Severity};

use super::parse_dimensions;

/// Remove backgrounds, quantize, and snap images to a palette
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Images or directories to process
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Segmentation mask for a single input (default: sibling NAME.mask.png)
    #[arg(long)]
    pub mask: Option<PathBuf>,

    /// Locked palette: builtin name or palette file
    #[arg(long)]
    pub palette: Option<String>,

    /// Colour budget for auto-quantized palettes
    #[arg(long)]
    pub max_colors: Option<usize>,

    /// Background key colour (e.g. #FF00FF)
    #[arg(long)]
    pub chroma: Option<String>,

    /// Background key tolerance (Euclidean RGB distance)
    #[arg(long)]
    pub tolerance: Option<f64>,

    /// Skip background removal
    #[arg(long, conflicts_with_all = ["chroma", "tolerance"])]
    pub no_chroma: bool,

    /// Resize inputs to WxH (nearest-neighbour) before processing
    #[arg(long)]
    pub size: Option<String>,

    /// Output directory
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Scale factor for PNG output (integer upscaling)
    #[arg(long)]
    pub scale: Option<u32>,

    /// Also write sprite JSON next to each PNG
    #[arg(long)]
    pub json: bool,

    /// Path to a pxgov.yaml manifest
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Show informational diagnostics
    #[arg(long, short)]
    pub verbose: bool,
}

/// Fold CLI overrides into the manifest.
fn apply_overrides(manifest: &mut Manifest, args: &ProcessArgs) {
    if let Some(max) = args.max_colors {
        manifest.max_colors = max;
    }
    if let Some(chroma) = &args.chroma {
        manifest.chroma_key = chroma.clone();
    }
    if let Some(tolerance) = args.tolerance {
        manifest.chroma_tolerance = Some(tolerance);
    }
    if let Some(palette) = &args.palette {
        manifest.palette = Some(palette.clone());
    }
    if let Some(output) = &args.output {
        manifest.output = output.clone();
    }
    if let Some(scale) = args.scale {
        manifest.scale = Some(scale);
    }
}

/// Build pipeline options from the (overridden) manifest.
pub fn pipeline_options(manifest: &Manifest, no_chroma: bool) -> Result<PipelineOptions> {
    let locked = manifest.palette.as_deref().map(load_palette).transpose()?;
    let chroma = if no_chroma {
        None
    } else {
        Some(manifest.chroma_key(locked.as_ref())?)
    };

    Ok(PipelineOptions {
        quantize: manifest.quantize_options(),
        chroma,
        locked,
    })
}

pub fn run(args: ProcessArgs, printer: &Printer) -> Result<()> {
    let mut manifest = load_manifest(args.config.as_deref())?;
    apply_overrides(&mut manifest, &args);

    let options = pipeline_options(&manifest, args.no_chroma)?;
    let size = args.size.as_deref().map(parse_dimensions).transpose()?;

    let mut scan = scan_inputs(&args.inputs, &manifest);

    if let Some(mask) = &args.mask {
        if scan.total() != 1 {
            return Err(GovError::Config {
                message: format!(
                    "--mask needs exactly one input image, found {}",
                    scan.total()
                ),
                help: Some("Name masks NAME.mask.png next to each image for batches".to_string()),
            });
        }
        scan.jobs[0].mask = Some(mask.clone());
    }

    if scan.is_empty() {
        printer.warning("Warning", "No input images found");
        return Ok(());
    }

    if let Some((first, second)) = scan.output_collision() {
        return Err(GovError::Output {
            message: format!(
                "{} and {} would both write {}",
                display_path(&first.image),
                display_path(&second.image),
                display_path(&first.output_path(&manifest.output, "png"))
            ),
            help: Some(
                "Rename one of the inputs, or pass their common directory instead".to_string(),
            ),
        });
    }

    printer.info(
        "Found",
        &format!(
            "{} ({} with masks)",
            plural(scan.total(), "image", "images"),
            scan.masked()
        ),
    );

    if let Some(palette) = &options.locked {
        printer.info(
            "Palette",
            &format!("locked to {}", plural(palette.len(), "colour", "colours")),
        );
    }

    let out_dir = &manifest.output;

    for job in &scan.jobs {
        let sprite = process_job(job, &manifest, &options, size, args.verbose, printer)?;

        let png_path = job.output_path(out_dir, "png");
        if let Some(parent) = png_path.parent() {
            create_dir(parent)?;
        }
        write_png(&sprite, &png_path, manifest.effective_scale())?;

        if args.json {
            write_sprite_json(&sprite, &job.output_path(out_dir, "json"))?;
        }

        printer.status(
            "Wrote",
            &format!(
                "{} {}",
                display_path(&png_path),
                printer.dim(&format!(
                    "({}, {} opaque)",
                    plural(sprite.palette.len(), "colour", "colours"),
                    plural(sprite.opaque_count(), "pixel", "pixels")
                ))
            ),
        );
    }

    printer.success(
        "Finished",
        &format!(
            "{} to {}",
            plural(scan.total(), "sprite", "sprites"),
            display_path(out_dir)
        ),
    );

    Ok(())
}

fn create_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() || dir.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| GovError::Io {
        path: dir.to_path_buf(),
        message: format!("Failed to create output directory: {}", e),
    })
}

/// Decode one input and run it through the pipeline.
fn process_job(
    job: &InputJob,
    manifest: &Manifest,
    options: &PipelineOptions,
    size: Option<(u32, u32)>,
    verbose: bool,
    printer: &Printer,
) -> Result<Sprite> {
    let raw = load_pixels(&job.image, size)?;

    printer.status(
        "Processing",
        &format!("{} ({}x{})", display_path(&job.image), raw.width, raw.height),
    );

    let mask = job
        .mask
        .as_deref()
        .and_then(|path| try_load_mask(path, manifest.mask_threshold, printer));

    let mut observer = |d: Diagnostic| {
        if verbose || d.severity == Severity::Warning {
            printer.diagnostic(&d);
        }
    };

    Ok(govern_with(raw, mask.as_ref(), options, &mut observer))
}

/// Load a mask, degrading to colour-only extraction if it cannot be read.
fn try_load_mask(path: &Path, threshold: u8, printer: &Printer) -> Option<ParsedMask> {
    match load_mask(path, threshold) {
        Ok(mask) => Some(mask),
        Err(e) => {
            printer.warning(
                "Warning",
                &format!("ignoring mask {}: {}", display_path(path), e),
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};
    use crate::extract::DEFAULT_CHROMA_TOLERANCE;
    use crate::types::Colour;

    fn parse(argv: &[&str]) -> ProcessArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Process(args) => args,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_overrides_win_over_manifest() {
        let args = parse(&[
            "pxgov",
            "process",
            "a.png",
            "--max-colors",
            "8",
            "--chroma",
            "#00FF00",
            "--tolerance",
            "5",
            "-o",
            "out",
        ]);
        let mut manifest = Manifest::parse("max_colors: 32\noutput: build\n").unwrap();
        apply_overrides(&mut manifest, &args);

        assert_eq!(manifest.max_colors, 8);
        assert_eq!(manifest.chroma_tolerance, Some(5.0));
        assert_eq!(manifest.output, PathBuf::from("out"));

        let options = pipeline_options(&manifest, false).unwrap();
        let key = options.chroma.unwrap();
        assert_eq!(key.colour, Colour::rgb(0, 255, 0));
        assert_eq!(key.tolerance, 5.0);
        assert_eq!(options.quantize.max_colors, 8);
    }

    #[test]
    fn test_locked_palette_derives_tolerance() {
        let manifest = Manifest {
            palette: Some("gameboy".to_string()),
            ..Default::default()
        };
        let options = pipeline_options(&manifest, false).unwrap();

        assert_eq!(options.locked.as_ref().map(|p| p.len()), Some(4));
        let key = options.chroma.unwrap();
        assert!(key.tolerance < DEFAULT_CHROMA_TOLERANCE);
    }

    #[test]
    fn test_no_chroma() {
        let options = pipeline_options(&Manifest::default(), true).unwrap();
        assert!(options.chroma.is_none());
    }

    #[test]
    fn test_no_chroma_conflicts_with_chroma() {
        let parsed = Cli::try_parse_from([
            "pxgov",
            "process",
            "a.png",
            "--no-chroma",
            "--chroma",
            "#FFF",
        ]);
        assert!(parsed.is_err());
    }
}
