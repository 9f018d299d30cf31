//! End-to-end runs of the `process` command on images written to disk.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use pretty_assertions::assert_eq;
use tempfile::tempdir;

use pxgov::cli::process::{run, ProcessArgs};
use pxgov::output::Printer;
use pxgov::types::{Colour, Pixel, Sprite};

const MAGENTA: Rgba<u8> = Rgba([255, 0, 255, 255]);
const RED: Rgba<u8> = Rgba([200, 0, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// 4x4 magenta card with a 2x2 body: three red pixels and one magenta
/// highlight at (2, 2).
fn write_card(path: &Path) {
    RgbaImage::from_fn(4, 4, |x, y| match (x, y) {
        (2, 2) => MAGENTA,
        (1..=2, 1..=2) => RED,
        _ => MAGENTA,
    })
    .save(path)
    .unwrap();
}

/// 8x8 white-on-black mask covering the body.
fn write_mask(path: &Path) {
    RgbaImage::from_fn(8, 8, |x, y| {
        if (2..6).contains(&x) && (2..6).contains(&y) {
            Rgba([255, 255, 255, 255])
        } else {
            Rgba([0, 0, 0, 255])
        }
    })
    .save(path)
    .unwrap();
}

fn args(inputs: Vec<PathBuf>, output: &Path, config: &Path) -> ProcessArgs {
    ProcessArgs {
        inputs,
        mask: None,
        palette: None,
        max_colors: None,
        chroma: None,
        tolerance: None,
        no_chroma: false,
        size: None,
        output: Some(output.to_path_buf()),
        scale: None,
        json: true,
        config: Some(config.to_path_buf()),
        verbose: false,
    }
}

fn empty_config(dir: &Path) -> PathBuf {
    let path = dir.join("pxgov.yaml");
    fs::write(&path, "").unwrap();
    path
}

fn read_sprite(path: &Path) -> Sprite {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn sibling_mask_protects_key_coloured_highlight() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let image = dir.path().join("card.png");
    write_card(&image);
    write_mask(&dir.path().join("card.mask.png"));

    let out = dir.path().join("dist");
    run(args(vec![image], &out, &config), &Printer::new()).unwrap();

    let png = image::open(out.join("card.png")).unwrap().to_rgba8();
    assert_eq!(png.dimensions(), (4, 4));
    assert_eq!(*png.get_pixel(0, 0), CLEAR);
    assert_eq!(*png.get_pixel(1, 1), RED);
    assert_eq!(*png.get_pixel(2, 2), MAGENTA);
    assert_eq!(*png.get_pixel(3, 3), CLEAR);

    let sprite = read_sprite(&out.join("card.json"));
    assert_eq!(sprite.opaque_count(), 4);
    insta::assert_snapshot!(sprite.palette.to_string(), @"#C80000 #FF00FF");
}

#[test]
fn colour_only_extraction_without_mask() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let image = dir.path().join("card.png");
    write_card(&image);

    let out = dir.path().join("dist");
    run(args(vec![image], &out, &config), &Printer::new()).unwrap();

    let sprite = read_sprite(&out.join("card.json"));
    assert_eq!(sprite.opaque_count(), 3);
    assert_eq!(sprite.get(2, 2), Some(Pixel::Transparent));
}

#[test]
fn locked_palette_and_scale() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("pxgov.yaml");
    fs::write(&config, "palette: gameboy\nscale: 2\n").unwrap();
    let image = dir.path().join("card.png");
    write_card(&image);

    let out = dir.path().join("dist");
    run(args(vec![image], &out, &config), &Printer::new()).unwrap();

    let png = image::open(out.join("card.png")).unwrap().to_rgba8();
    assert_eq!(png.dimensions(), (8, 8));

    let sprite = read_sprite(&out.join("card.json"));
    let gameboy = pxgov::types::Palette::builtin("gameboy").unwrap();
    assert_eq!(sprite.palette, gameboy);
    assert!(sprite
        .pixels
        .iter()
        .filter_map(|p| p.colour())
        .all(|c| gameboy.contains(c)));
}

#[test]
fn directory_scan_skips_masks_and_resizes() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let art = dir.path().join("art");
    fs::create_dir(&art).unwrap();
    write_card(&art.join("a.png"));
    write_card(&art.join("b.png"));
    write_mask(&art.join("a.mask.png"));

    let out = dir.path().join("dist");
    let mut process = args(vec![art], &out, &config);
    process.size = Some("2x2".to_string());
    process.no_chroma = true;
    run(process, &Printer::new()).unwrap();

    assert!(out.join("a.png").is_file());
    assert!(out.join("b.png").is_file());
    assert!(!out.join("a.mask.png").exists());

    let sprite = read_sprite(&out.join("b.json"));
    assert_eq!((sprite.width, sprite.height), (2, 2));
    assert_eq!(sprite.pixels.len(), 4);
}

#[test]
fn explicit_mask_needs_single_input() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    write_card(&dir.path().join("a.png"));
    write_card(&dir.path().join("b.png"));

    let mut process = args(
        vec![dir.path().join("a.png"), dir.path().join("b.png")],
        &dir.path().join("dist"),
        &config,
    );
    process.mask = Some(dir.path().join("a.png"));

    assert!(run(process, &Printer::new()).is_err());
}

#[test]
fn unreadable_mask_degrades_to_colour_only() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let image = dir.path().join("card.png");
    write_card(&image);
    fs::write(dir.path().join("card.mask.png"), b"not a png").unwrap();

    let out = dir.path().join("dist");
    run(args(vec![image], &out, &config), &Printer::new()).unwrap();

    let sprite = read_sprite(&out.join("card.json"));
    assert_eq!(sprite.opaque_count(), 3);
    assert_eq!(sprite.get(1, 1), Some(Pixel::Opaque(Colour::rgb(200, 0, 0))));
}

#[test]
fn same_named_inputs_in_subdirectories_are_mirrored() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let art = dir.path().join("art");
    fs::create_dir_all(art.join("a")).unwrap();
    fs::create_dir_all(art.join("b")).unwrap();
    write_card(&art.join("a/hero.png"));
    RgbaImage::from_pixel(3, 3, RED)
        .save(art.join("b/hero.png"))
        .unwrap();

    let out = dir.path().join("dist");
    run(args(vec![art], &out, &config), &Printer::new()).unwrap();

    let first = read_sprite(&out.join("a/hero.json"));
    let second = read_sprite(&out.join("b/hero.json"));
    assert_eq!((first.width, first.height), (4, 4));
    assert_eq!((second.width, second.height), (3, 3));
    assert!(!out.join("hero.png").exists());
}

#[test]
fn colliding_named_inputs_fail_before_writing() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    fs::create_dir_all(dir.path().join("a")).unwrap();
    fs::create_dir_all(dir.path().join("b")).unwrap();
    write_card(&dir.path().join("a/hero.png"));
    write_card(&dir.path().join("b/hero.png"));

    let out = dir.path().join("dist");
    let inputs = vec![dir.path().join("a/hero.png"), dir.path().join("b/hero.png")];
    let err = run(args(inputs, &out, &config), &Printer::new()).unwrap_err();

    assert!(err.to_string().contains("would both write"));
    assert!(!out.exists());
}

#[test]
fn output_inside_scanned_directory_is_not_rescanned() {
    let dir = tempdir().unwrap();
    let config = empty_config(dir.path());
    let art = dir.path().join("art");
    fs::create_dir(&art).unwrap();
    write_card(&art.join("card.png"));

    let out = art.join("dist");
    run(args(vec![art.clone()], &out, &config), &Printer::new()).unwrap();
    run(args(vec![art], &out, &config), &Printer::new()).unwrap();

    assert!(out.join("card.png").is_file());
    assert!(!out.join("dist").exists());
}
