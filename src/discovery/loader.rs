//! Input loading: decode images, masks, raw sprite JSON, and palettes.
//!
//! This is the decode side of the pipeline. Everything here can fail on
//! bad files; the governance core downstream cannot.

use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::{GovError, Result};
use crate::types::{Colour, Palette, ParsedMask, Pixel, RawSprite};

fn open_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)
        .map_err(|e| GovError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
        .to_rgba8())
}

/// Convert a decoded RGBA image to a raw sprite.
pub fn image_to_raw(img: &RgbaImage) -> RawSprite {
    let pixels = img.pixels().map(|p| Pixel::from_rgba(p.0)).collect();
    RawSprite::new(img.width() as usize, img.height() as usize, pixels)
}

/// Decode an image file into a raw sprite.
///
/// When `size` is given the image is resized nearest-neighbour to exactly
/// that resolution first.
pub fn load_pixels(path: &Path, size: Option<(u32, u32)>) -> Result<RawSprite> {
    let mut img = open_rgba(path)?;

    if let Some((w, h)) = size {
        if (w, h) != img.dimensions() {
            img = image::imageops::resize(&img, w, h, FilterType::Nearest);
        }
    }

    Ok(image_to_raw(&img))
}

/// Build a mask from a decoded mask image.
///
/// Images with any non-opaque pixel are read by alpha; fully opaque images
/// (white-on-black masks) are read by luma.
pub fn image_to_mask(img: &RgbaImage, threshold: u8) -> Result<ParsedMask> {
    let has_alpha = img.pixels().any(|p| p.0[3] != 255);

    let values: Vec<u8> = if has_alpha {
        img.pixels().map(|p| p.0[3]).collect()
    } else {
        img.pixels()
            .map(|p| {
                let [r, g, b, _] = p.0;
                // Rec. 601 luma
                ((299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000) as u8
            })
            .collect()
    };

    ParsedMask::from_alpha(
        img.width() as usize,
        img.height() as usize,
        &values,
        threshold,
    )
}

/// Decode a mask image at its native resolution.
pub fn load_mask(path: &Path, threshold: u8) -> Result<ParsedMask> {
    let img = open_rgba(path)?;
    image_to_mask(&img, threshold)
}

/// Load a raw sprite from JSON (`{width, height, pixels, palette}`).
pub fn load_raw_sprite(path: &Path) -> Result<RawSprite> {
    let content = fs::read_to_string(path).map_err(|e| GovError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read sprite: {}", e),
    })?;

    serde_json::from_str(&content).map_err(|e| GovError::Parse {
        message: format!("Invalid sprite JSON in {}: {}", path.display(), e),
        help: Some("Expected {\"width\", \"height\", \"pixels\": [...]}".to_string()),
    })
}

/// Resolve a palette argument: a builtin name, or a palette file.
pub fn load_palette(spec: &str) -> Result<Palette> {
    if let Some(palette) = Palette::builtin(spec) {
        return Ok(palette);
    }

    let path = Path::new(spec);
    if !path.is_file() {
        return Err(GovError::Config {
            message: format!("Unknown palette: {}", spec),
            help: Some(format!(
                "Use a builtin ({}) or a path to a palette file",
                Palette::builtin_names().join(", ")
            )),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| GovError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read palette: {}", e),
    })?;

    parse_palette(&content)
}

/// Parse palette file contents.
///
/// Accepts a JSON array of hex strings, or one hex colour per line. Blank
/// lines, `;` and `//` comments, and `#` lines that are not colours are
/// skipped.
pub fn parse_palette(content: &str) -> Result<Palette> {
    let trimmed = content.trim_start();
    if trimmed.starts_with('[') {
        let hexes: Vec<String> = serde_json::from_str(trimmed).map_err(|e| GovError::Parse {
            message: format!("Invalid palette JSON: {}", e),
            help: None,
        })?;
        return hexes.iter().map(|h| Colour::from_hex(h)).collect();
    }

    let mut palette = Palette::new();
    for (lineno, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(';') || line.starts_with("//") {
            continue;
        }
        let parsed = Colour::from_hex(line);
        if parsed.is_err() && line.starts_with('#') {
            continue;
        }
        let colour = parsed.map_err(|_| GovError::Parse {
            message: format!("Invalid colour on line {}: {}", lineno + 1, line),
            help: Some("Palette files list one #RRGGBB colour per line".to_string()),
        })?;
        palette.push(colour);
    }

    Ok(palette)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_image_to_raw() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([9, 9, 9, 0]));

        let raw = image_to_raw(&img);
        assert_eq!(raw.width, 2);
        assert_eq!(raw.height, 1);
        assert_eq!(
            raw.pixels,
            vec![Pixel::Opaque(Colour::rgb(255, 0, 0)), Pixel::Transparent]
        );
    }

    #[test]
    fn test_load_pixels_resizes_nearest() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("in.png");

        let mut img = RgbaImage::new(4, 4);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = if x < 2 && y < 2 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            };
        }
        img.save(&path).unwrap();

        let raw = load_pixels(&path, Some((2, 2))).unwrap();
        assert_eq!(raw.width, 2);
        assert_eq!(raw.pixels.len(), 4);
        assert_eq!(raw.pixels[0], Pixel::Opaque(Colour::rgb(255, 0, 0)));
        assert_eq!(raw.pixels[3], Pixel::Opaque(Colour::rgb(0, 0, 255)));
    }

    #[test]
    fn test_load_pixels_missing_file() {
        assert!(load_pixels(Path::new("/nonexistent/in.png"), None).is_err());
    }

    #[test]
    fn test_mask_from_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 0]));

        let mask = image_to_mask(&img, 128).unwrap();
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
    }

    #[test]
    fn test_mask_from_luma() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([0, 0, 0, 255]));

        let mask = image_to_mask(&img, 128).unwrap();
        assert!(mask.get(0, 0));
        assert!(!mask.get(1, 0));
    }

    #[test]
    fn test_load_raw_sprite() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.json");
        fs::write(
            &path,
            r##"{"width":2,"height":2,"pixels":["#FFF"],"palette":[]}"##,
        )
        .unwrap();

        let raw = load_raw_sprite(&path).unwrap();
        assert_eq!(raw.width, 2);
        assert_eq!(raw.pixels.len(), 1);
    }

    #[test]
    fn test_load_raw_sprite_invalid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("raw.json");
        fs::write(&path, "{ nope").unwrap();
        assert!(load_raw_sprite(&path).is_err());
    }

    #[test]
    fn test_parse_palette_lines() {
        let palette = parse_palette("; sweetie\n#1A1C2C\n\n5D275D\n// dup\n#1a1c2c\n").unwrap();
        assert_eq!(palette.len(), 2);
        assert_eq!(palette.as_slice()[1], Colour::rgb(0x5D, 0x27, 0x5D));
    }

    #[test]
    fn test_parse_palette_hash_comments() {
        let palette = parse_palette("# Game palette\n#FFF\n# by me\n#000000\n").unwrap();
        assert_eq!(palette.as_slice(), &[Colour::WHITE, Colour::BLACK]);
    }

    #[test]
    fn test_parse_palette_json() {
        let palette = parse_palette(r##"["#000000", "#FFFFFF"]"##).unwrap();
        assert_eq!(palette.as_slice(), &[Colour::BLACK, Colour::WHITE]);
    }

    #[test]
    fn test_parse_palette_bad_line() {
        let err = parse_palette("#000000\nnot-a-colour\n").unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_load_palette_builtin_and_unknown() {
        assert_eq!(load_palette("pico8").unwrap().len(), 16);
        assert!(load_palette("no-such-palette").is_err());
    }

    #[test]
    fn test_load_palette_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("game.hex");
        fs::write(&path, "FF0000\n00FF00\n").unwrap();

        let palette = load_palette(path.to_str().unwrap()).unwrap();
        assert_eq!(palette.len(), 2);
    }
}
