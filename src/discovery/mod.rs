//! Input discovery, decoding, and project configuration.
//!
//! Finds images to process (with their segmentation masks), decodes them
//! into raw sprites, and loads the `pxgov.yaml` manifest.
//!
//! # Example
//!
//! ```ignore
//! use pxgov::discovery::{load_manifest, scan_inputs};
//!
//! let manifest = load_manifest(None)?;
//! let scan = scan_inputs(&["art/".into()], &manifest);
//! println!("Found {} images", scan.total());
//! ```

mod loader;
mod manifest;
mod scanner;

use std::path::Path;

use crate::error::Result;

pub use loader::{
    image_to_mask, image_to_raw, load_mask, load_palette, load_pixels, load_raw_sprite,
    parse_palette,
};
pub use manifest::{Manifest, DEFAULT_MASK_THRESHOLD};
pub use scanner::{
    find_mask, is_image, is_mask, scan_directory, scan_inputs, InputJob, ScanResult,
    IMAGE_EXTENSIONS,
};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "pxgov.yaml";

/// Load the manifest from an explicit path, or from `pxgov.yaml` in the
/// current directory if it exists. Falls back to defaults.
pub fn load_manifest(explicit: Option<&Path>) -> Result<Manifest> {
    if let Some(path) = explicit {
        return Manifest::load(path);
    }

    let path = Path::new(MANIFEST_FILENAME);
    if path.is_file() {
        Manifest::load(path)
    } else {
        Ok(Manifest::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_manifest_explicit() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "max_colors: 16\n").unwrap();

        let manifest = load_manifest(Some(&path)).unwrap();
        assert_eq!(manifest.max_colors, 16);
    }

    #[test]
    fn test_load_manifest_explicit_missing() {
        assert!(load_manifest(Some(Path::new("/nonexistent/pxgov.yaml"))).is_err());
    }
}
