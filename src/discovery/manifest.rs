//! Project manifest (pxgov.yaml) parsing.
//!
//! The manifest holds the tunable pipeline settings and output defaults.
//! Every field is optional; CLI flags override whatever is set here.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{GovError, Result};
use crate::extract::{ChromaKey, DEFAULT_CHROMA_TOLERANCE};
use crate::quantize::{
    QuantizeOptions, DEFAULT_MAX_COLORS, DEFAULT_POPULAR_RATIO, DEFAULT_SIMILARITY_THRESHOLD,
};
use crate::types::{Colour, Palette};

/// Default alpha/luma threshold for reading mask images.
pub const DEFAULT_MASK_THRESHOLD: u8 = 128;

/// Project manifest loaded from pxgov.yaml.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Colour budget for auto-quantized palettes.
    pub max_colors: usize,

    /// Share of the budget reserved for the most frequent colours.
    pub popular_ratio: f64,

    /// Perceptual distance a rare colour must exceed to be kept.
    pub similarity_threshold: f64,

    /// Background key colour.
    pub chroma_key: String,

    /// Keying tolerance. Derived from the locked palette when unset.
    pub chroma_tolerance: Option<f64>,

    /// Mask images: foreground when alpha (or luma) is at least this.
    pub mask_threshold: u8,

    /// Locked palette: a builtin name or a palette file path.
    pub palette: Option<String>,

    /// Output directory for processed sprites.
    pub output: PathBuf,

    /// Default integer upscale for PNG output.
    pub scale: Option<u32>,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            max_colors: DEFAULT_MAX_COLORS,
            popular_ratio: DEFAULT_POPULAR_RATIO,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            chroma_key: Colour::MAGENTA.to_hex(),
            chroma_tolerance: None,
            mask_threshold: DEFAULT_MASK_THRESHOLD,
            palette: None,
            output: PathBuf::from("dist"),
            scale: None,
            excludes: vec![],
        }
    }
}

impl Manifest {
    /// Load manifest from a pxgov.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GovError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        // serde_yaml rejects an empty document; treat it as all defaults.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| GovError::Config {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check pxgov.yaml syntax".to_string()),
        })
    }

    /// Quantizer options from the manifest settings.
    pub fn quantize_options(&self) -> QuantizeOptions {
        QuantizeOptions {
            max_colors: self.max_colors,
            popular_ratio: self.popular_ratio,
            similarity_threshold: self.similarity_threshold,
        }
    }

    /// Parsed chroma key colour.
    pub fn chroma_colour(&self) -> Result<Colour> {
        Colour::from_hex(&self.chroma_key).map_err(|_| GovError::Config {
            message: format!("Invalid chroma_key: {}", self.chroma_key),
            help: Some("Use #RGB or #RRGGBB format".to_string()),
        })
    }

    /// Build the chroma key, deriving tolerance from `locked` when the
    /// manifest does not set one.
    pub fn chroma_key(&self, locked: Option<&Palette>) -> Result<ChromaKey> {
        let colour = self.chroma_colour()?;
        Ok(match (self.chroma_tolerance, locked) {
            (Some(tolerance), _) => ChromaKey::new(colour, tolerance),
            (None, Some(palette)) => ChromaKey::for_palette(colour, palette),
            (None, None) => ChromaKey::new(colour, DEFAULT_CHROMA_TOLERANCE),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();
        self.excludes
            .iter()
            .any(|pattern| Self::matches_pattern(&path_str, pattern))
    }

    /// Simple glob pattern matching.
    fn matches_pattern(path: &str, pattern: &str) -> bool {
        if let Some(suffix) = pattern.strip_prefix("**/") {
            // **/dir/* matches anything inside dir anywhere in the path
            if let Some(dir) = suffix.strip_suffix("/*") {
                return path.contains(&format!("/{}/", dir)) || path.starts_with(&format!("{}/", dir));
            }
            return path.contains(suffix);
        }

        if let Some(suffix) = pattern.strip_prefix('*') {
            if !pattern.contains('/') {
                return path.ends_with(suffix);
            }
        }

        if let Some(prefix) = pattern.strip_suffix("/*") {
            return path.starts_with(&format!("{}/", prefix))
                || path.contains(&format!("/{}/", prefix));
        }

        path.contains(pattern)
    }

    /// Get the effective scale factor.
    pub fn effective_scale(&self) -> u32 {
        self.scale.unwrap_or(1).max(1)
    }
}
