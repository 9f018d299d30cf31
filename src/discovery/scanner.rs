//! File system scanner for discovering input images.
//!
//! Recursively scans directories for images and pairs each one with a
//! sibling segmentation mask (`hero.png` + `hero.mask.png`) when present.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::manifest::Manifest;

/// Image extensions the decoder is asked to handle.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Infix marking a file as a segmentation mask.
pub const MASK_INFIX: &str = ".mask.";

/// A single image to process, with its mask if one was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputJob {
    pub image: PathBuf,
    pub mask: Option<PathBuf>,
    /// Image path relative to the scanned root (just the file name for
    /// inputs named directly). Outputs mirror this layout.
    pub relative: PathBuf,
}

impl InputJob {
    /// A job for an image named directly on the command line.
    pub fn file(image: &Path) -> Self {
        let relative = image
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| image.to_path_buf());
        Self {
            image: image.to_path_buf(),
            mask: find_mask(image),
            relative,
        }
    }

    /// Where this job's output with extension `ext` goes under `out_dir`.
    pub fn output_path(&self, out_dir: &Path, ext: &str) -> PathBuf {
        out_dir.join(&self.relative).with_extension(ext)
    }
}

/// Result of scanning for inputs.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub jobs: Vec<InputJob>,
}

impl ScanResult {
    /// Create a new empty scan result.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Number of jobs that have a mask.
    pub fn masked(&self) -> usize {
        self.jobs.iter().filter(|j| j.mask.is_some()).count()
    }

    /// Merge another scan result into this one.
    pub fn merge(&mut self, other: ScanResult) {
        self.jobs.extend(other.jobs);
    }

    /// First pair of jobs whose outputs would land on the same path.
    pub fn output_collision(&self) -> Option<(&InputJob, &InputJob)> {
        let mut seen: HashMap<PathBuf, &InputJob> = HashMap::new();
        for job in &self.jobs {
            let key = job.relative.with_extension("");
            if let Some(first) = seen.get(&key) {
                return Some((first, job));
            }
            seen.insert(key, job);
        }
        None
    }
}

/// True if the path has a supported image extension.
pub fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// True if the file name marks a segmentation mask.
pub fn is_mask(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.contains(MASK_INFIX))
        .unwrap_or(false)
}

/// Find the sibling mask for an image, if it exists on disk.
pub fn find_mask(image: &Path) -> Option<PathBuf> {
    let stem = image.file_stem()?.to_str()?;
    let parent = image.parent().unwrap_or_else(|| Path::new(""));
    IMAGE_EXTENSIONS
        .iter()
        .map(|ext| parent.join(format!("{}.mask.{}", stem, ext)))
        .find(|candidate| candidate.is_file())
}

/// True if `path` resolves to `output` or somewhere below it.
fn is_within(path: &Path, output: Option<&Path>) -> bool {
    match (output, path.canonicalize()) {
        (Some(output), Ok(resolved)) => resolved.starts_with(output),
        _ => false,
    }
}

/// Scan a directory for input images.
///
/// The manifest's output directory is never descended into, so earlier
/// results are not picked up as inputs.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    if !root.exists() {
        return result;
    }

    let output = manifest.output.canonicalize().ok();

    for entry in WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !(e.file_type().is_dir() && is_within(e.path(), output.as_deref())))
        .filter_map(|e| e.ok())
    {
        let path = entry.path();

        if path.is_dir() || manifest.is_excluded(path) {
            continue;
        }

        if is_image(path) && !is_mask(path) {
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            result.jobs.push(InputJob {
                image: path.to_path_buf(),
                mask: find_mask(path),
                relative,
            });
        }
    }

    result
}

/// Scan a mix of files and directories.
///
/// Files are taken as given (even masks, when named explicitly); directories
/// are walked.
pub fn scan_inputs(paths: &[PathBuf], manifest: &Manifest) -> ScanResult {
    let mut result = ScanResult::new();

    for path in paths {
        if path.is_dir() {
            result.merge(scan_directory(path, manifest));
        } else {
            result.jobs.push(InputJob::file(path));
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_image() {
        assert!(is_image(Path::new("hero.png")));
        assert!(is_image(Path::new("hero.PNG")));
        assert!(is_image(Path::new("dir/hero.jpeg")));
        assert!(!is_image(Path::new("hero.json")));
        assert!(!is_image(Path::new("hero")));
    }

    #[test]
    fn test_is_mask() {
        assert!(is_mask(Path::new("hero.mask.png")));
        assert!(!is_mask(Path::new("hero.png")));
        assert!(!is_mask(Path::new("masked.png")));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = tempdir().unwrap();
        let result = scan_directory(dir.path(), &Manifest::default());
        assert!(result.is_empty());
    }

    #[test]
    fn test_scan_pairs_masks() {
        let dir = tempdir().unwrap();

        fs::write(dir.path().join("hero.png"), b"").unwrap();
        fs::write(dir.path().join("hero.mask.png"), b"").unwrap();
        fs::write(dir.path().join("slime.png"), b"").unwrap();
        fs::write(dir.path().join("notes.txt"), b"").unwrap();

        let result = scan_directory(dir.path(), &Manifest::default());

        assert_eq!(result.total(), 2);
        assert_eq!(result.masked(), 1);
        assert_eq!(result.jobs[0].image, dir.path().join("hero.png"));
        assert_eq!(result.jobs[0].mask, Some(dir.path().join("hero.mask.png")));
        assert_eq!(result.jobs[1].mask, None);
    }

    #[test]
    fn test_scan_recursive_with_excludes() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("chars/raw")).unwrap();

        fs::write(dir.path().join("chars/hero.png"), b"").unwrap();
        fs::write(dir.path().join("chars/raw/hero.png"), b"").unwrap();

        let manifest = Manifest {
            excludes: vec!["**/raw/*".to_string()],
            ..Default::default()
        };
        let result = scan_directory(dir.path(), &manifest);

        assert_eq!(result.total(), 1);
        assert!(result.jobs[0].image.ends_with("chars/hero.png"));
    }

    #[test]
    fn test_scan_inputs_mixes_files_and_dirs() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("batch")).unwrap();
        fs::write(dir.path().join("batch/a.png"), b"").unwrap();
        fs::write(dir.path().join("batch/b.png"), b"").unwrap();
        let single = dir.path().join("single.png");
        fs::write(&single, b"").unwrap();

        let result = scan_inputs(
            &[single.clone(), dir.path().join("batch")],
            &Manifest::default(),
        );

        assert_eq!(result.total(), 3);
        assert_eq!(result.jobs[0].image, single);
    }

    #[test]
    fn test_scan_records_relative_paths() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        fs::write(dir.path().join("a/hero.png"), b"").unwrap();
        fs::write(dir.path().join("b/hero.png"), b"").unwrap();

        let result = scan_directory(dir.path(), &Manifest::default());

        assert_eq!(result.total(), 2);
        assert_eq!(result.jobs[0].relative, Path::new("a/hero.png"));
        assert_eq!(
            result.jobs[1].output_path(Path::new("dist"), "json"),
            Path::new("dist/b/hero.json")
        );
        assert!(result.output_collision().is_none());
    }

    #[test]
    fn test_output_collision_between_named_files() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        let first = dir.path().join("a/hero.png");
        let second = dir.path().join("b/hero.png");
        fs::write(&first, b"").unwrap();
        fs::write(&second, b"").unwrap();

        let result = scan_inputs(&[first.clone(), second.clone()], &Manifest::default());

        let (a, b) = result.output_collision().unwrap();
        assert_eq!(a.image, first);
        assert_eq!(b.image, second);
    }

    #[test]
    fn test_scan_skips_output_directory() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist")).unwrap();
        fs::write(dir.path().join("hero.png"), b"").unwrap();
        fs::write(dir.path().join("dist/hero.png"), b"").unwrap();

        let manifest = Manifest {
            output: dir.path().join("dist"),
            ..Default::default()
        };
        let result = scan_directory(dir.path(), &manifest);

        assert_eq!(result.total(), 1);
        assert_eq!(result.jobs[0].image, dir.path().join("hero.png"));
    }

    #[test]
    fn test_scan_nonexistent_directory() {
        let result = scan_directory(Path::new("/nonexistent/path"), &Manifest::default());
        assert!(result.is_empty());
    }
}
