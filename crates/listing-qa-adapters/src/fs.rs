//! Filesystem adapter for loading submission images.

use anyhow::{bail, Context, Result};
use listing_qa_core::{ImageInfo, ImageLoadError, ImageSource};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Supported image extensions.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "tiff", "tif", "webp", "bmp", "gif"];

/// Filesystem image source adapter.
///
/// Files are yielded in the order given; directories contribute their
/// images sorted by file name so submission order is stable. The file list
/// is resolved once, when the source is created.
///
/// Explicit file paths are always yielded, even when missing or not an
/// image; they fail at load time.
pub struct FsImageSource {
    files: Vec<PathBuf>,
}

impl FsImageSource {
    /// Creates a new filesystem image source.
    ///
    /// # Arguments
    ///
    /// * `paths` - Image files, or directories holding a submission's images
    #[must_use]
    pub fn new(paths: Vec<PathBuf>) -> Self {
        let files = collect_files(paths);
        debug!("Found {} image files", files.len());
        Self { files }
    }
}

/// Expands directories into their image files.
fn collect_files(paths: Vec<PathBuf>) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            collect_from_dir(&path, &mut files);
        } else {
            if !path.exists() {
                warn!("Path does not exist: {}", path.display());
            }
            files.push(path);
        }
    }

    files
}

fn collect_from_dir(dir: &Path, files: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            warn!("Failed to read directory {}: {e}", dir.display());
            return;
        }
    };

    let mut found: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    found.sort();
    files.extend(found);
}

impl ImageSource for FsImageSource {
    fn images(&self) -> Box<dyn Iterator<Item = Result<ImageInfo, ImageLoadError>> + Send + '_> {
        Box::new(self.files.iter().map(|path| {
            load_image(path).map_err(|e| ImageLoadError::new(path.to_string_lossy(), e))
        }))
    }

    fn count_hint(&self) -> Option<usize> {
        Some(self.files.len())
    }
}

/// Checks if a path has a supported image extension.
fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
}

/// Decodes an image from the filesystem.
///
/// Zero-area images are rejected here so they never reach the scorer.
fn load_image(path: &Path) -> Result<ImageInfo> {
    if !is_supported_image(path) {
        bail!("Unsupported file type: {}", path.display());
    }
    let image =
        image::open(path).with_context(|| format!("Failed to open image: {}", path.display()))?;

    let info = ImageInfo::new(path.to_string_lossy(), image);
    if info.is_empty() {
        bail!("Image has zero area: {}", path.display());
    }
    Ok(info)
}
