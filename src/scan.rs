//! Source directory scanning and dimension probing.
//!
//! Stage 1 of the slidegrid pipeline. Collects the image files directly
//! inside the source directory, orders them by filename, and probes each
//! one's pixel dimensions through an [`ImageProbe`].
//!
//! ## Ordering
//!
//! Files are sorted by filename (byte order), and that order is the layout
//! order — the filename is each image's stable identifier all the way into
//! the deck manifest. Prefix names (`001-dawn.jpg`, `002-peak.jpg`) to
//! control the sequence.
//!
//! ## Parallel probing
//!
//! Dimensions are probed in parallel with rayon. `par_iter().collect()`
//! preserves input order, so the probe results come back in filename order
//! before the strictly sequential layout pass begins. Any probe failure
//! fails the whole scan — a missing dimension would silently renumber every
//! later placement.

use crate::imaging::{BackendError, ImageProbe, is_supported_image};
use crate::layout::ImageSpec;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Failed to probe {path}: {source}")]
    Probe {
        path: PathBuf,
        source: BackendError,
    },
    #[error("No images found in {0}")]
    NoImages(PathBuf),
}

/// One discovered source image with its probed dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceImage {
    /// Filename — the stable identifier and ordering key.
    pub id: String,
    /// Full path to the source file.
    pub path: PathBuf,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl SourceImage {
    /// The layout-facing view of this image.
    pub fn to_spec(&self) -> ImageSpec {
        ImageSpec::new(&self.id, self.pixel_width, self.pixel_height)
    }
}

/// Collect supported image files directly inside `root`, sorted by filename.
fn collect_paths(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    for entry in walkdir::WalkDir::new(root).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && is_supported_image(entry.path()) {
            paths.push(entry.path().to_path_buf());
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Scan `root` and probe every image's dimensions.
///
/// Returns images in filename order. Errors if the directory holds no
/// supported images or any probe fails.
pub fn scan(root: &Path, probe: &dyn ImageProbe) -> Result<Vec<SourceImage>, ScanError> {
    let paths = collect_paths(root)?;
    if paths.is_empty() {
        return Err(ScanError::NoImages(root.to_path_buf()));
    }

    paths
        .par_iter()
        .map(|path| {
            let dims = probe.identify(path).map_err(|source| ScanError::Probe {
                path: path.clone(),
                source,
            })?;
            Ok(SourceImage {
                id: path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                path: path.clone(),
                pixel_width: dims.width,
                pixel_height: dims.height,
            })
        })
        .collect()
}

/// Convenience view over scanned images for the layout pass.
pub fn to_specs(images: &[SourceImage]) -> Vec<ImageSpec> {
    images.iter().map(SourceImage::to_spec).collect()
}
