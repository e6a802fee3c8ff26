//! Imaging backend traits and shared types.
//!
//! Two capabilities keep the layout core free of I/O:
//!
//! - [`ImageProbe`] — "given an image source, return its pixel dimensions".
//!   Consumed by the scan stage, in parallel.
//! - [`PageSink`] — "given a page index, an image source, and a target
//!   rectangle, place the image on that page". Driven by the render stage;
//!   the sink owns page creation and final encoding.
//!
//! The production implementations are in
//! [`png_backend`](super::png_backend): [`FileProbe`](super::FileProbe)
//! reads dimensions from file headers and [`PngSink`](super::PngSink)
//! composites pages to PNG files. Tests swap in the mocks below.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Pixel dimensions of a source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Target rectangle on a page, in output pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Dimension lookup for a source image.
///
/// `Sync` so the scan stage can probe in parallel with rayon.
pub trait ImageProbe: Sync {
    /// Get image dimensions without decoding pixel data.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}

/// Receiver for placements: owns page canvases and their final encoding.
///
/// Pages come into existence on first `place` for their index; `finish`
/// flushes everything and returns the written files in page order.
pub trait PageSink {
    /// Place `source` on page `page_index`, filling `rect` exactly.
    fn place(&mut self, page_index: usize, source: &Path, rect: PixelRect)
    -> Result<(), BackendError>;

    /// Flush all pages. No `place` calls may follow.
    fn finish(&mut self) -> Result<Vec<PathBuf>, BackendError>;
}
