//! Imaging backend built on the `image` crate — no external tools to install.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` (header-only decode) |
//! | Decode (JPEG, PNG, WebP) | `image` crate decoders |
//! | Resize | `image::imageops::resize` with `Lanczos3` filter |
//! | Compose | `image::imageops::overlay` onto an `RgbaImage` canvas |
//! | Encode | PNG, one file per page |

use super::backend::{BackendError, Dimensions, ImageProbe, PageSink, PixelRect};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Extensions whose decoders are compiled in.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

/// Returns true when the path carries a supported image extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| SUPPORTED_EXTENSIONS.iter().any(|s| e.eq_ignore_ascii_case(s)))
}

/// Probe reading dimensions from image file headers.
///
/// `image::image_dimensions` parses only as much of the file as needed to
/// find the size, so probing stays cheap even for large sources.
pub struct FileProbe;

impl FileProbe {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileProbe {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProbe for FileProbe {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = image::image_dimensions(path).map_err(|e| {
            BackendError::ProcessingFailed(format!("Failed to identify {}: {}", path.display(), e))
        })?;
        Ok(Dimensions { width, height })
    }
}

/// Sink compositing each page to `page-NNN.png` in an output directory.
///
/// Page canvases are created lazily on the first placement for their index
/// and held in memory until [`PageSink::finish`] writes them out.
pub struct PngSink {
    out_dir: PathBuf,
    page_width: u32,
    page_height: u32,
    background: Rgba<u8>,
    pages: BTreeMap<usize, RgbaImage>,
}

impl PngSink {
    pub fn new(out_dir: &Path, page_width: u32, page_height: u32, background: [u8; 3]) -> Self {
        let [r, g, b] = background;
        Self {
            out_dir: out_dir.to_path_buf(),
            page_width,
            page_height,
            background: Rgba([r, g, b, 255]),
            pages: BTreeMap::new(),
        }
    }

    fn page_path(&self, page_index: usize) -> PathBuf {
        self.out_dir.join(format!("page-{:03}.png", page_index + 1))
    }
}

impl PageSink for PngSink {
    fn place(
        &mut self,
        page_index: usize,
        source: &Path,
        rect: PixelRect,
    ) -> Result<(), BackendError> {
        let canvas = self.pages.entry(page_index).or_insert_with(|| {
            RgbaImage::from_pixel(self.page_width, self.page_height, self.background)
        });

        let img = image::open(source)
            .map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to decode {}: {}",
                    source.display(),
                    e
                ))
            })?
            .to_rgba8();
        // The rect already encodes the aspect-correct size; resize to it
        // exactly rather than fitting, so rounding never leaves seams.
        let resized = imageops::resize(
            &img,
            rect.width.max(1),
            rect.height.max(1),
            FilterType::Lanczos3,
        );
        imageops::overlay(canvas, &resized, i64::from(rect.x), i64::from(rect.y));
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<PathBuf>, BackendError> {
        std::fs::create_dir_all(&self.out_dir)?;
        let mut written = Vec::with_capacity(self.pages.len());
        for (&index, canvas) in &self.pages {
            let path = self.page_path(index);
            canvas.save(&path).map_err(|e| {
                BackendError::ProcessingFailed(format!(
                    "Failed to write {}: {}",
                    path.display(),
                    e
                ))
            })?;
            written.push(path);
        }
        self.pages.clear();
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_png(dir: &Path, name: &str, width: u32, height: u32, color: [u8; 4]) -> PathBuf {
        let path = dir.join(name);
        RgbaImage::from_pixel(width, height, Rgba(color))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn supported_extensions_case_insensitive() {
        assert!(is_supported_image(Path::new("a.JPG")));
        assert!(is_supported_image(Path::new("b.png")));
        assert!(!is_supported_image(Path::new("c.gif")));
        assert!(!is_supported_image(Path::new("noext")));
    }

    #[test]
    fn file_probe_identifies_png() {
        let tmp = TempDir::new().unwrap();
        let path = write_png(tmp.path(), "probe.png", 12, 34, [0, 0, 0, 255]);
        let dims = FileProbe::new().identify(&path).unwrap();
        assert_eq!(dims, Dimensions {
            width: 12,
            height: 34
        });
    }

    #[test]
    fn file_probe_errors_on_missing_file() {
        let result = FileProbe::new().identify(Path::new("/nonexistent/x.png"));
        assert!(result.is_err());
    }

    #[test]
    fn png_sink_writes_one_file_per_page() {
        let tmp = TempDir::new().unwrap();
        let src = write_png(tmp.path(), "src.png", 4, 4, [10, 20, 30, 255]);
        let out = tmp.path().join("deck");

        let mut sink = PngSink::new(&out, 100, 50, [255, 255, 255]);
        let rect = PixelRect {
            x: 5,
            y: 5,
            width: 20,
            height: 20,
        };
        sink.place(0, &src, rect).unwrap();
        sink.place(2, &src, rect).unwrap();
        let pages = sink.finish().unwrap();

        assert_eq!(pages, vec![out.join("page-001.png"), out.join("page-003.png")]);
        for page in &pages {
            let (w, h) = image::image_dimensions(page).unwrap();
            assert_eq!((w, h), (100, 50));
        }
    }

    #[test]
    fn png_sink_paints_source_into_rect() {
        let tmp = TempDir::new().unwrap();
        let src = write_png(tmp.path(), "red.png", 2, 2, [200, 0, 0, 255]);
        let out = tmp.path().join("deck");

        let mut sink = PngSink::new(&out, 40, 40, [255, 255, 255]);
        sink.place(
            0,
            &src,
            PixelRect {
                x: 10,
                y: 10,
                width: 8,
                height: 8,
            },
        )
        .unwrap();
        let pages = sink.finish().unwrap();

        let page = image::open(&pages[0]).unwrap().to_rgba8();
        // Inside the rect: source color. Outside: background.
        assert_eq!(page.get_pixel(14, 14), &Rgba([200, 0, 0, 255]));
        assert_eq!(page.get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(page.get_pixel(30, 30), &Rgba([255, 255, 255, 255]));
    }
}
