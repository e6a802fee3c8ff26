//! Page compositing — drives a [`PageSink`] from a layout result.
//!
//! Stage 3 of the slidegrid pipeline. The layout result is in canvas units;
//! this module maps each placement to output pixels
//! (`[render] pixels_per_unit`) and hands it to the sink, which owns page
//! creation and encoding. Nothing here decides geometry — the placements
//! arrive fully decided, and an overflowing placement is passed through
//! unclipped exactly as the paginator flagged it.

use crate::imaging::{BackendError, PageSink, PixelRect};
use crate::layout::{LayoutResult, Placement};
use crate::scan::SourceImage;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("{placements} placements but {images} images")]
    CountMismatch { placements: usize, images: usize },
    #[error("Placement {placement} does not match image {image}")]
    Mismatch { placement: String, image: String },
}

/// What a render run produced.
#[derive(Debug)]
pub struct RenderSummary {
    /// Written page files, in page order.
    pub pages: Vec<PathBuf>,
    /// Number of images placed.
    pub placed: usize,
}

/// Map a placement in canvas units to output pixels.
///
/// Offsets and sizes are rounded independently; at worst a placement shifts
/// by half a pixel, which spacing always absorbs.
pub fn to_pixel_rect(placement: &Placement, pixels_per_unit: f64) -> PixelRect {
    let px = |v: f64| (v * pixels_per_unit).round() as u32;
    PixelRect {
        x: px(placement.x),
        y: px(placement.y),
        width: px(placement.rendered_width).max(1),
        height: px(placement.rendered_height).max(1),
    }
}

/// Composite every placement onto its page through `sink`.
///
/// `images` must be the scan output the layout was computed from — same
/// order, same identifiers.
pub fn render(
    result: &LayoutResult,
    images: &[SourceImage],
    sink: &mut dyn PageSink,
    pixels_per_unit: f64,
) -> Result<RenderSummary, RenderError> {
    // zip would silently truncate to the shorter side; refuse instead.
    if result.placements.len() != images.len() {
        return Err(RenderError::CountMismatch {
            placements: result.placements.len(),
            images: images.len(),
        });
    }
    for (placement, image) in result.placements.iter().zip(images) {
        if placement.id != image.id {
            return Err(RenderError::Mismatch {
                placement: placement.id.clone(),
                image: image.id.clone(),
            });
        }
        let rect = to_pixel_rect(placement, pixels_per_unit);
        sink.place(placement.page_index, &image.path, rect)?;
    }
    let pages = sink.finish()?;
    Ok(RenderSummary {
        pages,
        placed: result.placements.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockSink;
    use crate::layout::{self, LayoutConfig};
    use crate::test_helpers::square_specs;

    fn config() -> LayoutConfig {
        LayoutConfig {
            canvas_width: 10.0,
            canvas_height: 10.0,
            header_height: 1.0,
            margin: 1.0,
            spacing: 0.5,
            rows_per_page: 2,
        }
    }

    fn images_for(specs: &[crate::layout::ImageSpec]) -> Vec<SourceImage> {
        specs
            .iter()
            .map(|s| SourceImage {
                id: s.id.clone(),
                path: PathBuf::from(format!("/src/{}", s.id)),
                pixel_width: s.pixel_width,
                pixel_height: s.pixel_height,
            })
            .collect()
    }

    #[test]
    fn pixel_rect_rounds_at_scale() {
        let placement = Placement {
            id: "a.jpg".to_string(),
            page_index: 0,
            row_index: 0,
            x: 1.0,
            y: 2.0,
            rendered_width: 3.25,
            rendered_height: 3.25,
            overflows_row: false,
        };
        let rect = to_pixel_rect(&placement, 96.0);
        assert_eq!(rect, PixelRect {
            x: 96,
            y: 192,
            width: 312,
            height: 312
        });
    }

    #[test]
    fn pixel_rect_never_collapses_to_zero() {
        let placement = Placement {
            id: "sliver.jpg".to_string(),
            page_index: 0,
            row_index: 0,
            x: 0.0,
            y: 0.0,
            rendered_width: 0.001,
            rendered_height: 1.0,
            overflows_row: false,
        };
        let rect = to_pixel_rect(&placement, 96.0);
        assert_eq!(rect.width, 1);
    }

    #[test]
    fn render_places_every_image_on_its_page() {
        let specs = square_specs(5);
        let result = layout::layout(&config(), &specs).unwrap();
        let images = images_for(&specs);

        let mut sink = MockSink::default();
        let summary = render(&result, &images, &mut sink, 96.0).unwrap();

        assert_eq!(summary.placed, 5);
        assert_eq!(sink.ops.len(), 5);
        assert!(sink.finished);
        // 2 per row, 2 rows per page — fifth image lands on page 1
        assert_eq!(sink.ops[4].0, 1);
        assert_eq!(summary.pages.len(), 2);
        // Sink receives source paths, not ids
        assert_eq!(sink.ops[0].1, PathBuf::from("/src/img-000.jpg"));
    }

    #[test]
    fn render_rejects_fewer_images_than_placements() {
        // Nothing reaches the sink — a truncated zip would have placed two
        // images and still claimed all three.
        let specs = square_specs(3);
        let result = layout::layout(&config(), &specs).unwrap();
        let images = images_for(&specs[..2]);

        let mut sink = MockSink::default();
        let err = render(&result, &images, &mut sink, 96.0).unwrap_err();
        assert!(matches!(err, RenderError::CountMismatch {
            placements: 3,
            images: 2
        }));
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn render_rejects_extra_images() {
        let specs = square_specs(2);
        let result = layout::layout(&config(), &specs[..1]).unwrap();
        let images = images_for(&specs);

        let mut sink = MockSink::default();
        let err = render(&result, &images, &mut sink, 96.0).unwrap_err();
        assert!(matches!(err, RenderError::CountMismatch { .. }));
    }

    #[test]
    fn render_rejects_mismatched_inputs() {
        let specs = square_specs(2);
        let result = layout::layout(&config(), &specs).unwrap();
        let mut images = images_for(&specs);
        images.swap(0, 1);

        let mut sink = MockSink::default();
        let err = render(&result, &images, &mut sink, 96.0).unwrap_err();
        assert!(matches!(err, RenderError::Mismatch { .. }));
    }
}
