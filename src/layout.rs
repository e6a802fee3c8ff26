//! Grid pagination — the core layout algorithm.
//!
//! Places an ordered sequence of images onto fixed-size slide pages in a
//! single left-to-right, top-to-bottom greedy sweep. Every image is rendered
//! at the shared row height with its original aspect ratio; the sweep decides
//! when to wrap to a new row (the next image would cross the right margin)
//! and when to start a new page (the row budget is exhausted).
//!
//! The whole module is pure: [`layout`] is a function from
//! (`LayoutConfig`, `&[ImageSpec]`) to [`LayoutResult`] with no I/O, no
//! shared state, and no randomness. Identical inputs always produce an
//! identical result. Dimension probing and page compositing live behind
//! traits in [`crate::imaging`] so this module never touches a file.
//!
//! ## Wrap and page-break rules
//!
//! Before each placement, two decisions are evaluated in order:
//!
//! 1. **Wrap**: if the image would cross `canvas_width - margin` and the
//!    current row already holds at least one image, reset x to the left
//!    margin and advance one row. An image too wide for an empty row is
//!    placed anyway and flagged via [`Placement::overflows_row`] — never
//!    clipped, shrunk, or dropped.
//! 2. **Page break**: if the wrap pushed the cursor past the last row,
//!    start a new page at the page origin.
//!
//! Rows never vary in height and placements are never reordered, so the
//! output is stable under appends: laying out a prefix of the input yields
//! a prefix of the placements.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("Layout config error: {0}")]
    Config(String),
    #[error("Image {id} has invalid pixel dimensions {width}x{height}")]
    InvalidImage { id: String, width: u32, height: u32 },
}

/// Canvas geometry and packing parameters, in abstract canvas units.
///
/// All lengths share one unit (the defaults are inches for a 16:9 slide).
/// The unit only becomes pixels at render time, via
/// `[render] pixels_per_unit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Page width.
    pub canvas_width: f64,
    /// Page height.
    pub canvas_height: f64,
    /// Band reserved at the top of every page (for an externally drawn title).
    pub header_height: f64,
    /// Uniform inset from every page edge.
    pub margin: f64,
    /// Gap between adjacent images and between rows.
    pub spacing: f64,
    /// Fixed number of image rows per page.
    pub rows_per_page: u32,
}

impl LayoutConfig {
    /// Height of every row, shared across all rows and pages.
    ///
    /// `(canvas_height - header_height - 2*margin - (rows_per_page-1)*spacing)
    /// / rows_per_page`. Fails when the geometry leaves no positive row
    /// height or no positive row width — callers never get a partial layout.
    pub fn row_height(&self) -> Result<f64, LayoutError> {
        if self.rows_per_page == 0 {
            return Err(LayoutError::Config("rows_per_page must be at least 1".into()));
        }
        if self.margin < 0.0 || self.spacing < 0.0 || self.header_height < 0.0 {
            return Err(LayoutError::Config(
                "margin, spacing, and header_height must not be negative".into(),
            ));
        }
        if self.usable_row_width() <= 0.0 {
            return Err(LayoutError::Config(format!(
                "canvas width {} leaves no usable row width inside margin {}",
                self.canvas_width, self.margin
            )));
        }
        let rows = f64::from(self.rows_per_page);
        let available =
            self.canvas_height - self.header_height - 2.0 * self.margin - (rows - 1.0) * self.spacing;
        let row_height = available / rows;
        if !(row_height > 0.0) {
            return Err(LayoutError::Config(format!(
                "canvas height {} leaves no room for {} rows (row height {:.4})",
                self.canvas_height, self.rows_per_page, row_height
            )));
        }
        Ok(row_height)
    }

    /// Canvas width minus both margins.
    pub fn usable_row_width(&self) -> f64 {
        self.canvas_width - 2.0 * self.margin
    }
}

/// One input image: a stable identifier plus its pixel dimensions.
///
/// The identifier (typically the source filename) is the ordering key and is
/// carried through to the matching [`Placement`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSpec {
    pub id: String,
    pub pixel_width: u32,
    pub pixel_height: u32,
}

impl ImageSpec {
    pub fn new(id: impl Into<String>, pixel_width: u32, pixel_height: u32) -> Self {
        Self {
            id: id.into(),
            pixel_width,
            pixel_height,
        }
    }

    /// Width-over-height ratio. Caller must have validated non-zero height.
    fn aspect_ratio(&self) -> f64 {
        f64::from(self.pixel_width) / f64::from(self.pixel_height)
    }
}

/// Where one image lands: page, row, and top-left offset in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Identifier of the [`ImageSpec`] this placement belongs to.
    pub id: String,
    /// 0-based page.
    pub page_index: usize,
    /// 0-based row within the page, always `< rows_per_page`.
    pub row_index: u32,
    pub x: f64,
    pub y: f64,
    /// `row_height * aspect_ratio` — the aspect is never distorted.
    pub rendered_width: f64,
    /// Always equal to the config's row height.
    pub rendered_height: f64,
    /// True when this image alone is wider than the usable row width. It is
    /// placed unclipped on its own row; renderers may want to warn.
    pub overflows_row: bool,
}

/// Output of one [`layout`] call: placements in input order plus page count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutResult {
    pub placements: Vec<Placement>,
    /// `max(page_index) + 1`, or 0 for empty input.
    pub page_count: usize,
    /// The shared row height derived from the config.
    pub row_height: f64,
}

impl LayoutResult {
    /// Placements that are wider than the usable row width.
    pub fn overflowing(&self) -> impl Iterator<Item = &Placement> {
        self.placements.iter().filter(|p| p.overflows_row)
    }
}

/// Cursor state carried between successive placements.
struct Cursor {
    page: usize,
    row: u32,
    x: f64,
    y: f64,
    /// Whether the current row already holds an image. An empty row always
    /// accepts the next image, however wide.
    row_occupied: bool,
}

impl Cursor {
    fn page_origin(config: &LayoutConfig) -> (f64, f64) {
        (config.margin, config.header_height + config.margin)
    }

    fn new(config: &LayoutConfig) -> Self {
        let (x, y) = Self::page_origin(config);
        Self {
            page: 0,
            row: 0,
            x,
            y,
            row_occupied: false,
        }
    }

    fn wrap_row(&mut self, config: &LayoutConfig, row_height: f64) {
        self.x = config.margin;
        self.y += row_height + config.spacing;
        self.row += 1;
        self.row_occupied = false;
    }

    fn break_page(&mut self, config: &LayoutConfig) {
        let (x, y) = Self::page_origin(config);
        self.page += 1;
        self.row = 0;
        self.x = x;
        self.y = y;
        self.row_occupied = false;
    }
}

/// Assign every image a (page, row, x, y) slot.
///
/// Single O(n) pass over `specs`; output order equals input order, and no
/// image is ever dropped, split, or scaled non-uniformly. All precondition
/// failures are raised before the first placement is computed, so an `Err`
/// means zero placements were produced.
pub fn layout(config: &LayoutConfig, specs: &[ImageSpec]) -> Result<LayoutResult, LayoutError> {
    let row_height = config.row_height()?;
    for spec in specs {
        if spec.pixel_width == 0 || spec.pixel_height == 0 {
            return Err(LayoutError::InvalidImage {
                id: spec.id.clone(),
                width: spec.pixel_width,
                height: spec.pixel_height,
            });
        }
    }

    let right_edge = config.canvas_width - config.margin;
    let usable = config.usable_row_width();
    let mut cursor = Cursor::new(config);
    let mut placements = Vec::with_capacity(specs.len());

    for spec in specs {
        let rendered_width = row_height * spec.aspect_ratio();

        if cursor.row_occupied && cursor.x + rendered_width > right_edge {
            cursor.wrap_row(config, row_height);
        }
        if cursor.row >= config.rows_per_page {
            cursor.break_page(config);
        }

        placements.push(Placement {
            id: spec.id.clone(),
            page_index: cursor.page,
            row_index: cursor.row,
            x: cursor.x,
            y: cursor.y,
            rendered_width,
            rendered_height: row_height,
            overflows_row: rendered_width > usable,
        });

        cursor.x += rendered_width + config.spacing;
        cursor.row_occupied = true;
    }

    // Pages are visited in order, so the last placement carries the max index.
    let page_count = placements.last().map_or(0, |p| p.page_index + 1);

    Ok(LayoutResult {
        placements,
        page_count,
        row_height,
    })
}
