//! Shared types serialized between stages.
//!
//! The deck manifest is the hand-off artifact: everything an external
//! document serializer needs to place the images itself — the geometry that
//! was used, every source image, and every placement. It is written as
//! `deck.json` by both the `layout` and `render` commands.

use crate::config::DeckConfig;
use crate::layout::{LayoutResult, Placement};
use crate::scan::SourceImage;
use serde::{Deserialize, Serialize};

/// The serialized result of one layout run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckManifest {
    /// Config the layout was computed with.
    pub config: DeckConfig,
    /// Shared row height, in canvas units.
    pub row_height: f64,
    /// `max(page_index) + 1`.
    pub page_count: usize,
    /// Scanned source images, in layout order.
    pub images: Vec<SourceImage>,
    /// One placement per image, in the same order.
    pub placements: Vec<Placement>,
}

impl DeckManifest {
    pub fn new(config: DeckConfig, images: Vec<SourceImage>, result: LayoutResult) -> Self {
        Self {
            config,
            row_height: result.row_height,
            page_count: result.page_count,
            images,
            placements: result.placements,
        }
    }
}
