//! # slidegrid
//!
//! Lays out an ordered sequence of images onto fixed-size slide pages as an
//! aspect-preserving grid. Images are placed left to right at a uniform row
//! height, wrapping to a new row when the next image would cross the right
//! margin and to a new page when the per-page row budget is spent. No image
//! is ever distorted, cropped, reordered, or dropped.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan    images/  →  ordered (id, width, height) specs
//! 2. Layout  specs    →  placements  (THE algorithm — pure, deterministic)
//! 3. Render  placements →  page-NNN.png + deck.json
//! ```
//!
//! The layout stage is a pure function: everything that touches the
//! filesystem sits behind the [`imaging`] traits ([`imaging::ImageProbe`]
//! for dimensions in, [`imaging::PageSink`] for placements out). This keeps
//! the packing algorithm unit-testable with plain numbers and lets an
//! external document serializer consume `deck.json` instead of the PNG
//! pages — the manifest carries every placement in canvas units.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | The core — greedy row-wrap pagination, pure and `O(n)` |
//! | [`scan`] | Walks the source directory, probes pixel dimensions in parallel |
//! | [`render`] | Maps placements to pixels and drives a page sink |
//! | [`config`] | `config.toml` loading, defaults, fail-fast geometry validation |
//! | [`imaging`] | Probe/sink traits + the `image`-crate production backend |
//! | [`types`] | `DeckManifest`, the serialized hand-off artifact |
//! | [`output`] | CLI output formatting — pure format functions |
//!
//! # Design Decisions
//!
//! ## Width-Aware Greedy Wrap
//!
//! Rows break on actual rendered width, not on a fixed images-per-row
//! count. Dividing `n` images evenly into rows is simpler but can overflow
//! a row with wide images or leave rows lopsided; the greedy wrap is the
//! only policy that respects the canvas width for every row regardless of
//! the aspect mix.
//!
//! ## Uniform Row Height
//!
//! Row height is derived once from the page geometry and shared by every
//! row on every page. Scaling every image to the same height is what makes
//! a mixed bag of portraits, landscapes, and panoramas read as a grid.
//!
//! ## Oversize Images Are Flagged, Not Clipped
//!
//! An image whose aspect makes it wider than the usable row width gets its
//! own row and sticks out past the margin. Clipping or shrinking it would
//! break either the aspect guarantee or the uniform row height, so the
//! placement is emitted unclipped with
//! [`layout::Placement::overflows_row`] set and surfaced as a warning.
//!
//! ## Fail Fast, Never Partially
//!
//! A degenerate geometry (zero row height, no usable width) or a
//! zero-dimension image fails the whole invocation before any placement is
//! computed. Skipping a bad image would silently renumber every placement
//! after it.

pub mod config;
pub mod imaging;
pub mod layout;
pub mod output;
pub mod render;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
