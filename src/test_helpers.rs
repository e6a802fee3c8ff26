//! Shared test utilities for the slidegrid test suite.
//!
//! Small constructors for layout inputs so tests read as geometry, not as
//! struct literals.

use crate::layout::ImageSpec;

/// Build an [`ImageSpec`] from an id and pixel dimensions.
pub fn spec(id: &str, pixel_width: u32, pixel_height: u32) -> ImageSpec {
    ImageSpec::new(id, pixel_width, pixel_height)
}

/// `n` square 400x400 specs named `img-000.jpg`, `img-001.jpg`, ...
///
/// Squares render at exactly `row_height` width, which makes per-row
/// capacities easy to reason about in tests.
pub fn square_specs(n: usize) -> Vec<ImageSpec> {
    (0..n)
        .map(|i| spec(&format!("img-{i:03}.jpg"), 400, 400))
        .collect()
}
