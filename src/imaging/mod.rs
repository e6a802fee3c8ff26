//! Imaging — built on the `image` crate, no external tools.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Resize** | Lanczos3 |
//! | **Compose** | overlay onto an `RgbaImage` page canvas |
//! | **Encode** | PNG, one file per page |
//!
//! The module is split into:
//! - **Backend**: [`ImageProbe`] + [`PageSink`] traits and shared types
//! - **Png backend**: the production implementations using the `image` crate

pub mod backend;
pub mod png_backend;

pub use backend::{BackendError, Dimensions, ImageProbe, PageSink, PixelRect};
pub use png_backend::{FileProbe, PngSink, is_supported_image};
