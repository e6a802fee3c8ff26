//! CLI output formatting for all pipeline stages.
//!
//! # Output Format
//!
//! ## Layout
//!
//! ```text
//! Page 001 (4 images, 2 rows)
//!     001 001-dawn.jpg        row 1  x 0.20  y 0.80  w 1.55
//!     002 002-peak.jpg        row 1  x 1.85  y 0.80  w 2.76
//!     003 003-pano.jpg        row 2  x 0.20  y 2.45  w 14.02  ! wider than row
//!     004 004-lake.jpg        row 3  x 0.20  y 4.10  w 1.16
//! Laid out 4 images across 1 page
//! ```
//!
//! Placements wider than the usable row width carry a `! wider than row`
//! marker — they are rendered unclipped, so the warning is the only signal.
//!
//! ## Render
//!
//! ```text
//! page-001.png (1280x720)
//! page-002.png (1280x720)
//! Rendered 5 images onto 2 pages
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::types::DeckManifest;
use std::path::{Path, PathBuf};

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

/// Format the layout result, one page header per page with its placements
/// indented beneath it.
pub fn format_layout_output(manifest: &DeckManifest) -> Vec<String> {
    let mut lines = Vec::new();

    for page in 0..manifest.page_count {
        let on_page: Vec<_> = manifest
            .placements
            .iter()
            .enumerate()
            .filter(|(_, p)| p.page_index == page)
            .collect();
        let rows = on_page.last().map_or(0, |(_, p)| p.row_index as usize + 1);
        lines.push(format!(
            "Page {} ({}, {})",
            format_index(page + 1),
            plural(on_page.len(), "image"),
            plural(rows, "row"),
        ));
        for (position, p) in on_page {
            let marker = if p.overflows_row { "  ! wider than row" } else { "" };
            lines.push(format!(
                "{}{} {:<20}row {}  x {:.2}  y {:.2}  w {:.2}{}",
                indent(1),
                format_index(position + 1),
                p.id,
                p.row_index + 1,
                p.x,
                p.y,
                p.rendered_width,
                marker,
            ));
        }
    }

    lines.push(format!(
        "Laid out {} across {}",
        plural(manifest.placements.len(), "image"),
        plural(manifest.page_count, "page"),
    ));
    lines
}

/// Format the render result: one line per written page plus a summary.
pub fn format_render_output(pages: &[PathBuf], placed: usize, page_size: (u32, u32)) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|p| {
            format!(
                "{} ({}x{})",
                p.file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| p.display().to_string()),
                page_size.0,
                page_size.1,
            )
        })
        .collect();
    lines.push(format!(
        "Rendered {} onto {}",
        plural(placed, "image"),
        plural(pages.len(), "page"),
    ));
    lines
}

/// Format the check summary: geometry facts plus any overflow warnings.
pub fn format_check_output(manifest: &DeckManifest, source: &Path) -> Vec<String> {
    let mut lines = vec![
        format!("Source: {}", source.display()),
        format!(
            "{} on {}, row height {:.3}",
            plural(manifest.images.len(), "image"),
            plural(manifest.page_count, "page"),
            manifest.row_height,
        ),
    ];
    for p in manifest.placements.iter().filter(|p| p.overflows_row) {
        lines.push(format!(
            "{}Warning: {} is wider than the usable row ({:.2} > {:.2})",
            indent(1),
            p.id,
            p.rendered_width,
            manifest.config.layout_config().usable_row_width(),
        ));
    }
    lines
}

pub fn print_layout_output(manifest: &DeckManifest) {
    for line in format_layout_output(manifest) {
        println!("{line}");
    }
}

pub fn print_render_output(pages: &[PathBuf], placed: usize, page_size: (u32, u32)) {
    for line in format_render_output(pages, placed, page_size) {
        println!("{line}");
    }
}

pub fn print_check_output(manifest: &DeckManifest, source: &Path) {
    for line in format_check_output(manifest, source) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeckConfig;
    use crate::layout::{self, LayoutConfig};
    use crate::scan::SourceImage;
    use crate::test_helpers::square_specs;
    use crate::types::DeckManifest;

    fn manifest_for(n: usize) -> DeckManifest {
        let config = DeckConfig {
            canvas: crate::config::CanvasConfig {
                width: 10.0,
                height: 10.0,
                header_height: 1.0,
            },
            layout: crate::config::LayoutSettings {
                margin: 1.0,
                spacing: 0.5,
                rows_per_page: 2,
            },
            ..DeckConfig::default()
        };
        let specs = square_specs(n);
        let images: Vec<SourceImage> = specs
            .iter()
            .map(|s| SourceImage {
                id: s.id.clone(),
                path: format!("images/{}", s.id).into(),
                pixel_width: s.pixel_width,
                pixel_height: s.pixel_height,
            })
            .collect();
        let result = layout::layout(&config.layout_config(), &specs).unwrap();
        DeckManifest::new(config, images, result)
    }

    #[test]
    fn layout_output_groups_by_page() {
        // 2 per row, 2 rows per page: 5 squares span two pages
        let lines = format_layout_output(&manifest_for(5));
        assert_eq!(lines[0], "Page 001 (4 images, 2 rows)");
        assert!(lines[5].starts_with("Page 002 (1 image, 1 row)"));
        assert_eq!(lines.last().unwrap(), "Laid out 5 images across 2 pages");
    }

    #[test]
    fn layout_output_indents_placements() {
        let lines = format_layout_output(&manifest_for(2));
        assert!(lines[1].starts_with("    001 img-000.jpg"));
        assert!(lines[1].contains("row 1"));
        assert!(lines[1].contains("x 1.00"));
    }

    #[test]
    fn layout_output_marks_overflow() {
        let config = LayoutConfig {
            canvas_width: 10.0,
            canvas_height: 10.0,
            header_height: 1.0,
            margin: 1.0,
            spacing: 0.5,
            rows_per_page: 2,
        };
        let specs = vec![crate::test_helpers::spec("pano.jpg", 10000, 100)];
        let result = layout::layout(&config, &specs).unwrap();
        let images = vec![SourceImage {
            id: "pano.jpg".to_string(),
            path: "images/pano.jpg".into(),
            pixel_width: 10000,
            pixel_height: 100,
        }];
        let mut deck_config = DeckConfig::default();
        deck_config.canvas.width = 10.0;
        deck_config.canvas.height = 10.0;
        deck_config.canvas.header_height = 1.0;
        deck_config.layout.margin = 1.0;
        deck_config.layout.spacing = 0.5;
        deck_config.layout.rows_per_page = 2;
        let manifest = DeckManifest::new(deck_config, images, result);

        let lines = format_layout_output(&manifest);
        assert!(lines[1].ends_with("! wider than row"));

        let check = format_check_output(&manifest, Path::new("images"));
        assert!(check.iter().any(|l| l.contains("Warning: pano.jpg")));
    }

    #[test]
    fn render_output_lists_pages_and_summary() {
        let pages = vec![PathBuf::from("deck/page-001.png"), PathBuf::from("deck/page-002.png")];
        let lines = format_render_output(&pages, 5, (1280, 720));
        assert_eq!(lines[0], "page-001.png (1280x720)");
        assert_eq!(lines[1], "page-002.png (1280x720)");
        assert_eq!(lines[2], "Rendered 5 images onto 2 pages");
    }

    #[test]
    fn check_output_states_geometry() {
        let lines = format_check_output(&manifest_for(4), Path::new("images"));
        assert_eq!(lines[0], "Source: images");
        assert_eq!(lines[1], "4 images on 1 page, row height 3.250");
    }

    #[test]
    fn indent_and_index_helpers() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
        assert_eq!(format_index(7), "007");
        assert_eq!(plural(1, "page"), "1 page");
        assert_eq!(plural(3, "page"), "3 pages");
    }
}
