//! Deck configuration module.
//!
//! Handles loading and validating `config.toml`. Configuration is sparse:
//! stock defaults cover everything, user files override only the keys they
//! name, and unknown keys are rejected to catch typos early.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [canvas]
//! width = 13.333          # Page width in canvas units (16:9 slide, inches)
//! height = 7.5            # Page height
//! header_height = 0.6     # Band reserved at the top of every page
//!
//! [layout]
//! margin = 0.2            # Inset from every page edge
//! spacing = 0.1           # Gap between adjacent images and rows
//! rows_per_page = 4       # Fixed row budget per page
//!
//! [render]
//! pixels_per_unit = 96.0  # Canvas unit → output pixel scale
//! background = "#ffffff"  # Page background color
//!
//! [processing]
//! max_workers = 4         # Max parallel dimension probes (omit for auto)
//! ```
//!
//! The `[canvas]` and `[layout]` sections together form the
//! [`LayoutConfig`](crate::layout::LayoutConfig) handed to the paginator;
//! [`DeckConfig::validate`] runs the same fail-fast geometry check the
//! paginator runs, so a bad geometry is reported at load time rather than
//! mid-pipeline.

use crate::layout::LayoutConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Deck configuration loaded from `config.toml`.
///
/// All fields have stock defaults matching a 16:9 slide in inches. User
/// config files need only specify the values they want to override.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeckConfig {
    /// Page geometry (size, reserved header band).
    pub canvas: CanvasConfig,
    /// Packing parameters (margin, spacing, row budget).
    pub layout: LayoutSettings,
    /// Page compositing settings (pixel scale, background).
    pub render: RenderConfig,
    /// Parallel processing settings.
    pub processing: ProcessingConfig,
}

impl DeckConfig {
    /// Flatten `[canvas]` + `[layout]` into the paginator's config.
    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            canvas_width: self.canvas.width,
            canvas_height: self.canvas.height,
            header_height: self.canvas.header_height,
            margin: self.layout.margin,
            spacing: self.layout.spacing,
            rows_per_page: self.layout.rows_per_page,
        }
    }

    /// Validate config values are within acceptable ranges.
    ///
    /// Geometry is checked by deriving the row height, so any config that
    /// passes here is guaranteed to be accepted by the paginator.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout_config()
            .row_height()
            .map_err(|e| ConfigError::Validation(e.to_string()))?;
        if !(self.render.pixels_per_unit > 0.0) {
            return Err(ConfigError::Validation(
                "render.pixels_per_unit must be positive".into(),
            ));
        }
        parse_hex_color(&self.render.background)
            .map_err(|e| ConfigError::Validation(format!("render.background: {e}")))?;
        Ok(())
    }
}

/// Page geometry, in canvas units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
    /// Band reserved at the top of every page for an externally drawn title.
    pub header_height: f64,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        // 16:9 slide in inches
        Self {
            width: 13.333,
            height: 7.5,
            header_height: 0.6,
        }
    }
}

/// Packing parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutSettings {
    /// Uniform inset from every page edge.
    pub margin: f64,
    /// Gap between adjacent images and between rows.
    pub spacing: f64,
    /// Fixed number of image rows per page.
    pub rows_per_page: u32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            margin: 0.2,
            spacing: 0.1,
            rows_per_page: 4,
        }
    }
}

/// Page compositing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Canvas unit → output pixel scale. 96 maps inches to CSS pixels.
    pub pixels_per_unit: f64,
    /// Page background as `#rrggbb`.
    pub background: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixels_per_unit: 96.0,
            background: "#ffffff".to_string(),
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel dimension-probe workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

/// Parse a `#rrggbb` color string into RGB components.
pub fn parse_hex_color(s: &str) -> Result<[u8; 3], String> {
    let hex = s
        .strip_prefix('#')
        .ok_or_else(|| format!("expected #rrggbb, got {s:?}"))?;
    if hex.len() != 6 {
        return Err(format!("expected 6 hex digits, got {s:?}"));
    }
    let parse = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| format!("invalid hex digits in {s:?}"))
    };
    Ok([parse(0..2)?, parse(2..4)?, parse(4..6)?])
}

/// Load config from `config.toml` in the given directory.
///
/// Returns stock defaults when no file exists. Rejects unknown keys and
/// validates the result.
pub fn load_config(dir: &Path) -> Result<DeckConfig, ConfigError> {
    let config_path = dir.join("config.toml");
    let config = if config_path.exists() {
        let content = fs::read_to_string(&config_path)?;
        toml::from_str(&content)?
    } else {
        DeckConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# slidegrid Configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Each section only needs the keys it wants to override.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Canvas - page geometry in canvas units (defaults are inches, 16:9 slide)
# ---------------------------------------------------------------------------
[canvas]
width = 13.333

height = 7.5

# Band reserved at the top of every page, e.g. for a title drawn by the
# consumer of deck.json. Images start below it.
header_height = 0.6

# ---------------------------------------------------------------------------
# Layout - packing parameters
# ---------------------------------------------------------------------------
[layout]
# Inset from every page edge.
margin = 0.2

# Gap between adjacent images and between rows.
spacing = 0.1

# Fixed number of image rows per page. Row height is derived:
#   (height - header_height - 2*margin - (rows_per_page-1)*spacing) / rows_per_page
# and must come out positive, or the config is rejected.
rows_per_page = 4

# ---------------------------------------------------------------------------
# Render - page compositing
# ---------------------------------------------------------------------------
[render]
# Canvas unit -> output pixel scale. 96 maps inches to CSS pixels;
# a 13.333 x 7.5 canvas renders as 1280 x 720 pages.
pixels_per_unit = 96.0

# Page background color as #rrggbb.
background = "#ffffff"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel dimension-probe workers.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_workers = 4
"##
}
