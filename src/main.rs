use clap::{Parser, Subcommand};
use slidegrid::imaging::{FileProbe, PngSink};
use slidegrid::types::DeckManifest;
use slidegrid::{config, layout, output, render, scan};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "slidegrid")]
#[command(about = "Lay out images onto fixed-size slide pages")]
#[command(long_about = "\
Lay out images onto fixed-size slide pages

Images are taken from the source directory in filename order and packed
onto pages left to right, top to bottom, at a uniform row height that
preserves every aspect ratio. Rows wrap when the next image would cross
the right margin; pages break when the row budget is spent.

  images/
  ├── config.toml        # Deck config (optional)
  ├── 001-dawn.jpg       # Filename order is layout order
  ├── 002-peak.jpg
  └── 003-pano.jpg       # Wider than a row? Placed alone, flagged, never clipped

Outputs:
  deck.json              # Every placement in canvas units, for external tools
  page-001.png, ...      # Composited pages (render command)

Run 'slidegrid gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Source directory of images
    #[arg(long, default_value = "images", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "deck", global = true)]
    output: PathBuf,

    /// Directory holding config.toml (defaults to the source directory)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Scan and lay out images, writing deck.json
    Layout,
    /// Full pipeline: layout plus composited PNG pages
    Render,
    /// Validate config and source images without writing output
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config_dir = cli.config_dir.as_deref().unwrap_or(&cli.source);
    let deck_config = config::load_config(config_dir)?;
    init_thread_pool(&deck_config.processing);

    match cli.command {
        Command::Layout => {
            let manifest = lay_out(&cli.source, deck_config)?;
            write_manifest(&cli.output, &manifest)?;
            output::print_layout_output(&manifest);
        }
        Command::Render => {
            let manifest = lay_out(&cli.source, deck_config)?;
            write_manifest(&cli.output, &manifest)?;

            let render_cfg = &manifest.config.render;
            let scale = render_cfg.pixels_per_unit;
            let page_width = (manifest.config.canvas.width * scale).round() as u32;
            let page_height = (manifest.config.canvas.height * scale).round() as u32;
            let background = config::parse_hex_color(&render_cfg.background)
                .map_err(config::ConfigError::Validation)?;

            let mut sink = PngSink::new(&cli.output, page_width, page_height, background);
            let result = layout::LayoutResult {
                placements: manifest.placements.clone(),
                page_count: manifest.page_count,
                row_height: manifest.row_height,
            };
            let summary = render::render(&result, &manifest.images, &mut sink, scale)?;

            output::print_layout_output(&manifest);
            output::print_render_output(&summary.pages, summary.placed, (page_width, page_height));
        }
        Command::Check => {
            let manifest = lay_out(&cli.source, deck_config)?;
            output::print_check_output(&manifest, &cli.source);
            println!("Deck is valid");
        }
        Command::GenConfig => unreachable!("handled above"),
    }

    Ok(())
}

/// Scan the source directory and run the paginator.
fn lay_out(
    source: &Path,
    deck_config: config::DeckConfig,
) -> Result<DeckManifest, Box<dyn std::error::Error>> {
    let images = scan::scan(source, &FileProbe::new())?;
    let specs = scan::to_specs(&images);
    let result = layout::layout(&deck_config.layout_config(), &specs)?;
    Ok(DeckManifest::new(deck_config, images, result))
}

/// Write deck.json into the output directory.
fn write_manifest(out_dir: &Path, manifest: &DeckManifest) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(out_dir)?;
    let json = serde_json::to_string_pretty(manifest)?;
    std::fs::write(out_dir.join("deck.json"), json)?;
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores — user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
