use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use tagger::app::TaggerApp;
use tagger::{ImageData, Tagger, TaggerConfig};

#[derive(Parser, Debug)]
#[command(name = "tagger", version, about = "Tag regions of an image with rectangles")]
struct Cli {
    /// Image to tag. Without it the bundled example is shown.
    image: Option<PathBuf>,

    /// Image data JSON (url, dimensions, existing tags).
    #[arg(long, conflicts_with = "image")]
    data: Option<PathBuf>,

    /// Widget configuration JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Start in read-only mode.
    #[arg(long)]
    read_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("tagger=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => TaggerConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => TaggerConfig::default(),
    };
    if cli.read_only {
        config.allow_draw = false;
    }

    let image = match (&cli.image, &cli.data) {
        (Some(path), _) => Some(
            ImageData::from_image_file(path)
                .with_context(|| format!("opening image {}", path.display()))?,
        ),
        (None, Some(path)) => Some(
            ImageData::load(path).with_context(|| format!("loading data {}", path.display()))?,
        ),
        (None, None) => None,
    };

    let tagger = Tagger::new(config, image).context("initialising tagger")?;
    let container = tagger.container();

    let title = format!("tagger — {}", tagger.snap().url);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([
                (container.width as f32 + 40.0).max(640.0),
                (container.height as f32 + 320.0).max(480.0),
            ])
            .with_title(&title),
        ..Default::default()
    };

    eframe::run_native(
        &title,
        options,
        Box::new(move |_cc| Ok(Box::new(TaggerApp::new(tagger)))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run eframe: {err}"))
}
