//! Binary entrypoint for gallery-render.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use gallery_render::config::RenderSettings;
use gallery_render::model::{Band, thumbnail_for};
use gallery_render::ready::DocumentReady;
use gallery_render::{GalleryRenderer, logging};
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(
    name = "gallery-render",
    version,
    about = "Render a photo gallery into the page that embeds its configuration."
)]
struct Cli {
    /// Path to YAML render settings
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fill the gallery container of a page and write the result.
    Render {
        /// Page carrying the gallery blocks
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Where to write the rendered page (stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Validate the gallery blocks of a page and list its photos.
    Inspect {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },
    /// Print the thumbnail attachment index for each full-resolution index.
    Thumb {
        #[arg(value_name = "INDEX", required = true)]
        indices: Vec<u32>,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = try_main().await {
        error!(error = ?err, "gallery-render exited with error");
        std::process::exit(1);
    }
}

async fn try_main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let settings = load_settings(cli.settings.as_deref())?;
    let renderer = GalleryRenderer::new(settings);

    match cli.command {
        Commands::Render { input, output } => render(&renderer, &input, output.as_deref()).await,
        Commands::Inspect { input } => inspect(&renderer, &input),
        Commands::Thumb { indices } => thumbs(&indices),
    }
}

fn load_settings(path: Option<&Path>) -> Result<RenderSettings> {
    let settings = match path {
        Some(path) => RenderSettings::from_yaml_file(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };
    settings.validated().context("invalid render settings")
}

async fn render(renderer: &GalleryRenderer, input: &Path, output: Option<&Path>) -> Result<()> {
    let ready = DocumentReady::loading();
    let subscription = ready.subscribe();
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read page {}", input.display()))?;
    ready.fire();

    let rendered = renderer
        .render_when_ready(subscription, &html)
        .await
        .with_context(|| format!("failed to render gallery in {}", input.display()))?;

    match output {
        Some(path) => {
            std::fs::write(path, &rendered.page)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(output = %path.display(), photos = rendered.photo_count, "wrote rendered page");
        }
        None => std::io::stdout()
            .lock()
            .write_all(rendered.page.as_bytes())
            .context("failed to write rendered page to stdout")?,
    }
    Ok(())
}

fn inspect(renderer: &GalleryRenderer, input: &Path) -> Result<()> {
    let html = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read page {}", input.display()))?;
    let config = renderer
        .load(&html)
        .with_context(|| format!("invalid gallery blocks in {}", input.display()))?;
    let photo_path = config.identity.photo_path();

    println!("gallery:     {}", config.identity.gallery_uid());
    println!("name:        {}", config.metadata.name());
    println!("description: {}", config.metadata.description());
    println!("photos:      {}", config.metadata.photo_indices().len());
    for photo in config.photo_references()? {
        println!(
            "  {:<14} {:<9} {} {}",
            photo.caption(),
            photo.band().map_or("-", Band::as_str),
            photo.full_uri(photo_path),
            photo.thumb_uri(photo_path)
        );
    }
    Ok(())
}

fn thumbs(indices: &[u32]) -> Result<()> {
    for &full in indices {
        let thumb = thumbnail_for(full)?;
        println!("{full} -> {thumb}");
    }
    Ok(())
}
