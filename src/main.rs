//! galfetch CLI
//!
//! Retrieves an image gallery based on a provided URL: classifies the URL,
//! resolves the gallery listing, walks its pagination and downloads every
//! full-resolution image into a per-gallery folder.

use std::env;
use std::path::PathBuf;

use clap::Parser;
use galfetch::{
    config::Config,
    error::Result,
    services::GalleryRetriever,
    utils::http,
};

/// galfetch - Image Gallery Retriever
#[derive(Parser, Debug)]
#[command(
    name = "galfetch",
    version,
    about = "Retrieves image galleries based on the provided URL"
)]
struct Cli {
    /// Input URL pointing to a gallery or a photo
    #[arg(long)]
    url: String,

    /// Folder in which the gallery will be saved (defaults to the current directory)
    #[arg(long = "outputFolder")]
    output_folder: Option<PathBuf>,

    /// Path to a TOML config overriding the built-in site rules
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_or_default(path),
        None => Config::default(),
    };
    config.validate()?;

    let output_root = match cli.output_folder {
        Some(folder) => folder,
        None => env::current_dir()?,
    };

    let client = http::create_client(&config.client)?;
    let retriever = GalleryRetriever::discover(&config, client, &cli.url, &output_root).await?;
    retriever.save_images().await?;

    log::info!("Done!");

    Ok(())
}
