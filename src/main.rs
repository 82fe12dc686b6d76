//! # Tilecrawl Main Entry Point
//!
//! Parses the command line, builds the dungeon and session, and runs the window loop.

use clap::Parser;
use log::info;
use macroquad::prelude::*;
use std::path::PathBuf;
use tilecrawl::{
    asset_manifest, AnimationLibrary, DungeonManifest, GameSession, GameSettings, InputHandler,
    JsonSaveStore, MacroquadDisplay, SceneManager, TilecrawlError, TilecrawlResult,
};

/// Command line arguments for Tilecrawl.
#[derive(Parser, Debug)]
#[command(name = "tilecrawl")]
#[command(about = "A tile-based dungeon crawler")]
#[command(version)]
struct Args {
    /// Directory holding the CSV room maps
    #[arg(long, default_value = "assets/maps")]
    maps: PathBuf,

    /// Directory holding the sprite sheets
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Save file
    #[arg(long, default_value = "save.json")]
    save: PathBuf,

    /// JSON settings file; defaults are used when absent
    #[arg(long)]
    settings: Option<PathBuf>,

    /// JSON dungeon manifest; the two-room classic dungeon is used when absent
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Ignore all damage
    #[arg(long)]
    god_mode: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Tilecrawl")]
async fn main() -> TilecrawlResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level)?;

    info!("Starting Tilecrawl v{}", tilecrawl::VERSION);

    let mut settings = match &args.settings {
        Some(path) => GameSettings::from_json_file(path)?,
        None => GameSettings::default(),
    };
    if args.god_mode {
        settings.god_mode = true;
    }

    let manifest = match &args.manifest {
        Some(path) => DungeonManifest::from_json_file(path)?,
        None => DungeonManifest::classic(),
    };

    request_new_screen_size(settings.viewport[0], settings.viewport[1]);

    let dungeon = manifest.build(&args.maps, &settings)?;
    let animations = AnimationLibrary::standard()?;
    let sheets = asset_manifest(&animations, &dungeon);

    let store = JsonSaveStore::new(&args.save);
    let session = GameSession::new(dungeon, settings, animations, Box::new(store))?;

    info!("Loading {} sprite sheets from {}", sheets.len(), args.assets.display());
    let display = MacroquadDisplay::load(&args.assets, &sheets).await;

    SceneManager::new(session, display, InputHandler::new())
        .run()
        .await?;

    info!("Game loop ended");
    Ok(())
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) -> TilecrawlResult<()> {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        // Also installs the bridge for records sent through `log`.
        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .try_init()
            .map_err(|e| TilecrawlError::InvalidState(format!("logging: {}", e)))?;
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .try_init()
            .map_err(|e| TilecrawlError::InvalidState(format!("logging: {}", e)))?;
    }

    Ok(())
}
