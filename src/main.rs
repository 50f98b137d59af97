use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::audio::{AudioCue, Silent, TerminalBell};
use grid_snake::game::{GameConfig, GameEngine};
use grid_snake::logging;
use grid_snake::modes::HumanMode;
use grid_snake::session::GameLoop;
use grid_snake::storage::{HighScoreStore, JsonFileStore, MemoryStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake in the terminal, with levels and a high score")]
struct Cli {
    /// Grid width in cells (overrides the config file)
    #[arg(long, env = "GRID_SNAKE_WIDTH")]
    width: Option<usize>,

    /// Grid height in cells (overrides the config file)
    #[arg(long, env = "GRID_SNAKE_HEIGHT")]
    height: Option<usize>,

    /// JSON file with game settings; missing fields use defaults
    #[arg(long, env = "GRID_SNAKE_CONFIG")]
    config: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,

    /// Where to keep the high score
    #[arg(long, env = "GRID_SNAKE_HIGH_SCORE_FILE")]
    high_score_file: Option<PathBuf>,

    /// Keep the high score in memory only
    #[arg(long, conflicts_with = "high_score_file")]
    no_persist: bool,

    /// Directory for the log file
    #[arg(long, env = "GRID_SNAKE_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_file(path)?,
            None => GameConfig::default(),
        };
        if let Some(width) = self.width {
            config.grid_width = width;
        }
        if let Some(height) = self.height {
            config.grid_height = height;
        }
        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }

    fn high_score_store(&self) -> Box<dyn HighScoreStore> {
        if self.no_persist {
            return Box::new(MemoryStore::default());
        }
        match self.high_score_file.clone().or_else(JsonFileStore::default_path) {
            Some(path) => {
                tracing::info!(path = %path.display(), "high score file");
                Box::new(JsonFileStore::new(path))
            }
            None => {
                tracing::warn!("no data directory available, high score will not persist");
                Box::new(MemoryStore::default())
            }
        }
    }

    fn audio(&self) -> Box<dyn AudioCue> {
        if self.mute {
            Box::new(Silent)
        } else {
            Box::new(TerminalBell::new())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_dir = cli.log_dir.clone().unwrap_or_else(logging::default_log_dir);
    let _log_guard = logging::init(&log_dir)?;

    let config = cli.game_config()?;
    tracing::info!(?config, seed = ?cli.seed, "starting");

    let engine = match cli.seed {
        Some(seed) => GameEngine::seeded(config, seed),
        None => GameEngine::new(config),
    };
    let game = GameLoop::new(engine, cli.audio(), cli.high_score_store());

    let mut human_mode = HumanMode::new(game);
    human_mode.run().await
}
