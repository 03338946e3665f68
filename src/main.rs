use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_core::game::{BoundaryPolicy, GameConfig};
use snake_core::highscore::{DEFAULT_HIGH_SCORE_FILE, HighScoreStore};
use snake_core::modes::HumanMode;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake")]
#[command(version, about = "Terminal Snake")]
struct Cli {
    /// JSON file with game settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Edge length of the square grid
    #[arg(long)]
    grid_size: Option<usize>,

    /// Starting time between moves, in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Speed-up per food eaten, in milliseconds (0 disables)
    #[arg(long)]
    speed_step: Option<u64>,

    /// Fastest allowed time between moves, in milliseconds
    #[arg(long)]
    min_interval_ms: Option<u64>,

    /// What happens at the edge of the grid
    #[arg(long, value_enum)]
    boundary: Option<Boundary>,

    /// Where the best score is kept
    #[arg(long, default_value = DEFAULT_HIGH_SCORE_FILE)]
    high_score_file: PathBuf,

    /// Write logs to this file (the terminal is taken by the game)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Boundary {
    /// Hitting a wall ends the game
    Bounded,
    /// Leaving one edge re-enters from the opposite one
    Wrapping,
}

impl From<Boundary> for BoundaryPolicy {
    fn from(boundary: Boundary) -> Self {
        match boundary {
            Boundary::Bounded => BoundaryPolicy::Bounded,
            Boundary::Wrapping => BoundaryPolicy::Wrapping,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::from_json_file(path)?,
            None => GameConfig::default(),
        };

        if let Some(grid_size) = self.grid_size {
            config.grid_size = grid_size;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.initial_move_interval_ms = interval_ms;
        }
        if let Some(speed_step) = self.speed_step {
            config.speed_increase_step_ms = speed_step;
        }
        if let Some(min_interval_ms) = self.min_interval_ms {
            config.min_move_interval_ms = min_interval_ms;
        }
        if let Some(boundary) = self.boundary {
            config.boundary = boundary.into();
        }

        config.validate().context("Invalid game configuration")?;
        Ok(config)
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = cli.game_config()?;
    let store = HighScoreStore::new(cli.high_score_file.clone());

    let mut human_mode = HumanMode::new(config, store)?;
    human_mode.run().await?;

    Ok(())
}
