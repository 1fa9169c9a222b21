use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_env::game::GameConfig;
use snake_env::modes::{ConsoleMode, HumanMode};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::Level;

#[derive(Parser)]
#[command(name = "snake_env")]
#[command(version, about = "Grid Snake environment with a terminal front-end")]
struct Cli {
    /// How to drive the game
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid height (rows)
    #[arg(long)]
    height: Option<usize>,

    /// Grid width (columns)
    #[arg(long)]
    width: Option<usize>,

    /// RNG seed for start placement and food spawning
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with a game configuration; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log verbosity
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,

    /// Write logs to this file (required for logs in human mode)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Type l/d/r/u lines and read the board as integers
    Console,
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

impl Cli {
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match (&self.config, self.mode) {
            (Some(path), _) => GameConfig::from_json_file(path)?,
            (None, Mode::Human) => GameConfig::default(),
            // Same board the line-driven game has always used
            (None, Mode::Console) => GameConfig::new(12, 10).with_seed(73),
        };

        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        Ok(config)
    }
}

/// The TUI draws on stderr, so human mode only logs when given a file
fn init_logging(level: Level, log_file: Option<&Path>, mode: Mode) -> Result<()> {
    let builder = tracing_subscriber::fmt().with_max_level(level);

    match (log_file, mode) {
        (Some(path), _) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (None, Mode::Console) => builder.with_writer(std::io::stderr).init(),
        (None, Mode::Human) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.into(), cli.log_file.as_deref(), cli.mode)?;

    let config = cli.game_config()?;
    let config_json = config.to_json()?;
    tracing::info!(config = %config_json, "starting");

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let mut human_mode = HumanMode::new(config)?;
            human_mode.run().await?;
        }
        Mode::Console => {
            let mut console_mode = ConsoleMode::new(config)?;
            console_mode.run(std::io::stdin().lock(), std::io::stdout().lock())?;
        }
    }

    Ok(())
}
