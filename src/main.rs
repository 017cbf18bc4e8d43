use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, ValueEnum};
use snake_autopilot::game::GameConfig;
use snake_autopilot::modes::{HeadlessMode, WatchMode};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_autopilot")]
#[command(version, about = "Self-steering snakes racing for a fixed list of apples")]
struct Cli {
    /// Watch the run in the terminal or print a report at the end
    #[arg(long, default_value = "watch")]
    mode: Mode,

    /// Number of serpents on the board
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u8).range(1..=2))]
    serpents: u8,

    /// Load the whole layout from a JSON file instead
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the board width
    #[arg(long)]
    width: Option<i32>,

    /// Override the board height
    #[arg(long)]
    height: Option<i32>,

    /// Pause between ticks in milliseconds (headless defaults to 0)
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Key that aborts the run
    #[arg(long)]
    abort_key: Option<char>,

    /// Abort a headless run after this many ticks
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    max_ticks: Option<u32>,

    /// Write logs to this file in watch mode
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Mode {
    /// Live terminal view
    Watch,
    /// No UI, plain-text report
    Headless,
}

fn build_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = match &cli.config {
        Some(path) => GameConfig::from_json_file(path)?,
        None if cli.serpents == 2 => GameConfig::duel(),
        None => GameConfig::single(),
    };

    if let Some(width) = cli.width {
        config.board_width = width;
    }
    if let Some(height) = cli.height {
        config.board_height = height;
    }
    if let Some(key) = cli.abort_key {
        config.abort_key = key;
    }
    config.tick_delay_ms = match (cli.delay_ms, cli.mode) {
        (Some(delay), _) => delay,
        (None, Mode::Headless) => 0,
        (None, Mode::Watch) => config.tick_delay_ms,
    };

    config
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;
    Ok(config)
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

/// The TUI owns the terminal, so watch mode only logs to a file
fn init_logging(mode: Mode, log_file: Option<&Path>) -> Result<()> {
    match (mode, log_file) {
        (_, Some(path)) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        (Mode::Headless, None) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_writer(std::io::stderr)
                .init();
        }
        (Mode::Watch, None) => {}
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.mode, cli.log_file.as_deref())?;
    let config = build_config(&cli)?;

    match cli.mode {
        Mode::Watch => {
            let mut watch_mode = WatchMode::new(config)?;
            watch_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_mode = HeadlessMode::new(config, cli.max_ticks)?;
            let report = headless_mode.run();
            headless_mode.write_report(&report, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
