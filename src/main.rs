use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use eyre::{Context, Result};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{fs, io, path::PathBuf};
use tracing::{debug, info};

use tasklist::{ui, App, Config, SeedHandle, SeedLoader};

#[derive(Debug, Parser)]
#[command(name = "tasklist", version, about = "Terminal task list manager")]
struct Cli {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(long)]
    log_level: Option<String>,

    /// Override the seed endpoint
    #[arg(long)]
    seed_url: Option<String>,

    /// Start with an empty list instead of fetching seed data
    #[arg(long)]
    no_seed: bool,
}

fn parse_level(s: &str) -> tracing::Level {
    match s.to_uppercase().as_str() {
        "TRACE" => tracing::Level::TRACE,
        "DEBUG" => tracing::Level::DEBUG,
        "INFO" => tracing::Level::INFO,
        "WARN" | "WARNING" => tracing::Level::WARN,
        "ERROR" => tracing::Level::ERROR,
        _ => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
            tracing::Level::INFO
        }
    }
}

/// Log to a file; the terminal belongs to the UI.
fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tasklist")
        .join("logs");
    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let level = cli_log_level
        .or(config_log_level)
        .map_or(tracing::Level::INFO, parse_level);

    let log_file = fs::File::create(log_dir.join("tasklist.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if let Some(url) = cli.seed_url {
        config.seed.url = url;
    }
    if cli.no_seed {
        config.seed.enabled = false;
    }
    debug!(?config, "main: resolved config");

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let seed = if config.seed.enabled {
        SeedLoader::from_config(&config.seed).spawn(runtime.handle())
    } else {
        SeedHandle::disabled()
    };
    let mut app = App::new(seed);

    // Terminal setup
    enable_raw_mode()?;
    let guard = TerminalGuard;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = ui::run_app(&mut terminal, &mut app);

    drop(guard);
    terminal.show_cursor()?;

    // An unfinished seed fetch is abandoned here.
    runtime.shutdown_background();

    info!(tasks = app.store().len(), "Exiting");
    result.context("Terminal loop failed")
}
