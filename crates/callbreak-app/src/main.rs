use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use callbreak_app::config::AppConfig;
use callbreak_app::driver::Driver;
use callbreak_app::logging::init_logging;
use callbreak_core::game::serialization::SessionSnapshot;
use callbreak_core::{AppInfo, Roster};

/// Score keeper for Call Break.
#[derive(Debug, Parser)]
#[command(
    name = "callbreak",
    author,
    version,
    about = "Call Break score keeper: guesses, obtained scores, totals and standings"
)]
struct Cli {
    /// Path to a YAML configuration file.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Player name, in seating order. Repeat for each player; play starts
    /// immediately when every name is filled in.
    #[arg(short, long = "player", value_name = "NAME")]
    players: Vec<String>,

    /// How long the leader announcement stays up.
    #[arg(long, value_name = "SECONDS")]
    notice_seconds: Option<u64>,

    /// Override the tracing level (trace, debug, info, warn, error).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Print the final session as JSON after quitting.
    #[arg(long)]
    json: bool,

    /// Exit after validating the configuration.
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };

    if !cli.players.is_empty() {
        config.players = cli.players;
    }

    if let Some(seconds) = cli.notice_seconds {
        config.notice_seconds = seconds;
    }

    if let Some(level) = cli.log_level {
        config.logging.tracing_level = level;
    }

    config.validate()?;

    if cli.validate_only {
        println!(
            "Configuration valid: {} prefilled player{}, notice {}s",
            config.players.len(),
            if config.players.len() == 1 { "" } else { "s" },
            config.notice_seconds
        );
        return Ok(());
    }

    let _logging_guard = init_logging(&config.logging)?;
    tracing::info!(
        app = AppInfo::name(),
        codename = AppInfo::codename(),
        version = AppInfo::version(),
        "starting"
    );

    let prefilled = !config.players.is_empty();
    let roster = Roster::with_names(config.players.iter().cloned());
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut driver = Driver::new(stdin.lock(), stdout.lock(), roster)
        .with_notice_duration(config.notice_duration());
    if prefilled {
        driver = driver.start_immediately();
    }

    let session = driver.run()?;

    if cli.json {
        if let Some(session) = session.as_ref() {
            let json = SessionSnapshot::to_json(session).context("serializing session")?;
            println!("{json}");
        }
    }

    Ok(())
}
