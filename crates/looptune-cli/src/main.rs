use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use looptune_core::{Config, Jukebox, LoopSpec, StdoutConsole, SystemRunner};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Play a song or playlist from YouTube through mpv.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Song name, video link or playlist link. Prompted for when omitted.
    query_or_url: Option<String>,

    /// How often to loop: -1 forever (default), 0 once, N repeat N times.
    #[arg(allow_negative_numbers = true)]
    loop_count: Option<LoopSpec>,
}

fn init_logging() {
    let data_dir = looptune_core::platform::data_dir();
    let log_path = data_dir.join("looptune.log");

    let log_file = std::fs::create_dir_all(&data_dir).and_then(|_| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
    });

    match log_file {
        Ok(file) => {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                EnvFilter::new("info,looptune_core=debug,looptune=debug")
            });
            tracing_subscriber::fmt()
                .with_writer(file)
                .with_env_filter(filter)
                .with_ansi(false)
                .init();
        }
        Err(e) => {
            // Keep stdout free for mpv; only warnings reach stderr.
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(EnvFilter::new("warn"))
                .init();
            tracing::warn!("cannot open log file {}: {}", log_path.display(), e);
        }
    }
}

async fn prompt(question: &str) -> anyhow::Result<String> {
    print!("{}", question);
    std::io::stdout().flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read from stdin")?;
    Ok(line)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging();

    tracing::info!("looptune starting…");

    let config = Config::load().context("failed to load config")?;

    let input = match args.query_or_url {
        Some(input) => input,
        None => prompt("Enter song name: ").await?,
    };
    let loop_spec = args.loop_count.unwrap_or_default();

    let jukebox = Jukebox::new(config, Arc::new(SystemRunner), Arc::new(StdoutConsole));
    let outcome = jukebox.run(&input, loop_spec).await?;

    tracing::info!("done: {:?}", outcome);
    Ok(())
}
