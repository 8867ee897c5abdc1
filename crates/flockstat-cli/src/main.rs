use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use flockstat_core::{build_series, extract_metrics};
use flockstat_youtube::{YoutubeClient, YoutubeConfig};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "flockstat-cli")]
#[command(about = "Subscriber and chicken counts from channel captions")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the channel's uploads and print the day-indexed series as JSON
    Series {
        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },
    /// Print the metrics found in a single caption
    Extract {
        /// Caption file to read; stdin when omitted or `-`
        path: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Series { pretty } => run_series(pretty).await,
        Commands::Extract { path } => run_extract(path.as_deref()),
    }
}

async fn run_series(pretty: bool) -> anyhow::Result<()> {
    let config = flockstat_core::load_app_config()?;
    let client = YoutubeClient::new(YoutubeConfig::from_app_config(&config))?;

    let items = client.fetch_captioned_items().await?;
    let series = build_series(&items);
    tracing::info!(videos = items.len(), days = series.len(), "built series");

    let rendered = if pretty {
        serde_json::to_string_pretty(&series)?
    } else {
        serde_json::to_string(&series)?
    };
    println!("{rendered}");
    Ok(())
}

fn run_extract(path: Option<&Path>) -> anyhow::Result<()> {
    let caption = read_caption(path)?;
    let metrics = extract_metrics(&caption);
    println!("{}", serde_json::to_string(&metrics)?);
    Ok(())
}

fn read_caption(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(p) if p != Path::new("-") => std::fs::read_to_string(p)
            .with_context(|| format!("failed to read caption from {}", p.display())),
        _ => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read caption from stdin")?;
            Ok(buf)
        }
    }
}
