// src/main.rs

use clap::Parser;
use recap::{ChessComClient, RecapConfig, RecapService};
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

/// Season recap analytics for a chess.com player
#[derive(Parser, Debug)]
#[command(name = "recap", version, about)]
struct Cli {
    /// Player username to analyze
    username: String,

    /// Print the redacted view instead of the full report
    #[arg(long)]
    view: bool,

    /// Also print the player's profile summary
    #[arg(long)]
    profile: bool,

    /// Analysis season (calendar year); overrides RECAP_SEASON
    #[arg(long, env = "RECAP_SEASON")]
    season: Option<i32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let mut config = RecapConfig::from_env();
    if let Some(season) = cli.season {
        config.season = season;
    }
    info!(username = %cli.username, season = config.season, "starting recap");

    let client = Arc::new(ChessComClient::new(&config));
    let service = RecapService::new(client, config);

    if cli.profile {
        let profile = service.profile(&cli.username).await?;
        println!("{}", serde_json::to_string_pretty(&profile)?);
    }

    if cli.view {
        let view = service.report_view(&cli.username).await?;
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        let report = service.report(&cli.username).await?;
        println!("{}", serde_json::to_string_pretty(&*report)?);
    }

    Ok(())
}
