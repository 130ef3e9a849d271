//! scoreline CLI - operational commands for the prediction service

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::ProgressBar;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use scoreline::config::Config;
use scoreline::predictor::{default_ensemble, TeamId, NO_TEAM};
use scoreline::scraper::{MatchScraper, ScraperConfig};
use scoreline::store::Database;

#[derive(Parser)]
#[command(name = "scoreline")]
#[command(author, version, about = "Football match score prediction CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict the score of a fixture
    Predict {
        /// Home team name
        #[arg(long)]
        home: String,

        /// Away team name
        #[arg(long)]
        away: String,
    },

    /// Run one scraper pass against the configured results page
    Scrape,

    /// Import historical matches from a CSV file
    Import {
        /// CSV file with home_team,away_team,home_goals,away_goals,date rows
        #[arg(long)]
        file: PathBuf,
    },
}

/// One historical match row from an import file.
#[derive(Debug, Deserialize)]
struct HistoricalMatch {
    home_team: String,
    away_team: String,
    home_goals: u32,
    away_goals: u32,
    date: NaiveDate,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    let store = Arc::new(Database::connect(&config.database_url).await?);

    match cli.command {
        Commands::Predict { home, away } => predict(store, &home, &away).await,
        Commands::Scrape => scrape(&config, &store).await,
        Commands::Import { file } => import(&store, &file).await,
    }
}

async fn predict(store: Arc<Database>, home: &str, away: &str) -> Result<()> {
    let home_id = resolve_team(&store, home).await?;
    let away_id = resolve_team(&store, away).await?;

    let ensemble = default_ensemble(store);
    let prediction = ensemble.predict(home_id, away_id).await?;

    println!(
        "{} {} - {} {}",
        home.bold(),
        prediction.home_goals.to_string().green(),
        prediction.away_goals.to_string().green(),
        away.bold()
    );

    Ok(())
}

/// Unknown names fall back to the sentinel id, so a prediction is still
/// produced from the remaining signals.
async fn resolve_team(store: &Database, name: &str) -> Result<TeamId> {
    match store.team_id(name).await? {
        Some(id) => Ok(id),
        None => {
            eprintln!("{}", format!("unknown team {name:?}").yellow());
            Ok(NO_TEAM)
        }
    }
}

async fn scrape(config: &Config, store: &Database) -> Result<()> {
    let scraper = MatchScraper::new(ScraperConfig::new(config.scraper_url.clone()))?;
    scraper.refresh(store).await?;

    println!("{}", "scrape complete".green());
    Ok(())
}

async fn import(store: &Database, file: &Path) -> Result<()> {
    let mut reader = csv::Reader::from_path(file)
        .with_context(|| format!("failed to open {}", file.display()))?;

    let rows: Vec<HistoricalMatch> = reader
        .deserialize()
        .collect::<Result<_, _>>()
        .context("malformed match row")?;

    let bar = ProgressBar::new(rows.len() as u64);
    for row in &rows {
        store
            .upsert_match(
                &row.home_team,
                &row.away_team,
                row.home_goals,
                row.away_goals,
                row.date,
            )
            .await?;
        bar.inc(1);
    }
    bar.finish_and_clear();

    println!("{}", format!("imported {} matches", rows.len()).green());
    Ok(())
}
