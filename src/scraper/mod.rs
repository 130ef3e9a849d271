//! Web scraper for the fcupdate.nl results page
//!
//! Keeps the historical match data current: pulls the finished matches
//! from the configured results page and upserts them into the store. A
//! pass runs at most once per day, guarded by the store's scrape
//! bookkeeping, so the predict endpoint can trigger it on every request.

mod client;
mod parser;

pub use client::{MatchScraper, ScraperConfig};
pub use parser::{parse_dutch_date, parse_match_results};

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::StoreError;

/// A finished match lifted from the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapedMatch {
    pub home_team: String,
    pub away_team: String,
    pub home_goals: u32,
    pub away_goals: u32,
    pub date: NaiveDate,
}

/// Scraper errors
#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("giving up on {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("failed to parse results page: {0}")]
    ParseError(String),

    #[error("failed to persist scraped results: {0}")]
    Store(#[from] StoreError),
}
