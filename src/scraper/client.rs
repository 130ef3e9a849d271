//! HTTP client with retry for the results page

use chrono::Utc;
use std::time::Duration;
use tracing::{info, warn};

use super::{parse_match_results, ScraperError};
use crate::store::Database;

/// Scraper configuration
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// URL of the results page.
    pub url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Max retry attempts.
    pub max_retries: u32,
    /// User agent string.
    pub user_agent: String,
}

impl ScraperConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout_secs: 30,
            max_retries: 3,
            user_agent: "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36".to_string(),
        }
    }
}

/// Match results scraper with a once-per-day guard.
pub struct MatchScraper {
    client: reqwest::Client,
    config: ScraperConfig,
}

impl MatchScraper {
    /// Create a new scraper with the given configuration.
    pub fn new(config: ScraperConfig) -> Result<Self, ScraperError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch the results page and upsert every finished match it lists.
    /// Does nothing when a pass already ran today.
    pub async fn refresh(&self, store: &Database) -> Result<(), ScraperError> {
        if let Some(last) = store.last_scrape().await? {
            if last.date_naive() == Utc::now().date_naive() {
                return Ok(());
            }
        }

        info!("scraping results from {}", self.config.url);
        let html = self.fetch_page().await?;
        let matches = parse_match_results(&html)?;
        info!("scraped {} finished matches", matches.len());

        for scraped in &matches {
            store
                .upsert_match(
                    &scraped.home_team,
                    &scraped.away_team,
                    scraped.home_goals,
                    scraped.away_goals,
                    scraped.date,
                )
                .await?;
        }

        store.record_scrape(Utc::now()).await?;

        Ok(())
    }

    /// Fetch the results page with retry and linear backoff.
    async fn fetch_page(&self) -> Result<String, ScraperError> {
        for attempt in 0..self.config.max_retries {
            match self.client.get(&self.config.url).send().await {
                Ok(response) => {
                    if response.status().is_success() {
                        return response.text().await.map_err(ScraperError::RequestFailed);
                    }
                    warn!(
                        "request failed with status {} (attempt {}/{})",
                        response.status(),
                        attempt + 1,
                        self.config.max_retries
                    );
                }
                Err(e) => {
                    warn!(
                        "request failed (attempt {}/{}): {}",
                        attempt + 1,
                        self.config.max_retries,
                        e
                    );
                }
            }

            if attempt + 1 < self.config.max_retries {
                tokio::time::sleep(Duration::from_millis(500 * (attempt as u64 + 1))).await;
            }
        }

        Err(ScraperError::RetriesExhausted {
            url: self.config.url.clone(),
            attempts: self.config.max_retries,
        })
    }
}
