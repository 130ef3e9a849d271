//! HTTP handlers

pub mod health;
pub mod predict;
pub mod team;

use std::sync::Arc;

use crate::predictor::CompositePredictor;
use crate::scraper::MatchScraper;
use crate::store::Database;

/// Application state shared across handlers.
///
/// Everything in here is read-only after startup, so one instance serves
/// all concurrent requests.
pub struct AppState {
    pub store: Arc<Database>,
    pub scraper: MatchScraper,
    pub predictor: CompositePredictor,
}
