//! scoreline - Football match score prediction service
//!
//! This library provides:
//! - An ensemble of heuristic score predictors combined by median
//! - A Postgres-backed store of historical match results
//! - A scraper that keeps the match history current
//! - The actix-web handlers of the prediction API
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use scoreline::predictor::default_ensemble;
//! use scoreline::store::Database;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let store = Arc::new(Database::connect("postgres://localhost/scoreline").await?);
//! let ensemble = default_ensemble(store);
//!
//! let prediction = ensemble.predict(1, 2).await?;
//! println!("{} - {}", prediction.home_goals, prediction.away_goals);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod predictor;
pub mod scraper;
pub mod store;

// Re-export commonly used types
pub use predictor::{CompositePredictor, Prediction, PredictionError, Predictor, TeamId, NO_TEAM};
