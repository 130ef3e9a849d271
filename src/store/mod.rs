//! Postgres persistence for teams, matches and scrape bookkeeping
//!
//! [`Database`] is the single concrete store. It backs the predictors'
//! [`StatsStore`](crate::predictor::StatsStore) data port as well as the
//! scraper's bookkeeping and the API's team lookup.

mod postgres;

pub use postgres::Database;

use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database query failed: {0}")]
    Query(#[from] sqlx::Error),

    #[error("database migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}
