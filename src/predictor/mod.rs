//! Match score prediction ensemble
//!
//! A fixed set of cheap heuristic predictors, each producing an independent
//! guess for the final score of a fixture, combined into one consensus
//! value by [`CompositePredictor`] using a per-side median.
//!
//! A predictor may abstain (`Ok(None)`) when it has nothing to say, e.g.
//! when the two teams never met before. Abstentions are simply left out of
//! the median; hard data errors abort the whole ensemble call.

mod average_goals;
mod composite;
mod home_advantage;
mod last_year_match;
mod leaderboard_difference;

pub use average_goals::AverageGoalsPredictor;
pub use composite::CompositePredictor;
pub use home_advantage::HomeAdvantagePredictor;
pub use last_year_match::LastYearMatchPredictor;
pub use leaderboard_difference::LeaderboardDifferencePredictor;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::store::StoreError;

/// Integer key identifying a team in the historical match data.
pub type TeamId = i32;

/// Sentinel id for "no known team". Data lookups treat it as a cheap
/// no-op and return a neutral zero result instead of querying.
pub const NO_TEAM: TeamId = -1;

/// A predicted final score for a single fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prediction {
    pub home_goals: u32,
    pub away_goals: u32,
}

/// Prediction errors
#[derive(Debug, Error)]
pub enum PredictionError {
    /// The ensemble was configured without any predictors.
    #[error("no predictors configured")]
    NoPredictors,

    /// Every configured predictor abstained.
    #[error("no predictions available")]
    NoPredictionsAvailable,

    /// A historical-data lookup failed.
    #[error("historical data unavailable: {0}")]
    DataUnavailable(#[from] StoreError),
}

/// Read access to historical match data, as consumed by the predictors.
#[async_trait]
pub trait StatsStore: Send + Sync {
    /// Average goals scored by `team_id` over its most recent `window`
    /// matches, counting both home and away appearances, most recent
    /// first. The sentinel team and a team without any recorded matches
    /// both yield `0.0`.
    async fn average_goals_in_last_matches(
        &self,
        team_id: TeamId,
        window: u32,
    ) -> Result<f64, StoreError>;

    /// Score of the most recent match between exactly this ordered
    /// home/away pair, or `None` if the pair never met in this
    /// orientation.
    async fn last_year_match_scores(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Option<(u32, u32)>, StoreError>;

    /// Accumulated points per team for all matches since the start of the
    /// current season (win 3, draw 1 each).
    async fn current_season_leaderboard(&self) -> Result<HashMap<TeamId, u32>, StoreError>;
}

/// One independent heuristic producing a score guess from two team ids.
///
/// `Ok(None)` is an explicit abstention, distinct from an error: the
/// predictor has no opinion and its vote is excluded from aggregation.
#[async_trait]
pub trait Predictor: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn predict(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Option<Prediction>, PredictionError>;
}

/// The standard ensemble in its fixed evaluation order.
pub fn default_ensemble(stats: Arc<dyn StatsStore>) -> CompositePredictor {
    CompositePredictor::new(vec![
        Box::new(HomeAdvantagePredictor),
        Box::new(AverageGoalsPredictor::new(stats.clone())),
        Box::new(LastYearMatchPredictor::new(stats.clone())),
        Box::new(LastYearMatchPredictor::flipped(stats.clone())),
        Box::new(LeaderboardDifferencePredictor::new(stats)),
    ])
}


#[cfg(test)]
pub(crate) mod fake {
    use super::*;

    /// In-memory stand-in for the match database.
    #[derive(Default)]
    pub struct FakeStats {
        pub average_goals: HashMap<TeamId, f64>,
        pub last_matches: HashMap<(TeamId, TeamId), (u32, u32)>,
        pub leaderboard: HashMap<TeamId, u32>,
        pub fail: bool,
    }

    impl FakeStats {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::Query(sqlx::Error::PoolClosed));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl StatsStore for FakeStats {
        async fn average_goals_in_last_matches(
            &self,
            team_id: TeamId,
            _window: u32,
        ) -> Result<f64, StoreError> {
            self.check()?;
            if team_id == NO_TEAM {
                return Ok(0.0);
            }
            Ok(self.average_goals.get(&team_id).copied().unwrap_or(0.0))
        }

        async fn last_year_match_scores(
            &self,
            home_team_id: TeamId,
            away_team_id: TeamId,
        ) -> Result<Option<(u32, u32)>, StoreError> {
            self.check()?;
            Ok(self
                .last_matches
                .get(&(home_team_id, away_team_id))
                .copied())
        }

        async fn current_season_leaderboard(&self) -> Result<HashMap<TeamId, u32>, StoreError> {
            self.check()?;
            Ok(self.leaderboard.clone())
        }
    }
}
