use async_trait::async_trait;
use std::sync::Arc;

use super::{Prediction, PredictionError, Predictor, StatsStore, TeamId};

/// Replays the most recent direct meeting of the two teams.
///
/// The flipped variant queries the fixture in reverse orientation,
/// treating the current away team as last year's home team, and swaps the
/// returned scores back so the prediction still lines up with the current
/// fixture. Running both variants feeds the ensemble the literal
/// historical result and its mirror image.
pub struct LastYearMatchPredictor {
    stats: Arc<dyn StatsStore>,
    flipped: bool,
}

impl LastYearMatchPredictor {
    pub fn new(stats: Arc<dyn StatsStore>) -> Self {
        Self {
            stats,
            flipped: false,
        }
    }

    pub fn flipped(stats: Arc<dyn StatsStore>) -> Self {
        Self {
            stats,
            flipped: true,
        }
    }
}

#[async_trait]
impl Predictor for LastYearMatchPredictor {
    fn name(&self) -> &'static str {
        if self.flipped {
            "last_year_match_flipped"
        } else {
            "last_year_match"
        }
    }

    async fn predict(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Option<Prediction>, PredictionError> {
        let (lookup_home, lookup_away) = if self.flipped {
            (away_team_id, home_team_id)
        } else {
            (home_team_id, away_team_id)
        };

        let scores = self
            .stats
            .last_year_match_scores(lookup_home, lookup_away)
            .await?;

        // No direct meeting on record is an abstention, not an error.
        Ok(scores.map(|(home_goals, away_goals)| {
            if self.flipped {
                Prediction {
                    home_goals: away_goals,
                    away_goals: home_goals,
                }
            } else {
                Prediction {
                    home_goals,
                    away_goals,
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::fake::FakeStats;

    fn stats_with_match(home: TeamId, away: TeamId, score: (u32, u32)) -> Arc<FakeStats> {
        let mut fake = FakeStats::default();
        fake.last_matches.insert((home, away), score);
        Arc::new(fake)
    }

    #[tokio::test]
    async fn returns_the_last_meeting_unchanged() {
        let predictor = LastYearMatchPredictor::new(stats_with_match(1, 2, (1, 2)));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 1,
                away_goals: 2
            })
        );
    }

    #[tokio::test]
    async fn flipped_swaps_teams_before_and_scores_after() {
        // The reverse fixture 2-1 ended 1-2; seen from the current
        // orientation that is a 2-1.
        let predictor = LastYearMatchPredictor::flipped(stats_with_match(2, 1, (1, 2)));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 2,
                away_goals: 1
            })
        );
    }

    #[tokio::test]
    async fn abstains_when_the_teams_never_met() {
        let predictor = LastYearMatchPredictor::new(Arc::new(FakeStats::default()));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(prediction, None);
    }

    #[tokio::test]
    async fn flipped_does_not_find_the_forward_fixture() {
        let predictor = LastYearMatchPredictor::flipped(stats_with_match(1, 2, (3, 0)));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(prediction, None);
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let predictor = LastYearMatchPredictor::new(Arc::new(FakeStats::failing()));

        let result = predictor.predict(1, 2).await;
        assert!(matches!(result, Err(PredictionError::DataUnavailable(_))));
    }
}
