use async_trait::async_trait;
use std::sync::Arc;

use super::{Prediction, PredictionError, Predictor, StatsStore, TeamId};

/// Number of recent matches the average is taken over.
const WINDOW: u32 = 8;

/// Predicts each side's goal count as its recent scoring average.
///
/// A zero average is a valid opinion, so this predictor never abstains.
pub struct AverageGoalsPredictor {
    stats: Arc<dyn StatsStore>,
}

impl AverageGoalsPredictor {
    pub fn new(stats: Arc<dyn StatsStore>) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl Predictor for AverageGoalsPredictor {
    fn name(&self) -> &'static str {
        "average_goals"
    }

    async fn predict(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Option<Prediction>, PredictionError> {
        let home_avg = self
            .stats
            .average_goals_in_last_matches(home_team_id, WINDOW)
            .await?;
        let away_avg = self
            .stats
            .average_goals_in_last_matches(away_team_id, WINDOW)
            .await?;

        // Half rounds up: an average of 2.5 becomes 3.
        Ok(Some(Prediction {
            home_goals: home_avg.round() as u32,
            away_goals: away_avg.round() as u32,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::fake::FakeStats;
    use crate::predictor::NO_TEAM;

    fn stats(home: f64, away: f64) -> Arc<FakeStats> {
        let mut fake = FakeStats::default();
        fake.average_goals.insert(1, home);
        fake.average_goals.insert(2, away);
        Arc::new(fake)
    }

    #[tokio::test]
    async fn rounds_half_up() {
        let predictor = AverageGoalsPredictor::new(stats(2.5, 2.4));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 3,
                away_goals: 2
            })
        );
    }

    #[tokio::test]
    async fn low_averages_round_down() {
        let predictor = AverageGoalsPredictor::new(stats(1.2, 0.49));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 1,
                away_goals: 0
            })
        );
    }

    #[tokio::test]
    async fn zero_average_is_still_an_opinion() {
        let predictor = AverageGoalsPredictor::new(Arc::new(FakeStats::default()));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 0,
                away_goals: 0
            })
        );
    }

    #[tokio::test]
    async fn sentinel_team_counts_as_zero() {
        let predictor = AverageGoalsPredictor::new(stats(2.0, 2.0));

        let prediction = predictor.predict(1, NO_TEAM).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 2,
                away_goals: 0
            })
        );
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let predictor = AverageGoalsPredictor::new(Arc::new(FakeStats::failing()));

        let result = predictor.predict(1, 2).await;
        assert!(matches!(result, Err(PredictionError::DataUnavailable(_))));
    }
}
