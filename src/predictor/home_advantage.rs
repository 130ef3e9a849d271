use async_trait::async_trait;

use super::{Prediction, PredictionError, Predictor, TeamId};

/// Always predicts a 1-0 home win.
///
/// Encodes the home-field prior that home teams score about one more goal
/// than visitors, and gives the median an always-present vote biased
/// toward the home side.
pub struct HomeAdvantagePredictor;

#[async_trait]
impl Predictor for HomeAdvantagePredictor {
    fn name(&self) -> &'static str {
        "home_advantage"
    }

    async fn predict(
        &self,
        _home_team_id: TeamId,
        _away_team_id: TeamId,
    ) -> Result<Option<Prediction>, PredictionError> {
        Ok(Some(Prediction {
            home_goals: 1,
            away_goals: 0,
        }))
    }
}
