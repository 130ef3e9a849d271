use std::time::Instant;
use tracing::debug;

use super::{Prediction, PredictionError, Predictor, TeamId};

/// Combines the configured predictors into one consensus score.
///
/// Every predictor is invoked in configuration order; votes are reduced
/// with a per-side median. One failing predictor aborts the whole call,
/// abstentions merely shrink the contributor set.
///
/// Holds no per-request state, so a single instance is shared across all
/// concurrent prediction requests.
pub struct CompositePredictor {
    predictors: Vec<Box<dyn Predictor>>,
}

impl CompositePredictor {
    pub fn new(predictors: Vec<Box<dyn Predictor>>) -> Self {
        Self { predictors }
    }

    /// Consensus prediction for the fixture.
    pub async fn predict(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Prediction, PredictionError> {
        if self.predictors.is_empty() {
            return Err(PredictionError::NoPredictors);
        }

        let mut home_goals = Vec::with_capacity(self.predictors.len());
        let mut away_goals = Vec::with_capacity(self.predictors.len());

        for predictor in &self.predictors {
            let started = Instant::now();
            let prediction = predictor.predict(home_team_id, away_team_id).await?;
            let elapsed = started.elapsed();

            match prediction {
                Some(prediction) => {
                    debug!(
                        "{} predicted {}-{} in {:?}",
                        predictor.name(),
                        prediction.home_goals,
                        prediction.away_goals,
                        elapsed
                    );
                    home_goals.push(prediction.home_goals);
                    away_goals.push(prediction.away_goals);
                }
                None => debug!("{} abstained in {:?}", predictor.name(), elapsed),
            }
        }

        if home_goals.is_empty() {
            return Err(PredictionError::NoPredictionsAvailable);
        }

        home_goals.sort_unstable();
        away_goals.sort_unstable();

        Ok(Prediction {
            home_goals: median(&home_goals),
            away_goals: median(&away_goals),
        })
    }
}

/// Median of an already sorted sequence. An even count averages the two
/// middle values with integer division, staying in the whole-goal domain.
fn median(sorted: &[u32]) -> u32 {
    let middle = sorted.len() / 2;

    if sorted.len() % 2 == 0 {
        (sorted[middle - 1] + sorted[middle]) / 2
    } else {
        sorted[middle]
    }
}
