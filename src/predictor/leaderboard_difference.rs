use async_trait::async_trait;
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::debug;

use super::{Prediction, PredictionError, Predictor, StatsStore, TeamId};

/// Infers a winning margin from the gap between the two teams' positions
/// in the current season standings.
///
/// The better-ranked team is predicted to win by half the rank gap,
/// rounded down. A coarse, explainable rule of thumb rather than any kind
/// of statistical estimate.
pub struct LeaderboardDifferencePredictor {
    stats: Arc<dyn StatsStore>,
}

impl LeaderboardDifferencePredictor {
    pub fn new(stats: Arc<dyn StatsStore>) -> Self {
        Self { stats }
    }
}

#[async_trait]
impl Predictor for LeaderboardDifferencePredictor {
    fn name(&self) -> &'static str {
        "leaderboard_difference"
    }

    async fn predict(
        &self,
        home_team_id: TeamId,
        away_team_id: TeamId,
    ) -> Result<Option<Prediction>, PredictionError> {
        let leaderboard = self.stats.current_season_leaderboard().await?;

        // No season data yet.
        if leaderboard.is_empty() {
            return Ok(None);
        }

        // Points descending; ties broken by team id so the ranking is
        // reproducible across runs.
        let mut standings: Vec<(TeamId, u32)> = leaderboard.into_iter().collect();
        standings.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        for (index, (team_id, points)) in standings.iter().enumerate() {
            debug!("standings #{}: team {} ({} points)", index + 1, team_id, points);
        }

        let home_position = position_of(&standings, home_team_id);
        let away_position = position_of(&standings, away_team_id);
        let margin = (home_position.abs_diff(away_position) / 2) as u32;

        let prediction = match home_position.cmp(&away_position) {
            Ordering::Less => Prediction {
                home_goals: margin,
                away_goals: 0,
            },
            Ordering::Greater => Prediction {
                home_goals: 0,
                away_goals: margin,
            },
            Ordering::Equal => Prediction {
                home_goals: 0,
                away_goals: 0,
            },
        };

        Ok(Some(prediction))
    }
}

/// 1-based rank in the standings; 0 for a team that is not ranked.
fn position_of(standings: &[(TeamId, u32)], team_id: TeamId) -> usize {
    standings
        .iter()
        .position(|&(id, _)| id == team_id)
        .map_or(0, |index| index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::predictor::fake::FakeStats;

    fn stats(points: &[(TeamId, u32)]) -> Arc<FakeStats> {
        let mut fake = FakeStats::default();
        fake.leaderboard = points.iter().copied().collect();
        Arc::new(fake)
    }

    #[tokio::test]
    async fn abstains_on_an_empty_leaderboard() {
        let predictor = LeaderboardDifferencePredictor::new(Arc::new(FakeStats::default()));

        let prediction = predictor.predict(1, 2).await.unwrap();
        assert_eq!(prediction, None);
    }

    #[tokio::test]
    async fn home_team_ranked_better_wins_by_half_the_gap() {
        let predictor =
            LeaderboardDifferencePredictor::new(stats(&[(1, 25), (2, 20), (3, 15), (4, 10)]));

        // Home is 1st, away is 4th: |1 - 4| / 2 = 1.
        let prediction = predictor.predict(1, 4).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 1,
                away_goals: 0
            })
        );
    }

    #[tokio::test]
    async fn away_team_ranked_better_wins_by_half_the_gap() {
        let predictor =
            LeaderboardDifferencePredictor::new(stats(&[(1, 10), (2, 15), (3, 20), (4, 25)]));

        let prediction = predictor.predict(1, 4).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 0,
                away_goals: 1
            })
        );
    }

    #[tokio::test]
    async fn adjacent_ranks_predict_a_draw() {
        let predictor = LeaderboardDifferencePredictor::new(stats(&[(1, 12), (2, 9)]));

        // |1 - 2| / 2 truncates to 0.
        let prediction = predictor.predict(2, 1).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 0,
                away_goals: 0
            })
        );
    }

    #[tokio::test]
    async fn equal_points_tie_breaks_by_team_id() {
        let predictor = LeaderboardDifferencePredictor::new(stats(&[(7, 10), (3, 10)]));

        // Both on 10 points: team 3 ranks 1st by id, team 7 ranks 2nd.
        // The gap is still too small for a margin.
        let prediction = predictor.predict(3, 7).await.unwrap();
        assert_eq!(
            prediction,
            Some(Prediction {
                home_goals: 0,
                away_goals: 0
            })
        );
    }

    #[tokio::test]
    async fn unranked_team_sits_above_the_table() {
        let predictor =
            LeaderboardDifferencePredictor::new(stats(&[(1, 25), (2, 20), (3, 15), (4, 10)]));

        // Team 99 never played: position 0, nominally "better" than the
        // leader, so the gap to the 4th-placed side is |0 - 4| / 2 = 2.
        let prediction = predictor.predict(99, 4).await.unwrap();
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
        let predictor = LeaderboardDifferencePredictor::new(Arc::new(FakeStats::failing()));

        let result = predictor.predict(1, 2).await;
        assert!(matches!(result, Err(PredictionError::DataUnavailable(_))));
    }
}
