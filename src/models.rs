use serde::{Deserialize, Serialize};

use crate::predictor::TeamId;

/// Query parameters for the predict endpoint.
#[derive(Debug, Deserialize)]
pub struct PredictQuery {
    pub home_team_id: TeamId,
    pub away_team_id: TeamId,
}

/// Query parameters for the team id lookup.
#[derive(Debug, Deserialize)]
pub struct TeamIdQuery {
    pub team_name: String,
}

/// Team id lookup response.
#[derive(Debug, Serialize, Deserialize)]
pub struct TeamIdResponse {
    pub team_id: TeamId,
}

/// Health check response.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
