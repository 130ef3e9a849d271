use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::models::PredictQuery;

/// Predict the score of an upcoming fixture.
///
/// Refreshes the historical data first (a no-op when the scraper already
/// ran today), so predictions always see yesterday's results.
pub async fn predict(
    state: web::Data<AppState>,
    query: web::Query<PredictQuery>,
) -> Result<HttpResponse, ApiError> {
    state.scraper.refresh(&state.store).await?;

    let prediction = state
        .predictor
        .predict(query.home_team_id, query.away_team_id)
        .await?;

    Ok(HttpResponse::Ok().json(prediction))
}
