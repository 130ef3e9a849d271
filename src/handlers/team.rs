use actix_web::{web, HttpResponse};

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::models::{TeamIdQuery, TeamIdResponse};

/// Resolve a team name to its id.
pub async fn team_id(
    state: web::Data<AppState>,
    query: web::Query<TeamIdQuery>,
) -> Result<HttpResponse, ApiError> {
    if query.team_name.trim().is_empty() {
        return Err(ApiError::Validation("team_name is required".to_string()));
    }

    let team_id = state
        .store
        .team_id(&query.team_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("team {:?}", query.team_name)))?;

    Ok(HttpResponse::Ok().json(TeamIdResponse { team_id }))
}
