//! HTTP-facing error type

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

use crate::models::ErrorResponse;
use crate::predictor::PredictionError;
use crate::scraper::ScraperError;
use crate::store::StoreError;

/// Application error type for the HTTP layer.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Refreshing the historical data failed.
    #[error("scrape error: {0}")]
    Scrape(#[from] ScraperError),

    /// Generating the prediction failed.
    #[error("prediction error: {0}")]
    Prediction(#[from] PredictionError),

    /// Database access failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Scrape(_) | ApiError::Prediction(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error, message) = match self {
            ApiError::Validation(msg) => ("validation_error", msg.clone()),
            ApiError::NotFound(msg) => ("not_found", msg.clone()),
            ApiError::Scrape(e) => ("scrape_error", e.to_string()),
            ApiError::Prediction(e) => ("prediction_error", e.to_string()),
            ApiError::Store(e) => ("storage_error", e.to_string()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: error.to_string(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(
            ApiError::Validation(String::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::NotFound(String::new()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Prediction(PredictionError::NoPredictors).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn display_includes_the_cause() {
        let err = ApiError::Validation("both team ids are required".to_string());
        assert!(err.to_string().contains("both team ids are required"));

        let err = ApiError::Prediction(PredictionError::NoPredictionsAvailable);
        assert!(err.to_string().contains("no predictions available"));
    }
}
