// demos/marketplace_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use agrimart::MarketError;

#[derive(Debug, Error)]
pub enum ApiError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error(transparent)]
  Market(#[from] MarketError),
}

impl ResponseError for ApiError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      ApiError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      ApiError::Market(err) => match err {
        MarketError::NotAuthenticated => HttpResponse::Unauthorized().json(json!({"error": err.to_string()})),
        MarketError::Unauthorized { .. } => HttpResponse::Forbidden().json(json!({"error": err.to_string()})),
        MarketError::InsufficientStock {
          product,
          available,
          requested,
        } => HttpResponse::Conflict().json(json!({
          "error": err.to_string(),
          "product": product,
          "available": available,
          "requested": requested,
        })),
        MarketError::ProductNotFound { .. } | MarketError::OrderNotFound { .. } => {
          HttpResponse::NotFound().json(json!({"error": err.to_string()}))
        }
        MarketError::InvalidTransition { .. } => HttpResponse::Conflict().json(json!({"error": err.to_string()})),
        MarketError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
        MarketError::Persistence { .. } => {
          HttpResponse::InternalServerError().json(json!({"error": "Database operation failed"}))
        }
      },
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = ApiError> = std::result::Result<T, E>;
