// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;
use uuid::Uuid;

use crate::models::order::OrderStatus;

#[derive(Debug, Error)]
pub enum MarketError {
  #[error("Operation requires a signed-in user")]
  NotAuthenticated,

  #[error("Insufficient stock for {product}. Available: {available}, Requested: {requested}")]
  InsufficientStock {
    product: String,
    available: i32,
    requested: i32,
  },

  #[error("Product {product_id} not found")]
  ProductNotFound { product_id: Uuid },

  #[error("Order {order_id} not found")]
  OrderNotFound { order_id: Uuid },

  #[error("Not authorized: {reason}")]
  Unauthorized { reason: String },

  #[error("Order status cannot move from {from} to {to}")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("Persistence failure: {source}")]
  Persistence {
    #[source]
    source: AnyhowError,
  },
}

impl MarketError {
  /// Wraps any underlying storage error.
  pub fn persistence<E>(source: E) -> Self
  where
    E: Into<AnyhowError>,
  {
    MarketError::Persistence { source: source.into() }
  }

  /// Whether a caller may retry the failed call as-is. Insufficient stock is
  /// retryable after re-checking availability; persistence failures are
  /// retryable because the workflow compensates partial writes before
  /// surfacing them.
  pub fn is_retryable(&self) -> bool {
    matches!(
      self,
      MarketError::InsufficientStock { .. } | MarketError::Persistence { .. }
    )
  }
}

// Storage adapters bubble their driver errors up through this conversion.
impl From<sqlx::Error> for MarketError {
  fn from(err: sqlx::Error) -> Self {
    MarketError::Persistence { source: err.into() }
  }
}

pub type MarketResult<T, E = MarketError> = std::result::Result<T, E>;
