// core/src/orders/status.rs

//! The order status machine.
//!
//! ```text
//! pending ──> confirmed ──> delivered
//!    │            │
//!    └────────────┴──> cancelled
//! ```
//!
//! `delivered` and `cancelled` are terminal. Backward moves and
//! self-transitions are not edges of the graph and are rejected; a status is
//! only ever written after [`ensure_transition`] passes.

use crate::error::{MarketError, MarketResult};
use crate::models::OrderStatus;

impl OrderStatus {
  /// Whether the lifecycle graph has an edge from `self` to `next`.
  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    use OrderStatus::*;
    matches!(
      (self, next),
      (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Delivered) | (Confirmed, Cancelled)
    )
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
  }
}

/// Validates one lifecycle move, failing with
/// [`MarketError::InvalidTransition`] for anything outside the graph.
pub fn ensure_transition(from: OrderStatus, to: OrderStatus) -> MarketResult<()> {
  if from.can_transition_to(to) {
    Ok(())
  } else {
    Err(MarketError::InvalidTransition { from, to })
  }
}
