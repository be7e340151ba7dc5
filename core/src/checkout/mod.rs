// core/src/checkout/mod.rs

//! Checkout: the order placement workflow and its request types.

mod workflow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::PaymentMethod;

pub use workflow::place_order;

/// One requested product line at checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemRequest {
  pub product_id: Uuid,
  pub quantity: i32,
}

/// Everything a buyer submits at checkout. Prices, totals and seller
/// attribution are resolved server-side from the products themselves; the
/// request only names products and quantities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
  pub lines: Vec<LineItemRequest>,
  pub payment_method: PaymentMethod,
  pub delivery_address: String,
  pub delivery_time: String,
}
