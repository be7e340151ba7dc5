// core/src/models/order_item.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Snapshot of one purchased product at order time.
///
/// Name, price and seller are copied from the product rather than referenced,
/// so historical orders do not change when the product is later edited or
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrderLineItem {
  pub id: Uuid,
  pub order_id: Uuid,
  pub product_id: Uuid,
  pub product_name: String,
  pub quantity: i32,
  pub price_cents: i64,
  pub seller_name: String,
  pub seller_id: Uuid,
}

impl OrderLineItem {
  pub fn subtotal_cents(&self) -> i64 {
    self.price_cents * i64::from(self.quantity)
  }
}
