// core/src/models/order.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::Type as SqlxType;
use uuid::Uuid;

use crate::models::order_item::OrderLineItem;

// Type names match the Postgres enums in schema.sql.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "order_status_enum", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Delivered,
  Cancelled,
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let s = match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Confirmed => "confirmed",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Cancelled => "cancelled",
    };
    f.write_str(s)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "payment_method_enum", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
  Cash,
  Card,
  Upi,
  Bank,
}

/// A placed order with its embedded line-item snapshots.
///
/// Line items and `total_cents` are immutable once the order exists; only
/// `status` is ever mutated afterwards, and only through the status machine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub buyer_id: Uuid,
  pub buyer_name: String,
  pub buyer_email: String,
  /// Insertion order equals checkout order.
  pub items: Vec<OrderLineItem>,
  pub total_cents: i64,
  pub payment_method: PaymentMethod,
  pub delivery_address: String,
  pub delivery_time: String,
  pub placed_at: DateTime<Utc>,
  pub status: OrderStatus,
}

impl Order {
  /// Sum of the line-item subtotals. Always equals `total_cents` for orders
  /// produced by the placement workflow.
  pub fn computed_total_cents(&self) -> i64 {
    self.items.iter().map(OrderLineItem::subtotal_cents).sum()
  }

  /// Whether at least one line item belongs to the given seller. Matching is
  /// by stable id; display names are presentation only.
  pub fn involves_seller(&self, seller_id: Uuid) -> bool {
    self.items.iter().any(|item| item.seller_id == seller_id)
  }
}
