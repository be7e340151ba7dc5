// core/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type as SqlxType};
use uuid::Uuid;

/// The fixed set of listing categories the storefront offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SqlxType)]
#[sqlx(type_name = "product_category_enum", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum Category {
  Fertilizers,
  Pesticides,
  CowFood,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  pub description: String,
  pub category: Category,
  /// Unit price in integer cents.
  pub price_cents: i64,
  /// Authoritative stock count. Never negative; mutated only by the owning
  /// seller or by the order placement workflow.
  pub quantity: i32,
  pub seller_name: String,
  pub seller_id: Uuid,
  pub rating: f32,
  pub image_url: Option<String>,
  pub created_at: DateTime<Utc>,
}

impl Product {
  pub fn is_in_stock(&self, requested: i32) -> bool {
    self.quantity >= requested
  }
}
