// core/src/catalog/mod.rs

//! Product catalog operations: listing creation and removal, scoped to the
//! owning seller, plus the read passthroughs the storefront uses.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::error::{MarketError, MarketResult};
use crate::identity::{Role, UserIdentity};
use crate::models::{Category, Product};
use crate::store::MarketStore;

/// Seller-submitted fields for a new listing; identity and timestamps are
/// filled in server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
  pub name: String,
  pub description: String,
  pub category: Category,
  pub price_cents: i64,
  pub quantity: i32,
  #[serde(default)]
  pub rating: f32,
  #[serde(default)]
  pub image_url: Option<String>,
}

pub async fn add_product<S>(store: &S, seller: &UserIdentity, new_product: NewProduct) -> MarketResult<Product>
where
  S: MarketStore + ?Sized,
{
  if seller.role != Role::Seller {
    return Err(MarketError::Unauthorized {
      reason: "only sellers can list products".to_string(),
    });
  }
  if new_product.price_cents < 0 {
    return Err(MarketError::Validation("Price must not be negative.".to_string()));
  }
  if new_product.quantity < 0 {
    return Err(MarketError::Validation("Stock quantity must not be negative.".to_string()));
  }

  let product = Product {
    id: Uuid::new_v4(),
    name: new_product.name,
    description: new_product.description,
    category: new_product.category,
    price_cents: new_product.price_cents,
    quantity: new_product.quantity,
    seller_name: seller.name.clone(),
    seller_id: seller.id,
    rating: new_product.rating,
    image_url: new_product.image_url,
    created_at: chrono::Utc::now(),
  };

  store.insert_product(&product).await?;
  info!(product_id = %product.id, seller_id = %seller.id, "product listed");
  Ok(product)
}

/// Deletes a listing and purges it from every user's cart.
///
/// Only the owning seller may delete; placed orders keep their snapshots and
/// are unaffected.
pub async fn delete_product<S>(store: &S, seller: &UserIdentity, product_id: Uuid) -> MarketResult<()>
where
  S: MarketStore + ?Sized,
{
  let product = store
    .product_by_id(product_id)
    .await?
    .ok_or(MarketError::ProductNotFound { product_id })?;

  if product.seller_id != seller.id {
    return Err(MarketError::Unauthorized {
      reason: format!("product {} belongs to another seller", product_id),
    });
  }

  store.delete_product(product_id).await?;
  let purged = store.purge_product(product_id).await?;
  info!(%product_id, seller_id = %seller.id, purged_cart_rows = purged, "product deleted");
  Ok(())
}

pub async fn list_products<S>(store: &S) -> MarketResult<Vec<Product>>
where
  S: MarketStore + ?Sized,
{
  store.list_products().await
}

pub async fn product_by_id<S>(store: &S, product_id: Uuid) -> MarketResult<Option<Product>>
where
  S: MarketStore + ?Sized,
{
  store.product_by_id(product_id).await
}
