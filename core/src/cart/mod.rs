// core/src/cart/mod.rs

//! Cart operations: thin passthroughs to the cart store with existence and
//! ownership rules applied.
//!
//! Cart rows are owned exclusively by their buyer; every entry point takes
//! the authenticated identity and only ever touches that user's rows. The
//! stock check on add is advisory, the same role it plays at checkout: the
//! cart never reserves inventory.

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{MarketError, MarketResult};
use crate::identity::UserIdentity;
use crate::models::CartItem;
use crate::store::MarketStore;

/// Adds `quantity` of a product to the user's cart, accumulating onto an
/// existing row if there is one.
pub async fn add_to_cart<S>(store: &S, user: &UserIdentity, product_id: Uuid, quantity: i32) -> MarketResult<CartItem>
where
  S: MarketStore + ?Sized,
{
  if quantity <= 0 {
    return Err(MarketError::Validation("Quantity must be a positive number.".to_string()));
  }

  let product = store
    .product_by_id(product_id)
    .await?
    .ok_or(MarketError::ProductNotFound { product_id })?;

  if !product.is_in_stock(quantity) {
    warn!(
      %product_id,
      available = product.quantity,
      requested = quantity,
      "insufficient stock on add-to-cart"
    );
    return Err(MarketError::InsufficientStock {
      product: product.name,
      available: product.quantity,
      requested: quantity,
    });
  }

  let item = store.add_cart_quantity(user.id, product_id, quantity).await?;
  debug!(user_id = %user.id, %product_id, quantity = item.quantity, "cart item added");
  Ok(item)
}

/// Sets the user's cart row for a product to an absolute quantity.
///
/// A quantity of zero or less deletes the row (returning `None`) rather than
/// storing a zero.
pub async fn update_cart_quantity<S>(
  store: &S,
  user: &UserIdentity,
  product_id: Uuid,
  quantity: i32,
) -> MarketResult<Option<CartItem>>
where
  S: MarketStore + ?Sized,
{
  if quantity <= 0 {
    store.remove_cart_item(user.id, product_id).await?;
    debug!(user_id = %user.id, %product_id, "cart item removed via zero quantity");
    return Ok(None);
  }

  // The row may not exist yet; the set is an upsert, so the product must.
  if store.product_by_id(product_id).await?.is_none() {
    return Err(MarketError::ProductNotFound { product_id });
  }

  let item = store.set_cart_quantity(user.id, product_id, quantity).await?;
  Ok(Some(item))
}

pub async fn remove_from_cart<S>(store: &S, user: &UserIdentity, product_id: Uuid) -> MarketResult<()>
where
  S: MarketStore + ?Sized,
{
  store.remove_cart_item(user.id, product_id).await
}

/// Empties the user's cart. Clearing an already-empty cart is a no-op that
/// succeeds.
pub async fn clear_cart<S>(store: &S, user: &UserIdentity) -> MarketResult<()>
where
  S: MarketStore + ?Sized,
{
  let cleared = store.clear_cart(user.id).await?;
  info!(user_id = %user.id, cleared, "cart cleared");
  Ok(())
}

pub async fn cart_for_user<S>(store: &S, user: &UserIdentity) -> MarketResult<Vec<CartItem>>
where
  S: MarketStore + ?Sized,
{
  store.cart_for_user(user.id).await
}
