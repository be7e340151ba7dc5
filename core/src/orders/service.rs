// core/src/orders/service.rs

use tracing::info;
use uuid::Uuid;

use crate::error::{MarketError, MarketResult};
use crate::identity::UserIdentity;
use crate::models::{Order, OrderStatus};
use crate::orders::status::ensure_transition;
use crate::store::MarketStore;

/// Moves an order along its lifecycle on behalf of a seller.
///
/// Only a seller owning at least one line item in the order may change its
/// status; ownership is matched on `seller_id`, never on display names. The
/// transition must be an edge of the status graph. No inventory or financial
/// effects follow from a status change.
pub async fn update_status<S>(
  store: &S,
  seller: &UserIdentity,
  order_id: Uuid,
  new_status: OrderStatus,
) -> MarketResult<Order>
where
  S: MarketStore + ?Sized,
{
  let order = store
    .order_by_id(order_id)
    .await?
    .ok_or(MarketError::OrderNotFound { order_id })?;

  if !order.involves_seller(seller.id) {
    return Err(MarketError::Unauthorized {
      reason: format!("order {} contains no products sold by {}", order_id, seller.id),
    });
  }

  ensure_transition(order.status, new_status)?;

  store.update_status(order_id, new_status).await?;
  info!(%order_id, seller_id = %seller.id, from = %order.status, to = %new_status, "order status updated");

  Ok(Order {
    status: new_status,
    ..order
  })
}

/// Orders the user placed as a buyer, newest first.
pub async fn orders_for_buyer<S>(store: &S, buyer: &UserIdentity) -> MarketResult<Vec<Order>>
where
  S: MarketStore + ?Sized,
{
  store.orders_for_buyer(buyer.id).await
}

/// Orders containing at least one of the seller's products, newest first.
pub async fn orders_for_seller<S>(store: &S, seller: &UserIdentity) -> MarketResult<Vec<Order>>
where
  S: MarketStore + ?Sized,
{
  store.orders_for_seller(seller.id).await
}
