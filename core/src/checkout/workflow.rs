// core/src/checkout/workflow.rs

//! The order placement workflow.
//!
//! Checkout is four writes across three collections (order header, line
//! items, stock decrements, cart clear) with no transaction spanning them.
//! The workflow therefore runs as a saga: each step either succeeds or
//! triggers explicit compensation of everything written so far, so a failed
//! checkout leaves no orphan header, no partial line items and no partially
//! consumed stock behind.
//!
//! The advisory stock pass up front cannot close the race against concurrent
//! checkouts; only the conditional decrement at the storage layer can. The
//! pass still runs first because it rejects hopeless requests before any
//! write happens, and because it captures the product snapshots the line
//! items are built from.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::checkout::{LineItemRequest, PlaceOrderRequest};
use crate::error::{MarketError, MarketResult};
use crate::identity::UserIdentity;
use crate::models::{Order, OrderLineItem, OrderStatus};
use crate::store::MarketStore;

/// Places an order for the authenticated buyer.
///
/// On success: exactly one new pending order exists whose line items match
/// the request, `total_cents` equals the sum of the line subtotals, every
/// named product's stock is reduced by exactly the requested amount and the
/// buyer's cart is empty.
///
/// On failure the error names the first violated constraint and any writes
/// already applied have been compensated, except for a failed final cart
/// clear, after which the order stands and only the cart is stale.
pub async fn place_order<S>(store: &S, buyer: &UserIdentity, request: PlaceOrderRequest) -> MarketResult<Order>
where
  S: MarketStore + ?Sized,
{
  validate_request(&request)?;

  let order_id = Uuid::new_v4();
  info!(%order_id, buyer_id = %buyer.id, lines = request.lines.len(), "placing order");

  // Advisory pass: reject what clearly cannot succeed and snapshot product
  // name/price/seller for the line items.
  let items = check_stock_and_snapshot(store, order_id, &request.lines).await?;
  let total_cents: i64 = items.iter().map(OrderLineItem::subtotal_cents).sum();

  let order = Order {
    id: order_id,
    buyer_id: buyer.id,
    buyer_name: buyer.name.clone(),
    buyer_email: buyer.email.clone(),
    items,
    total_cents,
    payment_method: request.payment_method,
    delivery_address: request.delivery_address,
    delivery_time: request.delivery_time,
    placed_at: Utc::now(),
    status: OrderStatus::Pending,
  };

  // Header first. Nothing else has been written, so a failure here is
  // cleanly retryable by the caller.
  store.insert_order_header(&order).await?;

  if let Err(err) = store.insert_line_items(order.id, &order.items).await {
    warn!(%order_id, error = %err, "line item insert failed, removing orphan order header");
    compensate_order_records(store, order_id).await;
    return Err(err);
  }

  if let Err(err) = apply_decrements(store, order_id, &request.lines).await {
    compensate_order_records(store, order_id).await;
    return Err(err);
  }

  // Checkout consumes the whole cart, not just the ordered lines.
  let cleared = store.clear_cart(buyer.id).await?;
  debug!(%order_id, cleared, "cart cleared");

  info!(%order_id, total_cents, "order placed");
  Ok(order)
}

fn validate_request(request: &PlaceOrderRequest) -> MarketResult<()> {
  if request.lines.is_empty() {
    return Err(MarketError::Validation("Order must contain at least one product.".to_string()));
  }
  if let Some(line) = request.lines.iter().find(|line| line.quantity <= 0) {
    return Err(MarketError::Validation(format!(
      "Quantity for product {} must be a positive number.",
      line.product_id
    )));
  }
  Ok(())
}

async fn check_stock_and_snapshot<S>(
  store: &S,
  order_id: Uuid,
  lines: &[LineItemRequest],
) -> MarketResult<Vec<OrderLineItem>>
where
  S: MarketStore + ?Sized,
{
  let mut items = Vec::with_capacity(lines.len());
  for line in lines {
    let product = store
      .product_by_id(line.product_id)
      .await?
      .ok_or(MarketError::ProductNotFound {
        product_id: line.product_id,
      })?;

    if !product.is_in_stock(line.quantity) {
      return Err(MarketError::InsufficientStock {
        product: product.name,
        available: product.quantity,
        requested: line.quantity,
      });
    }

    items.push(OrderLineItem {
      id: Uuid::new_v4(),
      order_id,
      product_id: product.id,
      product_name: product.name,
      quantity: line.quantity,
      price_cents: product.price_cents,
      seller_name: product.seller_name,
      seller_id: product.seller_id,
    });
  }
  Ok(items)
}

/// Decrements stock line by line. If one conditional decrement loses the
/// race, every decrement already applied is restored before the error
/// surfaces.
async fn apply_decrements<S>(store: &S, order_id: Uuid, lines: &[LineItemRequest]) -> MarketResult<()>
where
  S: MarketStore + ?Sized,
{
  let mut applied: Vec<&LineItemRequest> = Vec::new();
  for line in lines {
    match store.decrement_quantity(line.product_id, line.quantity).await {
      Ok(remaining) => {
        debug!(%order_id, product_id = %line.product_id, taken = line.quantity, remaining, "stock decremented");
        applied.push(line);
      }
      Err(err) => {
        warn!(
          %order_id,
          product_id = %line.product_id,
          error = %err,
          "stock decrement failed, restoring {} earlier decrement(s)",
          applied.len()
        );
        for prior in applied {
          if let Err(restore_err) = store.restore_quantity(prior.product_id, prior.quantity).await {
            // Best effort only; the primary failure is the one the caller
            // must see.
            warn!(
              %order_id,
              product_id = %prior.product_id,
              error = %restore_err,
              "failed to restore stock during compensation"
            );
          }
        }
        return Err(err);
      }
    }
  }
  Ok(())
}

/// Removes the order header and any line items written for it. Best effort:
/// a failure is logged, never surfaced over the primary error.
async fn compensate_order_records<S>(store: &S, order_id: Uuid)
where
  S: MarketStore + ?Sized,
{
  if let Err(err) = store.delete_order(order_id).await {
    warn!(%order_id, error = %err, "failed to remove order records during compensation");
  }
}
