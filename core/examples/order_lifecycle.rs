// core/examples/order_lifecycle.rs

//! Walks a placed order through its status lifecycle and shows the machine
//! rejecting an illegal move.

use tracing::{info, warn};
use uuid::Uuid;

use agrimart::store::MemoryStore;
use agrimart::{catalog, place_order, update_status, Category, LineItemRequest, OrderStatus, PaymentMethod, PlaceOrderRequest, Role, UserIdentity};

#[tokio::main]
async fn main() -> Result<(), agrimart::MarketError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Order Lifecycle Example ---");

  let store = MemoryStore::new();
  let farmer = UserIdentity::new(Uuid::new_v4(), "Lakshmi", "lakshmi@example.com", Role::Seller);
  let customer = UserIdentity::new(Uuid::new_v4(), "Vikram", "vikram@example.com", Role::Buyer);

  let feed = catalog::add_product(
    &store,
    &farmer,
    catalog::NewProduct {
      name: "Cattle Feed 25kg".to_string(),
      description: "Balanced feed mix for dairy cattle".to_string(),
      category: Category::CowFood,
      price_cents: 104900,
      quantity: 10,
      rating: 0.0,
      image_url: None,
    },
  )
  .await?;

  let order = place_order(
    &store,
    &customer,
    PlaceOrderRequest {
      lines: vec![LineItemRequest { product_id: feed.id, quantity: 1 }],
      payment_method: PaymentMethod::Cash,
      delivery_address: "Village Khed, Pune".to_string(),
      delivery_time: "Within 1 hour".to_string(),
    },
  )
  .await?;
  info!("order {} starts out {}", order.id, order.status);

  let order = update_status(&store, &farmer, order.id, OrderStatus::Confirmed).await?;
  info!("seller confirmed: {}", order.status);

  let order = update_status(&store, &farmer, order.id, OrderStatus::Delivered).await?;
  info!("seller delivered: {}", order.status);

  // Terminal state: the machine refuses to go backwards.
  match update_status(&store, &farmer, order.id, OrderStatus::Pending).await {
    Err(err) => warn!("as expected, rejected: {}", err),
    Ok(_) => unreachable!("delivered orders never reopen"),
  }

  Ok(())
}
