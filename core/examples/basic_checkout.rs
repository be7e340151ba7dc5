// core/examples/basic_checkout.rs

//! End-to-end checkout against the in-memory store: a seller lists two
//! products, a buyer fills a cart and places an order.

use tracing::info;
use uuid::Uuid;

use agrimart::store::MemoryStore;
use agrimart::{cart, catalog, place_order, Category, LineItemRequest, PaymentMethod, PlaceOrderRequest, Role, UserIdentity};

#[tokio::main]
async fn main() -> Result<(), agrimart::MarketError> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Basic Checkout Example ---");

  let store = MemoryStore::new();
  let farmer = UserIdentity::new(Uuid::new_v4(), "Ramesh", "ramesh@example.com", Role::Seller);
  let customer = UserIdentity::new(Uuid::new_v4(), "Anita", "anita@example.com", Role::Buyer);

  let urea = catalog::add_product(
    &store,
    &farmer,
    catalog::NewProduct {
      name: "Urea 45kg".to_string(),
      description: "Nitrogen fertilizer, 45kg bag".to_string(),
      category: Category::Fertilizers,
      price_cents: 26650,
      quantity: 40,
      rating: 0.0,
      image_url: None,
    },
  )
  .await?;

  let spray = catalog::add_product(
    &store,
    &farmer,
    catalog::NewProduct {
      name: "Neem Spray 1L".to_string(),
      description: "Organic pest control spray".to_string(),
      category: Category::Pesticides,
      price_cents: 9900,
      quantity: 15,
      rating: 0.0,
      image_url: None,
    },
  )
  .await?;

  cart::add_to_cart(&store, &customer, urea.id, 2).await?;
  cart::add_to_cart(&store, &customer, spray.id, 1).await?;
  info!("cart holds {} rows", cart::cart_for_user(&store, &customer).await?.len());

  let order = place_order(
    &store,
    &customer,
    PlaceOrderRequest {
      lines: vec![
        LineItemRequest { product_id: urea.id, quantity: 2 },
        LineItemRequest { product_id: spray.id, quantity: 1 },
      ],
      payment_method: PaymentMethod::Upi,
      delivery_address: "12 Canal Road, Nashik".to_string(),
      delivery_time: "Within 1 hour".to_string(),
    },
  )
  .await?;

  info!(
    "order {} placed: {} line(s), total {} cents, status {}",
    order.id,
    order.items.len(),
    order.total_cents,
    order.status
  );

  let urea_left = catalog::product_by_id(&store, urea.id).await?.expect("still listed");
  info!("urea stock after checkout: {}", urea_left.quantity);
  info!("cart rows after checkout: {}", cart::cart_for_user(&store, &customer).await?.len());

  Ok(())
}
