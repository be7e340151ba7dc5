// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::Level;
use uuid::Uuid;

use agrimart::error::MarketResult;
use agrimart::models::{CartItem, Category, Order, OrderLineItem, OrderStatus, Product};
use agrimart::store::{CartStore, MemoryStore, OrderStore, ProductStore};
use agrimart::{Role, UserIdentity};

// --- Identity Builders ---

pub fn buyer(name: &str) -> UserIdentity {
  UserIdentity::new(Uuid::new_v4(), name, format!("{}@example.com", name), Role::Buyer)
}

pub fn seller(name: &str) -> UserIdentity {
  UserIdentity::new(Uuid::new_v4(), name, format!("{}@example.com", name), Role::Seller)
}

// --- Product Seeding ---

pub fn product_of(seller: &UserIdentity, name: &str, price_cents: i64, quantity: i32) -> Product {
  Product {
    id: Uuid::new_v4(),
    name: name.to_string(),
    description: format!("{} for test fields", name),
    category: Category::Fertilizers,
    price_cents,
    quantity,
    seller_name: seller.name.clone(),
    seller_id: seller.id,
    rating: 0.0,
    image_url: None,
    created_at: chrono::Utc::now(),
  }
}

pub async fn seed_product(
  store: &MemoryStore,
  seller: &UserIdentity,
  name: &str,
  price_cents: i64,
  quantity: i32,
) -> Product {
  let product = product_of(seller, name, price_cents, quantity);
  store.insert_product(&product).await.expect("seeding product");
  product
}

// --- Request Builders ---

pub fn order_request(lines: &[(Uuid, i32)]) -> agrimart::PlaceOrderRequest {
  agrimart::PlaceOrderRequest {
    lines: lines
      .iter()
      .map(|&(product_id, quantity)| agrimart::LineItemRequest { product_id, quantity })
      .collect(),
    payment_method: agrimart::PaymentMethod::Cash,
    delivery_address: "12 Canal Road, Nashik".to_string(),
    delivery_time: "Within 1 hour".to_string(),
  }
}

// --- Rival Store ---

/// Store wrapper that simulates a concurrent buyer: immediately before the
/// first decrement attempt on `rival_product`, a rival purchase of
/// `rival_takes` units is applied. This lets tests drive the window between
/// the advisory stock pass and the conditional decrement deterministically.
pub struct RivalStore {
  pub inner: MemoryStore,
  pub rival_product: Uuid,
  pub rival_takes: i32,
  struck: AtomicBool,
}

impl RivalStore {
  pub fn new(inner: MemoryStore, rival_product: Uuid, rival_takes: i32) -> Self {
    RivalStore {
      inner,
      rival_product,
      rival_takes,
      struck: AtomicBool::new(false),
    }
  }
}

#[async_trait]
impl ProductStore for RivalStore {
  async fn product_by_id(&self, product_id: Uuid) -> MarketResult<Option<Product>> {
    self.inner.product_by_id(product_id).await
  }

  async fn list_products(&self) -> MarketResult<Vec<Product>> {
    self.inner.list_products().await
  }

  async fn insert_product(&self, product: &Product) -> MarketResult<()> {
    self.inner.insert_product(product).await
  }

  async fn delete_product(&self, product_id: Uuid) -> MarketResult<()> {
    self.inner.delete_product(product_id).await
  }

  async fn decrement_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<i32> {
    if product_id == self.rival_product && !self.struck.swap(true, Ordering::SeqCst) {
      self
        .inner
        .decrement_quantity(product_id, self.rival_takes)
        .await
        .expect("rival purchase");
    }
    self.inner.decrement_quantity(product_id, amount).await
  }

  async fn restore_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<()> {
    self.inner.restore_quantity(product_id, amount).await
  }
}

#[async_trait]
impl CartStore for RivalStore {
  async fn cart_for_user(&self, user_id: Uuid) -> MarketResult<Vec<CartItem>> {
    self.inner.cart_for_user(user_id).await
  }

  async fn add_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem> {
    self.inner.add_cart_quantity(user_id, product_id, quantity).await
  }

  async fn set_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem> {
    self.inner.set_cart_quantity(user_id, product_id, quantity).await
  }

  async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> MarketResult<()> {
    self.inner.remove_cart_item(user_id, product_id).await
  }

  async fn clear_cart(&self, user_id: Uuid) -> MarketResult<u64> {
    self.inner.clear_cart(user_id).await
  }

  async fn purge_product(&self, product_id: Uuid) -> MarketResult<u64> {
    self.inner.purge_product(product_id).await
  }
}

#[async_trait]
impl OrderStore for RivalStore {
  async fn insert_order_header(&self, order: &Order) -> MarketResult<()> {
    self.inner.insert_order_header(order).await
  }

  async fn insert_line_items(&self, order_id: Uuid, items: &[OrderLineItem]) -> MarketResult<()> {
    self.inner.insert_line_items(order_id, items).await
  }

  async fn order_by_id(&self, order_id: Uuid) -> MarketResult<Option<Order>> {
    self.inner.order_by_id(order_id).await
  }

  async fn orders_for_buyer(&self, buyer_id: Uuid) -> MarketResult<Vec<Order>> {
    self.inner.orders_for_buyer(buyer_id).await
  }

  async fn orders_for_seller(&self, seller_id: Uuid) -> MarketResult<Vec<Order>> {
    self.inner.orders_for_seller(seller_id).await
  }

  async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> MarketResult<()> {
    self.inner.update_status(order_id, status).await
  }

  async fn delete_order(&self, order_id: Uuid) -> MarketResult<()> {
    self.inner.delete_order(order_id).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
