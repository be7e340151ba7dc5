// core/src/store/mod.rs

//! Storage contracts for the marketplace.
//!
//! Every durable collection (products, carts, orders) sits behind an async
//! trait so the workflow and services stay storage-agnostic. Two adapters
//! ship with the crate:
//!  - [`MemoryStore`]: process-local maps, used by tests, examples and
//!    benches.
//!  - [`PgStore`]: PostgreSQL via `sqlx`.
//!
//! The single operation that demands storage-level atomicity is
//! [`ProductStore::decrement_quantity`]: it must be one conditional update,
//! never a read followed by a write, so that concurrent checkouts against the
//! same product serialize there and can never drive stock negative.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::MarketResult;
use crate::models::{CartItem, Order, OrderLineItem, OrderStatus, Product};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait ProductStore: Send + Sync {
  async fn product_by_id(&self, product_id: Uuid) -> MarketResult<Option<Product>>;

  /// All products, newest listing first.
  async fn list_products(&self) -> MarketResult<Vec<Product>>;

  async fn insert_product(&self, product: &Product) -> MarketResult<()>;

  async fn delete_product(&self, product_id: Uuid) -> MarketResult<()>;

  /// Atomically reduces the product's stock by `amount`, returning the new
  /// quantity.
  ///
  /// The guard `quantity >= amount` is evaluated at the moment of the write.
  /// Fails with [`MarketError::InsufficientStock`] when the guard does not
  /// hold and [`MarketError::ProductNotFound`] when the row is gone.
  ///
  /// [`MarketError::InsufficientStock`]: crate::error::MarketError::InsufficientStock
  /// [`MarketError::ProductNotFound`]: crate::error::MarketError::ProductNotFound
  async fn decrement_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<i32>;

  /// Adds `amount` back onto the product's stock. Inverse of
  /// [`decrement_quantity`](Self::decrement_quantity), used by the placement
  /// workflow to compensate a partially applied checkout.
  async fn restore_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<()>;
}

#[async_trait]
pub trait CartStore: Send + Sync {
  /// The user's cart rows, oldest first.
  async fn cart_for_user(&self, user_id: Uuid) -> MarketResult<Vec<CartItem>>;

  /// Adds `quantity` onto the (user, product) row, creating it if absent.
  async fn add_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem>;

  /// Sets the (user, product) row to an absolute quantity (>= 1), creating
  /// it if absent. Callers handle the delete-on-zero rule.
  async fn set_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem>;

  /// Removes one row. Removing an absent row is a no-op.
  async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> MarketResult<()>;

  /// Removes every row belonging to the user, returning how many were
  /// removed. Clearing an empty cart is a no-op that succeeds.
  async fn clear_cart(&self, user_id: Uuid) -> MarketResult<u64>;

  /// Removes the product from every user's cart (product deletion purge).
  async fn purge_product(&self, product_id: Uuid) -> MarketResult<u64>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  /// Persists the order header only; `order.items` is ignored here and
  /// written separately via [`insert_line_items`](Self::insert_line_items).
  async fn insert_order_header(&self, order: &Order) -> MarketResult<()>;

  async fn insert_line_items(&self, order_id: Uuid, items: &[OrderLineItem]) -> MarketResult<()>;

  /// The order with its line items, if it exists.
  async fn order_by_id(&self, order_id: Uuid) -> MarketResult<Option<Order>>;

  /// Orders placed by the buyer, newest first.
  async fn orders_for_buyer(&self, buyer_id: Uuid) -> MarketResult<Vec<Order>>;

  /// Orders containing at least one line item owned by the seller, newest
  /// first.
  async fn orders_for_seller(&self, seller_id: Uuid) -> MarketResult<Vec<Order>>;

  async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> MarketResult<()>;

  /// Removes the order and its line items. Compensation path only: orders
  /// that completed placement are never deleted.
  async fn delete_order(&self, order_id: Uuid) -> MarketResult<()>;
}

/// Everything the placement workflow and the services need, in one bound.
pub trait MarketStore: ProductStore + CartStore + OrderStore {}

impl<T: ProductStore + CartStore + OrderStore> MarketStore for T {}
