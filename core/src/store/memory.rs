// core/src/store/memory.rs

//! Process-local storage adapter.
//!
//! Backed by `parking_lot::RwLock` maps. Lock guards are blocking and are
//! never held across an `.await` point; every method completes its map access
//! synchronously before returning. The conditional stock decrement is atomic
//! under the products write lock, which gives this adapter the same
//! serialization point the Postgres adapter gets from its conditional UPDATE.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::error::{MarketError, MarketResult};
use crate::models::{CartItem, Order, OrderLineItem, OrderStatus, Product};
use crate::store::{CartStore, OrderStore, ProductStore};

#[derive(Default)]
pub struct MemoryStore {
  products: RwLock<HashMap<Uuid, Product>>,
  // Keyed by (user_id, product_id): one row per product per cart.
  cart_items: RwLock<HashMap<(Uuid, Uuid), CartItem>>,
  orders: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl ProductStore for MemoryStore {
  async fn product_by_id(&self, product_id: Uuid) -> MarketResult<Option<Product>> {
    Ok(self.products.read().get(&product_id).cloned())
  }

  async fn list_products(&self) -> MarketResult<Vec<Product>> {
    let mut products: Vec<Product> = self.products.read().values().cloned().collect();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(products)
  }

  async fn insert_product(&self, product: &Product) -> MarketResult<()> {
    self.products.write().insert(product.id, product.clone());
    Ok(())
  }

  async fn delete_product(&self, product_id: Uuid) -> MarketResult<()> {
    self.products.write().remove(&product_id);
    Ok(())
  }

  async fn decrement_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<i32> {
    // The write lock makes check-and-subtract one atomic step.
    let mut products = self.products.write();
    let product = products
      .get_mut(&product_id)
      .ok_or(MarketError::ProductNotFound { product_id })?;

    if product.quantity < amount {
      return Err(MarketError::InsufficientStock {
        product: product.name.clone(),
        available: product.quantity,
        requested: amount,
      });
    }

    product.quantity -= amount;
    Ok(product.quantity)
  }

  async fn restore_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<()> {
    let mut products = self.products.write();
    match products.get_mut(&product_id) {
      Some(product) => product.quantity += amount,
      // The product vanished between decrement and restore; nothing left to
      // compensate.
      None => tracing::warn!(%product_id, amount, "restore_quantity: product no longer exists"),
    }
    Ok(())
  }
}

#[async_trait]
impl CartStore for MemoryStore {
  async fn cart_for_user(&self, user_id: Uuid) -> MarketResult<Vec<CartItem>> {
    let mut items: Vec<CartItem> = self
      .cart_items
      .read()
      .values()
      .filter(|item| item.user_id == user_id)
      .cloned()
      .collect();
    items.sort_by(|a, b| a.added_at.cmp(&b.added_at));
    Ok(items)
  }

  async fn add_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem> {
    let mut cart_items = self.cart_items.write();
    let item = cart_items
      .entry((user_id, product_id))
      .and_modify(|item| item.quantity += quantity)
      .or_insert_with(|| CartItem {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        quantity,
        added_at: Utc::now(),
      });
    Ok(item.clone())
  }

  async fn set_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem> {
    let mut cart_items = self.cart_items.write();
    let item = cart_items
      .entry((user_id, product_id))
      .and_modify(|item| item.quantity = quantity)
      .or_insert_with(|| CartItem {
        id: Uuid::new_v4(),
        user_id,
        product_id,
        quantity,
        added_at: Utc::now(),
      });
    Ok(item.clone())
  }

  async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> MarketResult<()> {
    self.cart_items.write().remove(&(user_id, product_id));
    Ok(())
  }

  async fn clear_cart(&self, user_id: Uuid) -> MarketResult<u64> {
    let mut cart_items = self.cart_items.write();
    let before = cart_items.len();
    cart_items.retain(|(owner, _), _| *owner != user_id);
    Ok((before - cart_items.len()) as u64)
  }

  async fn purge_product(&self, product_id: Uuid) -> MarketResult<u64> {
    let mut cart_items = self.cart_items.write();
    let before = cart_items.len();
    cart_items.retain(|(_, product), _| *product != product_id);
    Ok((before - cart_items.len()) as u64)
  }
}

#[async_trait]
impl OrderStore for MemoryStore {
  async fn insert_order_header(&self, order: &Order) -> MarketResult<()> {
    let header = Order {
      items: Vec::new(),
      ..order.clone()
    };
    self.orders.write().insert(header.id, header);
    Ok(())
  }

  async fn insert_line_items(&self, order_id: Uuid, items: &[OrderLineItem]) -> MarketResult<()> {
    let mut orders = self.orders.write();
    let order = orders.get_mut(&order_id).ok_or(MarketError::OrderNotFound { order_id })?;
    order.items.extend_from_slice(items);
    Ok(())
  }

  async fn order_by_id(&self, order_id: Uuid) -> MarketResult<Option<Order>> {
    Ok(self.orders.read().get(&order_id).cloned())
  }

  async fn orders_for_buyer(&self, buyer_id: Uuid) -> MarketResult<Vec<Order>> {
    let mut orders: Vec<Order> = self
      .orders
      .read()
      .values()
      .filter(|order| order.buyer_id == buyer_id)
      .cloned()
      .collect();
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
  }

  async fn orders_for_seller(&self, seller_id: Uuid) -> MarketResult<Vec<Order>> {
    let mut orders: Vec<Order> = self
      .orders
      .read()
      .values()
      .filter(|order| order.involves_seller(seller_id))
      .cloned()
      .collect();
    orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
    Ok(orders)
  }

  async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> MarketResult<()> {
    let mut orders = self.orders.write();
    let order = orders.get_mut(&order_id).ok_or(MarketError::OrderNotFound { order_id })?;
    order.status = status;
    Ok(())
  }

  async fn delete_order(&self, order_id: Uuid) -> MarketResult<()> {
    self.orders.write().remove(&order_id);
    Ok(())
  }
}
