// core/src/store/postgres.rs

//! PostgreSQL storage adapter.
//!
//! Runtime `sqlx` queries against the schema shipped with the demo app
//! (`demos/marketplace_app/schema.sql`). The stock decrement is a single
//! conditional UPDATE with a `quantity >= $n` guard; Postgres row locking
//! serializes conflicting decrements against the same product, so the guard
//! is evaluated at the moment of the write.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::error::{MarketError, MarketResult};
use crate::models::{CartItem, Order, OrderLineItem, OrderStatus, PaymentMethod, Product};
use crate::store::{CartStore, OrderStore, ProductStore};

#[derive(Clone)]
pub struct PgStore {
  pool: PgPool,
}

impl PgStore {
  pub fn new(pool: PgPool) -> Self {
    PgStore { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }

  /// Fetches line items for a batch of orders and attaches them to their
  /// headers, preserving the headers' ordering.
  async fn attach_items(&self, headers: Vec<OrderHeaderRow>) -> MarketResult<Vec<Order>> {
    if headers.is_empty() {
      return Ok(Vec::new());
    }

    let order_ids: Vec<Uuid> = headers.iter().map(|h| h.id).collect();
    let items: Vec<OrderLineItem> =
      sqlx::query_as("SELECT * FROM order_items WHERE order_id = ANY($1) ORDER BY line_no ASC")
        .bind(order_ids)
        .fetch_all(&self.pool)
        .await?;

    let mut by_order: HashMap<Uuid, Vec<OrderLineItem>> = HashMap::new();
    for item in items {
      by_order.entry(item.order_id).or_default().push(item);
    }

    Ok(
      headers
        .into_iter()
        .map(|header| {
          let items = by_order.remove(&header.id).unwrap_or_default();
          header.into_order(items)
        })
        .collect(),
    )
  }
}

// The orders table holds headers only; items live in order_items and are
// attached after the fact.
#[derive(FromRow)]
struct OrderHeaderRow {
  id: Uuid,
  buyer_id: Uuid,
  buyer_name: String,
  buyer_email: String,
  total_cents: i64,
  payment_method: PaymentMethod,
  delivery_address: String,
  delivery_time: String,
  placed_at: DateTime<Utc>,
  status: OrderStatus,
}

impl OrderHeaderRow {
  fn into_order(self, items: Vec<OrderLineItem>) -> Order {
    Order {
      id: self.id,
      buyer_id: self.buyer_id,
      buyer_name: self.buyer_name,
      buyer_email: self.buyer_email,
      items,
      total_cents: self.total_cents,
      payment_method: self.payment_method,
      delivery_address: self.delivery_address,
      delivery_time: self.delivery_time,
      placed_at: self.placed_at,
      status: self.status,
    }
  }
}

#[async_trait]
impl ProductStore for PgStore {
  async fn product_by_id(&self, product_id: Uuid) -> MarketResult<Option<Product>> {
    let product = sqlx::query_as("SELECT * FROM products WHERE id = $1")
      .bind(product_id)
      .fetch_optional(&self.pool)
      .await?;
    Ok(product)
  }

  async fn list_products(&self) -> MarketResult<Vec<Product>> {
    let products = sqlx::query_as("SELECT * FROM products ORDER BY created_at DESC")
      .fetch_all(&self.pool)
      .await?;
    Ok(products)
  }

  async fn insert_product(&self, product: &Product) -> MarketResult<()> {
    sqlx::query(
      r#"
      INSERT INTO products
        (id, name, description, category, price_cents, quantity, seller_name, seller_id, rating, image_url, created_at)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
      "#,
    )
    .bind(product.id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.category)
    .bind(product.price_cents)
    .bind(product.quantity)
    .bind(&product.seller_name)
    .bind(product.seller_id)
    .bind(product.rating)
    .bind(&product.image_url)
    .bind(product.created_at)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn delete_product(&self, product_id: Uuid) -> MarketResult<()> {
    sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn decrement_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<i32> {
    // Compare-and-decrement in one statement; never read-then-write.
    let new_quantity: Option<i32> = sqlx::query_scalar(
      "UPDATE products SET quantity = quantity - $2 WHERE id = $1 AND quantity >= $2 RETURNING quantity",
    )
    .bind(product_id)
    .bind(amount)
    .fetch_optional(&self.pool)
    .await?;

    match new_quantity {
      Some(quantity) => Ok(quantity),
      // Guard unmet: either the stock ran out under us or the row is gone.
      None => {
        let row: Option<(String, i32)> = sqlx::query_as("SELECT name, quantity FROM products WHERE id = $1")
          .bind(product_id)
          .fetch_optional(&self.pool)
          .await?;
        match row {
          Some((name, available)) => Err(MarketError::InsufficientStock {
            product: name,
            available,
            requested: amount,
          }),
          None => Err(MarketError::ProductNotFound { product_id }),
        }
      }
    }
  }

  async fn restore_quantity(&self, product_id: Uuid, amount: i32) -> MarketResult<()> {
    let result = sqlx::query("UPDATE products SET quantity = quantity + $2 WHERE id = $1")
      .bind(product_id)
      .bind(amount)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      tracing::warn!(%product_id, amount, "restore_quantity: product no longer exists");
    }
    Ok(())
  }
}

#[async_trait]
impl CartStore for PgStore {
  async fn cart_for_user(&self, user_id: Uuid) -> MarketResult<Vec<CartItem>> {
    let items = sqlx::query_as("SELECT * FROM cart_items WHERE user_id = $1 ORDER BY added_at ASC")
      .bind(user_id)
      .fetch_all(&self.pool)
      .await?;
    Ok(items)
  }

  async fn add_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem> {
    let item = sqlx::query_as(
      r#"
      INSERT INTO cart_items (id, user_id, product_id, quantity, added_at)
      VALUES ($1, $2, $3, $4, NOW())
      ON CONFLICT (user_id, product_id) DO UPDATE
      SET quantity = cart_items.quantity + EXCLUDED.quantity
      RETURNING *
      "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&self.pool)
    .await?;
    Ok(item)
  }

  async fn set_cart_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> MarketResult<CartItem> {
    let item = sqlx::query_as(
      r#"
      INSERT INTO cart_items (id, user_id, product_id, quantity, added_at)
      VALUES ($1, $2, $3, $4, NOW())
      ON CONFLICT (user_id, product_id) DO UPDATE
      SET quantity = EXCLUDED.quantity
      RETURNING *
      "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(product_id)
    .bind(quantity)
    .fetch_one(&self.pool)
    .await?;
    Ok(item)
  }

  async fn remove_cart_item(&self, user_id: Uuid, product_id: Uuid) -> MarketResult<()> {
    sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND product_id = $2")
      .bind(user_id)
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }

  async fn clear_cart(&self, user_id: Uuid) -> MarketResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
      .bind(user_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }

  async fn purge_product(&self, product_id: Uuid) -> MarketResult<u64> {
    let result = sqlx::query("DELETE FROM cart_items WHERE product_id = $1")
      .bind(product_id)
      .execute(&self.pool)
      .await?;
    Ok(result.rows_affected())
  }
}

#[async_trait]
impl OrderStore for PgStore {
  async fn insert_order_header(&self, order: &Order) -> MarketResult<()> {
    sqlx::query(
      r#"
      INSERT INTO orders
        (id, buyer_id, buyer_name, buyer_email, total_cents, payment_method, delivery_address, delivery_time, placed_at, status)
      VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
      "#,
    )
    .bind(order.id)
    .bind(order.buyer_id)
    .bind(&order.buyer_name)
    .bind(&order.buyer_email)
    .bind(order.total_cents)
    .bind(order.payment_method)
    .bind(&order.delivery_address)
    .bind(&order.delivery_time)
    .bind(order.placed_at)
    .bind(order.status)
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn insert_line_items(&self, order_id: Uuid, items: &[OrderLineItem]) -> MarketResult<()> {
    // One INSERT per line; carts are small and the workflow compensates on
    // any mid-loop failure.
    for (line_no, item) in items.iter().enumerate() {
      sqlx::query(
        r#"
        INSERT INTO order_items
          (id, order_id, line_no, product_id, product_name, quantity, price_cents, seller_name, seller_id)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        "#,
      )
      .bind(item.id)
      .bind(order_id)
      .bind(line_no as i32)
      .bind(item.product_id)
      .bind(&item.product_name)
      .bind(item.quantity)
      .bind(item.price_cents)
      .bind(&item.seller_name)
      .bind(item.seller_id)
      .execute(&self.pool)
      .await?;
    }
    Ok(())
  }

  async fn order_by_id(&self, order_id: Uuid) -> MarketResult<Option<Order>> {
    let header: Option<OrderHeaderRow> = sqlx::query_as("SELECT * FROM orders WHERE id = $1")
      .bind(order_id)
      .fetch_optional(&self.pool)
      .await?;
    match header {
      Some(header) => {
        let mut orders = self.attach_items(vec![header]).await?;
        Ok(orders.pop())
      }
      None => Ok(None),
    }
  }

  async fn orders_for_buyer(&self, buyer_id: Uuid) -> MarketResult<Vec<Order>> {
    let headers: Vec<OrderHeaderRow> =
      sqlx::query_as("SELECT * FROM orders WHERE buyer_id = $1 ORDER BY placed_at DESC")
        .bind(buyer_id)
        .fetch_all(&self.pool)
        .await?;
    self.attach_items(headers).await
  }

  async fn orders_for_seller(&self, seller_id: Uuid) -> MarketResult<Vec<Order>> {
    let headers: Vec<OrderHeaderRow> = sqlx::query_as(
      r#"
      SELECT * FROM orders
      WHERE id IN (SELECT order_id FROM order_items WHERE seller_id = $1)
      ORDER BY placed_at DESC
      "#,
    )
    .bind(seller_id)
    .fetch_all(&self.pool)
    .await?;
    self.attach_items(headers).await
  }

  async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> MarketResult<()> {
    let result = sqlx::query("UPDATE orders SET status = $2 WHERE id = $1")
      .bind(order_id)
      .bind(status)
      .execute(&self.pool)
      .await?;
    if result.rows_affected() == 0 {
      return Err(MarketError::OrderNotFound { order_id });
    }
    Ok(())
  }

  async fn delete_order(&self, order_id: Uuid) -> MarketResult<()> {
    sqlx::query("DELETE FROM order_items WHERE order_id = $1")
      .bind(order_id)
      .execute(&self.pool)
      .await?;
    sqlx::query("DELETE FROM orders WHERE id = $1")
      .bind(order_id)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}
