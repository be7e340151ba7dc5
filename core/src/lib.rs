// src/lib.rs

//! Agrimart: the domain core of an agricultural supplies marketplace.
//!
//! Buyers fill per-user carts from a shared product catalog and check out;
//! sellers list products and move the resulting orders through a fixed
//! lifecycle. The crate provides:
//!  - The data model (products, cart items, orders with line-item snapshots).
//!  - Storage contracts plus PostgreSQL and in-memory adapters.
//!  - The order placement workflow: advisory stock validation, order and
//!    line-item creation, atomic conditional stock decrements, cart clearing,
//!    with explicit compensation on partial failure.
//!  - The order status machine with an enforced transition graph.
//!  - Cart and catalog passthrough services with ownership checks.
//!
//! Stock consistency rests on a single primitive: the storage layer's atomic
//! compare-and-decrement. Everything else tolerates last-write-wins.
//!
//! Authentication is out of scope; every entry point takes an explicit
//! [`UserIdentity`] resolved by the caller.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod identity;
pub mod models;
pub mod orders;
pub mod store;

// --- Re-exports for the Public API ---

pub use crate::error::{MarketError, MarketResult};
pub use crate::identity::{Role, UserIdentity};

pub use crate::models::{CartItem, Category, Order, OrderLineItem, OrderStatus, PaymentMethod, Product};

pub use crate::checkout::{place_order, LineItemRequest, PlaceOrderRequest};
pub use crate::orders::{orders_for_buyer, orders_for_seller, update_status};

pub use crate::store::{CartStore, MarketStore, MemoryStore, OrderStore, PgStore, ProductStore};
