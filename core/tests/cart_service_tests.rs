// tests/cart_service_tests.rs
mod common;

use common::*;

use agrimart::store::MemoryStore;
use agrimart::{cart, MarketError};

#[tokio::test]
async fn test_add_accumulates_onto_existing_row() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;

  let item = cart::add_to_cart(&store, &customer, urea.id, 2).await.unwrap();
  assert_eq!(item.quantity, 2);
  let item = cart::add_to_cart(&store, &customer, urea.id, 3).await.unwrap();
  assert_eq!(item.quantity, 5);

  let items = cart::cart_for_user(&store, &customer).await.unwrap();
  assert_eq!(items.len(), 1, "one row per (user, product)");
}

#[tokio::test]
async fn test_add_rejects_unknown_product_and_bad_quantity() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;

  let err = cart::add_to_cart(&store, &customer, uuid::Uuid::new_v4(), 1)
    .await
    .expect_err("unknown product");
  assert!(matches!(err, MarketError::ProductNotFound { .. }));

  let err = cart::add_to_cart(&store, &customer, urea.id, 0)
    .await
    .expect_err("zero quantity");
  assert!(matches!(err, MarketError::Validation(_)));
}

#[tokio::test]
async fn test_add_checks_stock_advisorily() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let feed = seed_product(&store, &farmer, "Cattle Feed 25kg", 104900, 3).await;

  let err = cart::add_to_cart(&store, &customer, feed.id, 4)
    .await
    .expect_err("4 requested of 3 in stock");
  assert!(matches!(err, MarketError::InsufficientStock { available: 3, requested: 4, .. }));

  // The check does not reserve anything.
  cart::add_to_cart(&store, &customer, feed.id, 3).await.unwrap();
  let product = agrimart::catalog::product_by_id(&store, feed.id).await.unwrap().unwrap();
  assert_eq!(product.quantity, 3);
}

#[tokio::test]
async fn test_update_sets_absolute_quantity() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;

  cart::add_to_cart(&store, &customer, urea.id, 2).await.unwrap();
  let item = cart::update_cart_quantity(&store, &customer, urea.id, 7)
    .await
    .unwrap()
    .expect("row kept");
  assert_eq!(item.quantity, 7, "set, not accumulate");

  // Updating a row that does not exist yet creates it.
  let spray = seed_product(&store, &farmer, "Neem Spray", 9900, 20).await;
  let item = cart::update_cart_quantity(&store, &customer, spray.id, 1)
    .await
    .unwrap()
    .expect("row created");
  assert_eq!(item.quantity, 1);
}

#[tokio::test]
async fn test_zero_quantity_deletes_the_row() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;

  cart::add_to_cart(&store, &customer, urea.id, 2).await.unwrap();
  let removed = cart::update_cart_quantity(&store, &customer, urea.id, 0).await.unwrap();
  assert!(removed.is_none());
  assert!(cart::cart_for_user(&store, &customer).await.unwrap().is_empty());

  // Zeroing an absent row is fine too.
  let removed = cart::update_cart_quantity(&store, &customer, urea.id, -3).await.unwrap();
  assert!(removed.is_none());
}

#[tokio::test]
async fn test_remove_and_clear_are_idempotent() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;
  let spray = seed_product(&store, &farmer, "Neem Spray", 9900, 20).await;

  cart::add_to_cart(&store, &customer, urea.id, 1).await.unwrap();
  cart::add_to_cart(&store, &customer, spray.id, 1).await.unwrap();

  cart::remove_from_cart(&store, &customer, urea.id).await.unwrap();
  cart::remove_from_cart(&store, &customer, urea.id)
    .await
    .expect("removing an absent row is a no-op");
  assert_eq!(cart::cart_for_user(&store, &customer).await.unwrap().len(), 1);

  cart::clear_cart(&store, &customer).await.unwrap();
  cart::clear_cart(&store, &customer)
    .await
    .expect("clearing an empty cart is a no-op");
  assert!(cart::cart_for_user(&store, &customer).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_carts_are_scoped_per_user() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let first = buyer("anita");
  let second = buyer("vikram");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;

  cart::add_to_cart(&store, &first, urea.id, 1).await.unwrap();
  cart::add_to_cart(&store, &second, urea.id, 5).await.unwrap();

  cart::clear_cart(&store, &first).await.unwrap();
  let others = cart::cart_for_user(&store, &second).await.unwrap();
  assert_eq!(others.len(), 1);
  assert_eq!(others[0].quantity, 5);
}
