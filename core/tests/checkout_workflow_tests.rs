// tests/checkout_workflow_tests.rs
mod common;

use std::sync::Arc;

use common::*;
use serial_test::serial;

use agrimart::store::MemoryStore;
use agrimart::{cart, catalog, place_order, MarketError, OrderStatus};

#[tokio::test]
async fn test_place_order_happy_path() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");

  let compost = seed_product(&store, &farmer, "Vermicompost 5kg", 2599, 50).await;
  cart::add_to_cart(&store, &customer, compost.id, 2)
    .await
    .expect("add to cart");

  let order = place_order(&store, &customer, order_request(&[(compost.id, 2)]))
    .await
    .expect("checkout should succeed");

  assert_eq!(order.status, OrderStatus::Pending);
  assert_eq!(order.buyer_id, customer.id);
  assert_eq!(order.items.len(), 1);
  assert_eq!(order.items[0].product_id, compost.id);
  assert_eq!(order.items[0].quantity, 2);
  assert_eq!(order.items[0].price_cents, 2599);
  assert_eq!(order.total_cents, 5198);
  assert_eq!(order.computed_total_cents(), order.total_cents);

  // Stock consumed, cart emptied, order durable.
  let left = catalog::product_by_id(&store, compost.id).await.unwrap().unwrap();
  assert_eq!(left.quantity, 48);
  assert!(cart::cart_for_user(&store, &customer).await.unwrap().is_empty());
  let placed = agrimart::orders_for_buyer(&store, &customer).await.unwrap();
  assert_eq!(placed.len(), 1);
  assert_eq!(placed[0].id, order.id);
  assert_eq!(placed[0].items.len(), 1);
}

#[tokio::test]
async fn test_total_is_sum_of_line_subtotals() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");

  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;
  let spray = seed_product(&store, &farmer, "Neem Spray", 9900, 20).await;

  let order = place_order(&store, &customer, order_request(&[(urea.id, 3), (spray.id, 2)]))
    .await
    .expect("checkout should succeed");

  assert_eq!(order.items.len(), 2);
  assert_eq!(order.total_cents, 3 * 26650 + 2 * 9900);
  assert_eq!(order.computed_total_cents(), order.total_cents);
}

#[tokio::test]
async fn test_insufficient_stock_is_rejected_up_front() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");

  let feed = seed_product(&store, &farmer, "Cattle Feed 25kg", 104900, 3).await;
  cart::add_to_cart(&store, &customer, feed.id, 3).await.expect("add");

  let err = place_order(&store, &customer, order_request(&[(feed.id, 10)]))
    .await
    .expect_err("10 requested of 3 in stock must fail");

  assert!(err.is_retryable(), "stock shortage is safe to retry after re-checking");
  match err {
    MarketError::InsufficientStock {
      product,
      available,
      requested,
    } => {
      assert_eq!(product, "Cattle Feed 25kg");
      assert_eq!(available, 3);
      assert_eq!(requested, 10);
    }
    other => panic!("expected InsufficientStock, got {:?}", other),
  }

  // Nothing happened: no order, stock intact, cart untouched.
  assert!(agrimart::orders_for_buyer(&store, &customer).await.unwrap().is_empty());
  let untouched = catalog::product_by_id(&store, feed.id).await.unwrap().unwrap();
  assert_eq!(untouched.quantity, 3);
  assert_eq!(cart::cart_for_user(&store, &customer).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_product_is_rejected() {
  setup_tracing();
  let store = MemoryStore::new();
  let customer = buyer("anita");

  let ghost = uuid::Uuid::new_v4();
  let err = place_order(&store, &customer, order_request(&[(ghost, 1)]))
    .await
    .expect_err("unknown product must fail");

  assert!(matches!(err, MarketError::ProductNotFound { product_id } if product_id == ghost));
}

#[tokio::test]
async fn test_empty_order_is_rejected() {
  setup_tracing();
  let store = MemoryStore::new();
  let customer = buyer("anita");

  let err = place_order(&store, &customer, order_request(&[]))
    .await
    .expect_err("empty line list must fail");
  assert!(matches!(err, MarketError::Validation(_)));
}

#[tokio::test]
async fn test_nonpositive_quantity_is_rejected() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");
  let urea = seed_product(&store, &farmer, "Urea 45kg", 26650, 20).await;

  let err = place_order(&store, &customer, order_request(&[(urea.id, 0)]))
    .await
    .expect_err("zero quantity must fail");
  assert!(matches!(err, MarketError::Validation(_)));
  assert!(agrimart::orders_for_buyer(&store, &customer).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_line_items_snapshot_survives_price_change() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");

  let mut spray = seed_product(&store, &farmer, "Neem Spray", 1000, 10).await;
  let order = place_order(&store, &customer, order_request(&[(spray.id, 1)]))
    .await
    .expect("checkout should succeed");
  assert_eq!(order.items[0].price_cents, 1000);

  // Seller doubles the price after the sale.
  spray.price_cents = 2000;
  agrimart::store::ProductStore::insert_product(&store, &spray)
    .await
    .expect("price edit");

  let reread = agrimart::orders_for_buyer(&store, &customer).await.unwrap();
  assert_eq!(reread[0].items[0].price_cents, 1000);
  assert_eq!(reread[0].total_cents, 1000);
}

#[tokio::test]
async fn test_line_items_snapshot_survives_product_deletion() {
  setup_tracing();
  let store = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");

  let spray = seed_product(&store, &farmer, "Neem Spray", 1000, 10).await;
  let order = place_order(&store, &customer, order_request(&[(spray.id, 2)]))
    .await
    .expect("checkout should succeed");

  catalog::delete_product(&store, &farmer, spray.id)
    .await
    .expect("seller removes the listing");

  let reread = agrimart::orders_for_buyer(&store, &customer).await.unwrap();
  assert_eq!(reread[0].id, order.id);
  assert_eq!(reread[0].items.len(), 1);
  assert_eq!(reread[0].items[0].product_name, "Neem Spray");
}

#[tokio::test]
#[serial]
async fn test_concurrent_checkouts_cannot_oversell() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let farmer = seller("ramesh");
  let first = buyer("anita");
  let second = buyer("vikram");

  let feed = seed_product(&store, &farmer, "Cattle Feed 25kg", 104900, 5).await;

  let store_a = store.clone();
  let store_b = store.clone();
  let request_a = order_request(&[(feed.id, 3)]);
  let request_b = order_request(&[(feed.id, 3)]);
  let buyer_a = first.clone();
  let buyer_b = second.clone();

  let task_a = tokio::spawn(async move { place_order(store_a.as_ref(), &buyer_a, request_a).await });
  let task_b = tokio::spawn(async move { place_order(store_b.as_ref(), &buyer_b, request_b).await });

  let result_a = task_a.await.expect("task a join");
  let result_b = task_b.await.expect("task b join");

  // Exactly one of the two competing checkouts may win.
  let successes = [&result_a, &result_b].iter().filter(|r| r.is_ok()).count();
  assert_eq!(successes, 1, "one checkout must win, got {:?} / {:?}", result_a, result_b);
  let loser = if result_a.is_err() { result_a } else { result_b };
  assert!(matches!(loser, Err(MarketError::InsufficientStock { .. })));

  let left = catalog::product_by_id(store.as_ref(), feed.id).await.unwrap().unwrap();
  assert_eq!(left.quantity, 2, "5 - 3 = 2, never negative, never double-sold");
}

#[tokio::test]
async fn test_losing_decrement_restores_earlier_lines() {
  setup_tracing();
  // A rival consumes 1 unit of the second product after the advisory pass,
  // so its conditional decrement fails and the first line must be restored.
  let inner = MemoryStore::new();
  let farmer = seller("ramesh");
  let customer = buyer("anita");

  let urea = seed_product(&inner, &farmer, "Urea 45kg", 26650, 10).await;
  let feed = seed_product(&inner, &farmer, "Cattle Feed 25kg", 104900, 3).await;
  let store = RivalStore::new(inner, feed.id, 1);

  let err = place_order(&store, &customer, order_request(&[(urea.id, 2), (feed.id, 3)]))
    .await
    .expect_err("the rival purchase must sink this checkout");

  match err {
    MarketError::InsufficientStock { available, requested, .. } => {
      assert_eq!(available, 2);
      assert_eq!(requested, 3);
    }
    other => panic!("expected InsufficientStock, got {:?}", other),
  }

  // Compensation: urea decrement rolled back, no order records left behind.
  let urea_after = catalog::product_by_id(&store, urea.id).await.unwrap().unwrap();
  assert_eq!(urea_after.quantity, 10);
  let feed_after = catalog::product_by_id(&store, feed.id).await.unwrap().unwrap();
  assert_eq!(feed_after.quantity, 2, "only the rival's unit is gone");
  assert!(agrimart::orders_for_buyer(&store, &customer).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_stock_never_negative_across_many_checkouts() {
  setup_tracing();
  let store = Arc::new(MemoryStore::new());
  let farmer = seller("ramesh");
  let spray = seed_product(&store, &farmer, "Neem Spray", 9900, 7).await;

  let mut tasks = Vec::new();
  for i in 0..5 {
    let store = store.clone();
    let customer = buyer(&format!("buyer{}", i));
    let request = order_request(&[(spray.id, 2)]);
    tasks.push(tokio::spawn(async move {
      place_order(store.as_ref(), &customer, request).await
    }));
  }

  let mut wins = 0;
  for task in tasks {
    if task.await.expect("join").is_ok() {
      wins += 1;
    }
  }

  // 7 units / 2 per order: at most 3 checkouts can win.
  assert_eq!(wins, 3);
  let left = catalog::product_by_id(store.as_ref(), spray.id).await.unwrap().unwrap();
  assert_eq!(left.quantity, 1);
}
