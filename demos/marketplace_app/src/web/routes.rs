// demos/marketplace_app/src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{cart_handlers, checkout_handlers, order_handlers, product_handlers};

// Simple health check. In a real deployment this might also probe the
// database pool.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called in `main.rs` to configure services for the Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1") // Base path for API version 1
      // Health Check Route
      .route("/health", web::get().to(health_check_handler))
      // Product Catalog Routes
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::add_product_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      // Cart Routes
      // User identity comes from the AuthenticatedUser extractor.
      .service(
        web::scope("/cart")
          .route("", web::get().to(cart_handlers::view_cart_handler))
          .route("/add", web::post().to(cart_handlers::add_to_cart_handler))
          .route("/update", web::post().to(cart_handlers::update_cart_quantity_handler))
          .route("/remove", web::post().to(cart_handlers::remove_from_cart_handler))
          .route("/clear", web::post().to(cart_handlers::clear_cart_handler)),
      )
      // Checkout Route
      .service(web::scope("/checkout").route("", web::post().to(checkout_handlers::place_order_handler)))
      // Order Routes: buyer view, seller view, lifecycle updates
      .service(
        web::scope("/orders")
          .route("/mine", web::get().to(order_handlers::my_orders_handler))
          .route("/received", web::get().to(order_handlers::received_orders_handler))
          .route(
            "/{order_id}/status",
            web::post().to(order_handlers::update_order_status_handler),
          ),
      ),
  );
}
