// demos/marketplace_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use agrimart::catalog::{self, NewProduct};
use agrimart::MarketError;

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
  let products = catalog::list_products(app_state.store.as_ref()).await?;
  info!("Fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
  let product_id = path.into_inner();

  let product = catalog::product_by_id(app_state.store.as_ref(), product_id)
    .await?
    .ok_or(MarketError::ProductNotFound { product_id })?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product fetched successfully.",
      "product": product
  })))
}

#[instrument(
    name = "handler::add_product",
    skip(app_state, payload, auth_user),
    fields(seller_id = %auth_user.identity.id)
)]
pub async fn add_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<NewProduct>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let product = catalog::add_product(app_state.store.as_ref(), &auth_user.identity, payload.into_inner()).await?;
  info!("Product {} listed by seller {}.", product.id, auth_user.identity.id);

  Ok(HttpResponse::Created().json(json!({
      "message": "Product added successfully.",
      "product": product
  })))
}

#[instrument(
    name = "handler::delete_product",
    skip(app_state, path, auth_user),
    fields(seller_id = %auth_user.identity.id, product_id = %path.as_ref())
)]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let product_id = path.into_inner();
  catalog::delete_product(app_state.store.as_ref(), &auth_user.identity, product_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product deleted successfully."
  })))
}
