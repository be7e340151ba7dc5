// demos/marketplace_app/src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use agrimart::cart;

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

// --- Request DTOs ---

#[derive(Deserialize, Debug)]
pub struct CartItemPayload {
  pub product_id: Uuid,
  pub quantity: i32,
}

#[derive(Deserialize, Debug)]
pub struct CartProductPayload {
  pub product_id: Uuid,
}

// --- Handler Implementations ---

#[instrument(name = "handler::view_cart", skip(app_state, auth_user), fields(user_id = %auth_user.identity.id))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let items = cart::cart_for_user(app_state.store.as_ref(), &auth_user.identity).await?;
  Ok(HttpResponse::Ok().json(json!({ "cart": items })))
}

#[instrument(
    name = "handler::add_to_cart",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.identity.id, product_id = %payload.product_id, quantity = %payload.quantity)
)]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CartItemPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let item = cart::add_to_cart(
    app_state.store.as_ref(),
    &auth_user.identity,
    payload.product_id,
    payload.quantity,
  )
  .await?;

  info!(
    "Add to cart successful for user: {}. Product: {}, New Quantity: {}",
    auth_user.identity.id, item.product_id, item.quantity
  );

  Ok(HttpResponse::Ok().json(json!({
      "message": "Item added to cart successfully.",
      "cartItem": item
  })))
}

#[instrument(
    name = "handler::update_cart_quantity",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.identity.id, product_id = %payload.product_id, quantity = %payload.quantity)
)]
pub async fn update_cart_quantity_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CartItemPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let item = cart::update_cart_quantity(
    app_state.store.as_ref(),
    &auth_user.identity,
    payload.product_id,
    payload.quantity,
  )
  .await?;

  match item {
    Some(item) => Ok(HttpResponse::Ok().json(json!({
        "message": "Cart quantity updated.",
        "cartItem": item
    }))),
    // Zero or negative quantity: the row was deleted instead of stored.
    None => Ok(HttpResponse::Ok().json(json!({
        "message": "Item removed from cart."
    }))),
  }
}

#[instrument(
    name = "handler::remove_from_cart",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.identity.id, product_id = %payload.product_id)
)]
pub async fn remove_from_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CartProductPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  cart::remove_from_cart(app_state.store.as_ref(), &auth_user.identity, payload.product_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Item removed from cart." })))
}

#[instrument(name = "handler::clear_cart", skip(app_state, auth_user), fields(user_id = %auth_user.identity.id))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  cart::clear_cart(app_state.store.as_ref(), &auth_user.identity).await?;
  Ok(HttpResponse::Ok().json(json!({ "message": "Cart cleared." })))
}
