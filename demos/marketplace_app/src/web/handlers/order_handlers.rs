// demos/marketplace_app/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use agrimart::{orders_for_buyer, orders_for_seller, update_status, OrderStatus};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

#[derive(Deserialize, Debug)]
pub struct UpdateStatusPayload {
  pub status: OrderStatus,
}

/// Orders the caller placed as a buyer.
#[instrument(name = "handler::my_orders", skip(app_state, auth_user), fields(user_id = %auth_user.identity.id))]
pub async fn my_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let orders = orders_for_buyer(app_state.store.as_ref(), &auth_user.identity).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

/// Orders containing at least one of the caller's products.
#[instrument(name = "handler::received_orders", skip(app_state, auth_user), fields(user_id = %auth_user.identity.id))]
pub async fn received_orders_handler(
  app_state: web::Data<AppState>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let orders = orders_for_seller(app_state.store.as_ref(), &auth_user.identity).await?;
  Ok(HttpResponse::Ok().json(json!({ "orders": orders })))
}

#[instrument(
    name = "handler::update_order_status",
    skip(app_state, path, payload, auth_user),
    fields(user_id = %auth_user.identity.id, order_id = %path.as_ref())
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<UpdateStatusPayload>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  let order_id = path.into_inner();
  let order = update_status(app_state.store.as_ref(), &auth_user.identity, order_id, payload.status).await?;

  info!("Order {} moved to {} by seller {}.", order.id, order.status, auth_user.identity.id);

  Ok(HttpResponse::Ok().json(json!({
      "message": "Order status updated.",
      "order": order
  })))
}
