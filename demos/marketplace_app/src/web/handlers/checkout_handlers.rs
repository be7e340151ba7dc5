// demos/marketplace_app/src/web/handlers/checkout_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};

use agrimart::{place_order, PlaceOrderRequest};

use crate::errors::ApiError;
use crate::state::AppState;
use crate::web::extractors::AuthenticatedUser;

/// Runs the full placement workflow for the authenticated buyer.
///
/// The request body only names product ids and quantities; pricing, totals
/// and seller attribution are resolved server-side. On success the buyer's
/// cart has been consumed and the order is returned with `status: pending`.
#[instrument(
    name = "handler::place_order",
    skip(app_state, payload, auth_user),
    fields(user_id = %auth_user.identity.id, lines = payload.lines.len())
)]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<PlaceOrderRequest>,
  auth_user: AuthenticatedUser,
) -> Result<HttpResponse, ApiError> {
  info!("Checkout initiated by user: {}", auth_user.identity.id);

  match place_order(app_state.store.as_ref(), &auth_user.identity, payload.into_inner()).await {
    Ok(order) => {
      info!(
        "Checkout completed for user: {}. Order ID: {}. Total: {} cents.",
        auth_user.identity.id, order.id, order.total_cents
      );
      Ok(HttpResponse::Created().json(json!({
          "message": "Order placed successfully.",
          "order": order
      })))
    }
    Err(err) => {
      // Insufficient stock and validation failures are expected outcomes
      // here; the error mapping picks the right status code.
      warn!("Checkout failed for user {}: {}", auth_user.identity.id, err);
      Err(err.into())
    }
  }
}
