// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::cart::CartLine;
use crate::state::AppState;
use crate::web::session::CartSession;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
  pub product_id: Option<Uuid>,
  pub quantity: Option<i64>,
}

fn cart_response(app_state: &AppState, session: &CartSession, lines: &[CartLine]) -> HttpResponse {
  let mut builder = HttpResponse::Ok();
  if session.fresh {
    builder.cookie(session.issue_cookie(app_state.config.cart_ttl()));
  }
  builder.json(lines)
}

#[instrument(name = "handler::view_cart", skip(app_state, session), fields(session_id = %session.token))]
pub async fn view_cart_handler(
  app_state: web::Data<AppState>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let lines = app_state.cart.view(session.token);
  Ok(cart_response(&app_state, &session, &lines))
}

#[instrument(name = "handler::add_to_cart", skip(app_state, payload, session), fields(session_id = %session.token))]
pub async fn add_to_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CartMutationPayload>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let product_id = payload
    .product_id
    .ok_or_else(|| AppError::Validation("productId is required".to_string()))?;

  let lines = app_state.cart.add(session.token, product_id, payload.quantity).await?;
  info!(product_id = %product_id, lines = lines.len(), "Item added to cart.");
  Ok(cart_response(&app_state, &session, &lines))
}

#[instrument(name = "handler::update_cart", skip(app_state, payload, session), fields(session_id = %session.token))]
pub async fn update_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CartMutationPayload>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  let product_id = payload
    .product_id
    .ok_or_else(|| AppError::Validation("productId is required".to_string()))?;

  let lines = app_state
    .cart
    .set_quantity(session.token, product_id, payload.quantity.unwrap_or(0))?;
  Ok(cart_response(&app_state, &session, &lines))
}

#[instrument(name = "handler::clear_cart", skip(app_state, session), fields(session_id = %session.token))]
pub async fn clear_cart_handler(
  app_state: web::Data<AppState>,
  session: CartSession,
) -> Result<HttpResponse, AppError> {
  app_state.cart.clear(session.token);
  let mut builder = HttpResponse::Ok();
  if session.fresh {
    builder.cookie(session.issue_cookie(app_state.config.cart_ttl()));
  }
  Ok(builder.json(json!({ "ok": true })))
}
