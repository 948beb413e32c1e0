// src/web/handlers/admin_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::product::ProductDraft;
use crate::state::AppState;

/// Admin mutation body: the shared credential rides alongside the product
/// fields, exactly as the admin panel posts it.
#[derive(Deserialize, Debug)]
pub struct AdminProductPayload {
  pub password: Option<String>,
  #[serde(flatten)]
  pub draft: ProductDraft,
}

#[derive(Deserialize, Debug)]
pub struct AdminCredentialPayload {
  pub password: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AdminCredentialQuery {
  pub password: Option<String>,
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<AdminProductPayload>,
) -> Result<HttpResponse, AppError> {
  let id = app_state
    .products
    .create(payload.password.as_deref().unwrap_or(""), &payload.draft)
    .await?;
  info!(product_id = %id, "Product created via admin surface.");
  Ok(HttpResponse::Created().json(json!({ "id": id })))
}

#[instrument(name = "handler::update_product", skip(app_state, payload, path), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<AdminProductPayload>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let id = app_state
    .products
    .update(payload.password.as_deref().unwrap_or(""), id, &payload.draft)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

#[instrument(name = "handler::mark_sold", skip(app_state, payload, path), fields(product_id = %path.as_ref()))]
pub async fn mark_sold_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  payload: web::Json<AdminCredentialPayload>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  let id = app_state
    .products
    .mark_sold(payload.password.as_deref().unwrap_or(""), id)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

#[instrument(name = "handler::delete_product", skip(app_state, query, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
  query: web::Query<AdminCredentialQuery>,
) -> Result<HttpResponse, AppError> {
  let id = path.into_inner();
  app_state
    .products
    .delete(query.password.as_deref().unwrap_or(""), id)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
