// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::product::Category;
use crate::state::AppState;
use crate::store::product::ProductFilter;

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsQuery {
  pub category: Option<String>,
  pub sub_category: Option<String>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(
  app_state: web::Data<AppState>,
  query: web::Query<ListProductsQuery>,
) -> Result<HttpResponse, AppError> {
  let filter = ProductFilter {
    category: query
      .category
      .as_deref()
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .map(Category::from),
    sub_category: query
      .sub_category
      .as_deref()
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(str::to_string),
  };

  let products = app_state.catalog.browse(&filter).await?;
  info!("Successfully fetched {} products.", products.len());
  Ok(HttpResponse::Ok().json(products))
}
