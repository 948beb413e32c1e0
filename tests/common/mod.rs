// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers across the test binaries

use std::sync::Arc;

use rust_decimal::Decimal;
use sqlx::sqlite::SqlitePoolOptions;
use uuid::Uuid;

use olatech_store::config::AppConfig;
use olatech_store::models::ProductDraft;
use olatech_store::state::AppState;
use olatech_store::store;

pub const TEST_ADMIN_PASSWORD: &str = "test-secret";

pub fn test_config(cart_ttl_hours: i64) -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    database_url: "sqlite::memory:".to_string(),
    admin_password: TEST_ADMIN_PASSWORD.to_string(),
    cart_ttl_hours,
  }
}

/// Fresh application state over an in-memory database. A single pooled
/// connection keeps the in-memory database alive for the test's duration.
pub async fn test_state_with_ttl(cart_ttl_hours: i64) -> anyhow::Result<AppState> {
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .min_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect("sqlite::memory:")
    .await?;
  store::setup_schema(&pool).await?;
  Ok(AppState::new(Arc::new(test_config(cart_ttl_hours)), pool))
}

pub async fn test_state() -> anyhow::Result<AppState> {
  test_state_with_ttl(24).await
}

pub fn draft(title: &str, price: i64, category: &str, sub_category: Option<&str>) -> ProductDraft {
  ProductDraft {
    title: Some(title.to_string()),
    description: None,
    price: Some(Decimal::from(price)),
    category: Some(category.to_string()),
    sub_category: sub_category.map(str::to_string),
    image: None,
  }
}

pub async fn seed_product(
  state: &AppState,
  title: &str,
  price: i64,
  category: &str,
  sub_category: Option<&str>,
) -> anyhow::Result<Uuid> {
  let id = state
    .products
    .create(TEST_ADMIN_PASSWORD, &draft(title, price, category, sub_category))
    .await?;
  Ok(id)
}
