// src/store/mod.rs

//! Persistence layer: the SQL-backed product catalog and the in-process
//! session cart map.

pub mod cart;
pub mod product;

pub use cart::CartStore;
pub use product::{ProductFilter, ProductStore};

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::errors::Result;

pub async fn connect(database_url: &str) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
  let pool = SqlitePoolOptions::new().max_connections(5).connect_with(options).await?;
  Ok(pool)
}

/// Bootstrap the catalog table. Runs at startup; a no-op when it already exists.
pub async fn setup_schema(pool: &SqlitePool) -> Result<()> {
  sqlx::query(
    r#"
    CREATE TABLE IF NOT EXISTS products (
      id TEXT PRIMARY KEY,
      title TEXT NOT NULL,
      description TEXT,
      price TEXT NOT NULL,
      category TEXT NOT NULL,
      sub_category TEXT,
      image_mime TEXT,
      image_data BLOB,
      image_url TEXT,
      status TEXT NOT NULL DEFAULT 'available',
      created_at TEXT NOT NULL
    )
    "#,
  )
  .execute(pool)
  .await?;
  tracing::info!("Product schema ready.");
  Ok(())
}
