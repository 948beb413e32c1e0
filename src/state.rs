// src/state.rs

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::store::{CartStore, ProductStore};

#[derive(Clone)]
pub struct AppState {
  pub db_pool: SqlitePool,
  pub products: Arc<ProductStore>,
  pub cart: Arc<CartStore>,
  pub catalog: Arc<Catalog>,
  pub config: Arc<AppConfig>,
}

impl AppState {
  /// Wire up the stores against an already-connected pool. The admin secret
  /// and the cart TTL come from the injected configuration.
  pub fn new(config: Arc<AppConfig>, db_pool: SqlitePool) -> Self {
    let products = Arc::new(ProductStore::new(db_pool.clone(), config.admin_password.clone()));
    let cart = Arc::new(CartStore::new(products.clone(), config.cart_ttl()));
    let catalog = Arc::new(Catalog::new(products.clone()));
    Self {
      db_pool,
      products,
      cart,
      catalog,
      config,
    }
  }
}
