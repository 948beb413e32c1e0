// src/store/cart.rs

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::cart::CartLine;
use crate::store::product::ProductStore;

struct SessionCart {
  lines: Vec<CartLine>,
  expires_at: DateTime<Utc>,
}

impl SessionCart {
  fn new(ttl: Duration) -> Self {
    SessionCart {
      lines: Vec::new(),
      expires_at: Utc::now() + ttl,
    }
  }

  fn expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }
}

/// Per-session shopping carts, keyed by the opaque token the HTTP layer
/// carries in a cookie. Every operation takes the session token explicitly.
///
/// A cart lives for a fixed TTL from its first use and reads as empty after
/// that; expired entries are dropped on the next mutating access. There is no
/// background sweeper.
pub struct CartStore {
  products: Arc<ProductStore>,
  sessions: RwLock<HashMap<Uuid, SessionCart>>,
  ttl: Duration,
}

impl CartStore {
  pub fn new(products: Arc<ProductStore>, ttl: Duration) -> Self {
    Self {
      products,
      sessions: RwLock::new(HashMap::new()),
      ttl,
    }
  }

  /// Current lines in insertion order; empty for an unknown or expired session.
  #[instrument(name = "cart_store::view", skip(self))]
  pub fn view(&self, session: Uuid) -> Vec<CartLine> {
    let sessions = self.sessions.read();
    match sessions.get(&session) {
      Some(cart) if !cart.expired() => cart.lines.clone(),
      _ => Vec::new(),
    }
  }

  /// Merge a product into the cart. A line that already exists for the id has
  /// its quantity incremented; otherwise a new line is appended with a fresh
  /// snapshot of the product. Quantity coerces to a minimum of 1.
  ///
  /// The snapshot is fetched before the map lock is taken; the find-or-insert
  /// below runs atomically under the write lock, so concurrent adds to one
  /// session cannot lose increments.
  #[instrument(name = "cart_store::add", skip(self))]
  pub async fn add(&self, session: Uuid, product_id: Uuid, quantity: Option<i64>) -> Result<Vec<CartLine>> {
    let quantity = clamp_quantity(quantity.unwrap_or(1).max(1));
    let product = self
      .products
      .get(product_id)
      .await?
      .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", product_id)))?;

    let mut sessions = self.sessions.write();
    sessions.retain(|_, cart| !cart.expired());
    let cart = sessions.entry(session).or_insert_with(|| SessionCart::new(self.ttl));

    match cart.lines.iter_mut().find(|l| l.product.id == product_id) {
      Some(line) => line.quantity = line.quantity.saturating_add(quantity),
      None => cart.lines.push(CartLine { product, quantity }),
    }
    info!(lines = cart.lines.len(), "Cart updated.");
    Ok(cart.lines.clone())
  }

  /// Absolute overwrite of an existing line's quantity (the semantic
  /// difference from `add`). Zero removes the line; a line that was never
  /// added fails with `NotFound`. Quantity coerces to a minimum of 0.
  #[instrument(name = "cart_store::set_quantity", skip(self))]
  pub fn set_quantity(&self, session: Uuid, product_id: Uuid, quantity: i64) -> Result<Vec<CartLine>> {
    let quantity = clamp_quantity(quantity.max(0));

    let mut sessions = self.sessions.write();
    sessions.retain(|_, cart| !cart.expired());
    let cart = sessions
      .get_mut(&session)
      .ok_or_else(|| AppError::NotFound("Item not found in cart.".to_string()))?;
    let index = cart
      .lines
      .iter()
      .position(|l| l.product.id == product_id)
      .ok_or_else(|| AppError::NotFound("Item not found in cart.".to_string()))?;

    if quantity == 0 {
      cart.lines.remove(index);
    } else {
      cart.lines[index].quantity = quantity;
    }
    Ok(cart.lines.clone())
  }

  /// Drop the session's cart entirely. Always succeeds, idempotent.
  #[instrument(name = "cart_store::clear", skip(self))]
  pub fn clear(&self, session: Uuid) {
    self.sessions.write().remove(&session);
  }
}

fn clamp_quantity(q: i64) -> u32 {
  q.clamp(0, i64::from(u32::MAX)) as u32
}
