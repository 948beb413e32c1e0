// src/models/cart.rs

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::product::Product;

/// One cart entry: a by-value snapshot of the product as it looked when the
/// line was created, plus a positive quantity. Later admin edits to the
/// catalog do not reach into existing lines.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
  pub product: Product,
  pub quantity: u32,
}

impl CartLine {
  pub fn subtotal(&self) -> Decimal {
    self.product.price * Decimal::from(self.quantity)
  }
}

/// Sum of per-line subtotals. Derived on demand, never stored.
pub fn cart_total(lines: &[CartLine]) -> Decimal {
  lines.iter().map(CartLine::subtotal).sum()
}

/// Sum of line quantities.
pub fn cart_count(lines: &[CartLine]) -> u64 {
  lines.iter().map(|l| u64::from(l.quantity)).sum()
}
