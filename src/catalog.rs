// src/catalog.rs

//! Thin query composition over the product store, backing the browse and
//! search views.

use std::sync::Arc;

use tracing::instrument;

use crate::errors::Result;
use crate::models::product::Product;
use crate::store::product::{ProductFilter, ProductStore};

pub struct Catalog {
  products: Arc<ProductStore>,
}

impl Catalog {
  pub fn new(products: Arc<ProductStore>) -> Self {
    Self { products }
  }

  /// Filtered browse, including the combined category+subCategory queries the
  /// showroom and furniture views issue.
  #[instrument(name = "catalog::browse", skip(self))]
  pub async fn browse(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
    self.products.list(filter).await
  }

  /// Case-insensitive substring match over title and description, narrowing
  /// the full unfiltered catalog.
  #[instrument(name = "catalog::search", skip(self))]
  pub async fn search(&self, query: &str) -> Result<Vec<Product>> {
    let needle = query.to_lowercase();
    let mut products = self.products.list(&ProductFilter::default()).await?;
    products.retain(|p| {
      p.title.to_lowercase().contains(&needle)
        || p
          .description
          .as_deref()
          .map_or(false, |d| d.to_lowercase().contains(&needle))
    });
    Ok(products)
  }
}
