// src/store/product.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::product::{Category, Product, ProductDraft, ProductImage, ProductStatus};

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
  pub category: Option<Category>,
  pub sub_category: Option<String>,
}

/// Persistent product catalog. Owns the product records outright; the cart
/// store only ever holds copies of what it reads from here.
///
/// Admin mutations take the caller-supplied credential and verify it against
/// the secret injected at construction, before touching storage.
pub struct ProductStore {
  pool: SqlitePool,
  admin_secret: String,
}

impl ProductStore {
  pub fn new(pool: SqlitePool, admin_secret: impl Into<String>) -> Self {
    Self {
      pool,
      admin_secret: admin_secret.into(),
    }
  }

  /// Credential gate for admin mutations. Checked before existence, so the
  /// response never discloses whether the target id exists.
  fn check_admin(&self, password: &str) -> Result<()> {
    if password != self.admin_secret {
      warn!("Admin credential mismatch.");
      return Err(AppError::Auth("Invalid admin credential.".to_string()));
    }
    Ok(())
  }

  #[instrument(name = "product_store::create", skip(self, password, draft))]
  pub async fn create(&self, password: &str, draft: &ProductDraft) -> Result<Uuid> {
    self.check_admin(password)?;
    let fields = draft.validate()?;
    let id = Uuid::new_v4();
    let (image_mime, image_data, image_url) = image_columns(fields.image.as_ref());

    sqlx::query(
      "INSERT INTO products (id, title, description, price, category, sub_category, image_mime, image_data, image_url, status, created_at) \
       VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
    )
    .bind(id.to_string())
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.price.to_string())
    .bind(fields.category.as_str())
    .bind(&fields.sub_category)
    .bind(image_mime)
    .bind(image_data)
    .bind(image_url)
    .bind(ProductStatus::Available.as_str())
    .bind(Utc::now())
    .execute(&self.pool)
    .await?;

    info!(product_id = %id, "Product created.");
    Ok(id)
  }

  /// Full replace of the mutable fields. An absent id fails with `NotFound`.
  #[instrument(name = "product_store::update", skip(self, password, draft), fields(product_id = %id))]
  pub async fn update(&self, password: &str, id: Uuid, draft: &ProductDraft) -> Result<Uuid> {
    self.check_admin(password)?;
    let fields = draft.validate()?;
    let (image_mime, image_data, image_url) = image_columns(fields.image.as_ref());

    let result = sqlx::query(
      "UPDATE products SET title = $1, description = $2, price = $3, category = $4, sub_category = $5, \
       image_mime = $6, image_data = $7, image_url = $8 WHERE id = $9",
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.price.to_string())
    .bind(fields.category.as_str())
    .bind(&fields.sub_category)
    .bind(image_mime)
    .bind(image_data)
    .bind(image_url)
    .bind(id.to_string())
    .execute(&self.pool)
    .await?;

    if result.rows_affected() == 0 {
      warn!(product_id = %id, "Update targeted a nonexistent product.");
      return Err(AppError::NotFound(format!("Product with ID {} not found.", id)));
    }
    info!(product_id = %id, "Product updated.");
    Ok(id)
  }

  /// Idempotent on an already-sold product; `NotFound` for an absent id.
  #[instrument(name = "product_store::mark_sold", skip(self, password), fields(product_id = %id))]
  pub async fn mark_sold(&self, password: &str, id: Uuid) -> Result<Uuid> {
    self.check_admin(password)?;
    let result = sqlx::query("UPDATE products SET status = 'sold' WHERE id = $1")
      .bind(id.to_string())
      .execute(&self.pool)
      .await?;

    if result.rows_affected() == 0 {
      return Err(AppError::NotFound(format!("Product with ID {} not found.", id)));
    }
    info!(product_id = %id, "Product marked sold.");
    Ok(id)
  }

  /// Removes the record entirely. Deleting an id that is already gone succeeds.
  #[instrument(name = "product_store::delete", skip(self, password), fields(product_id = %id))]
  pub async fn delete(&self, password: &str, id: Uuid) -> Result<()> {
    self.check_admin(password)?;
    sqlx::query("DELETE FROM products WHERE id = $1")
      .bind(id.to_string())
      .execute(&self.pool)
      .await?;
    info!(product_id = %id, "Product deleted.");
    Ok(())
  }

  pub async fn get(&self, id: Uuid) -> Result<Option<Product>> {
    let product: Option<Product> = sqlx::query_as(
      "SELECT id, title, description, price, category, sub_category, image_mime, image_data, image_url, status, created_at \
       FROM products WHERE id = $1",
    )
    .bind(id.to_string())
    .fetch_optional(&self.pool)
    .await?;
    Ok(product)
  }

  /// Filtered retrieval. No filter returns the whole catalog. The category
  /// narrows at the query; the subCategory predicate runs as a second pass
  /// over the fetched rows.
  #[instrument(name = "product_store::list", skip(self))]
  pub async fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = match &filter.category {
      Some(category) => {
        sqlx::query_as(
          "SELECT id, title, description, price, category, sub_category, image_mime, image_data, image_url, status, created_at \
           FROM products WHERE category = $1 ORDER BY created_at ASC",
        )
        .bind(category.as_str())
        .fetch_all(&self.pool)
        .await?
      }
      None => {
        sqlx::query_as(
          "SELECT id, title, description, price, category, sub_category, image_mime, image_data, image_url, status, created_at \
           FROM products ORDER BY created_at ASC",
        )
        .fetch_all(&self.pool)
        .await?
      }
    };

    if let Some(sub) = &filter.sub_category {
      products.retain(|p| p.sub_category.as_deref() == Some(sub.as_str()));
    }
    Ok(products)
  }
}

fn image_columns(image: Option<&ProductImage>) -> (Option<String>, Option<Vec<u8>>, Option<String>) {
  match image {
    Some(ProductImage::Data { mime, bytes }) => (Some(mime.clone()), Some(bytes.clone()), None),
    Some(ProductImage::External(url)) => (None, None, Some(url.clone())),
    None => (None, None, None),
  }
}
