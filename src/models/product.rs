// src/models/product.rs

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};
use uuid::Uuid;

use crate::errors::{AppError, Result};

/// Product category. Four values are meaningful to the storefront UI, but the
/// domain is open: browse views also query ad-hoc categories (e.g. `showroom`),
/// which are preserved rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
  Land,
  Properties,
  Furnitures,
  Auto,
  Other(String),
}

impl Category {
  pub fn as_str(&self) -> &str {
    match self {
      Category::Land => "land",
      Category::Properties => "properties",
      Category::Furnitures => "furnitures",
      Category::Auto => "auto",
      Category::Other(s) => s,
    }
  }
}

impl From<&str> for Category {
  fn from(s: &str) -> Self {
    match s {
      "land" => Category::Land,
      "properties" => Category::Properties,
      "furnitures" => Category::Furnitures,
      "auto" => Category::Auto,
      other => Category::Other(other.to_string()),
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl Serialize for Category {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(self.as_str())
  }
}

impl<'de> Deserialize<'de> for Category {
  fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
    String::deserialize(deserializer).map(|s| Category::from(s.as_str()))
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
  #[default]
  Available,
  Sold,
}

impl ProductStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      ProductStatus::Available => "available",
      ProductStatus::Sold => "sold",
    }
  }
}

impl From<&str> for ProductStatus {
  fn from(s: &str) -> Self {
    if s.eq_ignore_ascii_case("sold") {
      ProductStatus::Sold
    } else {
      ProductStatus::Available
    }
  }
}

/// A product image: either an inline binary payload with its MIME type, or a
/// reference to an externally hosted URL. On the wire both collapse to a single
/// string (a `data:` URI for the former).
///
/// Invariant: an inline payload is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductImage {
  Data { mime: String, bytes: Vec<u8> },
  External(String),
}

impl ProductImage {
  /// Parse the wire form. `data:` URIs are decoded into payload + MIME type;
  /// anything else is treated as an external URL and passed through verbatim.
  pub fn from_wire(value: &str) -> Result<Self> {
    if let Some(rest) = value.strip_prefix("data:") {
      let (mime, payload) = rest
        .split_once(";base64,")
        .ok_or_else(|| AppError::Validation("image must be a base64 data URI or a URL".to_string()))?;
      if mime.is_empty() {
        return Err(AppError::Validation("image data URI is missing a MIME type".to_string()));
      }
      let bytes = BASE64
        .decode(payload)
        .map_err(|e| AppError::Validation(format!("image payload is not valid base64: {}", e)))?;
      if bytes.is_empty() {
        return Err(AppError::Validation("image payload is empty".to_string()));
      }
      Ok(ProductImage::Data {
        mime: mime.to_string(),
        bytes,
      })
    } else {
      Ok(ProductImage::External(value.to_string()))
    }
  }

  /// Reconstitute the self-describing wire form.
  pub fn to_wire(&self) -> String {
    match self {
      ProductImage::Data { mime, bytes } => format!("data:{};base64,{}", mime, BASE64.encode(bytes)),
      ProductImage::External(url) => url.clone(),
    }
  }
}

impl Serialize for ProductImage {
  fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&self.to_wire())
  }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
  pub id: Uuid,
  pub title: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub category: Category,
  pub sub_category: Option<String>,
  pub image: Option<ProductImage>,
  pub status: ProductStatus,
  pub created_at: DateTime<Utc>,
}

impl FromRow<'_, SqliteRow> for Product {
  fn from_row(row: &SqliteRow) -> std::result::Result<Self, sqlx::Error> {
    let id: String = row.try_get("id")?;
    let id = Uuid::parse_str(&id).map_err(|e| sqlx::Error::ColumnDecode {
      index: "id".to_string(),
      source: Box::new(e),
    })?;

    let price: String = row.try_get("price")?;
    let price = Decimal::from_str(&price).map_err(|e| sqlx::Error::ColumnDecode {
      index: "price".to_string(),
      source: Box::new(e),
    })?;

    let category: String = row.try_get("category")?;
    let status: String = row.try_get("status")?;

    let image_mime: Option<String> = row.try_get("image_mime")?;
    let image_data: Option<Vec<u8>> = row.try_get("image_data")?;
    let image_url: Option<String> = row.try_get("image_url")?;
    let image = match (image_mime, image_data, image_url) {
      (Some(mime), Some(bytes), _) => Some(ProductImage::Data { mime, bytes }),
      (_, _, Some(url)) => Some(ProductImage::External(url)),
      _ => None,
    };

    Ok(Product {
      id,
      title: row.try_get("title")?,
      description: row.try_get("description")?,
      price,
      category: Category::from(category.as_str()),
      sub_category: row.try_get("sub_category")?,
      image,
      status: ProductStatus::from(status.as_str()),
      created_at: row.try_get("created_at")?,
    })
  }
}

/// Caller-supplied product fields, as they arrive from the admin surface.
/// Everything is optional at the wire level so required-field violations
/// surface as `Validation` errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
  pub title: Option<String>,
  pub description: Option<String>,
  pub price: Option<Decimal>,
  pub category: Option<String>,
  pub sub_category: Option<String>,
  pub image: Option<String>,
}

/// A validated, normalized draft ready to persist.
#[derive(Debug, Clone)]
pub struct ProductFields {
  pub title: String,
  pub description: Option<String>,
  pub price: Decimal,
  pub category: Category,
  pub sub_category: Option<String>,
  pub image: Option<ProductImage>,
}

impl ProductDraft {
  pub fn validate(&self) -> Result<ProductFields> {
    let title = self
      .title
      .as_deref()
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .ok_or_else(|| AppError::Validation("title is required".to_string()))?
      .to_string();

    let price = self
      .price
      .ok_or_else(|| AppError::Validation("price is required".to_string()))?;
    if price < Decimal::ZERO {
      return Err(AppError::Validation("price must not be negative".to_string()));
    }

    let category = self
      .category
      .as_deref()
      .map(str::trim)
      .filter(|c| !c.is_empty())
      .ok_or_else(|| AppError::Validation("category is required".to_string()))?;

    let image = match self.image.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
      Some(raw) => Some(ProductImage::from_wire(raw)?),
      None => None,
    };

    Ok(ProductFields {
      title,
      description: self.description.clone().filter(|d| !d.trim().is_empty()),
      price,
      category: Category::from(category),
      sub_category: self
        .sub_category
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string),
      image,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn data_uri_round_trips_payload_and_mime() {
    let original = ProductImage::Data {
      mime: "image/png".to_string(),
      bytes: vec![0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a],
    };
    let wire = original.to_wire();
    assert!(wire.starts_with("data:image/png;base64,"));
    assert_eq!(ProductImage::from_wire(&wire).unwrap(), original);
  }

  #[test]
  fn external_url_passes_through() {
    let img = ProductImage::from_wire("https://cdn.example.com/p/1.jpg").unwrap();
    assert_eq!(img, ProductImage::External("https://cdn.example.com/p/1.jpg".to_string()));
    assert_eq!(img.to_wire(), "https://cdn.example.com/p/1.jpg");
  }

  #[test]
  fn empty_inline_payload_is_rejected() {
    let err = ProductImage::from_wire("data:image/png;base64,").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
  }

  #[test]
  fn malformed_base64_is_rejected() {
    let err = ProductImage::from_wire("data:image/png;base64,@@@").unwrap_err();
    assert!(matches!(err, AppError::Validation(_)));
  }

  #[test]
  fn category_keeps_unknown_values() {
    assert_eq!(Category::from("furnitures"), Category::Furnitures);
    assert_eq!(Category::from("showroom"), Category::Other("showroom".to_string()));
    assert_eq!(Category::from("showroom").as_str(), "showroom");
  }

  #[test]
  fn draft_requires_title_price_category() {
    let missing_title = ProductDraft {
      price: Some(Decimal::from(100)),
      category: Some("auto".to_string()),
      ..Default::default()
    };
    assert!(matches!(missing_title.validate(), Err(AppError::Validation(_))));

    let negative_price = ProductDraft {
      title: Some("Sedan".to_string()),
      price: Some(Decimal::from(-1)),
      category: Some("auto".to_string()),
      ..Default::default()
    };
    assert!(matches!(negative_price.validate(), Err(AppError::Validation(_))));
  }
}
