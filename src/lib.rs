// src/lib.rs

//! Session-backed storefront core.
//!
//! The catalog side is a persistent product store (create, update, mark-sold,
//! delete, filtered retrieval) gated by a single injected admin secret. The
//! cart side is a per-session state machine: add merges quantities into
//! product snapshots, update overwrites them (zero removes the line), clear
//! empties the session, and sessions expire after a fixed TTL. A thin
//! actix-web boundary exposes both over JSON.

pub mod catalog;
pub mod config;
pub mod errors;
pub mod models;
pub mod state;
pub mod store;
pub mod web;

// --- Re-exports for the Public API ---

pub use crate::catalog::Catalog;
pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::models::{CartLine, Category, Product, ProductDraft, ProductImage, ProductStatus};
pub use crate::state::AppState;
pub use crate::store::{CartStore, ProductFilter, ProductStore};
