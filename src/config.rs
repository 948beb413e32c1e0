// src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,

  /// Shared admin secret, injected into the product store at construction.
  pub admin_password: String,

  /// Fixed lifetime of a cart session, in hours. Also drives the cookie max-age.
  pub cart_ttl_hours: i64,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL").unwrap_or_else(|_| "sqlite:olatech.db".to_string());
    let admin_password = get_env("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
    let cart_ttl_hours = get_env("CART_TTL_HOURS")
      .unwrap_or_else(|_| "24".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid CART_TTL_HOURS: {}", e)))?;
    if cart_ttl_hours <= 0 {
      return Err(AppError::Config("CART_TTL_HOURS must be positive".to_string()));
    }

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      database_url,
      admin_password,
      cart_ttl_hours,
    })
  }

  pub fn cart_ttl(&self) -> chrono::Duration {
    chrono::Duration::hours(self.cart_ttl_hours)
  }
}
