// farmgate/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;

/// Image used for listings created without one (the original frontend relies on this).
pub const DEFAULT_PRODUCT_IMAGE: &str =
  "https://images.pexels.com/photos/1137335/pexels-photo-1137335.jpeg?auto=compress&cs=tinysrgb&w=600";

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  /// Secret used to sign and verify bearer tokens. Required.
  pub token_secret: String,
  /// Lifetime of issued tokens, in seconds.
  pub token_ttl_secs: i64,

  pub default_product_image: String,
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

    let token_secret = get_env("TOKEN_SECRET")?;
    if token_secret.is_empty() {
      return Err(AppError::Config("TOKEN_SECRET must not be empty".to_string()));
    }
    let token_ttl_secs = get_env("TOKEN_TTL_SECS")
      .unwrap_or_else(|_| "86400".to_string())
      .parse::<i64>()
      .map_err(|e| AppError::Config(format!("Invalid TOKEN_TTL_SECS: {}", e)))?;

    let default_product_image = get_env("DEFAULT_PRODUCT_IMAGE").unwrap_or_else(|_| DEFAULT_PRODUCT_IMAGE.to_string());

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      token_secret,
      token_ttl_secs,
      default_product_image,
    })
  }
}
