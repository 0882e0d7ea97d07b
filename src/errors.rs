// farmgate/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::models::order::OrderStatus;

#[derive(Debug, Error)]
pub enum AppError {
  /// No usable credential was presented for a gated operation.
  #[error("Authentication required")]
  NotAuthenticated,

  /// A valid identity was presented, but it lacks the required role or ownership.
  #[error("Not authorized: {0}")]
  NotAuthorized(String),

  #[error("Validation error: {0}")]
  Validation(String),

  #[error("{kind} {id} not found")]
  NotFound { kind: &'static str, id: String },

  #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
  InsufficientStock {
    product_id: Uuid,
    requested: u32,
    available: u32,
  },

  #[error("Invalid order status transition: {from} -> {to}")]
  InvalidTransition { from: OrderStatus, to: OrderStatus },

  #[error("Configuration error: {0}")]
  Config(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

impl AppError {
  pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
    AppError::NotFound {
      kind,
      id: id.to_string(),
    }
  }
}

// Allow anyhow::Error to be converted into AppError::Internal for convenience
// in code that uses `?` on functions returning anyhow::Result.
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    AppError::Internal(err.to_string())
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response.
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::NotAuthenticated => HttpResponse::Unauthorized().json(json!({"error": self.to_string()})),
      AppError::NotAuthorized(_) => HttpResponse::Forbidden().json(json!({"error": self.to_string()})),
      AppError::Validation(_) => HttpResponse::BadRequest().json(json!({"error": self.to_string()})),
      AppError::NotFound { .. } => HttpResponse::NotFound().json(json!({"error": self.to_string()})),
      AppError::InsufficientStock {
        product_id,
        requested,
        available,
      } => HttpResponse::Conflict().json(json!({
        "error": self.to_string(),
        "productId": product_id.to_string(),
        "requested": requested,
        "available": available,
      })),
      AppError::InvalidTransition { from, to } => HttpResponse::Conflict().json(json!({
        "error": self.to_string(),
        "from": from,
        "to": to,
      })),
      // Internal detail stays in the log; the client gets a generic body.
      AppError::Config(_) | AppError::Internal(_) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred"}))
      }
    }
  }
}

// Define a Result type alias for the application.
pub type Result<T, E = AppError> = std::result::Result<T, E>;
