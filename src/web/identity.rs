// farmgate/src/web/identity.rs

//! The identity verifier as an Actix extractor.
//!
//! Runs on every request that asks for an `AuthContext` and never fails the
//! request: no header, a malformed token, a bad signature, or an expired
//! token all produce an anonymous context. Gated operations reject later,
//! through the guard, with a proper `NotAuthenticated`.

use actix_web::{http::header, web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use tracing::{debug, warn};

use crate::errors::AppError;
use crate::services::guard::AuthContext;
use crate::services::token_service;
use crate::state::AppState;

/// Pulls the raw token out of an Authorization header value. Accepts a bare
/// token, a `Bearer `-prefixed one, and tokens wrapped in literal double
/// quotes (some clients send the JSON-encoded string as-is).
fn extract_token(header_value: &str) -> &str {
  let value = header_value.trim();
  let value = value.strip_prefix("Bearer ").unwrap_or(value);
  value.trim_matches('"')
}

impl FromRequest for AuthContext {
  type Error = AppError;
  type Future = Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let Some(state) = req.app_data::<web::Data<AppState>>() else {
      warn!("AuthContext extractor used without AppState; treating request as anonymous.");
      return ready(Ok(AuthContext::Anonymous));
    };

    let Some(header_value) = req
      .headers()
      .get(header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
    else {
      return ready(Ok(AuthContext::Anonymous));
    };

    let token = extract_token(header_value);
    if token.is_empty() {
      return ready(Ok(AuthContext::Anonymous));
    }

    match token_service::verify_token(state.config.token_secret.as_bytes(), token) {
      Ok(identity) => {
        debug!(user_id = %identity.id, role = %identity.role, "Request authenticated.");
        ready(Ok(AuthContext::Authenticated(identity)))
      }
      Err(err) => {
        // Verification failure only demotes the caller to anonymous.
        debug!(error = %err, "Token verification failed; continuing as anonymous.");
        ready(Ok(AuthContext::Anonymous))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn extract_token_handles_prefix_and_quotes() {
    assert_eq!(extract_token("abc.def"), "abc.def");
    assert_eq!(extract_token("Bearer abc.def"), "abc.def");
    assert_eq!(extract_token("\"abc.def\""), "abc.def");
    assert_eq!(extract_token("Bearer \"abc.def\""), "abc.def");
    assert_eq!(extract_token("  Bearer abc.def  "), "abc.def");
  }
}
