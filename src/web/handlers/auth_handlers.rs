// farmgate/src/web/handlers/auth_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::Role;
use crate::services::auth_service::{self, Registration};
use crate::services::guard::AuthContext;
use crate::state::AppState;

// --- Request DTOs ---
#[derive(Deserialize, Debug)]
pub struct SignupRequestPayload {
  pub name: String,
  pub email: String,
  pub password: String,
  pub role: Option<Role>,
}

#[derive(Deserialize, Debug)]
pub struct LoginRequestPayload {
  pub email: String,
  pub password: String,
}

// --- Handler Implementations ---

#[instrument(
  name = "handler::signup",
  skip(app_state, req_payload),
  fields(req_email = %req_payload.email)
)]
pub async fn signup_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<SignupRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let payload = req_payload.into_inner();
  info!("Signup attempt for email: {}", payload.email);

  let (user, token) = auth_service::register_user(
    &app_state.stores,
    &app_state.config,
    Registration {
      name: payload.name,
      email: payload.email,
      password: payload.password,
      role: payload.role,
    },
  )
  .await?;

  Ok(HttpResponse::Created().json(json!({
    "token": token,
    "user": user,
  })))
}

#[instrument(
  name = "handler::login",
  skip(app_state, req_payload),
  fields(req_email = %req_payload.email)
)]
pub async fn login_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<LoginRequestPayload>,
) -> Result<HttpResponse, AppError> {
  info!("Login attempt for email: {}", req_payload.email);

  let (user, token) = auth_service::login_user(
    &app_state.stores,
    &app_state.config,
    &req_payload.email,
    &req_payload.password,
  )
  .await?;

  Ok(HttpResponse::Ok().json(json!({
    "token": token,
    "user": user,
  })))
}

/// Tokens are stateless, so logout only confirms the caller was signed in;
/// the client discards the token.
#[instrument(name = "handler::logout", skip(ctx))]
pub async fn logout_handler(ctx: AuthContext) -> Result<HttpResponse, AppError> {
  ctx.require_authenticated()?;
  Ok(HttpResponse::Ok().json(json!({ "loggedOut": true })))
}
