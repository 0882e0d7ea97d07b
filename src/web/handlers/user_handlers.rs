// farmgate/src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::services::guard::AuthContext;
use crate::services::user_service;
use crate::state::AppState;

#[instrument(name = "handler::get_user", skip(app_state, ctx), fields(requested_id = %path))]
pub async fn get_user_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user = user_service::get_user(&app_state.stores, &ctx, &path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(user))
}
