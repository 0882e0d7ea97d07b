// farmgate/src/web/handlers/dashboard_handlers.rs

use actix_web::{web, HttpResponse};
use tracing::instrument;

use crate::errors::AppError;
use crate::services::guard::AuthContext;
use crate::services::report_service;
use crate::state::AppState;

#[instrument(name = "handler::dashboard_stats", skip(app_state, ctx))]
pub async fn dashboard_stats_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
) -> Result<HttpResponse, AppError> {
  let stats = report_service::dashboard_stats(&app_state.stores, &ctx).await?;
  Ok(HttpResponse::Ok().json(stats))
}

#[instrument(name = "handler::seller_transactions", skip(app_state, ctx))]
pub async fn seller_transactions_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
) -> Result<HttpResponse, AppError> {
  let orders = report_service::seller_transactions(&app_state.stores, &ctx).await?;
  Ok(HttpResponse::Ok().json(orders))
}
