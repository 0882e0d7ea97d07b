// farmgate/src/web/handlers/order_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::OrderStatus;
use crate::services::guard::AuthContext;
use crate::services::order_service::{self, OrderLineRequest};
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct UpdateStatusPayload {
  pub status: OrderStatus,
}

#[instrument(name = "handler::place_order", skip(app_state, ctx, req_payload), fields(line_count = req_payload.len()))]
pub async fn place_order_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
  req_payload: web::Json<Vec<OrderLineRequest>>,
) -> Result<HttpResponse, AppError> {
  let order = order_service::place_order(&app_state.stores, &ctx, req_payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(order))
}

#[instrument(
  name = "handler::update_order_status",
  skip(app_state, ctx, req_payload),
  fields(order_id = %path, new_status = %req_payload.status)
)]
pub async fn update_order_status_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
  path: web::Path<Uuid>,
  req_payload: web::Json<UpdateStatusPayload>,
) -> Result<HttpResponse, AppError> {
  let order =
    order_service::update_order_status(&app_state.stores, &ctx, path.into_inner(), req_payload.status).await?;
  Ok(HttpResponse::Ok().json(order))
}

#[instrument(name = "handler::buyer_orders", skip(app_state, ctx))]
pub async fn buyer_orders_handler(app_state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse, AppError> {
  let orders = order_service::orders_for_buyer(&app_state.stores, &ctx).await?;
  Ok(HttpResponse::Ok().json(orders))
}

#[instrument(name = "handler::seller_orders", skip(app_state, ctx))]
pub async fn seller_orders_handler(app_state: web::Data<AppState>, ctx: AuthContext) -> Result<HttpResponse, AppError> {
  let orders = order_service::orders_for_seller(&app_state.stores, &ctx).await?;
  Ok(HttpResponse::Ok().json(orders))
}
