// farmgate/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::Category;
use crate::services::catalog_service::{self, ProductInput};
use crate::services::guard::AuthContext;
use crate::state::AppState;

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = catalog_service::list_products(&app_state.stores).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::get_product", skip(app_state), fields(product_id = %path))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let product = catalog_service::get_product(&app_state.stores, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::list_products_by_category", skip(app_state), fields(category = %path))]
pub async fn list_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let raw = path.into_inner();
  let category = Category::parse(&raw)
    .ok_or_else(|| AppError::Validation(format!("'{}' is not a known product category.", raw)))?;
  let products = catalog_service::list_by_category(&app_state.stores, category).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::list_own_products", skip(app_state, ctx))]
pub async fn list_own_products_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
) -> Result<HttpResponse, AppError> {
  let products = catalog_service::list_own_products(&app_state.stores, &ctx).await?;
  Ok(HttpResponse::Ok().json(products))
}

#[instrument(name = "handler::create_product", skip(app_state, ctx, req_payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
  req_payload: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
  let product =
    catalog_service::create_product(&app_state.stores, &app_state.config, &ctx, req_payload.into_inner()).await?;
  Ok(HttpResponse::Created().json(product))
}

#[instrument(name = "handler::update_product", skip(app_state, ctx, req_payload), fields(product_id = %path))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
  path: web::Path<Uuid>,
  req_payload: web::Json<ProductInput>,
) -> Result<HttpResponse, AppError> {
  let product =
    catalog_service::update_product(&app_state.stores, &ctx, path.into_inner(), req_payload.into_inner()).await?;
  Ok(HttpResponse::Ok().json(product))
}

#[instrument(name = "handler::delete_product", skip(app_state, ctx), fields(product_id = %path))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  ctx: AuthContext,
  path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
  let deleted = catalog_service::delete_product(&app_state.stores, &ctx, path.into_inner()).await?;
  Ok(HttpResponse::Ok().json(json!({ "deleted": deleted })))
}
