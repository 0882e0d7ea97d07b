// farmgate/src/services/report_service.rs

//! Read-only dashboard and transaction views. Pure projections over the
//! stores at read time; nothing here is cached.

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Order, OrderStatus, Role};
use crate::services::guard::AuthContext;
use crate::store::{CatalogStore, OrderStore, Stores};

/// How many completed orders the dashboard shows as recent activity.
const RECENT_TRANSACTION_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
  pub total_orders: usize,
  pub total_revenue_cents: i64,
  pub active_listings: usize,
  pub recent_transactions: Vec<Order>,
}

/// Aggregate view of completed trade plus current catalog size.
#[instrument(name = "report_service::dashboard_stats", skip(stores, ctx))]
pub async fn dashboard_stats(stores: &Stores, ctx: &AuthContext) -> Result<DashboardStats> {
  ctx.require_authenticated()?;

  let active_listings = stores.catalog.list().await?.len();
  let completed = stores.orders.list_by_status(OrderStatus::Completed).await?;

  let total_orders = completed.len();
  let total_revenue_cents = completed.iter().map(|o| o.total_cents).sum();
  let recent_transactions = completed.into_iter().take(RECENT_TRANSACTION_LIMIT).collect();

  Ok(DashboardStats {
    total_orders,
    total_revenue_cents,
    active_listings,
    recent_transactions,
  })
}

/// Completed or delivered orders that include one of the caller's products.
#[instrument(name = "report_service::seller_transactions", skip(stores, ctx))]
pub async fn seller_transactions(stores: &Stores, ctx: &AuthContext) -> Result<Vec<Order>> {
  let seller = ctx.require_role(Role::Farmer)?;

  let product_ids: Vec<Uuid> = stores
    .catalog
    .list_by_seller(seller.id)
    .await?
    .into_iter()
    .map(|p| p.id)
    .collect();
  if product_ids.is_empty() {
    return Ok(Vec::new());
  }

  let orders = stores.orders.list_containing(&product_ids).await?;
  Ok(
    orders
      .into_iter()
      .filter(|o| matches!(o.status, OrderStatus::Completed | OrderStatus::Delivered))
      .collect(),
  )
}
