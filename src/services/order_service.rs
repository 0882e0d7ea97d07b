// farmgate/src/services/order_service.rs

//! Order placement and the status workflow.
//!
//! Placement is the one multi-record operation in the system: validate the
//! basket, atomically reserve stock for every line, then persist the order.
//! If persistence fails the reservation is released, so a basket either
//! commits in full or leaves no trace.

use chrono::Utc;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{Order, OrderItem, OrderStatus, Role};
use crate::services::guard::AuthContext;
use crate::store::{CatalogStore, OrderStore, StockLine, Stores};

/// One basket line as submitted by the caller.
#[derive(Debug, Clone, Copy, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineRequest {
  pub product_id: Uuid,
  pub quantity: u32,
}

/// Places an order for the authenticated caller.
///
/// Stock for the whole basket is reserved as one indivisible store operation;
/// the order total is computed from the price snapshots taken at reservation
/// time, so later product price edits never change a placed order.
#[instrument(name = "order_service::place_order", skip(stores, ctx, lines), fields(line_count = lines.len()))]
pub async fn place_order(stores: &Stores, ctx: &AuthContext, lines: Vec<OrderLineRequest>) -> Result<Order> {
  let buyer = ctx.require_authenticated()?;

  if lines.is_empty() {
    return Err(AppError::Validation("An order needs at least one item.".to_string()));
  }
  if lines.iter().any(|line| line.quantity == 0) {
    return Err(AppError::Validation(
      "Every ordered quantity must be greater than zero.".to_string(),
    ));
  }

  let stock_lines: Vec<StockLine> = lines
    .iter()
    .map(|line| StockLine {
      product_id: line.product_id,
      quantity: line.quantity,
    })
    .collect();

  // All-or-nothing: a failure here means no stock was touched.
  let reservations = stores.catalog.reserve_stock(&stock_lines).await?;

  let items: Vec<OrderItem> = reservations
    .iter()
    .map(|r| OrderItem {
      product_id: r.product_id,
      quantity: r.quantity,
      price_cents: r.price_cents,
    })
    .collect();
  // Checked arithmetic throughout: listing prices are only validated as
  // non-negative, so a pathological price must surface as a rejection here,
  // never as a wrapped or panicking total.
  let mut total_cents: i64 = 0;
  for item in &items {
    let line_total = item.price_cents.checked_mul(i64::from(item.quantity));
    match line_total.and_then(|line| total_cents.checked_add(line)) {
      Some(next) => total_cents = next,
      None => {
        warn!(product_id = %item.product_id, "Order total overflowed; returning reserved stock.");
        if let Err(release_err) = stores.catalog.release_stock(&reservations).await {
          error!(error = %release_err, "Failed to return reserved stock after total overflow.");
        }
        return Err(AppError::Validation("Order total exceeds the representable amount.".to_string()));
      }
    }
  }

  let order = Order {
    id: Uuid::new_v4(),
    buyer_id: buyer.id,
    items,
    total_cents,
    status: OrderStatus::Pending,
    created_at: Utc::now(),
  };

  match stores.orders.insert(order).await {
    Ok(order) => {
      info!(order_id = %order.id, buyer_id = %buyer.id, total_cents = order.total_cents, "Order placed.");
      Ok(order)
    }
    Err(err) => {
      error!(error = %err, "Order insert failed; returning reserved stock.");
      if let Err(release_err) = stores.catalog.release_stock(&reservations).await {
        error!(error = %release_err, "Failed to return reserved stock after order insert failure.");
      }
      Err(AppError::Internal("Order could not be persisted.".to_string()))
    }
  }
}

/// Transitions an order's status under the workflow rules.
///
/// Farmer-gated. The legality check lives in the store, in the same critical
/// section as the write, so two racing transitions out of one status can
/// never both commit. Any farmer may currently transition any order, not
/// only orders containing their own products.
// TODO: scope this to sellers with a product in the order once the frontend
// stops sharing one fulfilment screen across farmers.
#[instrument(name = "order_service::update_order_status", skip(stores, ctx), fields(order_id = %order_id, new_status = %new_status))]
pub async fn update_order_status(
  stores: &Stores,
  ctx: &AuthContext,
  order_id: Uuid,
  new_status: OrderStatus,
) -> Result<Order> {
  ctx.require_role(Role::Farmer)?;

  match stores.orders.update_status(order_id, new_status).await {
    Ok(updated) => {
      info!(to = %updated.status, "Order status updated.");
      Ok(updated)
    }
    Err(err @ AppError::InvalidTransition { .. }) => {
      warn!(error = %err, "Rejected illegal status transition.");
      Err(err)
    }
    Err(err) => Err(err),
  }
}

/// Orders placed by the caller, newest first.
pub async fn orders_for_buyer(stores: &Stores, ctx: &AuthContext) -> Result<Vec<Order>> {
  let buyer = ctx.require_authenticated()?;
  stores.orders.list_by_buyer(buyer.id).await
}

/// Orders containing at least one product the caller sells, newest first.
pub async fn orders_for_seller(stores: &Stores, ctx: &AuthContext) -> Result<Vec<Order>> {
  let seller = ctx.require_authenticated()?;
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
  stores.orders.list_containing(&product_ids).await
}
