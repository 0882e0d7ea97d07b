// farmgate/src/models/order.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::order_item::OrderItem;

/// Order lifecycle states. `Pending` is the sole initial state; `Cancelled`,
/// `Delivered` and `Completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
  Pending,
  Confirmed,
  Shipped,
  Delivered,
  Completed,
  Cancelled,
}

impl OrderStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      OrderStatus::Pending => "pending",
      OrderStatus::Confirmed => "confirmed",
      OrderStatus::Shipped => "shipped",
      OrderStatus::Delivered => "delivered",
      OrderStatus::Completed => "completed",
      OrderStatus::Cancelled => "cancelled",
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(
      self,
      OrderStatus::Cancelled | OrderStatus::Delivered | OrderStatus::Completed
    )
  }

  /// Whether `next` is a legal successor of `self`. Terminal states have no
  /// successors.
  pub fn can_transition_to(self, next: OrderStatus) -> bool {
    match self {
      OrderStatus::Pending => matches!(next, OrderStatus::Confirmed | OrderStatus::Cancelled),
      OrderStatus::Confirmed => matches!(next, OrderStatus::Shipped | OrderStatus::Completed),
      OrderStatus::Shipped => matches!(next, OrderStatus::Delivered | OrderStatus::Completed),
      OrderStatus::Cancelled | OrderStatus::Delivered | OrderStatus::Completed => false,
    }
  }
}

impl fmt::Display for OrderStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
  pub id: Uuid,
  pub buyer_id: Uuid,
  /// Line items in the order they were requested.
  pub items: Vec<OrderItem>,
  /// Computed once at placement: sum of item price snapshots times
  /// quantities. Never recomputed afterwards.
  pub total_cents: i64,
  pub status: OrderStatus,
  pub created_at: DateTime<Utc>,
}

impl Order {
  /// True when any line item references one of the given products. Used to
  /// scope seller-facing order views.
  pub fn contains_any_product(&self, product_ids: &[Uuid]) -> bool {
    self.items.iter().any(|item| product_ids.contains(&item.product_id))
  }
}
