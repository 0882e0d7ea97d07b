// farmgate/src/models/order_item.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single order line. This is a value type embedded in `Order`, not a
/// separately addressable record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
  pub product_id: Uuid,
  pub quantity: u32,
  /// Frozen snapshot of the product price at placement time. Later edits to
  /// the product must never change this value.
  pub price_cents: i64,
}
