// farmgate/src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Closed set of listing categories carried over from the catalog schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
  Vegetables,
  Fruits,
  Flowers,
  Honey,
  Crops,
  #[serde(rename = "Farm Tools")]
  FarmTools,
  Manure,
  Pesticides,
}

impl Category {
  pub fn as_str(self) -> &'static str {
    match self {
      Category::Vegetables => "Vegetables",
      Category::Fruits => "Fruits",
      Category::Flowers => "Flowers",
      Category::Honey => "Honey",
      Category::Crops => "Crops",
      Category::FarmTools => "Farm Tools",
      Category::Manure => "Manure",
      Category::Pesticides => "Pesticides",
    }
  }

  /// Parses the display name used in URLs and request bodies.
  pub fn parse(value: &str) -> Option<Self> {
    match value {
      "Vegetables" => Some(Category::Vegetables),
      "Fruits" => Some(Category::Fruits),
      "Flowers" => Some(Category::Flowers),
      "Honey" => Some(Category::Honey),
      "Crops" => Some(Category::Crops),
      "Farm Tools" => Some(Category::FarmTools),
      "Manure" => Some(Category::Manure),
      "Pesticides" => Some(Category::Pesticides),
      _ => None,
    }
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
  pub id: Uuid,
  pub name: String,
  /// Listing price in integer cents; mutable after creation. Orders keep
  /// their own frozen copy, so edits here never touch placed orders.
  pub price_cents: i64,
  pub image: String,
  pub category: Category,
  /// Units currently available for sale. Unsigned, so stock can never be
  /// driven below zero by construction.
  pub quantity: u32,
  pub seller_id: Uuid,
  pub created_at: DateTime<Utc>,
}
