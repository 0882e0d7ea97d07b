// farmgate/src/store/mod.rs

//! Abstract persistence interfaces for the marketplace records.
//!
//! Every component takes explicit store handles rather than reaching for an
//! ambient connection; `Stores` is created once at startup and cloned into
//! each request's state. The only operation with non-trivial semantics is
//! `CatalogStore::reserve_stock`, which must apply a whole basket's
//! check-then-decrement as one indivisible operation (see `memory.rs`).

pub mod memory;

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::Result;
use crate::models::{Category, Order, OrderStatus, Product, User};

/// One requested basket line, as submitted by a buyer.
#[derive(Debug, Clone, Copy)]
pub struct StockLine {
  pub product_id: Uuid,
  pub quantity: u32,
}

/// A stock decrement that has been applied, together with the price snapshot
/// taken at the moment of the decrement. Held by the placement engine so the
/// decrement can be undone if a later step fails.
#[derive(Debug, Clone, Copy)]
pub struct StockReservation {
  pub product_id: Uuid,
  pub quantity: u32,
  pub price_cents: i64,
}

/// Full-field product update, mirroring the catalog edit operation: every
/// field is replaced, except the image which is kept when absent.
#[derive(Debug, Clone)]
pub struct ProductUpdate {
  pub name: String,
  pub price_cents: i64,
  pub image: Option<String>,
  pub category: Category,
  pub quantity: u32,
}

#[async_trait]
pub trait UserStore: Send + Sync {
  async fn insert(&self, user: User) -> Result<User>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;
  async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn insert(&self, product: Product) -> Result<Product>;
  async fn update(&self, id: Uuid, changes: ProductUpdate) -> Result<Product>;
  async fn delete(&self, id: Uuid) -> Result<bool>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>>;
  async fn list(&self) -> Result<Vec<Product>>;
  async fn list_by_category(&self, category: Category) -> Result<Vec<Product>>;
  async fn list_by_seller(&self, seller_id: Uuid) -> Result<Vec<Product>>;

  /// Validates and decrements stock for the whole basket as a single
  /// indivisible operation: either every line is applied, or none is. Each
  /// returned reservation carries the product's price at decrement time.
  /// Duplicate lines for one product are accounted cumulatively.
  async fn reserve_stock(&self, lines: &[StockLine]) -> Result<Vec<StockReservation>>;

  /// Returns previously reserved stock to the catalog. This is the rollback
  /// half of the reserve/commit protocol used by order placement.
  async fn release_stock(&self, reservations: &[StockReservation]) -> Result<()>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
  async fn insert(&self, order: Order) -> Result<Order>;
  async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>>;
  /// Validates and persists a status transition as one indivisible
  /// operation: the legality check against the current status and the write
  /// happen in the same critical section, so concurrent transitions out of
  /// one status cannot both commit. Illegal transitions surface as
  /// `InvalidTransition`.
  async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order>;
  async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Order>>;
  async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>>;
  /// Orders with at least one line item referencing one of the given products.
  async fn list_containing(&self, product_ids: &[Uuid]) -> Result<Vec<Order>>;
}

/// Bundle of store handles injected into every component.
#[derive(Clone)]
pub struct Stores {
  pub users: Arc<dyn UserStore>,
  pub catalog: Arc<dyn CatalogStore>,
  pub orders: Arc<dyn OrderStore>,
}

impl Stores {
  /// Opens a fresh set of in-memory stores. Teardown is implicit: dropping
  /// the last clone releases everything.
  pub fn in_memory() -> Self {
    Self {
      users: Arc::new(memory::MemoryUserStore::new()),
      catalog: Arc::new(memory::MemoryCatalogStore::new()),
      orders: Arc::new(memory::MemoryOrderStore::new()),
    }
  }
}
