// farmgate/src/store/memory.rs

//! In-memory store implementations backed by `parking_lot::RwLock` maps.
//!
//! `reserve_stock` holds the catalog write lock for the whole basket, so two
//! concurrent placements can never interleave their check-then-decrement
//! sequences; stock arithmetic stays exact under any request ordering.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

use crate::errors::{AppError, Result};
use crate::models::{Category, Order, OrderStatus, Product, User};
use crate::store::{CatalogStore, OrderStore, ProductUpdate, StockLine, StockReservation, UserStore};

#[derive(Default)]
pub struct MemoryUserStore {
  inner: RwLock<HashMap<Uuid, User>>,
}

impl MemoryUserStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl UserStore for MemoryUserStore {
  async fn insert(&self, user: User) -> Result<User> {
    let mut users = self.inner.write();
    users.insert(user.id, user.clone());
    Ok(user)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
    Ok(self.inner.read().get(&id).cloned())
  }

  async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
    Ok(self.inner.read().values().find(|u| u.email == email).cloned())
  }
}

#[derive(Default)]
pub struct MemoryCatalogStore {
  inner: RwLock<HashMap<Uuid, Product>>,
}

impl MemoryCatalogStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
  async fn insert(&self, product: Product) -> Result<Product> {
    let mut products = self.inner.write();
    products.insert(product.id, product.clone());
    Ok(product)
  }

  async fn update(&self, id: Uuid, changes: ProductUpdate) -> Result<Product> {
    let mut products = self.inner.write();
    let product = products.get_mut(&id).ok_or_else(|| AppError::not_found("product", id))?;
    product.name = changes.name;
    product.price_cents = changes.price_cents;
    product.category = changes.category;
    product.quantity = changes.quantity;
    if let Some(image) = changes.image {
      product.image = image;
    }
    Ok(product.clone())
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    Ok(self.inner.write().remove(&id).is_some())
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>> {
    Ok(self.inner.read().get(&id).cloned())
  }

  async fn list(&self) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = self.inner.read().values().cloned().collect();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(products)
  }

  async fn list_by_category(&self, category: Category) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = self
      .inner
      .read()
      .values()
      .filter(|p| p.category == category)
      .cloned()
      .collect();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(products)
  }

  async fn list_by_seller(&self, seller_id: Uuid) -> Result<Vec<Product>> {
    let mut products: Vec<Product> = self
      .inner
      .read()
      .values()
      .filter(|p| p.seller_id == seller_id)
      .cloned()
      .collect();
    products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(products)
  }

  async fn reserve_stock(&self, lines: &[StockLine]) -> Result<Vec<StockReservation>> {
    // Write lock held across the entire basket: validation and decrement are
    // one critical section, so concurrent baskets serialize here.
    let mut products = self.inner.write();
    let mut applied: Vec<StockReservation> = Vec::with_capacity(lines.len());

    for line in lines {
      let outcome = match products.get_mut(&line.product_id) {
        None => Err(AppError::not_found("product", line.product_id)),
        Some(product) if product.quantity < line.quantity => Err(AppError::InsufficientStock {
          product_id: line.product_id,
          requested: line.quantity,
          available: product.quantity,
        }),
        Some(product) => {
          product.quantity -= line.quantity;
          Ok(StockReservation {
            product_id: line.product_id,
            quantity: line.quantity,
            price_cents: product.price_cents,
          })
        }
      };

      match outcome {
        Ok(reservation) => applied.push(reservation),
        Err(err) => {
          // Undo the lines already applied from this basket, still under the
          // same lock, so the failure leaves zero net stock change.
          for reservation in &applied {
            if let Some(product) = products.get_mut(&reservation.product_id) {
              product.quantity += reservation.quantity;
            }
          }
          return Err(err);
        }
      }
    }

    Ok(applied)
  }

  async fn release_stock(&self, reservations: &[StockReservation]) -> Result<()> {
    let mut products = self.inner.write();
    for reservation in reservations {
      match products.get_mut(&reservation.product_id) {
        Some(product) => product.quantity += reservation.quantity,
        // The product was deleted between reserve and release; nothing to
        // restore, but worth a trace.
        None => tracing::warn!(
          product_id = %reservation.product_id,
          "Released stock for a product that no longer exists."
        ),
      }
    }
    Ok(())
  }
}

#[derive(Default)]
pub struct MemoryOrderStore {
  inner: RwLock<HashMap<Uuid, Order>>,
}

impl MemoryOrderStore {
  pub fn new() -> Self {
    Self::default()
  }
}

fn sorted_newest_first(mut orders: Vec<Order>) -> Vec<Order> {
  orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
  orders
}

#[async_trait]
impl OrderStore for MemoryOrderStore {
  async fn insert(&self, order: Order) -> Result<Order> {
    let mut orders = self.inner.write();
    orders.insert(order.id, order.clone());
    Ok(order)
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>> {
    Ok(self.inner.read().get(&id).cloned())
  }

  async fn update_status(&self, id: Uuid, status: OrderStatus) -> Result<Order> {
    // Legality is checked under the same write lock as the mutation, so a
    // stale read can never sneak an illegal transition past the check.
    let mut orders = self.inner.write();
    let order = orders.get_mut(&id).ok_or_else(|| AppError::not_found("order", id))?;
    if !order.status.can_transition_to(status) {
      return Err(AppError::InvalidTransition {
        from: order.status,
        to: status,
      });
    }
    order.status = status;
    Ok(order.clone())
  }

  async fn list_by_buyer(&self, buyer_id: Uuid) -> Result<Vec<Order>> {
    Ok(sorted_newest_first(
      self.inner.read().values().filter(|o| o.buyer_id == buyer_id).cloned().collect(),
    ))
  }

  async fn list_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
    Ok(sorted_newest_first(
      self.inner.read().values().filter(|o| o.status == status).cloned().collect(),
    ))
  }

  async fn list_containing(&self, product_ids: &[Uuid]) -> Result<Vec<Order>> {
    Ok(sorted_newest_first(
      self
        .inner
        .read()
        .values()
        .filter(|o| o.contains_any_product(product_ids))
        .cloned()
        .collect(),
    ))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Category;
  use chrono::Utc;

  fn product(quantity: u32, price_cents: i64) -> Product {
    Product {
      id: Uuid::new_v4(),
      name: "Carrots".to_string(),
      price_cents,
      image: "carrots.jpg".to_string(),
      category: Category::Vegetables,
      quantity,
      seller_id: Uuid::new_v4(),
      created_at: Utc::now(),
    }
  }

  #[tokio::test]
  async fn reserve_decrements_and_snapshots_price() {
    let store = MemoryCatalogStore::new();
    let p = store.insert(product(5, 1000)).await.unwrap();

    let reservations = store
      .reserve_stock(&[StockLine {
        product_id: p.id,
        quantity: 3,
      }])
      .await
      .unwrap();

    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].price_cents, 1000);
    assert_eq!(store.find_by_id(p.id).await.unwrap().unwrap().quantity, 2);
  }

  #[tokio::test]
  async fn failed_basket_leaves_no_net_stock_change() {
    let store = MemoryCatalogStore::new();
    let a = store.insert(product(10, 500)).await.unwrap();
    let b = store.insert(product(1, 700)).await.unwrap();

    let err = store
      .reserve_stock(&[
        StockLine {
          product_id: a.id,
          quantity: 4,
        },
        StockLine {
          product_id: b.id,
          quantity: 2,
        },
      ])
      .await
      .unwrap_err();

    assert!(matches!(err, AppError::InsufficientStock { .. }));
    assert_eq!(store.find_by_id(a.id).await.unwrap().unwrap().quantity, 10);
    assert_eq!(store.find_by_id(b.id).await.unwrap().unwrap().quantity, 1);
  }

  #[tokio::test]
  async fn duplicate_lines_are_accounted_cumulatively() {
    let store = MemoryCatalogStore::new();
    let p = store.insert(product(5, 500)).await.unwrap();
    let line = StockLine {
      product_id: p.id,
      quantity: 3,
    };

    let err = store.reserve_stock(&[line, line]).await.unwrap_err();
    match err {
      AppError::InsufficientStock { available, .. } => assert_eq!(available, 2),
      other => panic!("unexpected error: {other}"),
    }
    assert_eq!(store.find_by_id(p.id).await.unwrap().unwrap().quantity, 5);
  }

  fn pending_order() -> Order {
    Order {
      id: Uuid::new_v4(),
      buyer_id: Uuid::new_v4(),
      items: Vec::new(),
      total_cents: 0,
      status: OrderStatus::Pending,
      created_at: Utc::now(),
    }
  }

  #[tokio::test]
  async fn update_status_checks_legality_under_the_write_lock() {
    let store = MemoryOrderStore::new();
    let order = store.insert(pending_order()).await.unwrap();

    let confirmed = store.update_status(order.id, OrderStatus::Confirmed).await.unwrap();
    assert_eq!(confirmed.status, OrderStatus::Confirmed);

    // A write based on a stale view of the order must be rejected against
    // the current status, not the one the caller last saw.
    let err = store.update_status(order.id, OrderStatus::Cancelled).await.unwrap_err();
    match err {
      AppError::InvalidTransition { from, to } => {
        assert_eq!(from, OrderStatus::Confirmed);
        assert_eq!(to, OrderStatus::Cancelled);
      }
      other => panic!("unexpected error: {other}"),
    }
    assert_eq!(
      store.find_by_id(order.id).await.unwrap().unwrap().status,
      OrderStatus::Confirmed
    );
  }

  #[tokio::test]
  async fn release_restores_reserved_quantities() {
    let store = MemoryCatalogStore::new();
    let p = store.insert(product(5, 500)).await.unwrap();

    let reservations = store
      .reserve_stock(&[StockLine {
        product_id: p.id,
        quantity: 5,
      }])
      .await
      .unwrap();
    assert_eq!(store.find_by_id(p.id).await.unwrap().unwrap().quantity, 0);

    store.release_stock(&reservations).await.unwrap();
    assert_eq!(store.find_by_id(p.id).await.unwrap().unwrap().quantity, 5);
  }
}
