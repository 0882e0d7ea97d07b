// farmgate/src/services/catalog_service.rs

//! Product catalog operations: pass-through CRUD over the catalog store with
//! the authorization gate in front of the mutating calls.

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::config::AppConfig;
use crate::errors::{AppError, Result};
use crate::models::{Category, Product};
use crate::services::guard::AuthContext;
use crate::store::{CatalogStore, ProductUpdate, Stores, UserStore};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
  pub name: String,
  pub price_cents: i64,
  pub image: Option<String>,
  pub category: Category,
  pub quantity: u32,
}

fn validate(input: &ProductInput) -> Result<()> {
  if input.name.trim().is_empty() {
    return Err(AppError::Validation("Product name is required.".to_string()));
  }
  if input.price_cents < 0 {
    return Err(AppError::Validation("Price cannot be negative.".to_string()));
  }
  Ok(())
}

/// Creates a listing owned by the authenticated caller.
#[instrument(name = "catalog_service::create_product", skip(stores, config, ctx, input), fields(name = %input.name))]
pub async fn create_product(
  stores: &Stores,
  config: &AppConfig,
  ctx: &AuthContext,
  input: ProductInput,
) -> Result<Product> {
  let seller = ctx.require_authenticated()?;
  validate(&input)?;

  let product = Product {
    id: Uuid::new_v4(),
    name: input.name,
    price_cents: input.price_cents,
    image: input.image.unwrap_or_else(|| config.default_product_image.clone()),
    category: input.category,
    quantity: input.quantity,
    seller_id: seller.id,
    created_at: Utc::now(),
  };
  let product = stores.catalog.insert(product).await?;
  info!(product_id = %product.id, seller_id = %seller.id, "Product created.");
  Ok(product)
}

/// Full-field edit of an existing listing.
#[instrument(name = "catalog_service::update_product", skip(stores, ctx, input), fields(product_id = %product_id))]
pub async fn update_product(
  stores: &Stores,
  ctx: &AuthContext,
  product_id: Uuid,
  input: ProductInput,
) -> Result<Product> {
  ctx.require_authenticated()?;
  validate(&input)?;

  stores
    .catalog
    .update(
      product_id,
      ProductUpdate {
        name: input.name,
        price_cents: input.price_cents,
        image: input.image,
        category: input.category,
        quantity: input.quantity,
      },
    )
    .await
}

#[instrument(name = "catalog_service::delete_product", skip(stores, ctx), fields(product_id = %product_id))]
pub async fn delete_product(stores: &Stores, ctx: &AuthContext, product_id: Uuid) -> Result<bool> {
  ctx.require_authenticated()?;
  stores.catalog.delete(product_id).await
}

pub async fn get_product(stores: &Stores, product_id: Uuid) -> Result<Product> {
  stores
    .catalog
    .find_by_id(product_id)
    .await?
    .ok_or_else(|| AppError::not_found("product", product_id))
}

/// All listings, dropping any whose seller record no longer resolves.
pub async fn list_products(stores: &Stores) -> Result<Vec<Product>> {
  let products = stores.catalog.list().await?;
  let mut valid = Vec::with_capacity(products.len());
  for product in products {
    if stores.users.find_by_id(product.seller_id).await?.is_some() {
      valid.push(product);
    }
  }
  Ok(valid)
}

pub async fn list_by_category(stores: &Stores, category: Category) -> Result<Vec<Product>> {
  stores.catalog.list_by_category(category).await
}

/// Listings owned by the authenticated caller.
pub async fn list_own_products(stores: &Stores, ctx: &AuthContext) -> Result<Vec<Product>> {
  let seller = ctx.require_authenticated()?;
  stores.catalog.list_by_seller(seller.id).await
}
