// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use chrono::Utc;
use once_cell::sync::Lazy;
use tracing::Level;
use uuid::Uuid;

use farmgate::config::{AppConfig, DEFAULT_PRODUCT_IMAGE};
use farmgate::models::{Category, Product, Role, User};
use farmgate::services::guard::{AuthContext, Identity};
use farmgate::store::{CatalogStore, Stores, UserStore};

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Fixtures ---

pub const TEST_TOKEN_SECRET: &str = "farmgate-test-secret";

pub fn test_config() -> AppConfig {
  AppConfig {
    server_host: "127.0.0.1".to_string(),
    server_port: 0,
    token_secret: TEST_TOKEN_SECRET.to_string(),
    token_ttl_secs: 3600,
    default_product_image: DEFAULT_PRODUCT_IMAGE.to_string(),
  }
}

pub fn identity(role: Role) -> Identity {
  Identity {
    id: Uuid::new_v4(),
    email: format!("{}-{}@example.com", role, Uuid::new_v4().simple()),
    role,
  }
}

pub fn farmer_ctx() -> AuthContext {
  AuthContext::Authenticated(identity(Role::Farmer))
}

pub fn buyer_ctx() -> AuthContext {
  AuthContext::Authenticated(identity(Role::Buyer))
}

/// Inserts a user record matching the given identity, so views that resolve
/// the seller relation see a live account.
pub async fn seed_user_for(stores: &Stores, identity: &Identity, name: &str) -> User {
  stores
    .users
    .insert(User {
      id: identity.id,
      name: name.to_string(),
      email: identity.email.clone(),
      password_hash: "x".to_string(),
      role: identity.role,
      created_at: Utc::now(),
    })
    .await
    .expect("seeding a user must succeed")
}

pub async fn seed_product(stores: &Stores, seller_id: Uuid, name: &str, price_cents: i64, quantity: u32) -> Product {
  stores
    .catalog
    .insert(Product {
      id: Uuid::new_v4(),
      name: name.to_string(),
      price_cents,
      image: DEFAULT_PRODUCT_IMAGE.to_string(),
      category: Category::Vegetables,
      quantity,
      seller_id,
      created_at: Utc::now(),
    })
    .await
    .expect("seeding a product must succeed")
}

pub async fn stock_of(stores: &Stores, product_id: Uuid) -> u32 {
  stores
    .catalog
    .find_by_id(product_id)
    .await
    .expect("catalog read must succeed")
    .expect("product must exist")
    .quantity
}
