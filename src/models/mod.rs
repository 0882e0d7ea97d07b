// farmgate/src/models/mod.rs

//! Data structures for the marketplace entities.

pub mod order;
pub mod order_item;
pub mod product;
pub mod user;

// Re-export the model structs for convenient access
pub use order::{Order, OrderStatus};
pub use order_item::OrderItem;
pub use product::{Category, Product};
pub use user::{Role, User};
