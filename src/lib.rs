// farmgate/src/lib.rs

//! Farmgate: a farm marketplace backend.
//!
//! Farmer accounts list products; buyer accounts place orders against them.
//! The interesting part is the order placement engine, which must keep stock
//! counts, frozen price snapshots, and the order record consistent under
//! concurrent requests:
//!  - Stock reservation for a whole basket is one indivisible store
//!    operation, so overselling is impossible and failed baskets leave no
//!    net stock change.
//!  - Order totals are computed once from price snapshots taken at
//!    reservation time and never recomputed.
//!  - Every operation runs behind the identity verifier and the
//!    authorization guard; credential problems demote to anonymous rather
//!    than failing the request outright.

pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod web;

// --- Re-exports for the Public API ---

pub use crate::config::AppConfig;
pub use crate::errors::{AppError, Result};
pub use crate::services::guard::{AuthContext, Identity};
pub use crate::state::AppState;
pub use crate::store::Stores;
