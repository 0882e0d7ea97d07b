// farmgate/src/services/mod.rs

//! Business logic. Handlers stay thin; everything with rules lives here, with
//! the store handles passed in explicitly.

pub mod auth_service;
pub mod catalog_service;
pub mod guard;
pub mod order_service;
pub mod report_service;
pub mod token_service;
pub mod user_service;
