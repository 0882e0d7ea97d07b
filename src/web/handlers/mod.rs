// farmgate/src/web/handlers/mod.rs

// Declare handler modules
pub mod auth_handlers;
pub mod dashboard_handlers;
pub mod order_handlers;
pub mod product_handlers;
pub mod user_handlers;
