// farmgate/src/state.rs

use crate::config::AppConfig;
use crate::store::Stores;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub stores: Stores,
  pub config: Arc<AppConfig>, // Share loaded config
}
