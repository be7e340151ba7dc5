// demos/marketplace_app/src/state.rs
use crate::config::AppConfig;
use agrimart::store::PgStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  pub store: Arc<PgStore>,
  pub config: Arc<AppConfig>, // Share loaded config
}
