//! Test helpers for duallist-server unit tests.

use duallist_core::ListStore;
use duallist_types::models::QueueConfig;
use duallist_types::AppConfig;

use crate::state::AppState;

/// Defaults with fast queue intervals and an empty seed.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.store.seed_count = 0;
    config.queue = QueueConfig { add_flush_ms: 20, update_flush_ms: 20, max_pending: None };
    config
}

/// `AppState` over explicit collections. Flush loops are not started;
/// tests flush through the dispatcher or `POST /items/flush`.
pub fn test_app_state(available: &[&str], selected: &[&str]) -> AppState {
    test_app_state_with(available, selected, test_config())
}

pub fn test_app_state_with(
    available: &[&str],
    selected: &[&str],
    config: AppConfig,
) -> AppState {
    let store = ListStore::with_ids(available.iter().copied(), selected.iter().copied());
    AppState::new(store, config)
}
