//! Application State
//!
//! Holds the dispatcher (and through it the store and both queues) plus the
//! configuration the server was started with.

mod accessors;

use chrono::{DateTime, Utc};
use std::sync::Arc;

use duallist_core::{ListStore, MutationDispatcher};
use duallist_types::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub dispatcher: MutationDispatcher,
    pub config: AppConfig,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(store: ListStore, config: AppConfig) -> Self {
        let dispatcher = MutationDispatcher::new(store, &config);
        Self { inner: Arc::new(AppStateInner { dispatcher, config, started_at: Utc::now() }) }
    }
}
