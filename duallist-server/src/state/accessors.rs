//! Accessor methods for AppState

use chrono::Utc;

use duallist_core::MutationDispatcher;
use duallist_types::AppConfig;

use super::AppState;

impl AppState {
    pub fn dispatcher(&self) -> &MutationDispatcher {
        &self.inner.dispatcher
    }

    pub fn config(&self) -> &AppConfig {
        &self.inner.config
    }

    pub fn uptime_secs(&self) -> i64 {
        (Utc::now() - self.inner.started_at).num_seconds().max(0)
    }
}
