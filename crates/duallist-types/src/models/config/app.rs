//! Application-level configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::enums::AddPlacement;
use super::queue::QueueConfig;
use super::server::ServerConfig;

/// Full application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default, Validate)]
pub struct AppConfig {
    /// Listener and HTTP settings
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,
    /// Initial collection contents and insert policy
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreConfig,
    /// Mutation queue cadence
    #[serde(default)]
    #[validate(nested)]
    pub queue: QueueConfig,
    /// Read pagination limits
    #[serde(default)]
    #[validate(nested)]
    pub pagination: PaginationConfig,
}

impl AppConfig {
    /// Create default configuration.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Seeding and placement policy for the collections.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct StoreConfig {
    /// Number of items ("1".."N") the "all items" collection starts with
    #[validate(range(max = 10_000_000_usize))]
    #[serde(default = "default_seed_count")]
    pub seed_count: usize,
    /// Where added items are inserted
    #[serde(default)]
    pub add_placement: AddPlacement,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self { seed_count: default_seed_count(), add_placement: AddPlacement::default() }
    }
}

/// Page size defaults for `GET /items`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct PaginationConfig {
    /// Page size when the query omits `limit`
    #[validate(range(min = 1_usize))]
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    /// Upper bound applied to any requested `limit`
    #[validate(range(min = 1_usize, max = 100_000_usize))]
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self { default_limit: default_limit(), max_limit: default_max_limit() }
    }
}

const fn default_seed_count() -> usize {
    1_000_000
}

const fn default_limit() -> usize {
    20
}

const fn default_max_limit() -> usize {
    500
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.get_bind_address(), "0.0.0.0");
        assert_eq!(config.store.seed_count, 1_000_000);
        assert_eq!(config.store.add_placement, AddPlacement::Front);
        assert_eq!(config.queue.add_flush_ms, 10_000);
        assert_eq!(config.queue.update_flush_ms, 1_000);
        assert_eq!(config.pagination.default_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{"queue":{"update_flush_ms":250},"store":{"seed_count":3}}"#)
                .unwrap();
        assert_eq!(config.queue.update_flush_ms, 250);
        assert_eq!(config.queue.add_flush_ms, 10_000);
        assert_eq!(config.store.seed_count, 3);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_validation_rejects_zero_interval() {
        let mut config = AppConfig::new();
        config.queue.update_flush_ms = 0;
        assert!(config.validate().is_err());
    }
}
