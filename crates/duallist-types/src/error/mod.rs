//! Typed error definitions for the dual-list server.
//!
//! Both enums serialize with serde so they can be rendered in API responses
//! and matched on by variant.

mod config;
mod mutation;

pub use config::ConfigError;
pub use mutation::MutationError;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_serialization() {
        let err = ConfigError::ValidationError {
            field: "queue.update_flush_ms".to_string(),
            message: "out of range".to_string(),
        };

        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains("ValidationError"));
        assert!(json.contains("queue.update_flush_ms"));

        let deserialized: ConfigError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, deserialized);
    }
}
