//! Configuration loading: JSON file, then CLI/env overrides, then validation.

use std::path::Path;

use validator::{Validate, ValidationErrors, ValidationErrorsKind};

use duallist_types::{AppConfig, ConfigError};

/// Values given on the command line (or their env equivalents) that win
/// over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides {
    pub port: Option<u16>,
    pub seed_count: Option<usize>,
}

/// Load the effective configuration.
///
/// No path means defaults; a path that does not exist is an error rather
/// than a silent fallback.
pub fn load_config(
    path: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<AppConfig, ConfigError> {
    let mut config = match path {
        Some(path) => read_config_file(path)?,
        None => AppConfig::new(),
    };
    apply_overrides(&mut config, overrides);
    validate_config(&config)?;
    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConfigError::NotFound { path: path.display().to_string() }
        } else {
            ConfigError::ParseError { message: format!("{}: {}", path.display(), e) }
        }
    })?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    tracing::debug!("[Config] Loaded {}", path.display());
    Ok(config)
}

pub fn apply_overrides(config: &mut AppConfig, overrides: ConfigOverrides) {
    if let Some(port) = overrides.port {
        config.server.port = port;
    }
    if let Some(seed_count) = overrides.seed_count {
        config.store.seed_count = seed_count;
    }
}

pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if let Err(errors) = config.validate() {
        let (field, message) = first_violation(&errors, "")
            .unwrap_or_else(|| ("config".to_string(), errors.to_string()));
        return Err(ConfigError::ValidationError { field, message });
    }
    if config.pagination.default_limit > config.pagination.max_limit {
        return Err(ConfigError::ValidationError {
            field: "pagination.default_limit".to_string(),
            message: format!(
                "must not exceed pagination.max_limit ({})",
                config.pagination.max_limit
            ),
        });
    }
    Ok(())
}

/// Dotted path and message of one field error, searching nested sections.
fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    fields.into_iter().find_map(|(name, kind)| {
        let path =
            if prefix.is_empty() { name.to_string() } else { format!("{prefix}.{name}") };
        match kind {
            ValidationErrorsKind::Field(list) => {
                list.first().map(|error| (path.clone(), error.to_string()))
            },
            ValidationErrorsKind::Struct(inner) => first_violation(inner, &path),
            ValidationErrorsKind::List(items) => {
                items.values().find_map(|inner| first_violation(inner, &path))
            },
        }
    })
}
