//! Startup configuration resolution.
//!
//! # Design Decisions
//! - Fail fast: any configuration error is fatal
//! - Without a config file the built-in defaults are used
//! - CLI overrides are applied before validation

use std::path::Path;

use crate::config::loader::{load_config, ConfigError};
use crate::config::validation::validate_config;
use crate::config::RelayConfig;

/// Load `path` (or defaults), apply the bind override and validate.
pub fn resolve_config(
    path: Option<&Path>,
    bind_override: Option<String>,
) -> Result<RelayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };

    if let Some(bind) = bind_override {
        config.listener.bind_address = bind;
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}
