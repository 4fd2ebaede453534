//! Configuration validation logic.

use std::net::SocketAddr;

use crate::config::schema::ServerConfig;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError(pub String);

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Validation error: {}", self.0)
    }
}

/// Validate a ServerConfig for semantic correctness.
pub fn validate_config(config: &ServerConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError(format!(
            "listener.bind_address '{}' is not a socket address",
            config.listener.bind_address
        )));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError(format!(
            "observability.metrics_address '{}' is not a socket address",
            config.observability.metrics_address
        )));
    }

    const KNOWN_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
    if !KNOWN_LEVELS.contains(&config.observability.log_level.as_str()) {
        errors.push(ValidationError(format!(
            "observability.log_level '{}' is not one of {:?}",
            config.observability.log_level, KNOWN_LEVELS
        )));
    }

    if config.timeouts.request_secs == 0 {
        // Technically allowed but almost certainly a mistake
        tracing::warn!("timeouts.request_secs is 0, requests will time out immediately");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&ServerConfig::default()).is_ok());
    }

    #[test]
    fn test_invalid_bind_address() {
        let mut config = ServerConfig::default();
        config.listener.bind_address = "not-an-address".into();

        let errs = validate_config(&config).unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(errs[0].0.contains("not-an-address"));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = ServerConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_unknown_log_level() {
        let mut config = ServerConfig::default();
        config.observability.log_level = "loud".into();

        let errs = validate_config(&config).unwrap_err();
        assert!(errs[0].0.contains("log_level"));
    }
}
