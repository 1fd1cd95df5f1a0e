//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate store URLs and value ranges (timeouts > 0)
//! - A check round must finish within one interval
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HealthServiceConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::{HealthServiceConfig, StoreMode};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid store URL '{value}': {reason}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("store.cluster_nodes: cluster mode requires at least one node")]
    NoClusterNodes,

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("health_check.timeout_secs ({timeout_secs}) must not exceed health_check.interval_secs ({interval_secs})")]
    TimeoutExceedsInterval { timeout_secs: u64, interval_secs: u64 },

    #[error("listener.bind_address: '{0}' is not a socket address")]
    InvalidBindAddress(String),
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &HealthServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let store = &config.store;

    match store.mode {
        StoreMode::Standalone => check_url("store.url", &store.url, &mut errors),
        StoreMode::Cluster => {
            if store.cluster_nodes.is_empty() {
                errors.push(ValidationError::NoClusterNodes);
            }
            for node in &store.cluster_nodes {
                check_url("store.cluster_nodes", node, &mut errors);
            }
        }
    }

    if store.connect_timeout_ms == 0 {
        errors.push(ValidationError::Zero("store.connect_timeout_ms"));
    }
    if store.command_timeout_ms == 0 {
        errors.push(ValidationError::Zero("store.command_timeout_ms"));
    }
    if config.health_check.interval_secs == 0 {
        errors.push(ValidationError::Zero("health_check.interval_secs"));
    }
    if config.health_check.timeout_secs == 0 {
        errors.push(ValidationError::Zero("health_check.timeout_secs"));
    }
    let health_check = &config.health_check;
    if health_check.interval_secs > 0 && health_check.timeout_secs > health_check.interval_secs {
        errors.push(ValidationError::TimeoutExceedsInterval {
            timeout_secs: health_check.timeout_secs,
            interval_secs: health_check.interval_secs,
        });
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("listener.request_timeout_secs"));
    }
    if config
        .listener
        .bind_address
        .parse::<std::net::SocketAddr>()
        .is_err()
    {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_url(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let invalid = |reason: String| ValidationError::InvalidUrl {
        field,
        value: value.to_string(),
        reason,
    };

    match Url::parse(value) {
        Ok(url) => match url.scheme() {
            "redis" | "rediss" => {
                if url.host_str().is_none() {
                    errors.push(invalid("missing host".to_string()));
                }
            }
            other => errors.push(invalid(format!("unsupported scheme '{}'", other))),
        },
        Err(e) => errors.push(invalid(e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&HealthServiceConfig::default()).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = HealthServiceConfig::default();
        config.store.url = "http://localhost:6379".to_string();
        config.store.command_timeout_ms = 0;
        config.health_check.interval_secs = 0;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors[0].to_string().contains("unsupported scheme 'http'"));
        assert_eq!(errors[1], ValidationError::Zero("store.command_timeout_ms"));
        assert_eq!(errors[2], ValidationError::Zero("health_check.interval_secs"));
    }

    #[test]
    fn test_round_timeout_must_fit_interval() {
        let mut config = HealthServiceConfig::default();
        config.health_check.interval_secs = 5;
        config.health_check.timeout_secs = 5;
        assert!(validate_config(&config).is_ok());

        config.health_check.timeout_secs = 6;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::TimeoutExceedsInterval {
                timeout_secs: 6,
                interval_secs: 5,
            }]
        );
    }

    #[test]
    fn test_cluster_mode_requires_nodes() {
        let mut config = HealthServiceConfig::default();
        config.store.mode = StoreMode::Cluster;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::NoClusterNodes]);
    }

    #[test]
    fn test_cluster_mode_ignores_standalone_url() {
        let mut config = HealthServiceConfig::default();
        config.store.mode = StoreMode::Cluster;
        config.store.url = String::new();
        config.store.cluster_nodes = vec!["rediss://cache.internal:7000".to_string()];

        assert!(validate_config(&config).is_ok());
    }
}
