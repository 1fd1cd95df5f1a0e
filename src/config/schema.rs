//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the health service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HealthServiceConfig {
    /// Listener for the health endpoint.
    pub listener: ListenerConfig,

    /// Key-value store connection settings.
    pub store: StoreConfig,

    /// Periodic health check settings.
    pub health_check: HealthCheckConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request timeout for the health endpoint in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 10,
        }
    }
}

/// Deployment shape of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreMode {
    #[default]
    Standalone,
    Cluster,
}

/// Store connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Standalone or cluster.
    pub mode: StoreMode,

    /// Connection URL used in standalone mode.
    pub url: String,

    /// Seed node URLs used in cluster mode.
    pub cluster_nodes: Vec<String>,

    /// Upper bound on establishing a connection, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Upper bound on a single command round trip, in milliseconds.
    pub command_timeout_ms: u64,

    /// Maximum number of idle connections kept for reuse.
    pub max_idle: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            mode: StoreMode::Standalone,
            url: "redis://127.0.0.1:6379".to_string(),
            cluster_nodes: Vec::new(),
            connect_timeout_ms: 2_000,
            command_timeout_ms: 1_000,
            max_idle: 4,
        }
    }
}

/// Health check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Enable periodic health checks.
    pub enabled: bool,

    /// Health check interval in seconds.
    pub interval_secs: u64,

    /// Upper bound on one round of checks in seconds.
    pub timeout_secs: u64,
}

impl Default for HealthCheckConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_secs: 10,
            timeout_secs: 5,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
