//! Health probing for Redis-compatible key-value stores.

pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod store;

pub use config::schema::HealthServiceConfig;
pub use health::{HealthIndicator, HealthRegistry, HealthReport, Status, StoreHealthProbe};
pub use http::HealthServer;
pub use lifecycle::Shutdown;
pub use store::{ConnectionProvider, RedisConnectionProvider};
