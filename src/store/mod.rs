//! Key-value store access.
//!
//! # Data Flow
//! ```text
//! provider.rs (ConnectionProvider contract)
//!     → acquire() → connection.rs (ConnectionHandle: Standalone | Cluster)
//!     → Lease guard owns the handle
//!     → release(handle, discard) exactly once
//!
//! redis.rs: concrete provider over the redis crate
//! types.rs: INFO / CLUSTER INFO replies and StoreError
//! ```
//!
//! # Design Decisions
//! - Capability is a tag chosen at acquisition, not a runtime type check
//! - Release is synchronous and infallible from the caller's view
//! - Every network call is bounded by a configured timeout

pub mod connection;
pub mod provider;
pub mod redis;
pub mod types;

pub use self::connection::{ClusterConnection, ConnectionHandle, StandaloneConnection};
pub use self::provider::{ConnectionProvider, Lease};
pub use self::redis::RedisConnectionProvider;
pub use self::types::{ClusterSnapshot, ServerInfo, StoreError, StoreResult};
