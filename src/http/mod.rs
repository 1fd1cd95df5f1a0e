//! HTTP layer.
//!
//! # Data Flow
//! ```text
//! GET /health[/{component}]
//!     → server.rs handler
//!     → HealthRegistry check
//!     → JSON report, status code from health status
//! ```

pub mod server;

pub use server::HealthServer;
