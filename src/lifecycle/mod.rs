//! Lifecycle management.
//!
//! # Shutdown Sequence
//! ```text
//! Ctrl+C (signals.rs)
//!     → Shutdown::trigger (shutdown.rs)
//!     → HTTP server stops accepting, drains in-flight requests
//!     → Health monitor exits its loop
//! ```

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
