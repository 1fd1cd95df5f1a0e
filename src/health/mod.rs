//! Health checking subsystem.
//!
//! # Data Flow
//! ```text
//! Probe (probe.rs):
//!     Lease connection from store::ConnectionProvider
//!     → Cluster: CLUSTER INFO → cluster_size / slots_up / slots_fail
//!     → Standalone: INFO server → version
//!     → Release (discard on failure)
//!
//! Indicator (indicator.rs):
//!     try_check() may fail
//!     → check() converts failures into DOWN reports
//!
//! Registry (registry.rs):
//!     All indicators checked concurrently
//!     → CompositeReport (DOWN if any component is DOWN)
//!
//! Monitor (monitor.rs):
//!     Periodic timer
//!     → Registry round, bounded by timeout
//!     → Log transitions
//! ```
//!
//! # Design Decisions
//! - Each check owns its connection; no state is shared between checks
//! - Reports are built fresh per check and never mutated afterwards
//! - DOWN reports carry the error and no details

pub mod indicator;
pub mod monitor;
pub mod probe;
pub mod registry;
pub mod report;

pub use indicator::{CheckError, HealthIndicator};
pub use monitor::HealthMonitor;
pub use probe::StoreHealthProbe;
pub use registry::{CompositeReport, HealthRegistry, RegistryError};
pub use report::{HealthReport, HealthReportBuilder, Status};
