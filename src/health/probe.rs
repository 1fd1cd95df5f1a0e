//! Key-value store health probe.
//!
//! # Responsibilities
//! - Lease one connection per check and release it exactly once
//! - Report cluster topology for cluster connections
//! - Report the server version for standalone connections
//!
//! # Design Decisions
//! - Cluster capability wins; the two branches never merge
//! - A failed check releases with the discard hint, a healthy one may be pooled
//! - A missing version property is not a failure; the detail is omitted

use async_trait::async_trait;

use crate::health::indicator::{CheckError, HealthIndicator};
use crate::health::report::HealthReport;
use crate::store::{ConnectionHandle, ConnectionProvider, Lease, StoreResult};

const SERVER_SECTION: &str = "server";
const VERSION_PROPERTY: &str = "redis_version";

/// Health probe for a Redis-compatible store.
#[derive(Debug)]
pub struct StoreHealthProbe<P> {
    name: String,
    provider: P,
}

impl<P: ConnectionProvider> StoreHealthProbe<P> {
    /// Create an indicator named `redis` over `provider`.
    pub fn new(provider: P) -> Self {
        Self {
            name: "redis".to_string(),
            provider,
        }
    }

    /// Override the component name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The provider connections are leased from.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run one check, propagating acquisition and query failures.
    ///
    /// The connection is released before this returns on every path.
    pub async fn probe(&self) -> StoreResult<HealthReport> {
        let mut lease = Lease::acquire(&self.provider).await?;
        let outcome = match lease.handle_mut() {
            Ok(handle) => inspect(handle).await,
            Err(e) => Err(e),
        };
        lease.finish(outcome.is_err());
        outcome
    }
}

async fn inspect(handle: &mut ConnectionHandle) -> StoreResult<HealthReport> {
    match handle {
        ConnectionHandle::Cluster(conn) => {
            let snapshot = conn.cluster_info().await?;
            Ok(HealthReport::up()
                .with_detail("cluster_size", snapshot.cluster_size)
                .with_detail("slots_up", snapshot.slots_ok)
                .with_detail("slots_fail", snapshot.slots_fail)
                .build())
        }
        ConnectionHandle::Standalone(conn) => {
            let info = conn.info(SERVER_SECTION).await?;
            let report = match info.get(VERSION_PROPERTY) {
                Some(version) => HealthReport::up().with_detail("version", version),
                None => {
                    tracing::warn!(
                        property = VERSION_PROPERTY,
                        "Server info did not include a version"
                    );
                    HealthReport::up()
                }
            };
            Ok(report.build())
        }
    }
}

#[async_trait]
impl<P: ConnectionProvider> HealthIndicator for StoreHealthProbe<P> {
    fn name(&self) -> &str {
        &self.name
    }

    async fn try_check(&self) -> Result<HealthReport, CheckError> {
        Ok(self.probe().await?)
    }
}
