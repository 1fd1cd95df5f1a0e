//! Composite of named health indicators.

use std::sync::Arc;
use std::time::Instant;

use futures_util::future::join_all;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::health::indicator::HealthIndicator;
use crate::health::report::{HealthReport, Status};
use crate::observability::metrics;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("health indicator '{0}' is already registered")]
    Duplicate(String),
}

/// Aggregated result of every registered indicator.
#[derive(Debug, Clone, Serialize)]
pub struct CompositeReport {
    status: Status,
    #[serde(serialize_with = "components_as_map")]
    components: Vec<(String, HealthReport)>,
}

impl CompositeReport {
    /// DOWN if any component is DOWN, otherwise UP.
    pub fn from_components(components: Vec<(String, HealthReport)>) -> Self {
        let status = if components.iter().all(|(_, r)| r.is_up()) {
            Status::Up
        } else {
            Status::Down
        };
        Self { status, components }
    }

    /// The aggregate status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Component reports in registration order.
    pub fn components(&self) -> &[(String, HealthReport)] {
        &self.components
    }

    /// One component's report by name.
    pub fn component(&self, name: &str) -> Option<&HealthReport> {
        self.components
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, r)| r)
    }
}

fn components_as_map<S: Serializer>(
    components: &[(String, HealthReport)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(components.iter().map(|(name, report)| (name, report)))
}

/// Registry of indicators checked together.
#[derive(Default)]
pub struct HealthRegistry {
    indicators: Vec<Arc<dyn HealthIndicator>>,
}

impl HealthRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an indicator. Names must be unique.
    pub fn register(&mut self, indicator: Arc<dyn HealthIndicator>) -> Result<(), RegistryError> {
        if self.indicators.iter().any(|i| i.name() == indicator.name()) {
            return Err(RegistryError::Duplicate(indicator.name().to_string()));
        }
        tracing::debug!(component = indicator.name(), "Registered health indicator");
        self.indicators.push(indicator);
        Ok(())
    }

    /// Registered names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.indicators.iter().map(|i| i.name()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.indicators.is_empty()
    }

    /// Check every indicator concurrently.
    pub async fn check_all(&self) -> CompositeReport {
        let checks = self.indicators.iter().map(|indicator| async move {
            let report = timed_check(indicator.as_ref()).await;
            (indicator.name().to_string(), report)
        });
        CompositeReport::from_components(join_all(checks).await)
    }

    /// Check a single indicator by name.
    pub async fn check_one(&self, name: &str) -> Option<HealthReport> {
        let indicator = self.indicators.iter().find(|i| i.name() == name)?;
        Some(timed_check(indicator.as_ref()).await)
    }
}

async fn timed_check(indicator: &dyn HealthIndicator) -> HealthReport {
    let start = Instant::now();
    let report = indicator.check().await;
    metrics::record_check(indicator.name(), report.status(), start.elapsed());
    report
}

impl std::fmt::Debug for HealthRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HealthRegistry")
            .field("indicators", &self.names())
            .finish()
    }
}
