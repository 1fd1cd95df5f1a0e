//! Periodic health checking.
//!
//! # Responsibilities
//! - Run the registry on a fixed interval
//! - Bound each round with a timeout
//! - Log component status transitions

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::{self, Interval, MissedTickBehavior};

use crate::config::HealthCheckConfig;
use crate::health::registry::HealthRegistry;
use crate::health::report::Status;
use crate::observability::metrics;

/// A component whose status changed between two rounds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub component: String,
    pub from: Option<Status>,
    pub to: Status,
}

/// Drives the registry on a fixed interval.
pub struct HealthMonitor {
    registry: Arc<HealthRegistry>,
    config: HealthCheckConfig,
    last: HashMap<String, Status>,
}

impl HealthMonitor {
    /// Create a monitor over `registry`.
    pub fn new(registry: Arc<HealthRegistry>, config: HealthCheckConfig) -> Self {
        Self {
            registry,
            config,
            last: HashMap::new(),
        }
    }

    /// Run rounds until `shutdown` fires.
    pub async fn run(mut self, mut shutdown: broadcast::Receiver<()>) {
        if !self.config.enabled {
            tracing::info!("Periodic health checks disabled");
            return;
        }

        tracing::info!(
            interval = self.config.interval_secs,
            components = ?self.registry.names(),
            "Health monitor starting"
        );

        let mut ticker = ticker(Duration::from_secs(self.config.interval_secs));

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    self.check_round().await;
                }
                _ = shutdown.recv() => {
                    tracing::info!("Health monitor received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Run one round and return the transitions it produced.
    ///
    /// A round that outlives `timeout_secs` is abandoned; every component is
    /// then treated as DOWN, in the logs and in the metrics. In-flight checks
    /// are dropped, which releases their connections with the discard hint.
    pub async fn check_round(&mut self) -> Vec<Transition> {
        let limit = Duration::from_secs(self.config.timeout_secs);

        let observed: Vec<(String, Status)> =
            match time::timeout(limit, self.registry.check_all()).await {
                Ok(report) => report
                    .components()
                    .iter()
                    .map(|(name, r)| (name.clone(), r.status()))
                    .collect(),
                Err(_) => {
                    tracing::warn!(
                        timeout_secs = self.config.timeout_secs,
                        "Health check round timed out"
                    );
                    self.registry
                        .names()
                        .into_iter()
                        .map(|name| {
                            metrics::record_check(name, Status::Down, limit);
                            (name.to_string(), Status::Down)
                        })
                        .collect()
                }
            };

        self.observe(observed)
    }

    fn observe(&mut self, observed: Vec<(String, Status)>) -> Vec<Transition> {
        let mut transitions = Vec::new();

        for (component, status) in observed {
            let previous = self.last.insert(component.clone(), status);
            if previous == Some(status) {
                continue;
            }

            match status {
                Status::Up => tracing::info!(component = %component, from = ?previous, "Component is UP"),
                Status::Down => tracing::warn!(component = %component, from = ?previous, "Component is DOWN"),
            }

            transitions.push(Transition {
                component,
                from: previous,
                to: status,
            });
        }

        transitions
    }
}

/// A ticker that waits a full period after a late round instead of bursting.
fn ticker(period: Duration) -> Interval {
    let mut ticker = time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}
