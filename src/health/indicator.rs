//! Health indicator contract.

use std::panic::AssertUnwindSafe;

use async_trait::async_trait;
use futures_util::FutureExt;

use crate::health::report::HealthReport;

/// Error raised by a failing check.
pub type CheckError = Box<dyn std::error::Error + Send + Sync>;

/// A named dependency check.
///
/// Implementors provide [`try_check`](HealthIndicator::try_check), which may
/// fail. [`check`](HealthIndicator::check) is total: errors and panics become a
/// DOWN report carrying the failure's description.
#[async_trait]
pub trait HealthIndicator: Send + Sync {
    /// Component name used in logs and composite reports.
    fn name(&self) -> &str;

    async fn try_check(&self) -> Result<HealthReport, CheckError>;

    async fn check(&self) -> HealthReport {
        match AssertUnwindSafe(self.try_check()).catch_unwind().await {
            Ok(Ok(report)) => report,
            Ok(Err(e)) => {
                tracing::warn!(component = self.name(), error = %e, "{} health check failed", self.name());
                HealthReport::down(e)
            }
            Err(_) => {
                tracing::error!(component = self.name(), "{} health check panicked", self.name());
                HealthReport::down(format!("{} health check panicked", self.name()))
            }
        }
    }
}
