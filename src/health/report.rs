//! Health report produced by one check.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Verdict of a health check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Up,
    Down,
}

impl Status {
    /// Whether this is `UP`.
    pub fn is_up(self) -> bool {
        self == Status::Up
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::Up => write!(f, "UP"),
            Status::Down => write!(f, "DOWN"),
        }
    }
}

/// Point-in-time health of one dependency.
///
/// Immutable once built. An UP report carries details and no error; a DOWN
/// report carries an error and no details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthReport {
    status: Status,
    #[serde(skip_serializing_if = "Map::is_empty")]
    details: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl HealthReport {
    /// Start building an UP report.
    pub fn up() -> HealthReportBuilder {
        HealthReportBuilder::default()
    }

    /// A DOWN report describing `error`.
    pub fn down(error: impl std::fmt::Display) -> Self {
        Self {
            status: Status::Down,
            details: Map::new(),
            error: Some(error.to_string()),
        }
    }

    /// UP or DOWN.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Whether the report is UP.
    pub fn is_up(&self) -> bool {
        self.status.is_up()
    }

    /// Details in insertion order.
    pub fn details(&self) -> &Map<String, Value> {
        &self.details
    }

    /// A single detail by key.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.get(key)
    }

    /// The failure description of a DOWN report.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// Accumulates details for an UP report.
#[derive(Debug, Default)]
pub struct HealthReportBuilder {
    details: Map<String, Value>,
}

impl HealthReportBuilder {
    /// Add a detail. A repeated key keeps its original position and takes the
    /// new value.
    #[must_use]
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Finish as an UP report.
    pub fn build(self) -> HealthReport {
        HealthReport {
            status: Status::Up,
            details: self.details,
            error: None,
        }
    }
}
