//! Store reply types and error definitions.

use std::collections::HashMap;

use thiserror::Error;

/// Errors that can occur while talking to the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A connection could not be obtained (unreachable store, exhausted pool).
    #[error("Connection error: {0}")]
    Connection(String),

    /// A command failed, or its reply could not be interpreted.
    #[error("Query error: {0}")]
    Query(String),

    /// A bounded call did not complete in time.
    #[error("{operation} timed out after {millis}ms")]
    Timeout { operation: &'static str, millis: u64 },

    /// The connection could not be handed back to its provider.
    #[error("Release error: {0}")]
    Release(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Properties reported by the `INFO` command for one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerInfo {
    properties: HashMap<String, String>,
}

impl ServerInfo {
    /// Parse raw `INFO` output.
    ///
    /// Lines have the form `key:value`. Section headers (`# Server`) and blank
    /// lines are skipped, as are lines without a separator.
    pub fn parse(raw: &str) -> Self {
        let properties = raw
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .filter_map(|line| line.split_once(':'))
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Self { properties }
    }

    /// The value of `key`, if the server reported it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ServerInfo
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            properties: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Cluster topology as reported by `CLUSTER INFO`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClusterSnapshot {
    pub cluster_size: u64,
    pub slots_ok: u64,
    pub slots_fail: u64,
}

impl ClusterSnapshot {
    /// Parse raw `CLUSTER INFO` output.
    ///
    /// Absent fields read as zero; a present field that is not an unsigned
    /// integer is a query error.
    pub fn parse(raw: &str) -> StoreResult<Self> {
        let info = ServerInfo::parse(raw);
        Ok(Self {
            cluster_size: numeric(&info, "cluster_size")?,
            slots_ok: numeric(&info, "cluster_slots_ok")?,
            slots_fail: numeric(&info, "cluster_slots_fail")?,
        })
    }
}

fn numeric(info: &ServerInfo, key: &str) -> StoreResult<u64> {
    match info.get(key) {
        None => Ok(0),
        Some(value) => value.trim().parse().map_err(|_| {
            StoreError::Query(format!("cluster info field '{}' is not a count: '{}'", key, value))
        }),
    }
}
