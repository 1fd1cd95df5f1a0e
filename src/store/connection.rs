//! Connection handles and their capabilities.
//!
//! A handle is either a standalone connection or a cluster-aware one. The
//! provider picks the variant when the connection is acquired, so callers
//! branch once on the tag instead of probing the connection's type.

use async_trait::async_trait;

use crate::store::types::{ClusterSnapshot, ServerInfo, StoreResult};

/// A plain connection to a single store node.
#[async_trait]
pub trait StandaloneConnection: Send {
    /// Run `INFO <section>` and return its properties.
    async fn info(&mut self, section: &str) -> StoreResult<ServerInfo>;

    /// Check the connection is still usable before it is reused.
    async fn ping(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

/// A connection that can see the cluster topology.
#[async_trait]
pub trait ClusterConnection: Send {
    /// Run `CLUSTER INFO` and return the slot/size summary.
    async fn cluster_info(&mut self) -> StoreResult<ClusterSnapshot>;

    /// Check the connection is still usable before it is reused.
    async fn ping(&mut self) -> StoreResult<()> {
        Ok(())
    }
}

/// A leased connection to the store.
pub enum ConnectionHandle {
    Standalone(Box<dyn StandaloneConnection>),
    Cluster(Box<dyn ClusterConnection>),
}

impl ConnectionHandle {
    /// Wrap a standalone connection.
    pub fn standalone(conn: impl StandaloneConnection + 'static) -> Self {
        Self::Standalone(Box::new(conn))
    }

    /// Wrap a cluster connection.
    pub fn cluster(conn: impl ClusterConnection + 'static) -> Self {
        Self::Cluster(Box::new(conn))
    }

    /// Whether this handle speaks the cluster protocol.
    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }

    /// Ping whichever connection this handle wraps.
    pub async fn ping(&mut self) -> StoreResult<()> {
        match self {
            Self::Standalone(conn) => conn.ping().await,
            Self::Cluster(conn) => conn.ping().await,
        }
    }
}

impl std::fmt::Debug for ConnectionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Standalone(_) => f.write_str("ConnectionHandle::Standalone"),
            Self::Cluster(_) => f.write_str("ConnectionHandle::Cluster"),
        }
    }
}
