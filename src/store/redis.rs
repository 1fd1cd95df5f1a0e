//! Redis-backed connection provider.
//!
//! # Responsibilities
//! - Open standalone or cluster connections from configuration
//! - Bound connection setup and every command with a timeout
//! - Keep a small idle pool and honour the discard hint on release
//! - PING idle connections before reuse; stale ones are dropped

use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::cluster::ClusterClient;
use tokio::time::timeout;

use crate::config::{StoreConfig, StoreMode};
use crate::store::connection::{ClusterConnection, ConnectionHandle, StandaloneConnection};
use crate::store::provider::ConnectionProvider;
use crate::store::types::{ClusterSnapshot, ServerInfo, StoreError, StoreResult};

enum Client {
    Standalone(redis::Client),
    Cluster(ClusterClient),
}

/// Connection provider for a Redis-compatible store.
pub struct RedisConnectionProvider {
    client: Client,
    connect_timeout: Duration,
    command_timeout: Duration,
    max_idle: usize,
    idle: Mutex<Vec<ConnectionHandle>>,
}

impl RedisConnectionProvider {
    /// Build a provider from configuration. No connection is opened yet.
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let client = match config.mode {
            StoreMode::Standalone => {
                let client = redis::Client::open(config.url.as_str()).map_err(|e| {
                    StoreError::Connection(format!("Invalid store URL '{}': {}", config.url, e))
                })?;
                Client::Standalone(client)
            }
            StoreMode::Cluster => {
                let client = ClusterClient::new(config.cluster_nodes.clone()).map_err(|e| {
                    StoreError::Connection(format!("Invalid cluster nodes: {}", e))
                })?;
                Client::Cluster(client)
            }
        };

        Ok(Self {
            client,
            connect_timeout: Duration::from_millis(config.connect_timeout_ms),
            command_timeout: Duration::from_millis(config.command_timeout_ms),
            max_idle: config.max_idle,
            idle: Mutex::new(Vec::new()),
        })
    }

    /// Number of connections currently parked for reuse.
    pub fn idle_count(&self) -> usize {
        self.idle.lock().map(|idle| idle.len()).unwrap_or(0)
    }

    fn take_idle(&self) -> Option<ConnectionHandle> {
        self.idle.lock().ok().and_then(|mut idle| idle.pop())
    }
}

#[async_trait]
impl ConnectionProvider for RedisConnectionProvider {
    async fn acquire(&self) -> StoreResult<ConnectionHandle> {
        while let Some(mut handle) = self.take_idle() {
            match handle.ping().await {
                Ok(()) => {
                    tracing::trace!("Reusing idle store connection");
                    return Ok(handle);
                }
                Err(e) => tracing::debug!(error = %e, "Dropping stale idle store connection"),
            }
        }

        let handle = match &self.client {
            Client::Standalone(client) => {
                let conn = bounded(
                    "connect",
                    self.connect_timeout,
                    client.get_multiplexed_async_connection(),
                    StoreError::Connection,
                )
                .await?;
                ConnectionHandle::standalone(RedisStandalone {
                    conn,
                    command_timeout: self.command_timeout,
                })
            }
            Client::Cluster(client) => {
                let conn = bounded(
                    "connect",
                    self.connect_timeout,
                    client.get_async_connection(),
                    StoreError::Connection,
                )
                .await?;
                ConnectionHandle::cluster(RedisCluster {
                    conn,
                    command_timeout: self.command_timeout,
                })
            }
        };

        tracing::debug!(cluster = handle.is_cluster(), "Opened store connection");
        Ok(handle)
    }

    fn release(&self, handle: ConnectionHandle, discard: bool) -> StoreResult<()> {
        if discard {
            tracing::trace!("Discarding store connection");
            return Ok(());
        }

        let mut idle = self
            .idle
            .lock()
            .map_err(|_| StoreError::Release("idle pool lock poisoned".to_string()))?;
        if idle.len() < self.max_idle {
            idle.push(handle);
        }
        Ok(())
    }
}

impl std::fmt::Debug for RedisConnectionProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mode = match self.client {
            Client::Standalone(_) => StoreMode::Standalone,
            Client::Cluster(_) => StoreMode::Cluster,
        };
        f.debug_struct("RedisConnectionProvider")
            .field("mode", &mode)
            .field("connect_timeout", &self.connect_timeout)
            .field("command_timeout", &self.command_timeout)
            .field("max_idle", &self.max_idle)
            .finish()
    }
}

struct RedisStandalone {
    conn: MultiplexedConnection,
    command_timeout: Duration,
}

#[async_trait]
impl StandaloneConnection for RedisStandalone {
    async fn info(&mut self, section: &str) -> StoreResult<ServerInfo> {
        let mut cmd = redis::cmd("INFO");
        cmd.arg(section);
        let raw: String = bounded(
            "INFO",
            self.command_timeout,
            cmd.query_async(&mut self.conn),
            StoreError::Query,
        )
        .await?;
        Ok(ServerInfo::parse(&raw))
    }

    async fn ping(&mut self) -> StoreResult<()> {
        ping(&mut self.conn, self.command_timeout).await
    }
}

struct RedisCluster {
    conn: redis::cluster_async::ClusterConnection,
    command_timeout: Duration,
}

#[async_trait]
impl ClusterConnection for RedisCluster {
    async fn cluster_info(&mut self) -> StoreResult<ClusterSnapshot> {
        let mut cmd = redis::cmd("CLUSTER");
        cmd.arg("INFO");
        let raw: String = bounded(
            "CLUSTER INFO",
            self.command_timeout,
            cmd.query_async(&mut self.conn),
            StoreError::Query,
        )
        .await?;
        ClusterSnapshot::parse(&raw)
    }

    async fn ping(&mut self) -> StoreResult<()> {
        ping(&mut self.conn, self.command_timeout).await
    }
}

async fn ping<C>(conn: &mut C, limit: Duration) -> StoreResult<()>
where
    C: redis::aio::ConnectionLike + Send,
{
    let _: String = bounded("PING", limit, redis::cmd("PING").query_async(conn), StoreError::Query).await?;
    Ok(())
}

async fn bounded<T, F>(
    operation: &'static str,
    limit: Duration,
    fut: F,
    on_error: fn(String) -> StoreError,
) -> StoreResult<T>
where
    F: Future<Output = redis::RedisResult<T>>,
{
    match timeout(limit, fut).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(on_error(e.to_string())),
        Err(_) => Err(StoreError::Timeout {
            operation,
            millis: limit.as_millis() as u64,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Parked;

    #[async_trait]
    impl StandaloneConnection for Parked {
        async fn info(&mut self, _section: &str) -> StoreResult<ServerInfo> {
            Ok([("redis_version", "parked")].into_iter().collect())
        }
    }

    struct Stale;

    #[async_trait]
    impl StandaloneConnection for Stale {
        async fn info(&mut self, _section: &str) -> StoreResult<ServerInfo> {
            Ok([("redis_version", "stale")].into_iter().collect())
        }

        async fn ping(&mut self) -> StoreResult<()> {
            Err(StoreError::Query("broken pipe".to_string()))
        }
    }

    fn standalone_config() -> StoreConfig {
        StoreConfig {
            max_idle: 1,
            ..StoreConfig::default()
        }
    }

    #[test]
    fn test_invalid_url_is_rejected() {
        let config = StoreConfig {
            url: "not a url".to_string(),
            ..StoreConfig::default()
        };
        let err = RedisConnectionProvider::from_config(&config).unwrap_err();
        assert!(matches!(err, StoreError::Connection(_)));
    }

    #[test]
    fn test_cluster_without_nodes_is_rejected() {
        let config = StoreConfig {
            mode: StoreMode::Cluster,
            ..StoreConfig::default()
        };
        assert!(RedisConnectionProvider::from_config(&config).is_err());
    }

    #[test]
    fn test_release_honours_discard_and_capacity() {
        let provider = RedisConnectionProvider::from_config(&standalone_config()).unwrap();

        provider.release(ConnectionHandle::standalone(Parked), true).unwrap();
        assert_eq!(provider.idle_count(), 0);

        provider.release(ConnectionHandle::standalone(Parked), false).unwrap();
        provider.release(ConnectionHandle::standalone(Parked), false).unwrap();
        assert_eq!(provider.idle_count(), 1);
    }

    #[tokio::test]
    async fn test_acquire_prefers_idle_connection() {
        let provider = RedisConnectionProvider::from_config(&standalone_config()).unwrap();
        provider.release(ConnectionHandle::standalone(Parked), false).unwrap();

        let handle = provider.acquire().await.unwrap();
        assert_eq!(provider.idle_count(), 0);
        match handle {
            ConnectionHandle::Standalone(mut conn) => {
                let info = conn.info("server").await.unwrap();
                assert_eq!(info.get("redis_version"), Some("parked"));
            }
            ConnectionHandle::Cluster(_) => panic!("expected standalone handle"),
        }
    }

    #[tokio::test]
    async fn test_acquire_skips_stale_idle_connection() {
        let config = StoreConfig {
            max_idle: 2,
            ..StoreConfig::default()
        };
        let provider = RedisConnectionProvider::from_config(&config).unwrap();
        provider.release(ConnectionHandle::standalone(Parked), false).unwrap();
        provider.release(ConnectionHandle::standalone(Stale), false).unwrap();

        let handle = provider.acquire().await.unwrap();
        assert_eq!(provider.idle_count(), 0);
        match handle {
            ConnectionHandle::Standalone(mut conn) => {
                let info = conn.info("server").await.unwrap();
                assert_eq!(info.get("redis_version"), Some("parked"));
            }
            ConnectionHandle::Cluster(_) => panic!("expected standalone handle"),
        }
    }

    #[tokio::test]
    async fn test_connect_timeout() {
        let err = bounded(
            "connect",
            Duration::from_millis(10),
            std::future::pending::<redis::RedisResult<()>>(),
            StoreError::Connection,
        )
        .await
        .unwrap_err();
        assert_eq!(
            err,
            StoreError::Timeout {
                operation: "connect",
                millis: 10,
            }
        );
    }
}
