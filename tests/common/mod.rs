//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use store_health::store::{
    ClusterConnection, ClusterSnapshot, ConnectionHandle, ConnectionProvider, ServerInfo,
    StandaloneConnection, StoreError, StoreResult,
};

/// What the scripted store does when a connection is requested.
#[derive(Clone)]
pub enum Script {
    /// Standalone node answering `INFO server` with these properties.
    Standalone(Vec<(&'static str, &'static str)>),
    /// Cluster node answering `CLUSTER INFO` with this snapshot.
    Cluster(ClusterSnapshot),
    /// Acquisition fails with a connection error.
    Unreachable(&'static str),
    /// Connection is handed out but its query fails.
    QueryFails { cluster: bool, message: &'static str },
    /// Connection is handed out but its query never completes.
    QueryHangs,
}

/// A provider that follows a script and records every release.
pub struct ScriptedProvider {
    script: Mutex<Script>,
    acquired: AtomicUsize,
    releases: Mutex<Vec<bool>>,
}

impl ScriptedProvider {
    pub fn new(script: Script) -> Self {
        Self {
            script: Mutex::new(script),
            acquired: AtomicUsize::new(0),
            releases: Mutex::new(Vec::new()),
        }
    }

    pub fn set_script(&self, script: Script) {
        *self.script.lock().unwrap() = script;
    }

    pub fn acquired(&self) -> usize {
        self.acquired.load(Ordering::SeqCst)
    }

    /// Discard flags passed to `release`, in call order.
    pub fn releases(&self) -> Vec<bool> {
        self.releases.lock().unwrap().clone()
    }
}

#[async_trait]
impl ConnectionProvider for ScriptedProvider {
    async fn acquire(&self) -> StoreResult<ConnectionHandle> {
        let script = self.script.lock().unwrap().clone();
        let handle = match script {
            Script::Unreachable(message) => return Err(StoreError::Connection(message.to_string())),
            Script::Standalone(properties) => ConnectionHandle::standalone(FakeNode {
                info: properties.into_iter().collect(),
                fail: None,
            }),
            Script::Cluster(snapshot) => ConnectionHandle::cluster(FakeCluster {
                snapshot,
                fail: None,
                hang: false,
            }),
            Script::QueryFails { cluster: true, message } => ConnectionHandle::cluster(FakeCluster {
                snapshot: ClusterSnapshot::default(),
                fail: Some(message),
                hang: false,
            }),
            Script::QueryFails { cluster: false, message } => ConnectionHandle::standalone(FakeNode {
                info: ServerInfo::default(),
                fail: Some(message),
            }),
            Script::QueryHangs => ConnectionHandle::cluster(FakeCluster {
                snapshot: ClusterSnapshot::default(),
                fail: None,
                hang: true,
            }),
        };
        self.acquired.fetch_add(1, Ordering::SeqCst);
        Ok(handle)
    }

    fn release(&self, _handle: ConnectionHandle, discard: bool) -> StoreResult<()> {
        self.releases.lock().unwrap().push(discard);
        Ok(())
    }
}

struct FakeNode {
    info: ServerInfo,
    fail: Option<&'static str>,
}

#[async_trait]
impl StandaloneConnection for FakeNode {
    async fn info(&mut self, section: &str) -> StoreResult<ServerInfo> {
        assert_eq!(section, "server");
        match self.fail {
            Some(message) => Err(StoreError::Query(message.to_string())),
            None => Ok(self.info.clone()),
        }
    }
}

struct FakeCluster {
    snapshot: ClusterSnapshot,
    fail: Option<&'static str>,
    hang: bool,
}

#[async_trait]
impl ClusterConnection for FakeCluster {
    async fn cluster_info(&mut self) -> StoreResult<ClusterSnapshot> {
        if self.hang {
            std::future::pending::<()>().await;
        }
        match self.fail {
            Some(message) => Err(StoreError::Query(message.to_string())),
            None => Ok(self.snapshot),
        }
    }
}
