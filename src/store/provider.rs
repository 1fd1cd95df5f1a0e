//! Connection provider contract and the scoped lease guard.

use std::sync::Arc;

use async_trait::async_trait;

use crate::store::connection::ConnectionHandle;
use crate::store::types::{StoreError, StoreResult};

/// Source of connections to the store.
///
/// `release` is synchronous so that it can run from `Drop`.
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Obtain a connection. Fails with `StoreError::Connection` or
    /// `StoreError::Timeout` when the store cannot be reached.
    async fn acquire(&self) -> StoreResult<ConnectionHandle>;

    /// Hand a connection back. With `discard` set the handle must not be reused.
    fn release(&self, handle: ConnectionHandle, discard: bool) -> StoreResult<()>;
}

#[async_trait]
impl<P: ConnectionProvider + ?Sized> ConnectionProvider for Arc<P> {
    async fn acquire(&self) -> StoreResult<ConnectionHandle> {
        (**self).acquire().await
    }

    fn release(&self, handle: ConnectionHandle, discard: bool) -> StoreResult<()> {
        (**self).release(handle, discard)
    }
}

/// A RAII guard owning one leased connection.
///
/// The handle goes back to the provider exactly once: through [`Lease::finish`]
/// or, if the lease is dropped first, with the discard hint set. Release
/// failures are logged and swallowed.
pub struct Lease<'a, P: ConnectionProvider + ?Sized> {
    provider: &'a P,
    handle: Option<ConnectionHandle>,
}

impl<'a, P: ConnectionProvider + ?Sized> Lease<'a, P> {
    /// Acquire a connection from `provider`. Acquisition errors propagate.
    pub async fn acquire(provider: &'a P) -> StoreResult<Self> {
        let handle = provider.acquire().await?;
        Ok(Self {
            provider,
            handle: Some(handle),
        })
    }

    /// The leased connection. Fails only once the lease has been released.
    pub fn handle_mut(&mut self) -> StoreResult<&mut ConnectionHandle> {
        self.handle
            .as_mut()
            .ok_or_else(|| StoreError::Release("lease no longer holds a connection".to_string()))
    }

    /// Release the connection now.
    pub fn finish(mut self, discard: bool) {
        self.release(discard);
    }

    fn release(&mut self, discard: bool) {
        if let Some(handle) = self.handle.take() {
            if let Err(e) = self.provider.release(handle, discard) {
                tracing::warn!(error = %e, discard, "Failed to release store connection");
            }
        }
    }
}

impl<P: ConnectionProvider + ?Sized> Drop for Lease<'_, P> {
    fn drop(&mut self) {
        self.release(true);
    }
}
