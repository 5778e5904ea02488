//! Ticket cache shared across tasks
//!
//! Wraps a [`TicketStore`] in a single async mutex so every operation is
//! serialized. Lookups hand back owned copies since a borrow cannot outlive
//! the lock.

use crate::error::{TicketStoreError, TicketStoreResult};
use crate::store::cache::{TicketStore, TimeScale};
use crate::store::persist::{write_ticket_file, DEFAULT_FILE_MODE};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tokio::task;
use tracing::debug;

/// Cloneable handle to one ticket cache
#[derive(Debug, Clone, Default)]
pub struct SharedTicketStore {
    inner: Arc<Mutex<TicketStore>>,
}

impl SharedTicketStore {
    pub fn new(store: TicketStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// See [`TicketStore::store`]
    pub async fn store(
        &self,
        current_time: u64,
        sni: &[u8],
        alpn: &[u8],
        ticket: &[u8],
    ) -> TicketStoreResult<u64> {
        self.inner
            .lock()
            .await
            .store(current_time, sni, alpn, ticket)
    }

    /// See [`TicketStore::lookup`]
    pub async fn lookup(&self, current_time: u64, sni: &[u8], alpn: &[u8]) -> Option<Vec<u8>> {
        self.inner
            .lock()
            .await
            .lookup(current_time, sni, alpn)
            .map(<[u8]>::to_vec)
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.is_empty()
    }

    /// Snapshot the cache under the lock, then write it out
    ///
    /// Returns the number of records written.
    pub async fn save(&self, current_time: u64, path: &Path) -> TicketStoreResult<usize> {
        self.save_with_mode(current_time, path, DEFAULT_FILE_MODE)
            .await
    }

    /// Like [`SharedTicketStore::save`], with explicit unix permissions
    pub async fn save_with_mode(
        &self,
        current_time: u64,
        path: &Path,
        mode: u32,
    ) -> TicketStoreResult<usize> {
        let (bytes, count) = {
            let store = self.inner.lock().await;
            (store.encode(), store.len())
        };

        let target = path.to_path_buf();
        task::spawn_blocking(move || write_ticket_file(&target, &bytes, mode))
            .await
            .map_err(|e| {
                TicketStoreError::io(
                    format!("writing ticket file {}", path.display()),
                    std::io::Error::other(e),
                )
            })??;

        debug!(
            "Saved {} tickets to {} at {}",
            count,
            path.display(),
            current_time
        );
        Ok(count)
    }

    /// Load a new shared cache from `path`
    pub async fn load(
        path: &Path,
        retrieve_time: u64,
        scale: TimeScale,
    ) -> TicketStoreResult<Self> {
        let bytes = read_ticket_file(path).await?;
        Ok(Self::new(TicketStore::decode(&bytes, retrieve_time, scale)?))
    }

    /// Replace the contents of this cache with those of `path`
    ///
    /// The current contents stay in place if reading or decoding fails.
    /// Returns the number of records loaded.
    pub async fn reload(&self, path: &Path, retrieve_time: u64) -> TicketStoreResult<usize> {
        let bytes = read_ticket_file(path).await?;

        let mut store = self.inner.lock().await;
        let loaded = TicketStore::decode(&bytes, retrieve_time, store.time_scale())?;
        let count = loaded.len();
        *store = loaded;
        Ok(count)
    }

    /// See [`TicketStore::free`]
    pub async fn free(&self) {
        self.inner.lock().await.free();
    }
}

async fn read_ticket_file(path: &Path) -> TicketStoreResult<Vec<u8>> {
    fs::read(path)
        .await
        .map_err(|e| TicketStoreError::io(format!("reading ticket file {}", path.display()), e))
}
