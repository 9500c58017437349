#![cfg(test)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use async_trait::async_trait;

use crate::errors::StrengthError;
use crate::storage::{MemoryStore, StrengthStore};

/// Wraps a `MemoryStore` and counts calls to `store`.
#[derive(Default)]
pub struct CountingStore {
    pub inner: MemoryStore,
    pub stores: AtomicUsize,
}

impl CountingStore {
    pub fn new() -> Arc<Self> { Arc::new(Self::default()) }

    pub fn store_calls(&self) -> usize { self.stores.load(Ordering::SeqCst) }
}

#[async_trait]
impl StrengthStore for CountingStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StrengthError> {
        self.inner.load().await
    }

    async fn store(&self, bytes: &[u8]) -> Result<(), StrengthError> {
        self.stores.fetch_add(1, Ordering::SeqCst);
        self.inner.store(bytes).await
    }
}

/// Store whose every operation fails, for exercising the storage error path.
pub struct BrokenStore;

#[async_trait]
impl StrengthStore for BrokenStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StrengthError> {
        Err(StrengthError::Storage("disk unavailable".into()))
    }

    async fn store(&self, _bytes: &[u8]) -> Result<(), StrengthError> {
        Err(StrengthError::Storage("disk unavailable".into()))
    }
}
