use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::StrengthStore;
use crate::errors::StrengthError;

/// In-process store for tests and embedding.
#[derive(Default, Debug)]
pub struct MemoryStore {
    inner: RwLock<Option<Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Start with an existing record, e.g. to simulate a file written out of band.
    pub fn with_record(bytes: impl Into<Vec<u8>>) -> Arc<Self> {
        Arc::new(Self { inner: RwLock::new(Some(bytes.into())) })
    }
}

#[async_trait]
impl StrengthStore for MemoryStore {
    async fn load(&self) -> Result<Option<Vec<u8>>, StrengthError> {
        Ok(self.inner.read().await.clone())
    }

    async fn store(&self, bytes: &[u8]) -> Result<(), StrengthError> {
        *self.inner.write().await = Some(bytes.to_vec());
        Ok(())
    }
}
