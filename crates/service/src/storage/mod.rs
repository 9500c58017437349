//! Storage abstractions for service layer
//!
//! The strength record is one opaque blob. Handlers only see `StrengthStore`,
//! so the backing mechanism (local file, memory) is swappable.

pub mod file_store;
pub mod memory_store;

use async_trait::async_trait;

use crate::errors::StrengthError;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;

/// Whole-record persistence: no partial updates, last store wins.
#[async_trait]
pub trait StrengthStore: Send + Sync {
    /// Current record bytes, or `None` before the first successful store.
    async fn load(&self) -> Result<Option<Vec<u8>>, StrengthError>;
    /// Replace the record in full.
    async fn store(&self, bytes: &[u8]) -> Result<(), StrengthError>;
}
