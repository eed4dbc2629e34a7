//! Append-only pool discovery log.
//!
//! Entries are never rewritten. Appends from concurrent provisioning
//! attempts in one process are serialized by each store.

mod file;
mod memory;

pub use file::{DEFAULT_LOG_KEY, FileDiscoveryLog};
pub use memory::MemoryDiscoveryLog;

use async_trait::async_trait;
use lpdapp_domain::entities::PoolRecord;
use thiserror::Error;

/// Errors raised by a discovery log store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("discovery log I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("discovery log entry could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("discovery log line {line} is corrupt: {source}")]
    Corrupt {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// Append-only store of resolved pools.
#[async_trait]
pub trait DiscoveryLog: Send + Sync {
    /// Appends one record. Duplicates are accepted.
    async fn append(&self, record: &PoolRecord) -> Result<(), StoreError>;

    /// Every record in insertion order. Missing storage reads as empty.
    async fn entries(&self) -> Result<Vec<PoolRecord>, StoreError>;
}
