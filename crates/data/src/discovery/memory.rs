use super::{DiscoveryLog, StoreError};
use async_trait::async_trait;
use lpdapp_domain::entities::PoolRecord;
use tokio::sync::Mutex;

/// In-process discovery log.
#[derive(Debug, Default)]
pub struct MemoryDiscoveryLog {
    records: Mutex<Vec<PoolRecord>>,
}

impl MemoryDiscoveryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl DiscoveryLog for MemoryDiscoveryLog {
    async fn append(&self, record: &PoolRecord) -> Result<(), StoreError> {
        self.records.lock().await.push(record.clone());
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<PoolRecord>, StoreError> {
        Ok(self.records.lock().await.clone())
    }
}
