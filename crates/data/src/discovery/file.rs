//! JSON-lines discovery log.
//!
//! One `serde_json` encoded `PoolRecord` per line. Each append writes a
//! whole line with a single `write_all` under the store's lock, so
//! existing lines are never rewritten.

use super::{DiscoveryLog, StoreError};
use async_trait::async_trait;
use lpdapp_domain::entities::PoolRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

/// Key under which pool discoveries are stored.
pub const DEFAULT_LOG_KEY: &str = "poolHistory";

/// Discovery log backed by an append-only file.
#[derive(Debug)]
pub struct FileDiscoveryLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileDiscoveryLog {
    /// Creates a log at an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Creates a log named `<key>.jsonl` inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>, key: &str) -> Self {
        Self::new(dir.as_ref().join(format!("{key}.jsonl")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl DiscoveryLog for FileDiscoveryLog {
    async fn append(&self, record: &PoolRecord) -> Result<(), StoreError> {
        let mut line = serde_json::to_vec(record).map_err(StoreError::Encode)?;
        line.push(b'\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(&line).await?;
        file.flush().await?;

        debug!(pool = %record.pool_address, path = %self.path.display(), "Discovery appended");
        Ok(())
    }

    async fn entries(&self) -> Result<Vec<PoolRecord>, StoreError> {
        let contents = match fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(index, line)| {
                serde_json::from_str(line).map_err(|source| StoreError::Corrupt {
                    line: index + 1,
                    source,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use lpdapp_domain::entities::TokenDescriptor;
    use lpdapp_domain::enums::FeeTier;
    use std::sync::Arc;
    use tempfile::tempdir;

    fn record(pool_byte: u8) -> PoolRecord {
        let token_a = TokenDescriptor::new(
            Address::repeat_byte(0x11),
            11_155_111,
            18,
            "WOOX",
            "Woox",
        );
        let token_b = TokenDescriptor::new(
            Address::repeat_byte(0x22),
            11_155_111,
            18,
            "WETH",
            "Wrapped Ether",
        );
        PoolRecord {
            token_a,
            token_b,
            fee: FeeTier::Medium,
            chain_id: 11_155_111,
            pool_address: Address::repeat_byte(pool_byte),
        }
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let log = FileDiscoveryLog::in_dir(dir.path(), DEFAULT_LOG_KEY);

        assert!(log.entries().await.unwrap().is_empty());
        assert!(log.path().ends_with("poolHistory.jsonl"));
    }

    #[tokio::test]
    async fn test_append_preserves_order_and_duplicates() {
        let dir = tempdir().unwrap();
        let log = FileDiscoveryLog::in_dir(dir.path(), DEFAULT_LOG_KEY);

        log.append(&record(0xaa)).await.unwrap();
        log.append(&record(0xbb)).await.unwrap();
        log.append(&record(0xaa)).await.unwrap();

        let entries = log.entries().await.unwrap();
        assert_eq!(entries, vec![record(0xaa), record(0xbb), record(0xaa)]);
    }

    #[tokio::test]
    async fn test_reopened_log_sees_previous_entries() {
        let dir = tempdir().unwrap();
        FileDiscoveryLog::in_dir(dir.path(), "history")
            .append(&record(0xaa))
            .await
            .unwrap();

        let reopened = FileDiscoveryLog::in_dir(dir.path(), "history");
        reopened.append(&record(0xcc)).await.unwrap();

        assert_eq!(reopened.entries().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_creates_missing_directories() {
        let dir = tempdir().unwrap();
        let log = FileDiscoveryLog::in_dir(dir.path().join("nested/cache"), DEFAULT_LOG_KEY);

        log.append(&record(0xaa)).await.unwrap();
        assert_eq!(log.entries().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_appends_are_not_lost() {
        let dir = tempdir().unwrap();
        let log = Arc::new(FileDiscoveryLog::in_dir(dir.path(), DEFAULT_LOG_KEY));

        let mut handles = Vec::new();
        for i in 0..16u8 {
            let log = log.clone();
            handles.push(tokio::spawn(async move { log.append(&record(i + 1)).await }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let entries = log.entries().await.unwrap();
        assert_eq!(entries.len(), 16);
        for i in 0..16u8 {
            assert!(entries.iter().any(|r| r.pool_address == Address::repeat_byte(i + 1)));
        }
    }

    #[tokio::test]
    async fn test_corrupt_line_is_reported() {
        let dir = tempdir().unwrap();
        let log = FileDiscoveryLog::in_dir(dir.path(), DEFAULT_LOG_KEY);
        log.append(&record(0xaa)).await.unwrap();
        fs::write(
            log.path(),
            format!("{}\nnot json\n", serde_json::to_string(&record(0xaa)).unwrap()),
        )
        .await
        .unwrap();

        match log.entries().await {
            Err(StoreError::Corrupt { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected corrupt line error, got {other:?}"),
        }
    }
}
