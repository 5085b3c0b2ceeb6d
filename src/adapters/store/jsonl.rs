use crate::domain::model::{NewSolveRecord, SolveRecord};
use crate::domain::ports::SolveRecordStore;
use crate::utils::error::{CubeError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Append-only history file, one JSON record per line.
#[derive(Debug)]
pub struct JsonlStore {
    path: PathBuf,
    // Highest id written so far; loaded from disk on first create.
    last_id: Mutex<Option<u64>>,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            last_id: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Vec<SolveRecord>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| serde_json::from_str(line).map_err(CubeError::from))
            .collect()
    }
}

#[async_trait]
impl SolveRecordStore for JsonlStore {
    async fn create(&self, record: NewSolveRecord) -> Result<SolveRecord> {
        let mut last_id = self.last_id.lock().await;
        let current = match *last_id {
            Some(id) => id,
            None => self
                .read_all()
                .await?
                .iter()
                .map(|r| r.id)
                .max()
                .unwrap_or(0),
        };

        let saved = SolveRecord::from_new(current + 1, record);
        // Claimed before any I/O so an interrupted or failed write never
        // lets a later record reuse the id.
        *last_id = Some(saved.id);

        let mut line = serde_json::to_string(&saved)?;
        line.push('\n');

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        tracing::debug!(path = %self.path.display(), id = saved.id, "Appended solve record");
        Ok(saved)
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<SolveRecord>, u64)> {
        let records = self.read_all().await?;
        Ok(super::newest_first_page(&records, limit, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn record(facelets: &str, solution: &str) -> NewSolveRecord {
        NewSolveRecord {
            facelet_string: facelets.to_string(),
            solution: solution.to_string(),
            move_count: solution.split_whitespace().count() as u32,
            solve_time_ms: 3.25,
            timestamp: Utc::now(),
            ip_address: None,
        }
    }

    #[tokio::test]
    async fn test_missing_file_lists_empty() {
        let temp_dir = TempDir::new().unwrap();
        let store = JsonlStore::new(temp_dir.path().join("solves.jsonl"));

        let (records, total) = store.list(50, 0).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(total, 0);
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("solves.jsonl");

        let store = JsonlStore::new(&path);
        store.create(record("first", "R U")).await.unwrap();
        store.create(record("second", "")).await.unwrap();

        let reopened = JsonlStore::new(&path);
        let third = reopened.create(record("third", "F2")).await.unwrap();
        assert_eq!(third.id, 3);

        let (records, total) = reopened.list(50, 0).await.unwrap();
        assert_eq!(total, 3);
        assert_eq!(records[0].facelet_string, "third");
        assert_eq!(records[2].solution, "R U");
        assert_eq!(records[1].move_count, 0);

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 3);
    }

    #[tokio::test]
    async fn test_failed_write_does_not_recycle_its_id() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solves.jsonl");
        let store = JsonlStore::new(&path);

        assert_eq!(store.create(record("first", "R")).await.unwrap().id, 1);

        // A directory in place of the file makes the append fail.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();
        assert!(store.create(record("lost", "U")).await.is_err());

        std::fs::remove_dir(&path).unwrap();
        let next = store.create(record("next", "F")).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn test_corrupt_line_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("solves.jsonl");
        std::fs::write(&path, "{not json}\n").unwrap();

        let store = JsonlStore::new(&path);
        assert!(matches!(
            store.list(10, 0).await,
            Err(CubeError::SerializationError(_))
        ));
    }
}
