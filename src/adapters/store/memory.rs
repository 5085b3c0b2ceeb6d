use crate::domain::model::{NewSolveRecord, SolveRecord};
use crate::domain::ports::SolveRecordStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

/// Process-local history, lost on exit.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<Vec<SolveRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SolveRecordStore for MemoryStore {
    async fn create(&self, record: NewSolveRecord) -> Result<SolveRecord> {
        let mut records = self.records.write().await;
        let id = records.last().map(|r| r.id + 1).unwrap_or(1);
        let saved = SolveRecord::from_new(id, record);
        records.push(saved.clone());
        Ok(saved)
    }

    async fn list(&self, limit: u32, offset: u32) -> Result<(Vec<SolveRecord>, u64)> {
        let records = self.records.read().await;
        Ok(super::newest_first_page(&records, limit, offset))
    }
}
