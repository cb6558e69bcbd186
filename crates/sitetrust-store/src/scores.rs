//! Score record storage.

use std::collections::HashMap;

use async_trait::async_trait;
use sitetrust_core::SiteScoreRecord;
use tokio::sync::RwLock;

use crate::Result;

/// Persists the current score record per host.
///
/// One logical record per host: `upsert` creates or overwrites, and the
/// stored record is always the latest computation, never an average of
/// history. Records are never deleted.
#[async_trait]
pub trait ScoreStore: Send + Sync {
    async fn upsert(&self, record: SiteScoreRecord) -> Result<()>;

    async fn get(&self, host: &str) -> Result<Option<SiteScoreRecord>>;

    /// Cheap reachability check used by the startup gate.
    async fn healthcheck(&self) -> Result<()>;
}

/// In-memory reference backend.
#[derive(Debug, Default)]
pub struct MemoryScoreStore {
    records: RwLock<HashMap<String, SiteScoreRecord>>,
}

impl MemoryScoreStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ScoreStore for MemoryScoreStore {
    async fn upsert(&self, record: SiteScoreRecord) -> Result<()> {
        self.records
            .write()
            .await
            .insert(record.host.clone(), record);
        Ok(())
    }

    async fn get(&self, host: &str) -> Result<Option<SiteScoreRecord>> {
        Ok(self.records.read().await.get(host).cloned())
    }

    async fn healthcheck(&self) -> Result<()> {
        Ok(())
    }
}
