//! Vote storage.

use std::collections::HashMap;

use async_trait::async_trait;
use sitetrust_core::VoteRecord;
use tokio::sync::RwLock;

use crate::Result;

/// Persists community votes per host.
///
/// Append-only: a user may hold multiple votes for the same host, and the
/// tally sees all of them. Deduplication per user is a store-boundary
/// concern if it is ever wanted; callers never filter.
#[async_trait]
pub trait VoteStore: Send + Sync {
    /// Append one vote record.
    async fn append(&self, vote: VoteRecord) -> Result<()>;

    /// All votes recorded for a host, oldest first.
    async fn list_for_host(&self, host: &str) -> Result<Vec<VoteRecord>>;

    /// Cheap reachability check used by the startup gate.
    async fn healthcheck(&self) -> Result<()>;
}

/// In-memory reference backend.
#[derive(Debug, Default)]
pub struct MemoryVoteStore {
    votes: RwLock<HashMap<String, Vec<VoteRecord>>>,
}

impl MemoryVoteStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VoteStore for MemoryVoteStore {
    async fn append(&self, vote: VoteRecord) -> Result<()> {
        self.votes
            .write()
            .await
            .entry(vote.host.clone())
            .or_default()
            .push(vote);
        Ok(())
    }

    async fn list_for_host(&self, host: &str) -> Result<Vec<VoteRecord>> {
        Ok(self
            .votes
            .read()
            .await
            .get(host)
            .cloned()
            .unwrap_or_default())
    }

    async fn healthcheck(&self) -> Result<()> {
        Ok(())
    }
}
