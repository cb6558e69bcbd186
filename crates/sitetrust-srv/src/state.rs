//! Shared application state.

use std::sync::Arc;

use sitetrust_probes::{OrchestratorConfig, ProbeOrchestrator};
use sitetrust_store::{MemoryCache, MemoryScoreStore, MemoryVoteStore, NoopCache, ScoreCache, ScoreStore, VoteStore};

use crate::config::Config;

/// Everything a request handler needs, behind cheap clones.
#[derive(Clone)]
pub struct AppState {
    pub votes: Arc<dyn VoteStore>,
    pub scores: Arc<dyn ScoreStore>,
    pub cache: Arc<dyn ScoreCache>,
    pub orchestrator: Arc<ProbeOrchestrator>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build with the reference in-memory backends.
    #[must_use]
    pub fn new(config: Config) -> Self {
        let probes = OrchestratorConfig {
            overall_deadline: config.probe_deadline,
            ..OrchestratorConfig::default()
        };
        Self::with_orchestrator(config, probes)
    }

    /// Build with explicit probe timeouts (tests use short ones).
    #[must_use]
    pub fn with_orchestrator(config: Config, probes: OrchestratorConfig) -> Self {
        let cache: Arc<dyn ScoreCache> = if config.cache_disabled {
            Arc::new(NoopCache)
        } else {
            Arc::new(MemoryCache::new())
        };
        let orchestrator = Arc::new(ProbeOrchestrator::with_config(
            config.threat_api_key.clone(),
            probes,
        ));

        Self {
            votes: Arc::new(MemoryVoteStore::new()),
            scores: Arc::new(MemoryScoreStore::new()),
            cache,
            orchestrator,
            config: Arc::new(config),
        }
    }
}
