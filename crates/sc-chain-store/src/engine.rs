//! Consensus engine capability surfaces.

use crate::oracle::SprintRootOracle;
use sc_milestone::{ChainReader, ConsensusEngine, RootHashOracle};
use std::sync::Arc;

/// Configuration of the sprint engine.
#[derive(Debug, Clone)]
pub struct SprintEngineConfig {
    /// Longest block range the root oracle will compute over.
    pub max_root_range: u64,
}

impl Default for SprintEngineConfig {
    fn default() -> Self {
        Self {
            max_root_range: 4096,
        }
    }
}

impl SprintEngineConfig {
    /// Small limits for tests.
    #[must_use]
    pub fn for_testing() -> Self {
        Self { max_root_range: 64 }
    }
}

/// The sprint-aware consensus engine. Exposes the milestone oracle.
pub struct SprintEngine<C: ChainReader> {
    oracle: SprintRootOracle<C>,
}

impl<C: ChainReader + 'static> SprintEngine<C> {
    /// Build an engine whose oracle reads from `chain`.
    pub fn new(chain: Arc<C>, config: SprintEngineConfig) -> Self {
        Self {
            oracle: SprintRootOracle::new(chain, config.max_root_range),
        }
    }
}

impl<C: ChainReader + 'static> ConsensusEngine for SprintEngine<C> {
    fn milestone_oracle(&self) -> Option<&dyn RootHashOracle> {
        Some(&self.oracle)
    }
}

/// A consensus engine without milestone support.
///
/// Nodes running this engine reject every milestone call before the
/// sprint gate is touched.
#[derive(Default)]
pub struct PlainEngine;

impl ConsensusEngine for PlainEngine {
    fn milestone_oracle(&self) -> Option<&dyn RootHashOracle> {
        None
    }
}
