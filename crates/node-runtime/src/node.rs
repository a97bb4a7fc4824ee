//! Node wiring: constructs and connects the subsystems.

use crate::config::NodeConfig;
use crate::guard::SyncPivotGuard;
use sc_api_backend::ChainApiBackend;
use sc_chain_store::{ChainStore, PlainEngine, SprintEngine, SprintEngineConfig};
use sc_milestone::adapters::EventBusAnnouncer;
use sc_milestone::{ConsensusEngine, MilestoneService, RootHashOracle, SprintLock};
use shared_bus::{EventFilter, EventTopic, InMemoryEventBus};
use std::sync::Arc;
use tracing::info;

/// The engine variant selected by configuration.
pub enum NodeEngine {
    /// Sprint-aware engine with milestone support.
    Sprint(SprintEngine<ChainStore>),
    /// Engine without milestone support.
    Plain(PlainEngine),
}

impl ConsensusEngine for NodeEngine {
    fn milestone_oracle(&self) -> Option<&dyn RootHashOracle> {
        match self {
            Self::Sprint(engine) => engine.milestone_oracle(),
            Self::Plain(engine) => engine.milestone_oracle(),
        }
    }
}

/// Concrete milestone service as wired in this runtime.
pub type NodeMilestoneService = MilestoneService<NodeEngine, ChainStore, EventBusAnnouncer>;

/// Concrete API backend as wired in this runtime.
pub type NodeBackend = ChainApiBackend<NodeMilestoneService, ChainStore>;

/// A fully wired node.
///
/// One bus, one store and one sprint gate per process; everything else
/// borrows them through `Arc`.
pub struct SprintNode {
    /// Shared event bus.
    pub bus: Arc<InMemoryEventBus>,
    /// Canonical chain state.
    pub store: Arc<ChainStore>,
    /// The sprint gate shared between verifier and sync guard.
    pub lock: Arc<SprintLock>,
    /// API backend serving external callers.
    pub backend: Arc<NodeBackend>,
    /// Guard keeping reorgs above the finality floor.
    pub guard: Arc<SyncPivotGuard>,
}

impl SprintNode {
    /// Spawn the background tasks of the node.
    pub fn start(&self) -> tokio::task::JoinHandle<()> {
        let sub = self
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::ChainHead]));
        info!("sync pivot guard started");
        tokio::spawn(Arc::clone(&self.guard).run(sub))
    }
}

/// Construct a node from configuration.
#[must_use]
pub fn build_node(config: &NodeConfig) -> SprintNode {
    let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus.channel_capacity));
    let store = Arc::new(ChainStore::new(Arc::clone(&bus)));
    let lock = Arc::new(SprintLock::new());

    let engine = if config.engine.sprint {
        info!(
            max_root_range = config.engine.max_root_range,
            "running sprint engine"
        );
        NodeEngine::Sprint(SprintEngine::new(
            Arc::clone(&store),
            SprintEngineConfig {
                max_root_range: config.engine.max_root_range,
            },
        ))
    } else {
        info!("running plain engine, milestone API disabled");
        NodeEngine::Plain(PlainEngine)
    };

    let service = Arc::new(MilestoneService::new(
        Arc::clone(&lock),
        Arc::new(engine),
        Arc::clone(&store),
        Arc::new(EventBusAnnouncer::new(Arc::clone(&bus))),
    ));
    let backend = Arc::new(ChainApiBackend::new(
        service,
        Arc::clone(&store),
        Arc::clone(&bus),
    ));
    let guard = Arc::new(SyncPivotGuard::new(Arc::clone(&lock)));

    SprintNode {
        bus,
        store,
        lock,
        backend,
        guard,
    }
}
