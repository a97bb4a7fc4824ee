//! Cross-crate integration flows.

mod milestone_flow;
mod state_sync_flow;
mod sync_guard;

use sc_api_backend::ChainApiBackend;
use sc_chain_store::{ChainStore, SprintEngine, SprintEngineConfig};
use sc_milestone::adapters::EventBusAnnouncer;
use sc_milestone::{MilestoneService, SprintLock};
use shared_bus::InMemoryEventBus;
use shared_types::{Block, BlockHeader, BlockNumber};
use std::sync::Arc;

pub(crate) type TestService =
    MilestoneService<SprintEngine<ChainStore>, ChainStore, EventBusAnnouncer>;
pub(crate) type TestBackend = ChainApiBackend<TestService, ChainStore>;

pub(crate) struct TestNode {
    pub bus: Arc<InMemoryEventBus>,
    pub store: Arc<ChainStore>,
    pub lock: Arc<SprintLock>,
    pub backend: TestBackend,
}

/// Wire a full node over an in-memory store with `head` canonical blocks.
pub(crate) async fn test_node(head: BlockNumber) -> TestNode {
    let bus = Arc::new(InMemoryEventBus::new());
    let store = Arc::new(ChainStore::new(Arc::clone(&bus)));
    let lock = Arc::new(SprintLock::new());

    store
        .extend_canonical((1..=head).map(test_block).collect())
        .await;

    let engine = SprintEngine::new(Arc::clone(&store), SprintEngineConfig::default());
    let service = Arc::new(MilestoneService::new(
        Arc::clone(&lock),
        Arc::new(engine),
        Arc::clone(&store),
        Arc::new(EventBusAnnouncer::new(Arc::clone(&bus))),
    ));
    let backend = ChainApiBackend::new(service, Arc::clone(&store), Arc::clone(&bus));

    TestNode {
        bus,
        store,
        lock,
        backend,
    }
}

pub(crate) fn test_block(number: BlockNumber) -> Block {
    Block::new(BlockHeader {
        number,
        tx_root: [number as u8; 32],
        timestamp: 1_700_000_000 + number,
        ..BlockHeader::default()
    })
}
