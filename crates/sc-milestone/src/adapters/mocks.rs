//! Mock adapters with invocation recording.

use crate::error::OracleError;
use crate::events::MilestoneConfirmedPayload;
use crate::ports::outbound::{ChainReader, ConsensusEngine, MilestoneAnnouncer, RootHashOracle};
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Block, BlockNumber, Hash, StateSyncReceipt, TxLookupEntry};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Oracle returning a canned response and counting invocations.
///
/// The invocation counter is what lets tests assert the contention path
/// never computes anything.
pub struct MockRootHashOracle {
    response: RwLock<Result<Hash, OracleError>>,
    invocations: AtomicUsize,
}

impl MockRootHashOracle {
    /// An oracle that always returns `root`.
    #[must_use]
    pub fn fixed(root: Hash) -> Self {
        Self {
            response: RwLock::new(Ok(root)),
            invocations: AtomicUsize::new(0),
        }
    }

    /// An oracle that always fails with `error`.
    #[must_use]
    pub fn failing(error: OracleError) -> Self {
        Self {
            response: RwLock::new(Err(error)),
            invocations: AtomicUsize::new(0),
        }
    }

    /// Swap the canned response.
    pub fn set_response(&self, response: Result<Hash, OracleError>) {
        *self.response.write() = response;
    }

    /// How many times `compute_root` was called.
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RootHashOracle for MockRootHashOracle {
    async fn compute_root(
        &self,
        _start: BlockNumber,
        _end: BlockNumber,
    ) -> Result<Hash, OracleError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        self.response.read().clone()
    }
}

/// Engine with a configurable oracle capability.
pub struct MockEngine {
    oracle: Option<Arc<dyn RootHashOracle>>,
}

impl MockEngine {
    /// An engine exposing `oracle`.
    #[must_use]
    pub fn with_oracle(oracle: Arc<dyn RootHashOracle>) -> Self {
        Self {
            oracle: Some(oracle),
        }
    }

    /// An engine without milestone support.
    #[must_use]
    pub fn without_oracle() -> Self {
        Self { oracle: None }
    }
}

impl ConsensusEngine for MockEngine {
    fn milestone_oracle(&self) -> Option<&dyn RootHashOracle> {
        self.oracle.as_deref()
    }
}

/// In-memory chain reader backed by hash maps.
#[derive(Default)]
pub struct MockChainReader {
    blocks: RwLock<HashMap<BlockNumber, Block>>,
    receipts: RwLock<HashMap<Hash, StateSyncReceipt>>,
    tx_lookups: RwLock<HashMap<Hash, Vec<TxLookupEntry>>>,
}

impl MockChainReader {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_block(&self, block: Block) {
        self.blocks.write().insert(block.number(), block);
    }

    pub async fn insert_receipt(&self, receipt: StateSyncReceipt) {
        self.receipts.write().insert(receipt.block_hash, receipt);
    }

    pub async fn insert_tx_lookup(&self, entry: TxLookupEntry) {
        self.tx_lookups
            .write()
            .entry(entry.tx_hash)
            .or_default()
            .push(entry);
    }

    pub async fn remove_block(&self, number: BlockNumber) {
        self.blocks.write().remove(&number);
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn block_by_number(&self, number: BlockNumber) -> Option<Block> {
        self.blocks.read().get(&number).cloned()
    }

    async fn state_sync_receipt(&self, block_hash: Hash) -> Option<StateSyncReceipt> {
        self.receipts.read().get(&block_hash).cloned()
    }

    async fn state_sync_transaction(&self, tx_hash: Hash) -> Option<TxLookupEntry> {
        self.tx_lookups
            .read()
            .get(&tx_hash)
            .and_then(|entries| entries.first().cloned())
    }

    async fn state_sync_transaction_in_block(
        &self,
        tx_hash: Hash,
        block_hash: Hash,
    ) -> Option<TxLookupEntry> {
        self.tx_lookups
            .read()
            .get(&tx_hash)
            .and_then(|entries| entries.iter().find(|e| e.block_hash == block_hash).cloned())
    }
}

/// Announcer that records every payload it receives.
#[derive(Default)]
pub struct MockAnnouncer {
    announced: RwLock<Vec<MilestoneConfirmedPayload>>,
}

impl MockAnnouncer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payloads announced so far, in order.
    pub fn announced(&self) -> Vec<MilestoneConfirmedPayload> {
        self.announced.read().clone()
    }
}

#[async_trait]
impl MilestoneAnnouncer for MockAnnouncer {
    async fn announce_confirmed(&self, payload: MilestoneConfirmedPayload) {
        self.announced.write().push(payload);
    }
}
