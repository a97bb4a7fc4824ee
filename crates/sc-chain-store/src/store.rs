//! In-memory chain store with canonical index and bus notifications.

use async_trait::async_trait;
use parking_lot::RwLock;
use sc_milestone::ChainReader;
use shared_bus::{ChainEvent, EventPublisher, HeadChangeKind, InMemoryEventBus};
use shared_types::{Block, BlockNumber, Hash, StateSyncData, StateSyncReceipt, TxLookupEntry};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Default)]
struct StoreInner {
    /// Every block ever imported, canonical or not.
    blocks_by_hash: HashMap<Hash, Block>,
    /// Height to hash index of the canonical chain.
    canonical: BTreeMap<BlockNumber, Hash>,
    /// State-sync receipts keyed by containing block hash.
    state_sync_receipts: HashMap<Hash, StateSyncReceipt>,
    /// State-sync transaction locations keyed by transaction hash.
    /// Multiple entries per hash while competing forks are alive.
    tx_lookup: HashMap<Hash, Vec<TxLookupEntry>>,
}

/// In-memory chain state shared between the sync path and the API surface.
///
/// Mutations publish their corresponding [`ChainEvent`] after the write
/// guard is dropped, so subscribers observe a store that already reflects
/// the event they received.
pub struct ChainStore {
    inner: RwLock<StoreInner>,
    bus: Arc<InMemoryEventBus>,
}

impl ChainStore {
    /// Create an empty store publishing onto `bus`.
    #[must_use]
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            bus,
        }
    }

    /// Height of the canonical head, if any block was imported.
    #[must_use]
    pub fn head_number(&self) -> Option<BlockNumber> {
        self.inner.read().canonical.keys().next_back().copied()
    }

    /// Look up any imported block by hash, canonical or not.
    #[must_use]
    pub fn block_by_hash(&self, hash: Hash) -> Option<Block> {
        self.inner.read().blocks_by_hash.get(&hash).cloned()
    }

    /// Append `blocks` to the canonical chain and announce the new head.
    ///
    /// Blocks must be contiguous and ordered by height; the first block
    /// must extend the current head.
    pub async fn extend_canonical(&self, blocks: Vec<Block>) {
        let Some(head_number) = blocks.last().map(Block::number) else {
            return;
        };

        let new_chain: Vec<Hash> = blocks.iter().map(Block::hash).collect();
        {
            let mut inner = self.inner.write();
            for block in blocks {
                let hash = block.hash();
                inner.canonical.insert(block.number(), hash);
                inner.blocks_by_hash.insert(hash, block);
            }
        }

        debug!(head_number, appended = new_chain.len(), "canonical chain extended");
        self.bus
            .publish(ChainEvent::HeadChanged {
                kind: HeadChangeKind::NewHead,
                head_number,
                new_chain,
                old_chain: Vec::new(),
            })
            .await;
    }

    /// Replace the canonical suffix from the height of the first block in
    /// `blocks` onward and announce the reorg.
    ///
    /// Displaced blocks stay resident in the by-hash index so fork-side
    /// lookups keep working while the reorg settles.
    pub async fn reorg_to(&self, blocks: Vec<Block>) {
        let Some(fork_height) = blocks.first().map(Block::number) else {
            return;
        };
        let head_number = blocks
            .last()
            .map(Block::number)
            .unwrap_or(fork_height);

        let new_chain: Vec<Hash> = blocks.iter().map(Block::hash).collect();
        let old_chain: Vec<Hash>;
        {
            let mut inner = self.inner.write();
            old_chain = inner
                .canonical
                .range(fork_height..)
                .map(|(_, hash)| *hash)
                .collect();
            inner.canonical.retain(|number, _| *number < fork_height);
            for block in blocks {
                let hash = block.hash();
                inner.canonical.insert(block.number(), hash);
                inner.blocks_by_hash.insert(hash, block);
            }
        }

        warn!(
            fork_height,
            head_number,
            displaced = old_chain.len(),
            "canonical chain reorganized"
        );
        self.bus
            .publish(ChainEvent::HeadChanged {
                kind: HeadChangeKind::Reorg,
                head_number,
                new_chain,
                old_chain,
            })
            .await;
    }

    /// Record the state-sync commit of a block and announce the records.
    ///
    /// Indexes the receipt under the block hash and the synthetic
    /// transaction under its hash for later lookups.
    pub async fn record_state_sync(&self, receipt: StateSyncReceipt, records: Vec<StateSyncData>) {
        let block_number = receipt.block_number;
        {
            let mut inner = self.inner.write();
            inner.tx_lookup.entry(receipt.tx_hash).or_default().push(TxLookupEntry {
                tx_hash: receipt.tx_hash,
                block_hash: receipt.block_hash,
                block_number,
                index: 0,
            });
            inner.state_sync_receipts.insert(receipt.block_hash, receipt);
        }

        info!(block_number, records = records.len(), "state-sync commit recorded");
        self.bus
            .publish(ChainEvent::StateSyncCommitted {
                block_number,
                records,
            })
            .await;
    }
}

#[async_trait]
impl ChainReader for ChainStore {
    async fn block_by_number(&self, number: BlockNumber) -> Option<Block> {
        let inner = self.inner.read();
        let hash = inner.canonical.get(&number)?;
        inner.blocks_by_hash.get(hash).cloned()
    }

    async fn state_sync_receipt(&self, block_hash: Hash) -> Option<StateSyncReceipt> {
        self.inner.read().state_sync_receipts.get(&block_hash).cloned()
    }

    async fn state_sync_transaction(&self, tx_hash: Hash) -> Option<TxLookupEntry> {
        let inner = self.inner.read();
        let entries = inner.tx_lookup.get(&tx_hash)?;
        // Prefer the entry whose block is canonical at its height; fall
        // back to any known entry when the whole set sits on forks.
        entries
            .iter()
            .find(|e| inner.canonical.get(&e.block_number) == Some(&e.block_hash))
            .or_else(|| entries.first())
            .cloned()
    }

    async fn state_sync_transaction_in_block(
        &self,
        tx_hash: Hash,
        block_hash: Hash,
    ) -> Option<TxLookupEntry> {
        let inner = self.inner.read();
        inner
            .tx_lookup
            .get(&tx_hash)?
            .iter()
            .find(|e| e.block_hash == block_hash)
            .cloned()
    }
}
