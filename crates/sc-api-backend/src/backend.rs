//! The node API backend.

use crate::error::{ApiError, ApiResult};
use sc_milestone::{
    ChainReader, FinalityFloor, MilestoneApi, MilestoneClaim, MilestoneError,
};
use shared_bus::{EventFilter, EventStream, EventTopic, InMemoryEventBus, Subscription};
use shared_types::{
    hash_from_hex, hash_to_hex, BlockNumber, Hash, LogEntry, StateSyncReceipt, TxLookupEntry,
};
use std::sync::Arc;

/// Backend behind the node's external API surface.
///
/// Thin by construction: every method delegates to the milestone service,
/// the chain reader or the event bus, translating between wire shapes
/// (hex strings, boolean votes) and domain types.
pub struct ChainApiBackend<M, C>
where
    M: MilestoneApi,
    C: ChainReader,
{
    milestone: Arc<M>,
    chain: Arc<C>,
    bus: Arc<InMemoryEventBus>,
}

impl<M, C> ChainApiBackend<M, C>
where
    M: MilestoneApi,
    C: ChainReader,
{
    pub fn new(milestone: Arc<M>, chain: Arc<C>, bus: Arc<InMemoryEventBus>) -> Self {
        Self {
            milestone,
            chain,
            bus,
        }
    }

    /// Compute the root over `[start, end]` and render it as hex.
    pub async fn root_hash(&self, start: BlockNumber, end: BlockNumber) -> ApiResult<String> {
        let root = self.milestone.root_hash(start, end).await?;
        Ok(hash_to_hex(&root))
    }

    /// Vote on an externally proposed root over `[start, end]`.
    ///
    /// Every rejection surfaces as an error carrying its diagnostics: a
    /// mismatch reports both roots, contention and missing engine support
    /// keep their distinct variants. `Ok(true)` means the milestone was
    /// verified and committed.
    pub async fn vote_on_root_hash(
        &self,
        start: BlockNumber,
        end: BlockNumber,
        claimed_root: &str,
        milestone_id: &str,
    ) -> ApiResult<bool> {
        let claimed = parse_root(claimed_root)?;
        let claim = MilestoneClaim::new(start, end, claimed, milestone_id);

        let outcome = self.milestone.verify_milestone(&claim).await?;
        Ok(outcome.accepted)
    }

    /// The floor recorded by the last confirmed milestone.
    #[must_use]
    pub fn finality_floor(&self) -> Option<FinalityFloor> {
        self.milestone.finality_floor()
    }

    /// The state-sync receipt of the block with `block_hash`.
    ///
    /// Errors when the block committed no state-sync records; callers
    /// wanting the lenient form use [`Self::state_sync_logs`].
    pub async fn state_sync_receipt(&self, block_hash: Hash) -> ApiResult<StateSyncReceipt> {
        self.chain
            .state_sync_receipt(block_hash)
            .await
            .ok_or(ApiError::NotFound("state-sync receipt"))
    }

    /// Logs of the block's state-sync commit.
    ///
    /// Empty when the block committed no state-sync records; absence is
    /// not an error here.
    pub async fn state_sync_logs(&self, block_hash: Hash) -> Vec<LogEntry> {
        match self.chain.state_sync_receipt(block_hash).await {
            Some(receipt) => receipt.logs,
            None => Vec::new(),
        }
    }

    /// Locate a state-sync transaction, preferring the canonical chain.
    pub async fn state_sync_transaction(&self, tx_hash: Hash) -> Option<TxLookupEntry> {
        self.chain.state_sync_transaction(tx_hash).await
    }

    /// Locate a state-sync transaction within a specific block.
    pub async fn state_sync_transaction_in_block(
        &self,
        tx_hash: Hash,
        block_hash: Hash,
    ) -> Option<TxLookupEntry> {
        self.chain
            .state_sync_transaction_in_block(tx_hash, block_hash)
            .await
    }

    /// Subscribe to state-sync commit events.
    #[must_use]
    pub fn subscribe_state_sync(&self) -> Subscription {
        self.bus
            .subscribe(EventFilter::topics(vec![EventTopic::StateSync]))
    }

    /// Subscribe to head change and reorg events.
    #[must_use]
    pub fn subscribe_chain_head(&self) -> Subscription {
        self.bus
            .subscribe(EventFilter::topics(vec![EventTopic::ChainHead]))
    }

    /// Subscribe to milestone confirmations.
    #[must_use]
    pub fn subscribe_milestones(&self) -> Subscription {
        self.bus
            .subscribe(EventFilter::topics(vec![EventTopic::Milestone]))
    }

    /// Stream of head change events, for combinator-style consumers.
    #[must_use]
    pub fn chain_head_stream(&self) -> EventStream {
        self.bus
            .event_stream(EventFilter::topics(vec![EventTopic::ChainHead]))
    }
}

fn parse_root(s: &str) -> ApiResult<Hash> {
    hash_from_hex(s).map_err(|e| {
        ApiError::Milestone(MilestoneError::MalformedClaim(format!(
            "root hash is not valid hex: {e}"
        )))
    })
}
