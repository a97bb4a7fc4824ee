//! Driven ports: dependencies of the milestone subsystem.

use crate::error::OracleError;
use crate::events::MilestoneConfirmedPayload;
use async_trait::async_trait;
use shared_types::{Block, BlockNumber, Hash, StateSyncReceipt, TxLookupEntry};

/// Deterministic commitment over the blocks of an inclusive range.
///
/// Pure function of chain state at call time: two calls over the same
/// range on the same chain return the same root. Owned by the consensus
/// engine; the verifier only consumes it.
#[async_trait]
pub trait RootHashOracle: Send + Sync {
    /// Compute the root hash over `[start, end]`.
    async fn compute_root(&self, start: BlockNumber, end: BlockNumber)
        -> Result<Hash, OracleError>;
}

/// Capability surface of the active consensus engine.
///
/// Engines that support milestones expose the oracle; absence is a plain
/// `None`, checked before any gate interaction. This replaces runtime
/// service scans and downcasts with a compile-time seam.
pub trait ConsensusEngine: Send + Sync {
    /// The milestone oracle, when this engine supports milestones.
    fn milestone_oracle(&self) -> Option<&dyn RootHashOracle>;
}

/// Read-only access to canonical chain state.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// The canonical block at `number`, if one exists.
    async fn block_by_number(&self, number: BlockNumber) -> Option<Block>;

    /// The state-sync receipt of the block with `block_hash`.
    ///
    /// Absence means the block committed no state-sync records; it is a
    /// sentinel, never an error.
    async fn state_sync_receipt(&self, block_hash: Hash) -> Option<StateSyncReceipt>;

    /// Locate a state-sync transaction by hash, preferring the canonical
    /// chain when forks carry entries for the same hash.
    async fn state_sync_transaction(&self, tx_hash: Hash) -> Option<TxLookupEntry>;

    /// Locate a state-sync transaction within a specific block.
    ///
    /// Disambiguates identically hashed transactions across candidate
    /// blocks while a reorg is in flight.
    async fn state_sync_transaction_in_block(
        &self,
        tx_hash: Hash,
        block_hash: Hash,
    ) -> Option<TxLookupEntry>;
}

/// Downstream notification of confirmed milestones.
#[async_trait]
pub trait MilestoneAnnouncer: Send + Sync {
    /// Announce a confirmed milestone. Diagnostic only; failures to
    /// deliver must not affect the verification outcome.
    async fn announce_confirmed(&self, payload: MilestoneConfirmedPayload);
}
