//! Milestone service - the lock-verify-commit orchestration.

use crate::domain::{FinalityFloor, MilestoneClaim, MilestoneOutcome, SprintLock};
use crate::error::{MilestoneError, MilestoneResult};
use crate::events::MilestoneConfirmedPayload;
use crate::metrics;
use crate::ports::inbound::MilestoneApi;
use crate::ports::outbound::{ChainReader, ConsensusEngine, MilestoneAnnouncer, RootHashOracle};
use async_trait::async_trait;
use shared_types::{BlockNumber, Hash};
use std::sync::Arc;
use tracing::{debug, warn};

const ZERO_HASH: Hash = [0u8; 32];

/// Orchestrates the sprint gate, root-hash oracle and chain reader into
/// the lock-verify-commit protocol.
///
/// Every exit path of [`MilestoneApi::verify_milestone`] releases the gate
/// exactly once before returning; no path returns holding a gate it
/// acquired. Contention is surfaced immediately and never retried here.
pub struct MilestoneService<E, C, A>
where
    E: ConsensusEngine,
    C: ChainReader,
    A: MilestoneAnnouncer,
{
    lock: Arc<SprintLock>,
    engine: Arc<E>,
    chain: Arc<C>,
    announcer: Arc<A>,
}

impl<E, C, A> MilestoneService<E, C, A>
where
    E: ConsensusEngine,
    C: ChainReader,
    A: MilestoneAnnouncer,
{
    /// Create a new milestone service.
    ///
    /// The `lock` is shared by reference with the sync engine; construct
    /// exactly one per process.
    pub fn new(lock: Arc<SprintLock>, engine: Arc<E>, chain: Arc<C>, announcer: Arc<A>) -> Self {
        Self {
            lock,
            engine,
            chain,
            announcer,
        }
    }

    /// The shared sprint gate.
    #[must_use]
    pub fn sprint_lock(&self) -> &Arc<SprintLock> {
        &self.lock
    }

    /// Resolve the engine's oracle capability, before any gate interaction.
    fn oracle(&self) -> MilestoneResult<&dyn RootHashOracle> {
        self.engine
            .milestone_oracle()
            .ok_or(MilestoneError::EngineUnavailable)
    }

    /// Release the gate unconfirmed and account for the rejection.
    fn abort(&self, reason: &'static str) {
        self.lock.release(false, "", ZERO_HASH);
        metrics::set_gate_held(false);
        metrics::record_rejected(reason);
    }
}

#[async_trait]
impl<E, C, A> MilestoneApi for MilestoneService<E, C, A>
where
    E: ConsensusEngine + 'static,
    C: ChainReader + 'static,
    A: MilestoneAnnouncer + 'static,
{
    async fn verify_milestone(&self, claim: &MilestoneClaim) -> MilestoneResult<MilestoneOutcome> {
        // Structural and capability checks happen before the gate is
        // touched; neither failure may consume the single slot.
        claim.validate()?;
        let range = claim.range();
        let oracle = self.oracle()?;

        if !self.lock.acquire(claim.end_block) {
            warn!(
                milestone_id = %claim.milestone_id,
                end_block = claim.end_block,
                "milestone rejected: sprint gate held by previous attempt"
            );
            metrics::record_rejected("contention");
            return Err(MilestoneError::LockContention);
        }
        metrics::set_gate_held(true);

        let local = match oracle.compute_root(range.start, range.end).await {
            Ok(root) => root,
            Err(e) => {
                self.abort("oracle");
                return Err(e.into());
            }
        };

        if local != claim.claimed_root {
            warn!(
                milestone_id = %claim.milestone_id,
                local = %hex::encode(local),
                claimed = %hex::encode(claim.claimed_root),
                "milestone rejected: root hash mismatch"
            );
            self.abort("mismatch");
            return Err(MilestoneError::RootMismatch {
                local,
                claimed: claim.claimed_root,
            });
        }

        // The end block may have been raced out by a reorg between the
        // acquire and this read; treat that as a rejection, not a fault.
        let Some(end_block) = self.chain.block_by_number(claim.end_block).await else {
            self.abort("not_found");
            return Err(MilestoneError::BlockNotFound(claim.end_block));
        };

        let end_hash = end_block.hash();
        self.lock.release(true, &claim.milestone_id, end_hash);
        metrics::set_gate_held(false);
        metrics::record_confirmed();

        self.announcer
            .announce_confirmed(MilestoneConfirmedPayload::new(
                &claim.milestone_id,
                claim.end_block,
                end_hash,
            ))
            .await;

        debug!(
            milestone_id = %claim.milestone_id,
            end_block = claim.end_block,
            "milestone confirmed"
        );
        Ok(MilestoneOutcome::accepted(&claim.milestone_id, end_hash))
    }

    async fn root_hash(&self, start: BlockNumber, end: BlockNumber) -> MilestoneResult<Hash> {
        if start > end {
            return Err(MilestoneError::InvalidRange { start, end });
        }
        let oracle = self.oracle()?;
        Ok(oracle.compute_root(start, end).await?)
    }

    fn finality_floor(&self) -> Option<FinalityFloor> {
        self.lock.finality_floor()
    }
}
