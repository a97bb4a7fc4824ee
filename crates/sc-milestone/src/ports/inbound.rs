//! Driving port: the milestone API offered to callers.

use crate::domain::{FinalityFloor, MilestoneClaim, MilestoneOutcome};
use crate::error::MilestoneResult;
use async_trait::async_trait;
use shared_types::{BlockNumber, Hash};

/// Primary milestone API.
///
/// Callers are expected to be concurrent request handlers; the
/// implementation serializes verification attempts through the sprint
/// gate and never retries internally. `LockContention` and `RootMismatch`
/// are protocol signals for the caller to act on.
#[async_trait]
pub trait MilestoneApi: Send + Sync {
    /// Run the lock-verify-commit protocol for `claim`.
    ///
    /// On every exit path the gate is released exactly once before the
    /// call returns; rejection reasons are reported as distinct errors.
    async fn verify_milestone(&self, claim: &MilestoneClaim) -> MilestoneResult<MilestoneOutcome>;

    /// Preview the local root over `[start, end]` without touching the
    /// gate or committing anything.
    async fn root_hash(&self, start: BlockNumber, end: BlockNumber) -> MilestoneResult<Hash>;

    /// The floor recorded by the last confirmed milestone, if any.
    fn finality_floor(&self) -> Option<FinalityFloor>;
}
