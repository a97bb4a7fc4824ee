//! Milestone claims and their outcomes.

use crate::error::{MilestoneError, MilestoneResult};
use serde::{Deserialize, Serialize};
use shared_types::{BlockNumber, Hash};

/// An inclusive block interval `[start, end]`. Input descriptor only,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRange {
    /// First block of the interval.
    pub start: BlockNumber,
    /// Last block of the interval.
    pub end: BlockNumber,
}

impl BlockRange {
    /// Build a range, rejecting inverted intervals.
    pub fn new(start: BlockNumber, end: BlockNumber) -> MilestoneResult<Self> {
        if start > end {
            return Err(MilestoneError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Number of blocks in the interval.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Inclusive ranges are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// An externally proposed claim that a block range is final.
///
/// Immutable once submitted; one claim produces exactly one outcome and is
/// discarded afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneClaim {
    /// First block of the claimed range.
    pub start_block: BlockNumber,
    /// Last block of the claimed range.
    pub end_block: BlockNumber,
    /// Root hash asserted by the proposer.
    pub claimed_root: Hash,
    /// Identifier assigned by the proposing validator layer.
    pub milestone_id: String,
}

impl MilestoneClaim {
    /// Build a claim.
    #[must_use]
    pub fn new(
        start_block: BlockNumber,
        end_block: BlockNumber,
        claimed_root: Hash,
        milestone_id: impl Into<String>,
    ) -> Self {
        Self {
            start_block,
            end_block,
            claimed_root,
            milestone_id: milestone_id.into(),
        }
    }

    /// Structural validation, performed before the gate is touched.
    pub fn validate(&self) -> MilestoneResult<()> {
        if self.start_block > self.end_block {
            return Err(MilestoneError::InvalidRange {
                start: self.start_block,
                end: self.end_block,
            });
        }
        if self.milestone_id.is_empty() {
            return Err(MilestoneError::MalformedClaim(
                "milestone id is empty".into(),
            ));
        }
        Ok(())
    }

    /// The claimed interval.
    #[must_use]
    pub fn range(&self) -> BlockRange {
        BlockRange {
            start: self.start_block,
            end: self.end_block,
        }
    }
}

/// The decision produced for a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneOutcome {
    /// Whether the claim was accepted.
    pub accepted: bool,
    /// Identifier of the claim this outcome answers.
    pub milestone_id: String,
    /// Canonical hash of the end block. Set iff `accepted`.
    pub finalized_block_hash: Option<Hash>,
}

impl MilestoneOutcome {
    /// An accepted outcome carrying the finalized end-block hash.
    #[must_use]
    pub fn accepted(milestone_id: impl Into<String>, finalized_block_hash: Hash) -> Self {
        Self {
            accepted: true,
            milestone_id: milestone_id.into(),
            finalized_block_hash: Some(finalized_block_hash),
        }
    }
}
