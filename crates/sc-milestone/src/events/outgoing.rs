//! Payloads emitted by the milestone subsystem.

use serde::{Deserialize, Serialize};
use shared_types::{BlockNumber, Hash};
use uuid::Uuid;

/// Correlation ID for tracing a confirmation through downstream consumers.
pub type CorrelationId = Uuid;

/// Payload announced after a confirmed release of the sprint gate.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MilestoneConfirmedPayload {
    /// Correlation id for downstream tracing.
    pub correlation_id: CorrelationId,
    /// Identifier of the confirmed milestone.
    pub milestone_id: String,
    /// Height of the milestone's end block.
    pub block_number: BlockNumber,
    /// Canonical hash of the end block at confirmation time.
    pub block_hash: Hash,
}

impl MilestoneConfirmedPayload {
    /// Build a payload with a fresh correlation id.
    #[must_use]
    pub fn new(milestone_id: impl Into<String>, block_number: BlockNumber, block_hash: Hash) -> Self {
        Self {
            correlation_id: Uuid::new_v4(),
            milestone_id: milestone_id.into(),
            block_number,
            block_hash,
        }
    }
}
