//! Error types for the milestone subsystem.

use shared_types::BlockNumber;
use thiserror::Error;

/// Failures of the root-hash oracle.
///
/// These wrap whatever went wrong while computing a commitment over a
/// block range; the verifier reports them without interpreting them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// A block in the requested range is missing from the chain.
    #[error("block {0} missing from requested range")]
    MissingBlock(BlockNumber),

    /// The requested range is inverted.
    #[error("inverted range: start {start} greater than end {end}")]
    InvertedRange { start: BlockNumber, end: BlockNumber },

    /// The requested range exceeds the engine's computation cap.
    #[error("range of {len} blocks exceeds cap of {cap}")]
    RangeTooLarge { len: u64, cap: u64 },

    /// Any other engine-side failure.
    #[error("{0}")]
    Other(String),
}

/// Milestone subsystem errors.
#[derive(Debug, Error)]
pub enum MilestoneError {
    /// The active consensus engine does not expose the milestone oracle.
    #[error("milestone API is only available on the sprint engine")]
    EngineUnavailable,

    /// The sprint gate is held by a previous verification attempt.
    #[error("previous sprint is still in locked state")]
    LockContention,

    /// Root computation failed; wraps the underlying cause.
    #[error("root hash computation failed: {0}")]
    Oracle(#[from] OracleError),

    /// Locally computed root differs from the claimed one.
    #[error(
        "root hash mismatch: local {}, claimed {}",
        hex::encode(.local),
        hex::encode(.claimed)
    )]
    RootMismatch {
        /// Root computed from local chain state.
        local: shared_types::Hash,
        /// Root carried by the claim.
        claimed: shared_types::Hash,
    },

    /// The claim's end block is not on the canonical chain.
    #[error("block {0} not found in canonical chain")]
    BlockNotFound(BlockNumber),

    /// The claim's range is inverted.
    #[error("invalid range: start {start} is greater than end {end}")]
    InvalidRange { start: BlockNumber, end: BlockNumber },

    /// The claim is structurally invalid (empty id, unparseable root).
    #[error("malformed claim: {0}")]
    MalformedClaim(String),
}

/// Result type for milestone operations.
pub type MilestoneResult<T> = Result<T, MilestoneError>;
