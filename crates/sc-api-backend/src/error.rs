//! API-surface errors.

use sc_milestone::MilestoneError;
use thiserror::Error;

/// Errors returned to API callers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A requested record does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A milestone operation failed; the inner error carries the reason.
    #[error(transparent)]
    Milestone(#[from] MilestoneError),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;
