//! # API Backend
//!
//! The backend behind the node's external API: milestone voting, root
//! previews, state-sync record lookups and bus subscriptions.

pub mod backend;
pub mod error;

pub use backend::ChainApiBackend;
pub use error::{ApiError, ApiResult};
