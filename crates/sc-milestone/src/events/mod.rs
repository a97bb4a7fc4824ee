//! Outgoing event payloads.

mod outgoing;

pub use outgoing::{CorrelationId, MilestoneConfirmedPayload};
