//! Ports layer: inbound API traits and outbound dependency traits.

pub mod inbound;
pub mod outbound;

pub use inbound::MilestoneApi;
pub use outbound::{ChainReader, ConsensusEngine, MilestoneAnnouncer, RootHashOracle};
