//! # Milestone Verification
//!
//! Node-side verification of externally proposed finality milestones.
//!
//! A milestone claim asserts that an inclusive block range is final under
//! a given root hash. Verification runs a lock-verify-commit protocol:
//!
//! 1. Acquire the single-slot sprint gate (non-blocking; a held gate
//!    rejects the claim outright).
//! 2. Recompute the root over the claimed range via the consensus
//!    engine's oracle.
//! 3. On a byte-exact match, resolve the canonical end-block hash and
//!    release the gate confirmed, recording the finality floor the sync
//!    engine must not pivot below.
//!
//! Every exit path releases the gate exactly once. Engines without
//! milestone support are rejected before the gate is touched.
//!
//! ## Architecture
//!
//! Hexagonal: [`ports::inbound::MilestoneApi`] is the driving port,
//! implemented by [`MilestoneService`]; the driven ports in
//! [`ports::outbound`] abstract the engine, the chain and downstream
//! announcement. Mock adapters ship in [`adapters`] for testing.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod events;
pub mod metrics;
pub mod ports;
pub mod service;

pub use domain::{BlockRange, FinalityFloor, MilestoneClaim, MilestoneOutcome, SprintLock};
pub use error::{MilestoneError, MilestoneResult, OracleError};
pub use events::{CorrelationId, MilestoneConfirmedPayload};
pub use ports::inbound::MilestoneApi;
pub use ports::outbound::{ChainReader, ConsensusEngine, MilestoneAnnouncer, RootHashOracle};
pub use service::MilestoneService;
