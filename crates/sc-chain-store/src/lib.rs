//! # Chain Store
//!
//! In-memory canonical chain state, the sprint root oracle and the
//! consensus engine capability surfaces.
//!
//! [`ChainStore`] implements the milestone subsystem's `ChainReader` port
//! and publishes head changes and state-sync commits onto the shared bus.
//! [`SprintEngine`] wires a [`SprintRootOracle`] over the store and
//! exposes it through the engine capability seam; [`PlainEngine`] is the
//! milestone-less counterpart.

pub mod engine;
pub mod oracle;
pub mod store;

pub use engine::{PlainEngine, SprintEngine, SprintEngineConfig};
pub use oracle::SprintRootOracle;
pub use store::ChainStore;
