//! Driven-port adapters.
//!
//! Production wiring uses [`EventBusAnnouncer`]; the mocks are shipped so
//! downstream crates can exercise the service without a live chain.

mod announcer;
mod mocks;

pub use announcer::{EventBusAnnouncer, NullAnnouncer};
pub use mocks::{MockAnnouncer, MockChainReader, MockEngine, MockRootHashOracle};
