//! # Shared Bus - Event Bus for Inter-Subsystem Notification
//!
//! Carries state-sync commits, chain-head changes (new head, reorg, fork)
//! and milestone confirmations between subsystems.
//!
//! ## Delivery contract
//!
//! - At-least-once delivery, ordered within a single subscription stream.
//! - No ordering guarantee across two different streams.
//! - Slow consumers lag per `tokio::sync::broadcast` policy: the oldest
//!   buffered events are dropped and the drop is surfaced to the consumer.

// Nursery lints that are too strict
#![allow(clippy::missing_const_for_fn)]
// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{ChainEvent, EventFilter, EventTopic, HeadChangeKind};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before backpressure.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
