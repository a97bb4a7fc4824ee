//! # Chain Events
//!
//! All event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{BlockNumber, Hash, StateSyncData};

/// How the canonical head moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HeadChangeKind {
    /// The head advanced by appending to the current chain.
    NewHead,
    /// A competing chain replaced part of the canonical chain.
    Reorg,
    /// A competing chain appeared but did not win.
    Fork,
}

/// All events that can be published to the event bus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum ChainEvent {
    /// A batch of state-sync records was committed in a block.
    StateSyncCommitted {
        /// Height of the committing block.
        block_number: BlockNumber,
        /// The committed records.
        records: Vec<StateSyncData>,
    },

    /// The canonical head changed.
    HeadChanged {
        /// How the head moved.
        kind: HeadChangeKind,
        /// New head height.
        head_number: BlockNumber,
        /// Hashes now on the canonical chain, oldest first.
        new_chain: Vec<Hash>,
        /// Hashes removed from the canonical chain, oldest first.
        /// Empty unless `kind` is `Reorg`.
        old_chain: Vec<Hash>,
    },

    /// A milestone claim was verified and committed as the finality floor.
    MilestoneConfirmed {
        /// Identifier assigned by the proposing validator layer.
        milestone_id: String,
        /// Height of the milestone's end block.
        block_number: BlockNumber,
        /// Canonical hash of the milestone's end block.
        block_hash: Hash,
    },
}

impl ChainEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::StateSyncCommitted { .. } => EventTopic::StateSync,
            Self::HeadChanged { .. } => EventTopic::ChainHead,
            Self::MilestoneConfirmed { .. } => EventTopic::Milestone,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// State-sync commits.
    StateSync,
    /// Head / reorg / fork notifications.
    ChainHead,
    /// Milestone confirmations.
    Milestone,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self { topics }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ChainEvent) -> bool {
        self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic())
    }
}
