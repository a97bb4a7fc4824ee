//! Announcer adapters.

use crate::events::MilestoneConfirmedPayload;
use crate::ports::outbound::MilestoneAnnouncer;
use async_trait::async_trait;
use shared_bus::{ChainEvent, EventPublisher, InMemoryEventBus};
use std::sync::Arc;
use tracing::debug;

/// Publishes confirmed milestones onto the shared event bus.
pub struct EventBusAnnouncer {
    bus: Arc<InMemoryEventBus>,
}

impl EventBusAnnouncer {
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl MilestoneAnnouncer for EventBusAnnouncer {
    async fn announce_confirmed(&self, payload: MilestoneConfirmedPayload) {
        let delivered = self
            .bus
            .publish(ChainEvent::MilestoneConfirmed {
                milestone_id: payload.milestone_id.clone(),
                block_number: payload.block_number,
                block_hash: payload.block_hash,
            })
            .await;
        debug!(
            correlation_id = %payload.correlation_id,
            milestone_id = %payload.milestone_id,
            subscribers = delivered,
            "milestone confirmation published"
        );
    }
}

/// Discards announcements. For wiring where no consumer exists.
#[derive(Default)]
pub struct NullAnnouncer;

#[async_trait]
impl MilestoneAnnouncer for NullAnnouncer {
    async fn announce_confirmed(&self, _payload: MilestoneConfirmedPayload) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_bus::{EventFilter, EventTopic};

    #[tokio::test]
    async fn test_event_bus_announcer_publishes_confirmation() {
        let bus = Arc::new(InMemoryEventBus::new());
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Milestone]));
        let announcer = EventBusAnnouncer::new(Arc::clone(&bus));

        announcer
            .announce_confirmed(MilestoneConfirmedPayload::new("m1", 200, [9u8; 32]))
            .await;

        match sub.recv().await.unwrap() {
            ChainEvent::MilestoneConfirmed {
                milestone_id,
                block_number,
                block_hash,
            } => {
                assert_eq!(milestone_id, "m1");
                assert_eq!(block_number, 200);
                assert_eq!(block_hash, [9u8; 32]);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }
}
