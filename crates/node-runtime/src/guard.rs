//! Sync pivot guard: keeps reorgs above the finality floor.

use sc_milestone::SprintLock;
use shared_bus::{ChainEvent, HeadChangeKind, Subscription};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Watches head changes and refuses pivots at or below the finality
/// floor recorded by the sprint gate.
///
/// Sync drivers call [`SyncPivotGuard::permit_reorg`] before rewinding;
/// the monitor loop additionally flags any reorg event that slipped past
/// a driver without consulting the guard.
pub struct SyncPivotGuard {
    lock: Arc<SprintLock>,
    refused: AtomicU64,
}

impl SyncPivotGuard {
    #[must_use]
    pub fn new(lock: Arc<SprintLock>) -> Self {
        Self {
            lock,
            refused: AtomicU64::new(0),
        }
    }

    /// Whether a reorg rewinding to `fork_height` may proceed.
    ///
    /// Refusals are counted; the finalized chain below the floor never
    /// rewinds.
    pub fn permit_reorg(&self, fork_height: u64) -> bool {
        if self.lock.can_pivot_to(fork_height) {
            return true;
        }
        self.refused.fetch_add(1, Ordering::Relaxed);
        warn!(fork_height, "reorg below finality floor refused");
        false
    }

    /// How many pivots were refused so far.
    #[must_use]
    pub fn refused(&self) -> u64 {
        self.refused.load(Ordering::Relaxed)
    }

    /// Run the monitor loop until the bus closes.
    pub async fn run(self: Arc<Self>, mut events: Subscription) {
        while let Some(event) = events.recv().await {
            let ChainEvent::HeadChanged {
                kind: HeadChangeKind::Reorg,
                head_number,
                new_chain,
                ..
            } = event
            else {
                continue;
            };

            // Saturate so a malformed payload cannot panic the monitor
            let fork_height = (head_number + 1).saturating_sub(new_chain.len() as u64);
            if self.lock.can_pivot_to(fork_height) {
                debug!(fork_height, head_number, "reorg above finality floor");
            } else {
                self.refused.fetch_add(1, Ordering::Relaxed);
                warn!(
                    fork_height,
                    head_number, "observed reorg below finality floor"
                );
            }
        }
    }
}
