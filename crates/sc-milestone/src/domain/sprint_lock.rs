//! The sprint gate: single-slot exclusion over sync progress.

use parking_lot::Mutex;
use shared_types::{BlockNumber, Hash};
use tracing::{debug, warn};

/// The most recently confirmed milestone, below which reorgs are refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalityFloor {
    /// Identifier of the confirming milestone.
    pub milestone_id: String,
    /// End block the gate was locked on when the milestone confirmed.
    pub block_number: BlockNumber,
    /// Canonical hash of that block at confirmation time.
    pub block_hash: Hash,
}

#[derive(Debug, Default)]
struct LockState {
    /// End block of the in-flight verification. `Some` iff the gate is held.
    locked_end_block: Option<BlockNumber>,
    /// Floor recorded by the last confirmed release.
    floor: Option<FinalityFloor>,
}

/// Single-slot exclusion gate over the sync engine's ability to pivot
/// while a milestone verification is in flight.
///
/// Fail-fast by design: concurrent milestone proposals are a protocol
/// violation, so a held gate rejects the second caller instead of queueing
/// it. There is no lease or forced unlock; a holder that never releases
/// blocks the gate indefinitely, and callers applying their own timeout
/// must not assume the gate was released on cancellation.
///
/// One instance is constructed at node startup and shared by reference
/// between the verifier and the sync engine.
pub struct SprintLock {
    state: Mutex<LockState>,
}

impl SprintLock {
    /// Create a free gate with no recorded floor.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LockState::default()),
        }
    }

    /// Try to take the gate for a verification ending at `end_block`.
    ///
    /// Non-blocking. Returns `false` without any state change when the
    /// gate is already held; of any set of concurrent callers exactly one
    /// observes `true`.
    pub fn acquire(&self, end_block: BlockNumber) -> bool {
        let mut state = self.state.lock();
        if let Some(held_end) = state.locked_end_block {
            debug!(held_end, requested_end = end_block, "sprint gate busy");
            return false;
        }
        state.locked_end_block = Some(end_block);
        debug!(end_block, "sprint gate acquired");
        true
    }

    /// Release the gate, recording `(milestone_id, block_hash)` as the new
    /// finality floor iff `confirmed` is true.
    ///
    /// Idempotent: releasing a free gate changes nothing. Callers on error
    /// paths release unconditionally and rely on this.
    pub fn release(&self, confirmed: bool, milestone_id: &str, block_hash: Hash) {
        let mut state = self.state.lock();
        let Some(end_block) = state.locked_end_block.take() else {
            debug!(confirmed, "release on free sprint gate ignored");
            return;
        };

        if confirmed {
            warn!(
                milestone_id,
                end_block,
                block_hash = %hex::encode(block_hash),
                "sprint gate released, milestone confirmed"
            );
            state.floor = Some(FinalityFloor {
                milestone_id: milestone_id.to_string(),
                block_number: end_block,
                block_hash,
            });
        } else {
            debug!(end_block, "sprint gate released, milestone rejected");
        }
    }

    /// Whether the gate is currently held.
    #[must_use]
    pub fn is_held(&self) -> bool {
        self.state.lock().locked_end_block.is_some()
    }

    /// End block of the in-flight verification, if any.
    #[must_use]
    pub fn locked_end_block(&self) -> Option<BlockNumber> {
        self.state.lock().locked_end_block
    }

    /// The floor recorded by the last confirmed release.
    #[must_use]
    pub fn finality_floor(&self) -> Option<FinalityFloor> {
        self.state.lock().floor.clone()
    }

    /// Whether the sync engine may pivot its head to `block_number`.
    ///
    /// Pivots at or below the finality floor are refused; a later confirmed
    /// milestone supersedes the floor.
    #[must_use]
    pub fn can_pivot_to(&self, block_number: BlockNumber) -> bool {
        self.state
            .lock()
            .floor
            .as_ref()
            .is_none_or(|floor| block_number > floor.block_number)
    }
}

impl Default for SprintLock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_acquire_free_gate() {
        let lock = SprintLock::new();
        assert!(lock.acquire(200));
        assert!(lock.is_held());
        assert_eq!(lock.locked_end_block(), Some(200));
    }

    #[test]
    fn test_acquire_held_gate_fails_without_state_change() {
        let lock = SprintLock::new();
        assert!(lock.acquire(200));
        assert!(!lock.acquire(250));
        // The losing acquire left the original holder intact
        assert_eq!(lock.locked_end_block(), Some(200));
    }

    #[test]
    fn test_confirmed_release_records_floor() {
        let lock = SprintLock::new();
        lock.acquire(200);
        lock.release(true, "m1", [9u8; 32]);

        assert!(!lock.is_held());
        let floor = lock.finality_floor().unwrap();
        assert_eq!(floor.milestone_id, "m1");
        assert_eq!(floor.block_number, 200);
        assert_eq!(floor.block_hash, [9u8; 32]);
    }

    #[test]
    fn test_unconfirmed_release_keeps_floor() {
        let lock = SprintLock::new();
        lock.acquire(200);
        lock.release(true, "m1", [9u8; 32]);

        lock.acquire(250);
        lock.release(false, "", [0u8; 32]);

        assert!(!lock.is_held());
        assert_eq!(lock.finality_floor().unwrap().milestone_id, "m1");
    }

    #[test]
    fn test_release_on_free_gate_is_noop() {
        let lock = SprintLock::new();
        lock.release(false, "", [0u8; 32]);
        assert!(!lock.is_held());
        assert!(lock.finality_floor().is_none());

        // A confirmed release without a held gate must not invent a floor
        lock.release(true, "ghost", [1u8; 32]);
        assert!(lock.finality_floor().is_none());
    }

    #[test]
    fn test_later_confirmed_floor_supersedes() {
        let lock = SprintLock::new();
        lock.acquire(200);
        lock.release(true, "m1", [1u8; 32]);
        lock.acquire(300);
        lock.release(true, "m2", [2u8; 32]);

        let floor = lock.finality_floor().unwrap();
        assert_eq!(floor.milestone_id, "m2");
        assert_eq!(floor.block_number, 300);
    }

    #[test]
    fn test_can_pivot_respects_floor() {
        let lock = SprintLock::new();
        assert!(lock.can_pivot_to(1));

        lock.acquire(200);
        lock.release(true, "m1", [1u8; 32]);

        assert!(!lock.can_pivot_to(199));
        assert!(!lock.can_pivot_to(200));
        assert!(lock.can_pivot_to(201));
    }

    #[test]
    fn test_exactly_one_concurrent_acquire_wins() {
        let lock = Arc::new(SprintLock::new());
        let mut handles = Vec::new();

        for n in 0..16u64 {
            let lock = Arc::clone(&lock);
            handles.push(std::thread::spawn(move || lock.acquire(100 + n)));
        }

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(wins, 1);
        assert!(lock.is_held());
    }
}
