//! Domain layer: the sprint gate and milestone value types.

mod claim;
mod sprint_lock;

pub use claim::{BlockRange, MilestoneClaim, MilestoneOutcome};
pub use sprint_lock::{FinalityFloor, SprintLock};
