//! # Milestone Metrics
//!
//! Prometheus metrics for monitoring milestone verification.
//!
//! Enable with the `metrics` feature:
//! ```toml
//! sc-milestone = { path = "...", features = ["metrics"] }
//! ```
//!
//! ## Metrics Exported
//!
//! - `milestone_confirmed_total` - Counter of confirmed milestones
//! - `milestone_rejected_total` - Counter of rejected claims (by reason)
//! - `milestone_gate_held` - Gauge of the sprint gate state (0=free, 1=held)

#[cfg(feature = "metrics")]
use lazy_static::lazy_static;

#[cfg(feature = "metrics")]
use prometheus::{register_counter_vec, register_gauge, register_int_counter, CounterVec, Gauge, IntCounter};

#[cfg(feature = "metrics")]
lazy_static! {
    /// Total milestones confirmed
    pub static ref MILESTONES_CONFIRMED: IntCounter = register_int_counter!(
        "milestone_confirmed_total",
        "Total number of milestones confirmed"
    )
    .expect("Failed to create MILESTONES_CONFIRMED metric");

    /// Total claims rejected, labeled by reason
    pub static ref MILESTONES_REJECTED: CounterVec = register_counter_vec!(
        "milestone_rejected_total",
        "Total number of milestone claims rejected",
        &["reason"]
    )
    .expect("Failed to create MILESTONES_REJECTED metric");

    /// Sprint gate state (0 = free, 1 = held)
    pub static ref GATE_HELD: Gauge = register_gauge!(
        "milestone_gate_held",
        "Whether the sprint gate is currently held"
    )
    .expect("Failed to create GATE_HELD metric");
}

#[cfg(feature = "metrics")]
pub(crate) fn record_confirmed() {
    MILESTONES_CONFIRMED.inc();
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_confirmed() {}

#[cfg(feature = "metrics")]
pub(crate) fn record_rejected(reason: &str) {
    MILESTONES_REJECTED.with_label_values(&[reason]).inc();
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn record_rejected(_reason: &str) {}

#[cfg(feature = "metrics")]
pub(crate) fn set_gate_held(held: bool) {
    GATE_HELD.set(if held { 1.0 } else { 0.0 });
}

#[cfg(not(feature = "metrics"))]
pub(crate) fn set_gate_held(_held: bool) {}
