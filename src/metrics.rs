//! Pluggable decision metrics.
//!
//! A [`MetricsSink`] is handed to a `ContentGate` with
//! `ContentGate::with_metrics_sink`. Each gate carries its own sink; there is
//! no process-wide registration. Without one, stats are dropped.
//!
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicU64, Ordering};
//! use content_gate_core::metrics::{DecisionStats, MetricsSink};
//!
//! #[derive(Default)]
//! struct DenyCounter(AtomicU64);
//!
//! impl MetricsSink for DenyCounter {
//!     fn on_decision(&self, stats: &DecisionStats) {
//!         if !stats.allowed {
//!             self.0.fetch_add(1, Ordering::Relaxed);
//!         }
//!     }
//! }
//!
//! let sink: Arc<dyn MetricsSink> = Arc::new(DenyCounter::default());
//! ```

use std::time::Duration;

use serde::Serialize;

/// Time spent in each phase of one check.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct DecisionPhases {
    /// Fetching the restriction set from the store
    pub resolve_restriction: Duration,
    /// Fetching the viewer's membership from the provider
    pub resolve_membership: Duration,
    /// Running the decision itself
    pub decide: Duration,
}

/// Snapshot of one access check, passed to [`MetricsSink::on_decision`].
///
/// # Fields
///
/// - `content_id`: the checked item
/// - `allowed` / `restricted` / `membership_degraded`: outcome flags
/// - `duration`: wall time of the whole check
/// - `phases`: the part of `duration` spent in each phase
#[derive(Debug, Clone, Serialize)]
pub struct DecisionStats {
    /// Content id as a string
    pub content_id: String,
    /// Whether the verdict was Allow
    pub allowed: bool,
    /// Whether the item had any restriction at all
    pub restricted: bool,
    /// Whether membership lookup failed and the viewer was treated as anonymous
    pub membership_degraded: bool,
    /// Total time spent in `check`
    pub duration: Duration,
    pub phases: DecisionPhases,
}

/// Consumer of decision metrics.
///
/// Called synchronously on the render path, so implementations should be
/// cheap and must not block.
pub trait MetricsSink: Send + Sync {
    fn on_decision(&self, stats: &DecisionStats);
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl MetricsSink for NoOpSink {
    fn on_decision(&self, _stats: &DecisionStats) {}
}
