//! Timing for the phases of one access check.

use std::time::{Duration, Instant};

use crate::metrics::DecisionPhases;

/// The measured steps of `ContentGate::check`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    ResolveRestriction,
    ResolveMembership,
    Decide,
}

impl DecisionPhases {
    fn slot_mut(&mut self, phase: Phase) -> &mut Duration {
        match phase {
            Phase::ResolveRestriction => &mut self.resolve_restriction,
            Phase::ResolveMembership => &mut self.resolve_membership,
            Phase::Decide => &mut self.decide,
        }
    }
}

/// Adds the elapsed time to a `Duration` slot when dropped, so early returns
/// through `?` are still counted.
struct PhaseTimer<'a> {
    start: Instant,
    slot: &'a mut Duration,
}

impl<'a> PhaseTimer<'a> {
    fn new(slot: &'a mut Duration) -> Self {
        Self {
            start: Instant::now(),
            slot,
        }
    }
}

impl Drop for PhaseTimer<'_> {
    fn drop(&mut self) {
        *self.slot += self.start.elapsed();
    }
}

/// Wall clock for one check plus its per-phase breakdown.
///
/// ```rust,ignore
/// let mut clock = CheckClock::start();
/// let restriction = clock.time(Phase::ResolveRestriction, || store.get(&content))?;
/// let (duration, phases) = clock.finish();
/// ```
pub(crate) struct CheckClock {
    start: Instant,
    phases: DecisionPhases,
}

impl CheckClock {
    pub(crate) fn start() -> Self {
        CheckClock {
            start: Instant::now(),
            phases: DecisionPhases::default(),
        }
    }

    /// Run `f`, charging its time to `phase`. Repeated phases accumulate.
    pub(crate) fn time<R>(&mut self, phase: Phase, f: impl FnOnce() -> R) -> R {
        let _timer = PhaseTimer::new(self.phases.slot_mut(phase));
        f()
    }

    /// Total time since `start`, and the phase breakdown.
    pub(crate) fn finish(self) -> (Duration, DecisionPhases) {
        (self.start.elapsed(), self.phases)
    }
}
