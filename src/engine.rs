use std::borrow::Cow;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::GateConfig;
use crate::error::GateError;
use crate::metrics::{DecisionStats, MetricsSink, NoOpSink};
use crate::store::resolve_restriction;
use crate::timers::{CheckClock, Phase};
use crate::traits::{MembershipProvider, RestrictionStore};
use crate::types::{ContentId, MembershipSet, RenderContext, RestrictionSet, Verdict, ViewerId};

/// Decide whether a viewer with `membership` may see content restricted by `restriction`.
///
/// 1. An empty restriction set is public.
/// 2. The wildcard admits any viewer who belongs to at least one group.
/// 3. Otherwise the viewer must belong to one of the listed groups.
///
/// Groups listed in `restriction` that no longer exist simply never match.
///
/// ```rust
/// use content_gate_core::{MembershipSet, RestrictionSet, Verdict, decide};
///
/// let restriction = RestrictionSet::any_group();
/// assert_eq!(decide(&restriction, &MembershipSet::anonymous()), Verdict::Deny);
/// assert_eq!(decide(&restriction, &MembershipSet::new(["7"])), Verdict::Allow);
/// ```
pub fn decide(restriction: &RestrictionSet, membership: &MembershipSet) -> Verdict {
    if restriction.is_empty() {
        return Verdict::Allow;
    }

    if restriction.contains_any_group() && !membership.is_empty() {
        return Verdict::Allow;
    }

    if restriction.group_ids().any(|group| membership.contains(group)) {
        Verdict::Allow
    } else {
        Verdict::Deny
    }
}

/// The rendering stage that applies group restrictions. Cloneable and thread-safe.
///
/// The store and membership provider are injected; the gate keeps no other
/// state between calls.
#[derive(Clone)]
pub struct ContentGate {
    pub(crate) store: Arc<dyn RestrictionStore>,
    pub(crate) membership: Arc<dyn MembershipProvider>,
    pub(crate) config: GateConfig,
    sink: Arc<dyn MetricsSink>,
}

impl ContentGate {
    /// Build a gate over `store` and `membership` with the default
    /// [`GateConfig`] and no metrics.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use content_gate_core::{
    ///     ContentGate, ContentId, GroupDirectory, MemoryRestrictionStore, RestrictionSet,
    ///     RestrictionStore, Verdict, ViewerId,
    /// };
    ///
    /// let store = MemoryRestrictionStore::new();
    /// store.set(&ContentId::new("1"), RestrictionSet::any_group()).unwrap();
    /// let directory = GroupDirectory::new();
    /// directory.add_member("alice", 3u64).unwrap();
    ///
    /// let gate = ContentGate::new(Arc::new(store), Arc::new(directory));
    /// let alice = ViewerId::new("alice");
    /// assert_eq!(gate.check(&ContentId::new("1"), Some(&alice)).unwrap(), Verdict::Allow);
    /// assert_eq!(gate.check(&ContentId::new("1"), None).unwrap(), Verdict::Deny);
    /// ```
    pub fn new(store: Arc<dyn RestrictionStore>, membership: Arc<dyn MembershipProvider>) -> Self {
        ContentGate {
            store,
            membership,
            config: GateConfig::default(),
            sink: Arc::new(NoOpSink),
        }
    }

    /// Replace the presentation settings (placeholder, wildcard label).
    pub fn with_config(mut self, config: GateConfig) -> Self {
        self.config = config;
        self
    }

    /// Report a [`DecisionStats`] for every `check` to `sink`.
    pub fn with_metrics_sink(mut self, sink: Arc<dyn MetricsSink>) -> Self {
        self.sink = sink;
        self
    }

    /// The settings in effect.
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Resolve both input sets and decide once.
    ///
    /// A `None` viewer is anonymous. Neither anonymous viewers nor public items
    /// reach the membership provider. A failing provider is logged and treated
    /// as an anonymous viewer. A failing store is returned to the caller.
    pub fn check(
        &self,
        content: &ContentId,
        viewer: Option<&ViewerId>,
    ) -> Result<Verdict, GateError> {
        let mut clock = CheckClock::start();

        let restriction = clock.time(Phase::ResolveRestriction, || {
            resolve_restriction(self.store.as_ref(), content)
        })?;

        debug!(
            event = "Check",
            phase = "Restriction",
            content = content.to_string(),
            restriction = restriction.to_string()
        );

        let mut membership_degraded = false;
        let membership = clock.time(Phase::ResolveMembership, || match viewer {
            Some(viewer) if !restriction.is_empty() => match self.membership.membership_of(viewer) {
                Ok(membership) => membership,
                Err(err) => {
                    warn!(
                        event = "Check",
                        phase = "Membership",
                        content = content.to_string(),
                        viewer = viewer.to_string(),
                        error = err.to_string(),
                        "membership lookup failed, treating viewer as anonymous"
                    );
                    membership_degraded = true;
                    MembershipSet::anonymous()
                }
            },
            _ => MembershipSet::anonymous(),
        });

        let verdict = clock.time(Phase::Decide, || decide(&restriction, &membership));

        debug!(
            event = "Check",
            phase = "Result",
            content = content.to_string(),
            membership = membership.to_string(),
            verdict = verdict.as_ref()
        );

        let (duration, phases) = clock.finish();
        self.sink.on_decision(&DecisionStats {
            content_id: content.to_string(),
            allowed: verdict.is_allowed(),
            restricted: !restriction.is_empty(),
            membership_degraded,
            duration,
            phases,
        });

        Ok(verdict)
    }

    /// Return `body` or the configured placeholder.
    ///
    /// Outside the canonical view the body passes through without any lookup.
    pub fn render<'a>(
        &self,
        ctx: &RenderContext,
        content: &ContentId,
        viewer: Option<&ViewerId>,
        body: &'a str,
    ) -> Result<Cow<'a, str>, GateError> {
        if !ctx.canonical_view {
            return Ok(Cow::Borrowed(body));
        }

        match self.check(content, viewer)? {
            Verdict::Allow => Ok(Cow::Borrowed(body)),
            Verdict::Deny => Ok(Cow::Owned(self.config.placeholder.clone())),
        }
    }
}

#[cfg(test)]
mod tests;
