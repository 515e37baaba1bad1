use std::sync::Arc;
use std::sync::Mutex;

use super::*;
use crate::directory::GroupDirectory;
use crate::metrics::{DecisionStats, MetricsSink};
use crate::store::MemoryRestrictionStore;
use crate::types::{GroupId, GroupSummary};
use yare::parameterized;


const ARTICLE: &str = "<p>Full article text.</p>";

fn restriction(tokens: &[&str]) -> RestrictionSet {
    RestrictionSet::parse_tokens(tokens).unwrap()
}

fn membership(groups: &[&str]) -> MembershipSet {
    MembershipSet::new(groups.iter().copied())
}

fn assert_allow(verdict: Verdict) {
    assert_eq!(verdict, Verdict::Allow, "expected Allow, got {verdict}");
}

fn assert_deny(verdict: Verdict) {
    assert_eq!(verdict, Verdict::Deny, "expected Deny, got {verdict}");
}

/// A gate over a fresh store and a directory where alice is in group 7,
/// bob is in group 3 and carol is in no group.
fn gate_fixture() -> (ContentGate, MemoryRestrictionStore) {
    let store = MemoryRestrictionStore::new();
    let directory = GroupDirectory::new();
    directory.add_group(3u64, "Three").unwrap();
    directory.add_group(7u64, "Seven").unwrap();
    directory.add_member("alice", 7u64).unwrap();
    directory.add_member("bob", 3u64).unwrap();

    let gate = ContentGate::new(Arc::new(store.clone()), Arc::new(directory));
    (gate, store)
}

/// A provider whose every call fails.
struct UnavailableProvider;

impl MembershipProvider for UnavailableProvider {
    fn membership_of(&self, _viewer: &ViewerId) -> Result<MembershipSet, GateError> {
        Err(GateError::Membership("directory offline".to_string()))
    }

    fn all_groups(&self) -> Result<Vec<GroupSummary>, GateError> {
        Err(GateError::Membership("directory offline".to_string()))
    }
}

/// A store whose every call fails.
struct UnavailableStore;

impl RestrictionStore for UnavailableStore {
    fn get(&self, _content: &ContentId) -> Result<Option<RestrictionSet>, GateError> {
        Err(GateError::Store("store offline".to_string()))
    }

    fn set(&self, _content: &ContentId, _restriction: RestrictionSet) -> Result<(), GateError> {
        Err(GateError::Store("store offline".to_string()))
    }

    fn delete(&self, _content: &ContentId) -> Result<(), GateError> {
        Err(GateError::Store("store offline".to_string()))
    }
}

/// A provider that counts membership lookups.
#[derive(Default)]
struct CountingProvider {
    lookups: Mutex<Vec<ViewerId>>,
}

impl MembershipProvider for CountingProvider {
    fn membership_of(&self, viewer: &ViewerId) -> Result<MembershipSet, GateError> {
        self.lookups.lock()?.push(viewer.clone());
        Ok(MembershipSet::new([GroupId::from(7u64)]))
    }

    fn all_groups(&self) -> Result<Vec<GroupSummary>, GateError> {
        Ok(vec![GroupSummary::new(7u64, "Seven")])
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<DecisionStats>>,
}

impl MetricsSink for RecordingSink {
    fn on_decision(&self, stats: &DecisionStats) {
        self.events.lock().unwrap().push(stats.clone());
    }
}
