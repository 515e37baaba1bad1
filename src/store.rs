use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::GateError;
use crate::traits::RestrictionStore;
use crate::types::{ContentId, RestrictionSet};

/// Look up the restriction set for `content`. A missing entry is a public item.
pub fn resolve_restriction(
    store: &dyn RestrictionStore,
    content: &ContentId,
) -> Result<RestrictionSet, GateError> {
    Ok(store.get(content)?.unwrap_or_default())
}

/// In-memory restriction store. Cloneable and thread-safe; clones share state.
///
/// The JSON form is an object mapping content id to an array of tokens:
///
/// ```rust
/// use content_gate_core::{ContentId, MemoryRestrictionStore, RestrictionStore};
///
/// let store = MemoryRestrictionStore::from_json_str(r#"{"42": ["all_groups", "7"]}"#).unwrap();
/// let set = store.get(&ContentId::new("42")).unwrap().unwrap();
/// assert!(set.contains_any_group());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryRestrictionStore {
    inner: Arc<RwLock<HashMap<ContentId, RestrictionSet>>>,
}

impl MemoryRestrictionStore {
    /// An empty store: every item is public.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a store from its JSON form. Items with an empty array are dropped.
    ///
    /// Fails with [`GateError::InvalidFormat`] on malformed JSON or on a
    /// token that is not a valid group id.
    pub fn from_json_str(json: &str) -> Result<Self, GateError> {
        let entries = parse_document(json)?;
        Ok(MemoryRestrictionStore {
            inner: Arc::new(RwLock::new(entries)),
        })
    }

    /// Replace every entry with the contents of `json`. On a parse error the
    /// existing entries are kept.
    pub fn reload_from_json_str(&self, json: &str) -> Result<(), GateError> {
        let entries = parse_document(json)?;
        *self.inner.write()? = entries;
        debug!(event = "Store", phase = "Reload", items = self.len()?);
        Ok(())
    }

    /// Serialize every entry, ordered by content id.
    pub fn to_json_string(&self) -> Result<String, GateError> {
        let guard = self.inner.read()?;
        let ordered: BTreeMap<&ContentId, &RestrictionSet> = guard.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    /// Read-modify-write one entry under the write lock.
    ///
    /// Concurrent updates to the same item are applied one after another, so
    /// none is lost. An empty result removes the entry.
    pub fn update<F>(&self, content: &ContentId, f: F) -> Result<RestrictionSet, GateError>
    where
        F: FnOnce(RestrictionSet) -> RestrictionSet,
    {
        let mut guard = self.inner.write()?;
        let current = guard.get(content).cloned().unwrap_or_default();
        let next = f(current);
        if next.is_empty() {
            guard.remove(content);
        } else {
            guard.insert(content.clone(), next.clone());
        }
        Ok(next)
    }

    /// Number of restricted items.
    pub fn len(&self) -> Result<usize, GateError> {
        Ok(self.inner.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool, GateError> {
        Ok(self.inner.read()?.is_empty())
    }
}

fn parse_document(json: &str) -> Result<HashMap<ContentId, RestrictionSet>, GateError> {
    let entries: HashMap<ContentId, RestrictionSet> = serde_json::from_str(json)?;
    Ok(entries
        .into_iter()
        .filter(|(_, set)| !set.is_empty())
        .collect())
}

impl RestrictionStore for MemoryRestrictionStore {
    fn get(&self, content: &ContentId) -> Result<Option<RestrictionSet>, GateError> {
        Ok(self.inner.read()?.get(content).cloned())
    }

    fn set(&self, content: &ContentId, restriction: RestrictionSet) -> Result<(), GateError> {
        let mut guard = self.inner.write()?;
        if restriction.is_empty() {
            guard.remove(content);
        } else {
            guard.insert(content.clone(), restriction);
        }
        Ok(())
    }

    fn delete(&self, content: &ContentId) -> Result<(), GateError> {
        self.inner.write()?.remove(content);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GroupId;
    use std::thread;

    fn id(s: &str) -> ContentId {
        ContentId::new(s)
    }

    #[test]
    fn test_missing_entry_resolves_to_public() {
        let store = MemoryRestrictionStore::new();
        let set = resolve_restriction(&store, &id("1")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_set_get_delete() {
        let store = MemoryRestrictionStore::new();
        let restriction = RestrictionSet::groups(["7"]);

        store.set(&id("1"), restriction.clone()).unwrap();
        assert_eq!(store.get(&id("1")).unwrap(), Some(restriction.clone()));
        assert_eq!(resolve_restriction(&store, &id("1")).unwrap(), restriction);

        store.delete(&id("1")).unwrap();
        assert_eq!(store.get(&id("1")).unwrap(), None);
    }

    #[test]
    fn test_delete_missing_is_ok() {
        let store = MemoryRestrictionStore::new();
        assert!(store.delete(&id("nope")).is_ok());
    }

    #[test]
    fn test_setting_empty_removes_entry() {
        let store = MemoryRestrictionStore::new();
        store.set(&id("1"), RestrictionSet::any_group()).unwrap();
        store.set(&id("1"), RestrictionSet::public()).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_clones_share_state() {
        let store = MemoryRestrictionStore::new();
        let other = store.clone();
        store.set(&id("1"), RestrictionSet::any_group()).unwrap();
        assert!(other.get(&id("1")).unwrap().is_some());
    }

    #[test]
    fn test_from_json_str() {
        let store =
            MemoryRestrictionStore::from_json_str(r#"{"1": ["7", "9"], "2": [], "3": ["all_groups"]}"#)
                .unwrap();
        assert_eq!(store.len().unwrap(), 2);
        assert_eq!(
            store.get(&id("1")).unwrap(),
            Some(RestrictionSet::groups(["7", "9"]))
        );
        assert_eq!(store.get(&id("2")).unwrap(), None);
    }

    #[test]
    fn test_from_json_str_rejects_invalid_token() {
        let result = MemoryRestrictionStore::from_json_str(r#"{"1": ["bad\ttoken"]}"#);
        assert!(matches!(result, Err(GateError::InvalidFormat(_))));
    }

    #[test]
    fn test_reload_keeps_entries_on_error() {
        let store = MemoryRestrictionStore::from_json_str(r#"{"1": ["7"]}"#).unwrap();
        assert!(store.reload_from_json_str("not json").is_err());
        assert_eq!(store.len().unwrap(), 1);

        store.reload_from_json_str(r#"{"2": ["all_groups"]}"#).unwrap();
        assert_eq!(store.get(&id("1")).unwrap(), None);
        assert!(store.get(&id("2")).unwrap().is_some());
    }

    #[test]
    fn test_to_json_string() {
        let store = MemoryRestrictionStore::new();
        store.set(&id("b"), RestrictionSet::groups(["7"])).unwrap();
        store
            .set(&id("a"), RestrictionSet::any_group().with_group("3"))
            .unwrap();
        assert_eq!(
            store.to_json_string().unwrap(),
            r#"{"a":["all_groups","3"],"b":["7"]}"#
        );
    }

    #[test]
    fn test_update_to_empty_removes_entry() {
        let store = MemoryRestrictionStore::new();
        store.set(&id("1"), RestrictionSet::groups(["7"])).unwrap();
        let next = store.update(&id("1"), |_| RestrictionSet::public()).unwrap();
        assert!(next.is_empty());
        assert_eq!(store.get(&id("1")).unwrap(), None);
    }

    #[test]
    fn test_update_sees_current_entry() {
        let store = MemoryRestrictionStore::new();
        store.set(&id("1"), RestrictionSet::groups(["7"])).unwrap();
        let next = store.update(&id("1"), |set| set.with_any_group()).unwrap();
        assert_eq!(next, RestrictionSet::groups(["7"]).with_any_group());
        assert_eq!(store.get(&id("1")).unwrap(), Some(next));
    }

    #[test]
    fn test_panicking_update_keeps_entry() {
        let store = MemoryRestrictionStore::new();
        store.set(&id("1"), RestrictionSet::groups(["7"])).unwrap();

        let shared = store.clone();
        let result = thread::spawn(move || {
            shared
                .update(&ContentId::new("1"), |_| panic!("update closure failed"))
                .unwrap();
        })
        .join();
        assert!(result.is_err());

        let guard = store.inner.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        assert_eq!(guard.get(&id("1")), Some(&RestrictionSet::groups(["7"])));
        drop(guard);
        assert!(matches!(store.get(&id("1")), Err(GateError::PoisonedLock(_))));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = MemoryRestrictionStore::new();
        let mut handles = vec![];

        for i in 0..10u64 {
            let store = store.clone();
            handles.push(thread::spawn(move || {
                for j in 0..20u64 {
                    store
                        .update(&ContentId::new("shared"), |set| set.with_group(i * 100 + j))
                        .unwrap();
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        let set = store.get(&id("shared")).unwrap().unwrap();
        assert_eq!(set.len(), 200);
        assert!(set.group_ids().any(|g| *g == GroupId::from(905u64)));
    }
}
