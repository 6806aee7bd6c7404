//! Catalog of loaded agents
//!
//! A [`Catalog`] is the immutable-for-the-session mapping produced by one
//! load pass. Iteration order is insertion order, which the loader keeps
//! lexicographic by directory name; the selector's tie-break depends on it.

use crate::agent::record::{AgentRecord, Tier};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::Arc;

/// In-memory mapping from agent name to record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    records: IndexMap<String, AgentRecord>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, keyed by its name.
    ///
    /// Duplicate names are last-write-wins: the new record replaces the old
    /// one. Returns the replaced record, if any.
    pub fn insert(&mut self, record: AgentRecord) -> Option<AgentRecord> {
        self.records.insert(record.name.clone(), record)
    }

    /// Fetch one record by name.
    pub fn get(&self, name: &str) -> Option<&AgentRecord> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All agent names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.records.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Iterate records in load order.
    pub fn iter(&self) -> impl Iterator<Item = &AgentRecord> {
        self.records.values()
    }

    /// All records of the given tier, in load order.
    pub fn by_tier(&self, tier: Tier) -> Vec<&AgentRecord> {
        self.records.values().filter(|r| r.tier == tier).collect()
    }

    /// All records in the given category, in load order.
    pub fn by_category(&self, category: &str) -> Vec<&AgentRecord> {
        self.records
            .values()
            .filter(|r| r.category == category)
            .collect()
    }
}

impl FromIterator<AgentRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = AgentRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

/// Shared handle to the current catalog.
///
/// Readers take a cheap `Arc` snapshot; reload builds a whole new catalog
/// and swaps it in, so a reader never observes a partially-rebuilt state.
/// Records themselves are never mutated.
#[derive(Clone, Default)]
pub struct SharedCatalog {
    inner: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// Snapshot of the current catalog.
    pub fn current(&self) -> Arc<Catalog> {
        self.inner.read().clone()
    }

    /// Atomically replace the catalog, returning the previous one.
    pub fn swap(&self, catalog: Catalog) -> Arc<Catalog> {
        let mut guard = self.inner.write();
        std::mem::replace(&mut *guard, Arc::new(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::record::test_record;

    fn sample() -> Catalog {
        Catalog::from_iter([
            test_record("builder", Tier::Tactical, &["build"]),
            test_record("architect", Tier::Strategic, &["design"]),
            test_record("reviewer", Tier::Tactical, &["review"]),
        ])
    }

    #[test]
    fn test_names_sorted() {
        let catalog = sample();
        assert_eq!(catalog.names(), vec!["architect", "builder", "reviewer"]);
    }

    #[test]
    fn test_iteration_preserves_load_order() {
        let catalog = sample();
        let order: Vec<&str> = catalog.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(order, vec!["builder", "architect", "reviewer"]);
    }

    #[test]
    fn test_get_unknown_is_none() {
        assert!(sample().get("nobody").is_none());
    }

    #[test]
    fn test_tier_and_category_filters() {
        let mut catalog = sample();
        let mut ops = test_record("deployer", Tier::Tactical, &["deploy"]);
        ops.category = "operations".to_string();
        catalog.insert(ops);

        let tactical: Vec<&str> = catalog
            .by_tier(Tier::Tactical)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(tactical, vec!["builder", "reviewer", "deployer"]);

        let ops: Vec<&str> = catalog
            .by_category("operations")
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(ops, vec!["deployer"]);
    }

    #[test]
    fn test_duplicate_name_last_write_wins() {
        let mut catalog = Catalog::new();
        let mut first = test_record("dup", Tier::Tactical, &["a"]);
        first.description = "first".to_string();
        let mut second = test_record("dup", Tier::Tactical, &["b"]);
        second.description = "second".to_string();

        assert!(catalog.insert(first).is_none());
        let replaced = catalog.insert(second).unwrap();
        assert_eq!(replaced.description, "first");
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.get("dup").unwrap().description, "second");
    }

    #[test]
    fn test_shared_catalog_swap() {
        let shared = SharedCatalog::new(sample());
        let before = shared.current();
        assert_eq!(before.len(), 3);

        let rebuilt = Catalog::from_iter([test_record("solo", Tier::Tactical, &["x"])]);
        let old = shared.swap(rebuilt);
        assert_eq!(old.len(), 3);
        assert_eq!(shared.current().len(), 1);

        // Earlier snapshots stay valid
        assert_eq!(before.len(), 3);
    }
}
