use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::{trace, warn};

use crate::Error;

/// Node represents a server of the cluster. It stores key/value pairs
///
/// A Node knows nothing about the ring or about other nodes. The [`crate::HashRing`]
/// decides which keys a node stores and moves keys between nodes when the cluster changes.
///
/// * `name` - unique identifier of the node, its hash defines the position of the node on the ring
/// * `store` - all key/value pairs currently stored on this node
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    name: String,
    store: HashMap<String, i64>,
}

impl Node {
    /// Create a new, empty `Node`.
    pub fn new(name: impl Into<String>) -> Self {
        Node {
            name: name.into(),
            store: HashMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Store `value` under `key` and return the value that was stored before, if any.
    ///
    /// Overriding an existing key is allowed, it is reported as a warning only.
    pub fn insert(&mut self, key: impl Into<String>, value: i64) -> Option<i64> {
        match self.store.entry(key.into()) {
            Entry::Occupied(mut occupied) => {
                warn!(node = %self.name, key = %occupied.key(), value, "overriding key");
                Some(occupied.insert(value))
            }
            Entry::Vacant(vacant) => {
                trace!(node = %self.name, key = %vacant.key(), value, "storing key");
                vacant.insert(value);
                None
            }
        }
    }

    /// Remove `key` and return its value.
    pub fn remove(&mut self, key: &str) -> Result<i64, Error> {
        let value = self
            .store
            .remove(key)
            .ok_or_else(|| Error::KeyNotFound(key.to_string()))?;

        trace!(node = %self.name, key, "removed key");

        Ok(value)
    }

    // empties the store, used when the ring re-places the keys of a joining node
    pub(crate) fn take_store(&mut self) -> HashMap<String, i64> {
        std::mem::take(&mut self.store)
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.store.get(key).copied()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.store.contains_key(key)
    }

    /// Get the number of keys stored on this node.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns true if the node stores no keys.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// All keys stored on this node, in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.store.keys()
    }

    /// All key/value pairs stored on this node, in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, i64)> {
        self.store.iter().map(|(key, value)| (key, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::Node;
    use crate::Error;

    #[test]
    fn insert_and_get() {
        let mut node = Node::new("can1");

        assert!(node.is_empty());
        assert_eq!(node.insert("key1", 5), None);
        assert_eq!(node.insert("key2", 6), None);

        assert_eq!(node.len(), 2);
        assert_eq!(node.get("key1"), Some(5));
        assert_eq!(node.get("key2"), Some(6));
        assert_eq!(node.get("key3"), None);
        assert!(node.contains_key("key1"));
        assert!(!node.contains_key("key3"));
    }

    #[test]
    fn insert_overrides_existing_key() {
        let mut node = Node::new("can1");

        node.insert("key1", 5);
        assert_eq!(node.insert("key1", 8), Some(5));

        assert_eq!(node.len(), 1);
        assert_eq!(node.get("key1"), Some(8));
    }

    #[test]
    fn remove_returns_value() {
        let mut node = Node::new("can1");
        node.insert("key1", 5);

        assert_eq!(node.remove("key1"), Ok(5));
        assert!(node.is_empty());
    }

    #[test]
    fn remove_missing_key_fails() {
        let mut node = Node::new("can1");
        node.insert("key1", 5);

        assert_eq!(
            node.remove("key2"),
            Err(Error::KeyNotFound("key2".to_string()))
        );
        assert_eq!(node.len(), 1);
    }

    #[test]
    fn iter_yields_all_entries() {
        let mut node = Node::new("can1");
        node.insert("key1", 5);
        node.insert("key2", 6);

        let mut entries: Vec<(String, i64)> =
            node.iter().map(|(key, value)| (key.clone(), value)).collect();
        entries.sort();

        assert_eq!(
            entries,
            vec![("key1".to_string(), 5), ("key2".to_string(), 6)]
        );
    }
}
