use std::collections::BTreeMap;

#[cfg(feature = "derive")]
use serde::{Deserialize, Serialize};

use super::HashRing;

/// A point in time copy of the topology and the data of a [`HashRing`]
///
/// * `space` - number of positions of the hash space, `None` for the full `u64` space
/// * `nodes` - all nodes ordered by position
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(Serialize, Deserialize))]
pub struct RingSnapshot {
    pub space: Option<u64>,
    pub nodes: Vec<NodeSnapshot>,
}

/// A copy of one node of a [`HashRing`], see [`RingSnapshot`]
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(Serialize, Deserialize))]
pub struct NodeSnapshot {
    pub position: u64,
    pub name: String,
    pub store: BTreeMap<String, i64>,
}

impl RingSnapshot {
    /// Total number of keys stored across all nodes.
    pub fn key_count(&self) -> usize {
        self.nodes.iter().map(|node| node.store.len()).sum()
    }

    pub fn node(&self, name: &str) -> Option<&NodeSnapshot> {
        self.nodes.iter().find(|node| node.name == name)
    }
}

impl<S> HashRing<S> {
    /// Returns a snapshot of all positions, node names and stored keys.
    ///
    /// Rendering is left to the caller, enable the `derive` feature to serialize the snapshot.
    pub fn snapshot(&self) -> RingSnapshot {
        RingSnapshot {
            space: self.space.size(),
            nodes: self
                .iter()
                .map(|(position, node)| NodeSnapshot {
                    position,
                    name: node.name().to_string(),
                    store: node
                        .iter()
                        .map(|(key, value)| (key.clone(), value))
                        .collect(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use super::{NodeSnapshot, RingSnapshot};
    use crate::hashring::tests::{PinnedBuildHasher, pinned_ring};
    use crate::{HashRing, HashSpace};

    #[test]
    fn snapshot_of_empty_ring() {
        let ring = HashRing::with_hasher(HashSpace::bounded(360).unwrap(), PinnedBuildHasher);

        assert_eq!(
            ring.snapshot(),
            RingSnapshot {
                space: Some(360),
                nodes: vec![],
            }
        );
    }

    #[test]
    fn snapshot_lists_nodes_by_position() {
        let mut ring = pinned_ring(&["c@200", "a@10"]);
        ring.add_data("key@5", 1).unwrap();
        ring.add_data("key@150", 2).unwrap();
        ring.add_data("key@300", 3).unwrap();

        let snapshot = ring.snapshot();

        let expected = RingSnapshot {
            space: None,
            nodes: vec![
                NodeSnapshot {
                    position: 10,
                    name: "a@10".to_string(),
                    store: BTreeMap::from([("key@300".to_string(), 3), ("key@5".to_string(), 1)]),
                },
                NodeSnapshot {
                    position: 200,
                    name: "c@200".to_string(),
                    store: BTreeMap::from([("key@150".to_string(), 2)]),
                },
            ],
        };

        assert_eq!(snapshot, expected);
        assert_eq!(snapshot.key_count(), 3);
        assert_eq!(snapshot.node("c@200").map(|node| node.position), Some(200));
        assert_eq!(snapshot.node("b@100"), None);
    }
}
