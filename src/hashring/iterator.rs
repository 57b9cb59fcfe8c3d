use std::collections::HashMap;

use super::HashRing;
use crate::Node;

/// Iterates over all nodes of a [`HashRing`] in ascending order of their positions.
pub struct HashRingIter<'a> {
    positions: std::slice::Iter<'a, u64>,
    nodes: &'a HashMap<u64, Node>,
}

impl<'a> Iterator for HashRingIter<'a> {
    type Item = (u64, &'a Node);

    fn next(&mut self) -> Option<Self::Item> {
        let position = *self.positions.next()?;
        self.nodes.get(&position).map(|node| (position, node))
    }
}

/// Consumes a [`HashRing`] and yields its nodes in ascending order of their positions.
pub struct HashRingIntoIter {
    positions: std::vec::IntoIter<u64>,
    nodes: HashMap<u64, Node>,
}

impl Iterator for HashRingIntoIter {
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let position = self.positions.next()?;
        self.nodes.remove(&position)
    }
}

impl<S> HashRing<S> {
    /// Returns all nodes together with their positions, walking the ring from position 0.
    pub fn iter(&self) -> HashRingIter<'_> {
        HashRingIter {
            positions: self.positions.iter(),
            nodes: &self.nodes,
        }
    }
}

impl<'a, S> IntoIterator for &'a HashRing<S> {
    type Item = (u64, &'a Node);

    type IntoIter = HashRingIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<S> IntoIterator for HashRing<S> {
    type Item = Node;

    type IntoIter = HashRingIntoIter;

    fn into_iter(self) -> Self::IntoIter {
        HashRingIntoIter {
            positions: self.positions.into_iter(),
            nodes: self.nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::hashring::tests::pinned_ring;

    #[test]
    fn iter() {
        let ring = pinned_ring(&["b@100", "c@200", "a@10"]);

        let nodes: Vec<(u64, &str)> = ring
            .iter()
            .map(|(position, node)| (position, node.name()))
            .collect();

        assert_eq!(nodes, vec![(10, "a@10"), (100, "b@100"), (200, "c@200")]);
    }

    #[test]
    fn into_iter() {
        let mut ring = pinned_ring(&["b@100", "a@10"]);
        ring.add_data("key@50", 1).unwrap();

        let mut iter = ring.into_iter();

        let first = iter.next().unwrap();
        assert_eq!(first.name(), "a@10");
        assert!(first.is_empty());

        let second = iter.next().unwrap();
        assert_eq!(second.name(), "b@100");
        assert_eq!(second.get("key@50"), Some(1));

        assert!(iter.next().is_none());
    }

    #[test]
    fn iter_by_reference() {
        let ring = pinned_ring(&["a@10", "b@100"]);

        let mut count = 0;
        for (position, node) in &ring {
            assert_eq!(ring.position(node.name()), position);
            count += 1;
        }

        assert_eq!(count, 2);
    }
}
