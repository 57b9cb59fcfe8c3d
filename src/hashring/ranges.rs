use std::ops::RangeInclusive;

#[cfg(feature = "derive")]
use serde::{Deserialize, Serialize};

use super::HashRing;

/// KeyRange contains a hashrange and the node that stores all keys within the given range
///
/// * `hash_range` - range of key positions that are stored on `node`. The range of a node
///   wraps around zero for the lowest node, in that case the node owns two KeyRanges
/// * `node` - name of the node that owns the range
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "derive", derive(Serialize, Deserialize))]
pub struct KeyRange {
    pub hash_range: RangeInclusive<u64>,
    pub node: String,
}

impl KeyRange {
    pub fn contains(&self, position: u64) -> bool {
        self.hash_range.contains(&position)
    }
}

impl<S> HashRing<S> {
    /// Returns the hash ranges owned by each node, covering the complete hash space.
    ///
    /// Ranges are ordered by position, starting with the range that ends at the highest position
    /// followed by the ranges starting at 0. An empty ring owns no ranges.
    pub fn key_ranges(&self) -> Vec<KeyRange> {
        let max = self.space.max_position();

        let mut ranges = vec![];

        let mut left = match self.positions.last() {
            Some(left) => *left,
            None => return ranges,
        };

        if self.positions.len() == 1 {
            if let Some(node) = self.nodes.get(&left) {
                ranges.push(KeyRange {
                    hash_range: 0..=max,
                    node: node.name().to_string(),
                });
            }
            return ranges;
        }

        for (right, node) in self.iter() {
            let name = node.name();

            if left > right {
                if left < max {
                    ranges.push(KeyRange {
                        hash_range: left + 1..=max,
                        node: name.to_string(),
                    });
                }
                ranges.push(KeyRange {
                    hash_range: 0..=right,
                    node: name.to_string(),
                });
            } else {
                ranges.push(KeyRange {
                    hash_range: left + 1..=right,
                    node: name.to_string(),
                });
            }

            left = right;
        }

        ranges
    }

    /// Returns the hash ranges owned by the node called `name`.
    pub fn key_ranges_of(&self, name: &str) -> Vec<KeyRange> {
        self.key_ranges()
            .into_iter()
            .filter(|range| range.node == name)
            .collect()
    }
}
