use std::cmp::Ordering;

use tracing::debug;

use super::HashRing;
use crate::Error;

/// Returns true if `position` lies on the arc that starts after `start` and ends with `end`,
/// walking clockwise. The arc wraps around zero if `start` is greater than `end`.
/// If `start` equals `end` the arc covers the complete ring.
pub(crate) fn on_arc(position: u64, start: u64, end: u64) -> bool {
    match start.cmp(&end) {
        Ordering::Less => start < position && position <= end,
        Ordering::Greater => start < position || position <= end,
        Ordering::Equal => true,
    }
}

impl<S> HashRing<S> {
    /// Move `keys` from the node at position `from` to the node at position `to`.
    ///
    /// All keys are inserted into the destination first, afterwards they are removed from the source.
    /// Keys that the source does not store are skipped. Returns the number of moved keys.
    pub(crate) fn transfer(
        &mut self,
        from: u64,
        to: u64,
        keys: Vec<String>,
    ) -> Result<usize, Error> {
        let source = self.node(from)?;
        let entries: Vec<(String, i64)> = keys
            .into_iter()
            .filter_map(|key| source.get(&key).map(|value| (key, value)))
            .collect();

        if entries.is_empty() {
            return Ok(0);
        }

        let destination = self.node_mut(to)?;
        for (key, value) in &entries {
            destination.insert(key.clone(), *value);
        }

        let source = self.node_mut(from)?;
        for (key, _) in &entries {
            source.remove(key)?;
        }

        debug!(from, to, keys = entries.len(), "migrated keys");

        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::on_arc;
    use crate::Error;
    use crate::hashring::tests::pinned_ring;

    #[test]
    fn arc_without_wrap() {
        assert!(!on_arc(10, 10, 100));
        assert!(on_arc(11, 10, 100));
        assert!(on_arc(100, 10, 100));
        assert!(!on_arc(101, 10, 100));
        assert!(!on_arc(0, 10, 100));
    }

    #[test]
    fn arc_wrapping_around_zero() {
        assert!(on_arc(201, 200, 10));
        assert!(on_arc(u64::MAX, 200, 10));
        assert!(on_arc(0, 200, 10));
        assert!(on_arc(10, 200, 10));
        assert!(!on_arc(11, 200, 10));
        assert!(!on_arc(200, 200, 10));
    }

    #[test]
    fn arc_covering_whole_ring() {
        assert!(on_arc(0, 10, 10));
        assert!(on_arc(10, 10, 10));
        assert!(on_arc(u64::MAX, 10, 10));
    }

    #[test]
    fn transfer_moves_only_requested_keys() {
        let mut ring = pinned_ring(&["a@10", "b@100"]);
        ring.add_data("key@50", 1).unwrap();
        ring.add_data("key@60", 2).unwrap();

        let moved = ring
            .transfer(
                100,
                10,
                vec!["key@50".to_string(), "key@unknown".to_string()],
            )
            .unwrap();

        assert_eq!(moved, 1);
        assert_eq!(ring.node_at(10).unwrap().get("key@50"), Some(1));
        assert_eq!(ring.node_at(100).unwrap().get("key@50"), None);
        assert_eq!(ring.node_at(100).unwrap().get("key@60"), Some(2));
    }

    #[test]
    fn transfer_between_vacant_positions_fails() {
        let mut ring = pinned_ring(&["a@10", "b@100"]);
        ring.add_data("key@50", 1).unwrap();

        assert_eq!(
            ring.transfer(100, 55, vec!["key@50".to_string()]),
            Err(Error::VacantPosition(55))
        );
        assert_eq!(
            ring.transfer(55, 100, vec!["key@50".to_string()]),
            Err(Error::VacantPosition(55))
        );
        assert_eq!(ring.node_at(100).unwrap().get("key@50"), Some(1));
    }
}
