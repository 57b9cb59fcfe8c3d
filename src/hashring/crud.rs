use std::hash::BuildHasher;

use tracing::{debug, trace};

use super::HashRing;
use super::migration::on_arc;
use crate::{Error, Node};

impl<S> HashRing<S>
where
    S: BuildHasher,
{
    /// Add `node` to the hash ring and return its position.
    ///
    /// The successor of the new node hands over all keys that fall into the arc
    /// between the predecessor of the new node (exclusive) and the new node (inclusive).
    /// Keys that `node` already stores when it joins are placed like `add_data` would place them,
    /// overriding values stored on the ring under the same key.
    ///
    /// Fails with `Error::DuplicatePosition` if another node already occupies the position,
    /// the ring stays unchanged in that case.
    pub fn add_node(&mut self, mut node: Node) -> Result<u64, Error> {
        let position = self.position(node.name());

        if let Some(existing) = self.nodes.get(&position) {
            return Err(Error::DuplicatePosition {
                position,
                existing: existing.name().to_string(),
                name: node.name().to_string(),
            });
        }

        let carried = node.take_store();

        debug!(node = %node.name(), position, carried = carried.len(), "adding node to ring");

        let n = self.positions.partition_point(|p| *p < position);
        self.positions.insert(n, position);
        self.nodes.insert(position, node);

        let successor = self.successor_position(position)?;
        // the first node of the ring has nobody to take keys from
        if successor != position {
            let predecessor = self.predecessor_position(position)?;
            let keys: Vec<String> = self
                .node(successor)?
                .keys()
                .filter(|key| on_arc(self.position(key), predecessor, position))
                .cloned()
                .collect();

            self.transfer(successor, position, keys)?;
        }

        for (key, value) in carried {
            let owner = self.owner_position(self.position(&key))?;
            self.node_mut(owner)?.insert(key, value);
        }

        Ok(position)
    }

    /// Add all `nodes` to the hash ring, one after another.
    ///
    /// Stops at the first node that cannot be added, nodes added before remain on the ring.
    pub fn batch_add_nodes(&mut self, nodes: Vec<Node>) -> Result<Vec<u64>, Error> {
        nodes.into_iter().map(|node| self.add_node(node)).collect()
    }

    /// Remove the node called `name` from the hash ring.
    ///
    /// All keys of the node move over to its successor before the node is deregistered.
    /// The drained node is handed back to the caller.
    pub fn remove_node(&mut self, name: &str) -> Result<Node, Error> {
        let position = self.position(name);

        match self.nodes.get(&position) {
            Some(node) if node.name() == name => (),
            _ => return Err(Error::NodeNotFound(name.to_string())),
        }

        let successor = self.successor_position(position)?;
        if successor == position {
            return Err(Error::LastNode(name.to_string()));
        }

        let keys: Vec<String> = self.node(position)?.keys().cloned().collect();
        self.transfer(position, successor, keys)?;

        let n = self
            .positions
            .binary_search(&position)
            .map_err(|_| Error::VacantPosition(position))?;
        self.positions.remove(n);
        let node = self
            .nodes
            .remove(&position)
            .ok_or(Error::VacantPosition(position))?;

        debug!(node = %name, position, "removed node from ring");

        Ok(node)
    }

    /// Returns true if a node called `name` is registered on the ring.
    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes
            .get(&self.position(name))
            .is_some_and(|node| node.name() == name)
    }

    /// Returns the node responsible for `key`.
    pub fn node_for(&self, key: &str) -> Result<&Node, Error> {
        self.owner(self.position(key))
    }

    /// Store `value` under `key` on the responsible node.
    ///
    /// Returns the previous value if `key` was stored already, overriding a key is not an error.
    pub fn add_data(&mut self, key: &str, value: i64) -> Result<Option<i64>, Error> {
        let position = self.position(key);
        let owner = self.owner_position(position)?;

        trace!(key, position, owner, "placing key");

        Ok(self.node_mut(owner)?.insert(key, value))
    }

    /// Returns the value stored under `key`, `None` if the key is unknown.
    pub fn get_data(&self, key: &str) -> Result<Option<i64>, Error> {
        Ok(self.node_for(key)?.get(key))
    }

    /// Remove `key` from the responsible node and return its value.
    pub fn remove_data(&mut self, key: &str) -> Result<i64, Error> {
        let position = self.position(key);
        let owner = self.owner_position(position)?;

        self.node_mut(owner)?.remove(key)
    }
}
