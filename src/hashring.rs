extern crate siphasher;

use siphasher::sip::SipHasher;
use std::collections::HashMap;
use std::hash::BuildHasher;
use std::num::NonZeroU64;

use crate::{Error, Node};

mod crud;
pub(crate) mod iterator;
mod migration;
pub(crate) mod ranges;
pub(crate) mod snapshot;

#[derive(Clone, PartialEq, Debug, Default)]
pub struct DefaultHashBuilder;

impl BuildHasher for DefaultHashBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

/// Size of the circular hash space that nodes and keys are placed on
///
/// * `Full` - every `u64` is a valid position (2^64 positions), collisions are negligible
/// * `Bounded` - positions are reduced modulo the given size, useful to reproduce small rings (e.g. 360 slots)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum HashSpace {
    #[default]
    Full,
    Bounded(NonZeroU64),
}

impl HashSpace {
    /// Create a hash space with `size` positions. Returns `None` for an empty space.
    pub fn bounded(size: u64) -> Option<HashSpace> {
        NonZeroU64::new(size).map(HashSpace::Bounded)
    }

    /// Number of positions, `None` for the full space as 2^64 does not fit into a `u64`.
    pub fn size(&self) -> Option<u64> {
        match self {
            HashSpace::Full => None,
            HashSpace::Bounded(size) => Some(size.get()),
        }
    }

    /// The highest position within this hash space.
    pub fn max_position(&self) -> u64 {
        match self {
            HashSpace::Full => u64::MAX,
            HashSpace::Bounded(size) => size.get() - 1,
        }
    }

    /// Map a raw hash onto this hash space.
    pub fn reduce(&self, hash: u64) -> u64 {
        match self {
            HashSpace::Full => hash,
            HashSpace::Bounded(size) => hash % size.get(),
        }
    }
}

/// HashRing represents a set of nodes (cluster) that shall use consistent hashing
/// HashRing owns all nodes and provides methods to add and remove nodes and data
/// HashRing moves the affected keys between nodes whenever a node joins or leaves the cluster
///
/// `nodes` and `positions` always contain the same set of positions, `positions` is sorted ascending
#[derive(Clone, PartialEq, Debug)]
pub struct HashRing<S = DefaultHashBuilder> {
    hash_builder: S,
    space: HashSpace,
    nodes: HashMap<u64, Node>,
    positions: Vec<u64>,
}

impl Default for HashRing {
    fn default() -> Self {
        HashRing::new(HashSpace::Full)
    }
}

/// Hash Ring
///
/// A hash ring that provides consistent hashing for nodes that are added to it.
impl HashRing {
    /// Create a new, empty `HashRing`.
    ///
    /// # Arguments
    ///
    /// * `space` - size of the hash space, use `HashSpace::Full` unless you need a small ring for demonstration
    pub fn new(space: HashSpace) -> HashRing {
        HashRing::with_hasher(space, DefaultHashBuilder)
    }
}

impl<S> HashRing<S> {
    /// Creates an empty `HashRing` which will use the given hash builder.
    ///
    /// # Arguments
    ///
    /// * `space` - size of the hash space
    /// * `hash_builder` - implementation of BuildHasher to provide a Hasher for the HashRing
    ///
    /// # Examples
    ///
    /// ```
    /// use hashring_store::{HashRing, HashSpace};
    /// use siphasher::sip::SipHasher;
    /// use std::hash::BuildHasher;
    ///
    /// #[derive(Clone, PartialEq, Debug)]
    /// pub struct KeyedHashBuilder(u64, u64);
    ///
    /// impl BuildHasher for KeyedHashBuilder {
    ///     type Hasher = SipHasher;
    ///
    ///     fn build_hasher(&self) -> Self::Hasher {
    ///         SipHasher::new_with_keys(self.0, self.1)
    ///     }
    /// }
    ///
    /// let space = HashSpace::bounded(360).unwrap();
    /// let ring = HashRing::with_hasher(space, KeyedHashBuilder(7, 11));
    /// assert!(ring.is_empty());
    /// ```
    pub fn with_hasher(space: HashSpace, hash_builder: S) -> HashRing<S> {
        HashRing {
            hash_builder,
            space,
            nodes: HashMap::new(),
            positions: Vec::new(),
        }
    }

    /// Get the number of nodes in the hash ring.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if the ring has no nodes.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn space(&self) -> HashSpace {
        self.space
    }

    /// All occupied positions in ascending order.
    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    /// Returns the node registered at exactly `position`.
    pub fn node_at(&self, position: u64) -> Option<&Node> {
        self.nodes.get(&position)
    }

    /// Returns the node occupying the smallest position strictly greater than `position`.
    /// Wraps around to the smallest position if no greater position exists.
    ///
    /// Used to find the node that takes over (or gives away) keys when the cluster changes.
    pub fn successor(&self, position: u64) -> Result<&Node, Error> {
        let successor = self.successor_position(position)?;
        self.node(successor)
    }

    /// Returns the node responsible for `position`: the node occupying the first position
    /// at or after `position`, walking clockwise.
    pub fn owner(&self, position: u64) -> Result<&Node, Error> {
        let owner = self.owner_position(position)?;
        self.node(owner)
    }

    fn successor_position(&self, position: u64) -> Result<u64, Error> {
        if self.positions.is_empty() {
            return Err(Error::EmptyRing);
        }

        let n = self.positions.partition_point(|p| *p <= position) % self.positions.len();

        Ok(self.positions[n])
    }

    fn owner_position(&self, position: u64) -> Result<u64, Error> {
        if self.positions.is_empty() {
            return Err(Error::EmptyRing);
        }

        let n = self.positions.partition_point(|p| *p < position) % self.positions.len();

        Ok(self.positions[n])
    }

    // returns the occupied position preceding the given occupied position, wrapping around
    fn predecessor_position(&self, position: u64) -> Result<u64, Error> {
        let n = self
            .positions
            .binary_search(&position)
            .map_err(|_| Error::VacantPosition(position))?;
        let len = self.positions.len();

        Ok(self.positions[(n + len - 1) % len])
    }

    fn node(&self, position: u64) -> Result<&Node, Error> {
        self.nodes
            .get(&position)
            .ok_or(Error::VacantPosition(position))
    }

    fn node_mut(&mut self, position: u64) -> Result<&mut Node, Error> {
        self.nodes
            .get_mut(&position)
            .ok_or(Error::VacantPosition(position))
    }
}

impl<S> HashRing<S>
where
    S: BuildHasher,
{
    /// Returns the position of a node name or a data key on the ring.
    pub fn position(&self, identifier: &str) -> u64 {
        self.space.reduce(self.hash_builder.hash_one(identifier))
    }
}
