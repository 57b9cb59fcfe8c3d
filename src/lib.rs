//! A consistent hashing ring that owns the key/value stores of its nodes.
//!
//! Nodes and keys are hashed onto the same circular hash space. A node owns every
//! position strictly after its predecessor's position, up to and including its own.
//! Keys are therefore stored on the first node found when walking clockwise from
//! the key's position.
//!
//! When the cluster changes the ring moves only the keys that change owner:
//!     Adding a node: the keys of the new node's arc move over from its successor
//!     Removing a node: all keys of the leaving node move over to its successor
//!
//! Every migration inserts all moved keys into the destination before deleting them
//! from the source. As all mutating operations take `&mut HashRing`, nobody can
//! observe the ring halfway through a migration.
//!
//! ```
//! use hashring_store::{HashRing, Node};
//!
//! let mut ring: HashRing = HashRing::default();
//! ring.add_node(Node::new("cache-1")).unwrap();
//! ring.add_node(Node::new("cache-2")).unwrap();
//!
//! ring.add_data("user:42", 7).unwrap();
//! assert_eq!(ring.get_data("user:42").unwrap(), Some(7));
//!
//! // user:42 survives the departure of whichever node stored it
//! let owner = ring.node_for("user:42").unwrap().name().to_string();
//! ring.remove_node(&owner).unwrap();
//! assert_eq!(ring.get_data("user:42").unwrap(), Some(7));
//! ```

mod hashring;
mod node;

pub use hashring::iterator::{HashRingIntoIter, HashRingIter};
pub use hashring::ranges::KeyRange;
pub use hashring::snapshot::{NodeSnapshot, RingSnapshot};
pub use hashring::{DefaultHashBuilder, HashRing, HashSpace};
pub use node::Node;

/// Errors returned by [`HashRing`] and [`Node`] operations.
///
/// Every operation checks its preconditions before it touches the ring,
/// a failed call leaves the ring unchanged.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// Two distinct node names hash to the same ring position.
    #[error("position {position} is already taken by node {existing}, cannot add node {name}")]
    DuplicatePosition {
        /// The contested ring position.
        position: u64,
        /// Name of the node registered at `position`.
        existing: String,
        /// Name of the node that was rejected.
        name: String,
    },

    /// The node is not registered on the ring.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// The key is not stored on the node responsible for it.
    #[error("key not found: {0}")]
    KeyNotFound(String),

    /// A lookup was attempted on a ring without nodes.
    #[error("hash ring has no nodes")]
    EmptyRing,

    /// The node is the only member of the ring, there is no successor to take over its keys.
    #[error("cannot remove {0}, it is the last node of the hash ring")]
    LastNode(String),

    /// No node is registered at the given position.
    ///
    /// Only returned if the bookkeeping of the ring is inconsistent, which the public
    /// operations never cause. It replaces a panic on an internal invariant violation.
    #[error("no node registered at position {0}")]
    VacantPosition(u64),
}
