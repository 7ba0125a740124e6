//! Search tree node representation.
//!
//! Each node records the action that led to it from its parent, a
//! non-owning back-reference to the parent, and the visit statistics used
//! for selection. Statistics live behind the `NodeStats` capability so
//! alternative bound formulas can be plugged in per node.

use crate::stats::NodeStats;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the search tree.
#[derive(Debug, Clone)]
pub struct SearchNode<S, A> {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Action that led to this node from the parent; `None` only for the root
    pub action: Option<A>,

    /// Children: one per legal action, in legal-action order.
    /// Empty until the node is expanded.
    pub children: Vec<NodeId>,

    /// Visit/score statistics and confidence bounds
    pub stats: S,
}

impl<S: NodeStats, A> SearchNode<S, A> {
    /// Create a new root node.
    pub fn new_root(stats: S) -> Self {
        Self {
            parent: NodeId::NONE,
            action: None,
            children: Vec::new(),
            stats,
        }
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: A, stats: S) -> Self {
        Self {
            parent,
            action: Some(action),
            children: Vec::new(),
            stats,
        }
    }

    /// A node with no children (unexpanded or terminal).
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// The root is the only node with no parent.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}
