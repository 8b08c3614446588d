//! Node identifier type.

use std::fmt;

/// Identifies a node slot in a tree's arena.
///
/// Using `u32` keeps links small: each node carries three of them
/// (parent, left, right), so the link block stays at 12 bytes.
///
/// [`NodeId::NIL`] is the shared sentinel leaf. It never indexes the
/// arena, always reads as BLACK, and stands in for every absent child
/// and for the root's parent.
///
/// # Example
/// ```
/// use rbstore::NodeId;
///
/// let id = NodeId::new(7);
/// assert!(!id.is_nil());
/// assert_eq!(id.index(), 7);
/// assert!(NodeId::NIL.is_nil());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The sentinel leaf / absent link.
    pub const NIL: NodeId = NodeId(u32::MAX);

    /// Create a new NodeId.
    #[inline]
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Build an id from an arena position.
    ///
    /// Callers guarantee `index < MAX_CAPACITY`, so the value never
    /// collides with [`NodeId::NIL`].
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "arena index out of range");
        NodeId(index as u32)
    }

    /// Arena position of this node.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// Check if this id is the sentinel leaf.
    #[inline]
    pub fn is_nil(self) -> bool {
        self == Self::NIL
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_nil() {
            write!(f, "Node(NIL)")
        } else {
            write!(f, "Node({})", self.0)
        }
    }
}
