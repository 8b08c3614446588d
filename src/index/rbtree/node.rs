//! Node shape, colors, and link accessors.
//!
//! Every accessor treats [`NodeId::NIL`] as the sentinel leaf: it reads as
//! BLACK with NIL links, and writes to it are dropped. That keeps the
//! fix-up code free of "is this child absent?" branches.

use log::debug;

use super::RbTree;
use crate::common::NodeId;

/// Node color.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Freshly inserted nodes start red.
    #[default]
    Red,
    Black,
}

/// One stored entry plus its links.
pub(super) struct Node<K, V> {
    pub(super) key: K,
    pub(super) value: V,
    pub(super) color: Color,
    pub(super) parent: NodeId,
    pub(super) left: NodeId,
    pub(super) right: NodeId,
}

impl<K, V> Node<K, V> {
    /// A red node with two sentinel children.
    pub(super) fn new(key: K, value: V, parent: NodeId) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: NodeId::NIL,
            right: NodeId::NIL,
        }
    }
}

impl<K, V> RbTree<K, V> {
    #[inline]
    pub(super) fn node(&self, id: NodeId) -> &Node<K, V> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut Node<K, V> {
        &mut self.nodes[id.index()]
    }

    // ========================================================================
    // Reads (NIL-safe)
    // ========================================================================

    #[inline]
    pub(super) fn color(&self, id: NodeId) -> Color {
        if id.is_nil() {
            Color::Black
        } else {
            self.node(id).color
        }
    }

    #[inline]
    pub(super) fn is_red(&self, id: NodeId) -> bool {
        self.color(id) == Color::Red
    }

    #[inline]
    pub(super) fn parent(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).parent
        }
    }

    #[inline]
    pub(super) fn left(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).left
        }
    }

    #[inline]
    pub(super) fn right(&self, id: NodeId) -> NodeId {
        if id.is_nil() {
            NodeId::NIL
        } else {
            self.node(id).right
        }
    }

    // ========================================================================
    // Writes (no-ops on NIL)
    // ========================================================================

    /// Recolor `id`, counting actual changes.
    #[inline]
    pub(super) fn set_color(&mut self, id: NodeId, color: Color) {
        if id.is_nil() {
            return;
        }
        let node = self.node_mut(id);
        if node.color != color {
            node.color = color;
            self.stats.recolors += 1;
        }
    }

    #[inline]
    pub(super) fn set_parent(&mut self, id: NodeId, parent: NodeId) {
        if !id.is_nil() {
            self.node_mut(id).parent = parent;
        }
    }

    #[inline]
    pub(super) fn set_left(&mut self, id: NodeId, left: NodeId) {
        if !id.is_nil() {
            self.node_mut(id).left = left;
        }
    }

    #[inline]
    pub(super) fn set_right(&mut self, id: NodeId, right: NodeId) {
        if !id.is_nil() {
            self.node_mut(id).right = right;
        }
    }

    /// Point whichever link of `parent` referenced `old` at `new` instead.
    ///
    /// A NIL `parent` means `old` was the root.
    pub(super) fn replace_child(&mut self, parent: NodeId, old: NodeId, new: NodeId) {
        if parent.is_nil() {
            debug!("root moves from {} to {}", old, new);
            self.root = new;
        } else if self.left(parent) == old {
            self.set_left(parent, new);
        } else {
            self.set_right(parent, new);
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// Leftmost real node under `id` (which must be real).
    pub(super) fn minimum(&self, mut id: NodeId) -> NodeId {
        while !self.left(id).is_nil() {
            id = self.left(id);
        }
        id
    }

    /// Rightmost real node under `id` (which must be real).
    pub(super) fn maximum(&self, mut id: NodeId) -> NodeId {
        while !self.right(id).is_nil() {
            id = self.right(id);
        }
        id
    }

    /// The other child of `parent`.
    #[inline]
    pub(super) fn sibling(&self, id: NodeId, parent: NodeId) -> NodeId {
        let left = self.left(parent);
        if left == id {
            self.right(parent)
        } else {
            left
        }
    }
}
