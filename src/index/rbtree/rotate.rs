//! Rotation primitives.
//!
//! Both rotations are named for the direction the rotated-about parent
//! moves, and both take the node that moves *up*:
//!
//! ```text
//!        g                    g
//!        │                    │
//!        p                    x
//!       / \    rotate_left   / \
//!      a   x   ──────────▶  p   c
//!         / \              / \
//!        b   c            a   b
//! ```
//!
//! In-order sequence and colors are untouched; callers recolor.

use super::RbTree;
use crate::common::NodeId;

impl<K, V> RbTree<K, V> {
    /// Lift `x`, the right child of `p`, into `p`'s slot.
    ///
    /// `p` becomes `x`'s left child and `x`'s former left subtree becomes
    /// `p`'s right subtree. If `p` was the root, `x` becomes the root.
    pub(super) fn rotate_left(&mut self, x: NodeId) {
        let p = self.parent(x);
        debug_assert!(!p.is_nil(), "rotate_left at the root");
        debug_assert_eq!(self.right(p), x, "rotate_left needs a right child");

        let g = self.parent(p);
        let inner = self.left(x);

        self.set_right(p, inner);
        self.set_parent(inner, p);

        self.replace_child(g, p, x);
        self.set_parent(x, g);

        self.set_left(x, p);
        self.set_parent(p, x);

        self.stats.rotations += 1;
    }

    /// Lift `x`, the left child of `p`, into `p`'s slot.
    ///
    /// Mirror of [`rotate_left`](Self::rotate_left).
    pub(super) fn rotate_right(&mut self, x: NodeId) {
        let p = self.parent(x);
        debug_assert!(!p.is_nil(), "rotate_right at the root");
        debug_assert_eq!(self.left(p), x, "rotate_right needs a left child");

        let g = self.parent(p);
        let inner = self.right(x);

        self.set_left(p, inner);
        self.set_parent(inner, p);

        self.replace_child(g, p, x);
        self.set_parent(x, g);

        self.set_right(x, p);
        self.set_parent(p, x);

        self.stats.rotations += 1;
    }

    /// Lift `x` over its parent, whichever side it hangs on.
    pub(super) fn rotate_up(&mut self, x: NodeId) {
        if self.left(self.parent(x)) == x {
            self.rotate_right(x);
        } else {
            self.rotate_left(x);
        }
    }
}
