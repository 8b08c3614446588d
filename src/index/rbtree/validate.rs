//! Invariant checker.

use super::node::Color;
use super::RbTree;
use crate::common::{Error, NodeId, Result};

impl<K: Ord, V> RbTree<K, V> {
    /// Check every structural and color invariant.
    ///
    /// Returns the tree's black-height: the number of BLACK real nodes on
    /// any root-to-leaf path (the shared sentinel is not counted, so an
    /// empty tree has black-height 0).
    ///
    /// # Errors
    /// - `Error::RedRoot` if the root is red
    /// - `Error::RedViolation` if a red node has a red child
    /// - `Error::BlackHeightMismatch` if two paths disagree on black count
    /// - `Error::OrderViolation` if in-order keys are not strictly increasing
    /// - `Error::BrokenLink` if a parent back-reference is wrong
    /// - `Error::LengthMismatch` if some arena node is unreachable or a
    ///   link cycle is found
    pub fn validate(&self) -> Result<usize> {
        if self.root.is_nil() {
            return self.check_length(0).map(|()| 0);
        }

        if !self.parent(self.root).is_nil() {
            return Err(Error::BrokenLink {
                parent: NodeId::NIL,
                child: self.root,
            });
        }
        if self.is_red(self.root) {
            return Err(Error::RedRoot(self.root));
        }

        let mut walk = Walk {
            visited: 0,
            previous: None,
        };
        let black_height = self.check_subtree(self.root, &mut walk)?;
        self.check_length(walk.visited)?;
        Ok(black_height)
    }

    fn check_length(&self, reachable: usize) -> Result<()> {
        if reachable == self.nodes.len() {
            Ok(())
        } else {
            Err(Error::LengthMismatch {
                reachable,
                stored: self.nodes.len(),
            })
        }
    }

    /// Depth-first, in-order check of the subtree at `id`.
    fn check_subtree(&self, id: NodeId, walk: &mut Walk) -> Result<usize> {
        if id.is_nil() {
            return Ok(0);
        }

        walk.visited += 1;
        if walk.visited > self.nodes.len() {
            return Err(Error::LengthMismatch {
                reachable: walk.visited,
                stored: self.nodes.len(),
            });
        }

        let (left, right) = (self.left(id), self.right(id));
        for child in [left, right] {
            if child.is_nil() {
                continue;
            }
            if self.parent(child) != id {
                return Err(Error::BrokenLink { parent: id, child });
            }
            if self.is_red(id) && self.is_red(child) {
                return Err(Error::RedViolation { parent: id, child });
            }
        }

        let left_height = self.check_subtree(left, walk)?;

        if let Some(previous) = walk.previous {
            if self.node(previous).key >= self.node(id).key {
                return Err(Error::OrderViolation(id));
            }
        }
        walk.previous = Some(id);

        let right_height = self.check_subtree(right, walk)?;

        if left_height != right_height {
            return Err(Error::BlackHeightMismatch {
                node: id,
                left: left_height,
                right: right_height,
            });
        }

        Ok(left_height + usize::from(self.color(id) == Color::Black))
    }
}

/// State threaded through one validation walk.
struct Walk {
    visited: usize,
    previous: Option<NodeId>,
}
