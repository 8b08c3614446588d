//! Insertion and the insert fix-up state machine.
//!
//! A new node is attached red in place of a sentinel leaf, then
//! [`RbTree::insert_step`] runs repeatedly, each call classifying the
//! current node into exactly one [`InsertCase`] and applying it:
//!
//! | Case          | Action                                        | Next        |
//! |---------------|-----------------------------------------------|-------------|
//! | `Root`        | paint black                                   | done        |
//! | `BlackParent` | nothing                                       | done        |
//! | `RedUncle`    | parent + uncle black, grandparent red         | grandparent |
//! | `ZigZag`      | rotate node over parent                       | old parent  |
//! | `Straight`    | parent black, grandparent red, rotate parent  | done        |
//!
//! After `ZigZag` the old parent sits below the node in a straight line,
//! so the following step always lands in `Straight`.

use std::cmp::Ordering;

use log::trace;

use super::node::{Color, Node};
use super::RbTree;
use crate::common::config::MAX_CAPACITY;
use crate::common::NodeId;

/// Shape around a freshly red node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertCase {
    /// The node is the root.
    Root,
    /// The parent is black; nothing to fix.
    BlackParent,
    /// Parent and uncle are both red.
    RedUncle,
    /// Uncle black, node and parent hang on opposite sides.
    ZigZag,
    /// Uncle black, node and parent hang on the same side.
    Straight,
}

/// Result of one fix-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Step {
    Done,
    Continue(NodeId),
}

impl<K: Ord, V> RbTree<K, V> {
    /// Insert `key` with `value`.
    ///
    /// Returns `false` and leaves the tree untouched (colors included)
    /// when `key` is already present.
    ///
    /// # Panics
    /// Panics if the tree already holds [`MAX_CAPACITY`] entries.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        let Some(id) = self.attach(key, value) else {
            return false;
        };

        self.rebalance_after_insert(id);
        self.stats.inserts += 1;
        self.check_after("insert");
        true
    }

    /// Place a red node where the search for `key` hits a sentinel.
    ///
    /// Returns `None` for a duplicate key. Does not rebalance.
    pub(super) fn attach(&mut self, key: K, value: V) -> Option<NodeId> {
        let mut parent = NodeId::NIL;
        let mut current = self.root;
        let mut went_left = false;

        while !current.is_nil() {
            parent = current;
            let node = self.node(current);
            match key.cmp(&node.key) {
                Ordering::Equal => return None,
                Ordering::Less => {
                    went_left = true;
                    current = node.left;
                }
                Ordering::Greater => {
                    went_left = false;
                    current = node.right;
                }
            }
        }

        assert!(self.nodes.len() < MAX_CAPACITY, "tree is full");
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push(Node::new(key, value, parent));

        if parent.is_nil() {
            self.root = id;
        } else if went_left {
            self.set_left(parent, id);
        } else {
            self.set_right(parent, id);
        }

        Some(id)
    }
}

impl<K, V> RbTree<K, V> {
    /// Walk fix-up steps upward from `id` until the tree is valid again.
    pub(super) fn rebalance_after_insert(&mut self, mut id: NodeId) {
        while let Step::Continue(next) = self.insert_step(id) {
            id = next;
        }
    }

    /// Decide which case applies at red node `id`.
    pub(crate) fn classify_insert(&self, id: NodeId) -> InsertCase {
        let parent = self.parent(id);
        if parent.is_nil() {
            return InsertCase::Root;
        }
        if !self.is_red(parent) {
            return InsertCase::BlackParent;
        }

        // A red parent is never the root, so the grandparent is real.
        let grandparent = self.parent(parent);
        if self.is_red(self.sibling(parent, grandparent)) {
            return InsertCase::RedUncle;
        }

        let node_is_left = self.left(parent) == id;
        let parent_is_left = self.left(grandparent) == parent;
        if node_is_left == parent_is_left {
            InsertCase::Straight
        } else {
            InsertCase::ZigZag
        }
    }

    /// Apply exactly one fix-up case at `id`.
    pub(crate) fn insert_step(&mut self, id: NodeId) -> Step {
        let case = self.classify_insert(id);
        trace!("insert fix-up at {}: {:?}", id, case);

        match case {
            InsertCase::Root => {
                self.set_color(id, Color::Black);
                Step::Done
            }
            InsertCase::BlackParent => Step::Done,
            InsertCase::RedUncle => {
                let parent = self.parent(id);
                let grandparent = self.parent(parent);
                let uncle = self.sibling(parent, grandparent);
                self.set_color(parent, Color::Black);
                self.set_color(uncle, Color::Black);
                self.set_color(grandparent, Color::Red);
                Step::Continue(grandparent)
            }
            InsertCase::ZigZag => {
                let parent = self.parent(id);
                self.rotate_up(id);
                Step::Continue(parent)
            }
            InsertCase::Straight => {
                let parent = self.parent(id);
                let grandparent = self.parent(parent);
                self.set_color(parent, Color::Black);
                self.set_color(grandparent, Color::Red);
                self.rotate_up(parent);
                Step::Done
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TreeConfig;

    fn quiet_tree() -> RbTree<&'static str, u32> {
        let config = TreeConfig::new().with_verify_invariants(false);
        RbTree::with_config(config).unwrap()
    }

    #[test]
    fn test_first_insert_paints_root_black() {
        let mut tree = RbTree::new();
        assert!(tree.insert("A", 1));

        let root = tree.root;
        assert_eq!(tree.node(root).key, "A");
        assert_eq!(tree.color(root), Color::Black);
        assert!(tree.left(root).is_nil());
        assert!(tree.right(root).is_nil());
    }

    #[test]
    fn test_duplicate_insert_changes_nothing() {
        let mut tree: RbTree<&str, u32> = [("A", 1), ("B", 2)].into_iter().collect();
        let colors: Vec<Color> = tree.nodes.iter().map(|n| n.color).collect();
        let stats = tree.stats();

        assert!(!tree.insert("A", 99));

        assert_eq!(tree.get("A"), Some(&1));
        assert_eq!(tree.len(), 2);
        let after: Vec<Color> = tree.nodes.iter().map(|n| n.color).collect();
        assert_eq!(colors, after);
        assert_eq!(tree.stats(), stats);
    }

    #[test]
    fn test_straight_right_right_case() {
        let mut tree = quiet_tree();
        let one = tree.attach("1", 1).unwrap();
        assert_eq!(tree.classify_insert(one), InsertCase::Root);
        tree.rebalance_after_insert(one);

        let two = tree.attach("2", 2).unwrap();
        assert_eq!(tree.classify_insert(two), InsertCase::BlackParent);

        let three = tree.attach("3", 3).unwrap();
        assert_eq!(tree.classify_insert(three), InsertCase::Straight);
        assert_eq!(tree.insert_step(three), Step::Done);

        assert_eq!(tree.root, two);
        assert_eq!(tree.color(two), Color::Black);
        assert_eq!(tree.left(two), one);
        assert_eq!(tree.right(two), three);
        assert_eq!(tree.color(one), Color::Red);
        assert_eq!(tree.color(three), Color::Red);
    }

    #[test]
    fn test_zig_zag_then_straight() {
        let mut tree = quiet_tree();
        let c = tree.attach("C", 0).unwrap();
        tree.rebalance_after_insert(c);
        let a = tree.attach("A", 0).unwrap();
        let b = tree.attach("B", 0).unwrap();

        // B is A's right child, A is C's left child.
        assert_eq!(tree.classify_insert(b), InsertCase::ZigZag);
        assert_eq!(tree.insert_step(b), Step::Continue(a));

        // A now hangs left of B, B left of C: a straight line.
        assert_eq!(tree.left(b), a);
        assert_eq!(tree.classify_insert(a), InsertCase::Straight);
        assert_eq!(tree.insert_step(a), Step::Done);

        assert_eq!(tree.root, b);
        assert_eq!(tree.color(b), Color::Black);
        assert_eq!(tree.left(b), a);
        assert_eq!(tree.right(b), c);
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_red_uncle_recolors_and_climbs() {
        let mut tree = quiet_tree();
        for key in ["B", "A", "C"] {
            let id = tree.attach(key, 0).unwrap();
            tree.rebalance_after_insert(id);
        }
        let b = tree.root;
        let d = tree.attach("D", 0).unwrap();

        assert_eq!(tree.classify_insert(d), InsertCase::RedUncle);
        assert_eq!(tree.insert_step(d), Step::Continue(b));
        assert_eq!(tree.color(b), Color::Red);

        assert_eq!(tree.classify_insert(b), InsertCase::Root);
        assert_eq!(tree.insert_step(b), Step::Done);
        assert_eq!(tree.color(b), Color::Black);
        assert_eq!(tree.validate(), Ok(2));
    }

    #[test]
    fn test_mirror_zig_zag() {
        let mut tree: RbTree<u32, ()> = RbTree::new();
        for key in [10, 20, 15] {
            tree.insert(key, ());
        }
        assert_eq!(tree.render(), "15\n10 20\nL L L L");
    }

    #[test]
    fn test_ascending_and_descending_runs_stay_valid() {
        let mut up = RbTree::new();
        let mut down = RbTree::new();
        for key in 0..512u32 {
            assert!(up.insert(key, key));
            assert!(down.insert(1000 - key, key));
        }
        assert!(up.validate().is_ok());
        assert!(down.validate().is_ok());
        // Height stays within 2 * log2(n + 1).
        assert!(up.height() <= 18);
        assert!(down.height() <= 18);
    }
}
