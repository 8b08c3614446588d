//! Deletion and the delete fix-up state machine.
//!
//! A node with two real children first trades its entry with its in-order
//! successor, so the node actually unlinked always has at most one real
//! child. Unlinking a BLACK node leaves one path short by a black node;
//! the "doubly black" position is then pushed upward or absorbed by
//! [`RbTree::remove_step`].
//!
//! The sentinel leaf is shared and carries no parent, so every step takes
//! the parent of the doubly-black position explicitly.
//!
//! | Case            | Action                                            | Next              |
//! |-----------------|---------------------------------------------------|-------------------|
//! | `Absorbed`      | paint node black                                  | done              |
//! | `RedSibling`    | swap sibling/parent colors, rotate sibling up     | same node         |
//! | `BlackNephews`  | paint sibling red                                 | parent            |
//! | `NearNephewRed` | near nephew black, sibling red, rotate near up    | same node         |
//! | `FarNephewRed`  | sibling takes parent color, rotate sibling up     | done              |

use std::borrow::Borrow;
use std::mem;

use log::{debug, trace};

use super::node::{Color, Node};
use super::RbTree;
use crate::common::NodeId;

/// Shape around a doubly-black position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RemoveCase {
    /// The node is red or is the root; painting it black settles the debt.
    Absorbed,
    /// Sibling is red.
    RedSibling,
    /// Sibling and both nephews are black.
    BlackNephews,
    /// Sibling black, far nephew black, near nephew red.
    NearNephewRed,
    /// Sibling black, far nephew red.
    FarNephewRed,
}

/// Result of one delete fix-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RemoveStep {
    Done,
    Continue { node: NodeId, parent: NodeId },
}

impl<K: Ord, V> RbTree<K, V> {
    /// Remove `key`, returning its value.
    ///
    /// Returns `None` and leaves the tree untouched when `key` is absent.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let target = self.find(key);
        if target.is_nil() {
            return None;
        }

        let node = self.remove_node(target);
        self.stats.deletes += 1;
        self.check_after("remove");
        Some(node.value)
    }

    /// Remove `key`. Returns `false` if it was absent.
    pub fn delete<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove(key).is_some()
    }
}

impl<K, V> RbTree<K, V> {
    /// Unlink the entry at `target`, restore the invariants, and hand the
    /// entry back.
    fn remove_node(&mut self, mut target: NodeId) -> Node<K, V> {
        if !self.left(target).is_nil() && !self.right(target).is_nil() {
            let successor = self.minimum(self.right(target));
            self.swap_entries(target, successor);
            target = successor;
        }

        let child = if self.left(target).is_nil() {
            self.right(target)
        } else {
            self.left(target)
        };
        let parent = self.parent(target);

        self.replace_child(parent, target, child);
        self.set_parent(child, parent);

        if self.color(target) == Color::Black {
            self.rebalance_after_remove(child, parent);
        }

        self.release(target)
    }

    /// Exchange key and value between two distinct nodes, leaving links and
    /// colors in place.
    fn swap_entries(&mut self, a: NodeId, b: NodeId) {
        debug_assert_ne!(a, b);
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let (head, tail) = self.nodes.split_at_mut(high.index());
        let first = &mut head[low.index()];
        let second = &mut tail[0];
        mem::swap(&mut first.key, &mut second.key);
        mem::swap(&mut first.value, &mut second.value);
    }

    /// Drop the unlinked node at `id` from the arena.
    ///
    /// The last arena slot is moved into `id` to keep storage dense, so
    /// every link to the moved node is retargeted first.
    fn release(&mut self, id: NodeId) -> Node<K, V> {
        let last = NodeId::from_index(self.nodes.len() - 1);

        if id != last {
            debug!("compacting arena: {} moves to {}", last, id);
            let (parent, left, right) = (self.parent(last), self.left(last), self.right(last));
            self.replace_child(parent, last, id);
            self.set_parent(left, id);
            self.set_parent(right, id);
        }

        self.nodes.swap_remove(id.index())
    }

    /// Walk fix-up steps upward until the black debt is settled.
    fn rebalance_after_remove(&mut self, mut node: NodeId, mut parent: NodeId) {
        while let RemoveStep::Continue {
            node: next,
            parent: next_parent,
        } = self.remove_step(node, parent)
        {
            node = next;
            parent = next_parent;
        }
    }

    /// Decide which case applies at doubly-black `node` under `parent`.
    pub(crate) fn classify_remove(&self, node: NodeId, parent: NodeId) -> RemoveCase {
        if node == self.root || self.is_red(node) {
            return RemoveCase::Absorbed;
        }

        let sibling = self.sibling(node, parent);
        if self.is_red(sibling) {
            return RemoveCase::RedSibling;
        }

        let (near, far) = self.nephews(node, parent, sibling);
        if self.is_red(far) {
            RemoveCase::FarNephewRed
        } else if self.is_red(near) {
            RemoveCase::NearNephewRed
        } else {
            RemoveCase::BlackNephews
        }
    }

    /// Apply exactly one delete fix-up case.
    pub(crate) fn remove_step(&mut self, node: NodeId, parent: NodeId) -> RemoveStep {
        let case = self.classify_remove(node, parent);
        trace!("remove fix-up at {} under {}: {:?}", node, parent, case);

        match case {
            RemoveCase::Absorbed => {
                self.set_color(node, Color::Black);
                RemoveStep::Done
            }
            RemoveCase::RedSibling => {
                let sibling = self.sibling(node, parent);
                self.set_color(sibling, Color::Black);
                self.set_color(parent, Color::Red);
                self.rotate_up(sibling);
                RemoveStep::Continue { node, parent }
            }
            RemoveCase::BlackNephews => {
                let sibling = self.sibling(node, parent);
                self.set_color(sibling, Color::Red);
                RemoveStep::Continue {
                    node: parent,
                    parent: self.parent(parent),
                }
            }
            RemoveCase::NearNephewRed => {
                let sibling = self.sibling(node, parent);
                let (near, _) = self.nephews(node, parent, sibling);
                self.set_color(near, Color::Black);
                self.set_color(sibling, Color::Red);
                self.rotate_up(near);
                RemoveStep::Continue { node, parent }
            }
            RemoveCase::FarNephewRed => {
                let sibling = self.sibling(node, parent);
                let (_, far) = self.nephews(node, parent, sibling);
                self.set_color(sibling, self.color(parent));
                self.set_color(parent, Color::Black);
                self.set_color(far, Color::Black);
                self.rotate_up(sibling);
                RemoveStep::Done
            }
        }
    }

    /// Sibling's children as (near, far) relative to `node`.
    fn nephews(&self, node: NodeId, parent: NodeId, sibling: NodeId) -> (NodeId, NodeId) {
        if self.left(parent) == sibling {
            (self.right(sibling), self.left(sibling))
        } else {
            (self.left(sibling), self.right(sibling))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::TreeConfig;

    fn letters(keys: &str) -> RbTree<char, u32> {
        keys.chars().zip(0..).collect()
    }

    #[test]
    fn test_remove_missing_key() {
        let mut tree = letters("ABC");
        let stats = tree.stats();
        assert_eq!(tree.remove(&'Z'), None);
        assert!(!tree.delete(&'Z'));
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.stats(), stats);
    }

    #[test]
    fn test_remove_only_node() {
        let mut tree = letters("A");
        assert_eq!(tree.remove(&'A'), Some(0));
        assert!(tree.is_empty());
        assert!(tree.root.is_nil());
        assert_eq!(tree.validate(), Ok(0));
    }

    #[test]
    fn test_remove_red_leaf_needs_no_fixup() {
        let mut tree = letters("BAC");
        tree.reset_stats();
        assert!(tree.delete(&'C'));
        assert_eq!(tree.stats().rotations, 0);
        assert_eq!(tree.stats().recolors, 0);
        assert_eq!(tree.render(), "B\nA L\nL L");
    }

    #[test]
    fn test_remove_root_with_two_children_uses_successor() {
        let mut tree = letters("BAC");
        assert_eq!(tree.remove(&'B'), Some(0));
        assert_eq!(tree.render(), "C\nA L\nL L");
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_far_nephew_case() {
        // B(b): A(b), D(r): C(b), E(b): -, F(r)
        let mut tree = letters("ABCDEF");
        let d = tree.find(&'D');
        let c = tree.find(&'C');
        assert_eq!(tree.parent(c), d);

        assert!(tree.delete(&'C'));

        assert_eq!(tree.render(), "B\nA E\nL L D F\nL L L L");
        assert!(tree.validate().is_ok());
        assert_eq!(tree.get(&'C'), None);
    }

    #[test]
    fn test_classify_black_leaf_cases() {
        let config = TreeConfig::new().with_verify_invariants(false);
        let mut tree: RbTree<u32, ()> = RbTree::with_config(config).unwrap();
        for key in [20, 10, 30, 25] {
            tree.insert(key, ());
        }
        // 20(b): 10(b), 30(b): 25(r), -
        let ten = tree.find(&10);
        let twenty = tree.find(&20);
        let thirty = tree.find(&30);

        // Treat 10 as the doubly-black position.
        assert_eq!(tree.classify_remove(ten, twenty), RemoveCase::NearNephewRed);
        assert_eq!(tree.classify_remove(tree.root, NodeId::NIL), RemoveCase::Absorbed);

        let twenty_five = tree.find(&25);
        assert_eq!(tree.classify_remove(twenty_five, thirty), RemoveCase::Absorbed);
    }

    #[test]
    fn test_near_nephew_then_far_nephew() {
        let mut tree: RbTree<u32, ()> = [20, 10, 30, 25].into_iter().map(|k| (k, ())).collect();
        tree.reset_stats();

        assert!(tree.delete(&10));

        // Double rotation: 25 ends up on top.
        assert_eq!(tree.render(), "25\n20 30\nL L L L");
        assert_eq!(tree.stats().rotations, 2);
        assert_eq!(tree.validate(), Ok(2));
    }

    #[test]
    fn test_red_sibling_case() {
        let mut tree: RbTree<u32, ()> = (1..=6).map(|k| (k, ())).collect();
        // 2(b): 1(b), 4(r): 3(b), 5(b): -, 6(r)
        let one = tree.find(&1);
        let two = tree.find(&2);
        assert_eq!(tree.classify_remove(one, two), RemoveCase::RedSibling);

        assert!(tree.delete(&1));
        assert!(tree.validate().is_ok());
        let keys: Vec<u32> = tree.keys().copied().collect();
        assert_eq!(keys, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_black_nephews_pushes_up() {
        let mut tree: RbTree<u32, ()> = [2, 1, 3].into_iter().map(|k| (k, ())).collect();
        // Make every node black: 2(b): 1(b), 3(b).
        let one = tree.find(&1);
        let three = tree.find(&3);
        tree.set_color(one, Color::Black);
        tree.set_color(three, Color::Black);
        assert_eq!(tree.validate(), Ok(2));

        assert!(tree.delete(&1));
        assert_eq!(tree.validate(), Ok(1));
        let three = tree.find(&3);
        assert_eq!(tree.color(three), Color::Red);
    }

    #[test]
    fn test_arena_stays_dense() {
        let mut tree: RbTree<u32, u32> = (0..64).map(|k| (k, k * 10)).collect();
        for key in (0..64).step_by(3) {
            assert_eq!(tree.remove(&key), Some(key * 10));
            assert_eq!(tree.nodes.len(), tree.len());
            assert!(tree.validate().is_ok());
        }
        for key in 0..64u32 {
            let expected = if key % 3 == 0 { None } else { Some(key * 10) };
            assert_eq!(tree.get(&key).copied(), expected);
        }
    }

    #[test]
    fn test_drain_everything() {
        let mut tree: RbTree<u32, ()> = (0..100).map(|k| (k, ())).collect();
        for key in (0..100).rev() {
            assert!(tree.delete(&key));
        }
        assert!(tree.is_empty());
        assert!(tree.root.is_nil());
    }
}
