//! In-order and level-order traversal.

use std::collections::VecDeque;
use std::iter::FusedIterator;

use super::RbTree;
use crate::common::NodeId;

impl<K, V> RbTree<K, V> {
    /// Entries in ascending key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter::new(self)
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Values in ascending key order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Breadth-first walk yielding every real node and every sentinel leaf
    /// below it, tagged with its depth.
    ///
    /// Depth `d` holds at most `2^d` entries. Each call starts a fresh walk.
    ///
    /// ```
    /// use rbstore::{Label, RbTree};
    ///
    /// let tree: RbTree<_, _> = [("A", ())].into_iter().collect();
    /// let dump: Vec<_> = tree.level_order().map(|e| (e.depth, e.label)).collect();
    /// assert_eq!(dump, vec![(0, Label::Key(&"A")), (1, Label::Leaf), (1, Label::Leaf)]);
    /// ```
    pub fn level_order(&self) -> LevelOrder<'_, K, V> {
        LevelOrder::new(self)
    }
}

// ============================================================================
// In-order
// ============================================================================

/// In-order iterator over `(&K, &V)`.
pub struct Iter<'a, K, V> {
    tree: &'a RbTree<K, V>,
    /// Nodes whose left subtree is done but which are not yet yielded.
    stack: Vec<NodeId>,
    remaining: usize,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn new(tree: &'a RbTree<K, V>) -> Self {
        let mut iter = Self {
            tree,
            stack: Vec::new(),
            remaining: tree.len(),
        };
        iter.push_left_spine(tree.root);
        iter
    }

    fn push_left_spine(&mut self, mut id: NodeId) {
        while !id.is_nil() {
            self.stack.push(id);
            id = self.tree.left(id);
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        self.push_left_spine(self.tree.right(id));
        self.remaining -= 1;

        let node = self.tree.node(id);
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<'a, K, V> IntoIterator for &'a RbTree<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Keys in ascending order.
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

/// Values in ascending key order.
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}

// ============================================================================
// Level-order
// ============================================================================

/// What sits at one level-order position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label<'a, K> {
    /// A real node's key.
    Key(&'a K),
    /// A sentinel leaf.
    Leaf,
}

/// One level-order position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelEntry<'a, K> {
    /// Distance from the root (root is 0).
    pub depth: usize,
    pub label: Label<'a, K>,
}

/// Breadth-first iterator over real nodes and sentinel leaves.
pub struct LevelOrder<'a, K, V> {
    tree: &'a RbTree<K, V>,
    queue: VecDeque<(NodeId, usize)>,
}

impl<'a, K, V> LevelOrder<'a, K, V> {
    fn new(tree: &'a RbTree<K, V>) -> Self {
        let mut queue = VecDeque::new();
        if !tree.root.is_nil() {
            queue.push_back((tree.root, 0));
        }
        Self { tree, queue }
    }
}

impl<'a, K, V> Iterator for LevelOrder<'a, K, V> {
    type Item = LevelEntry<'a, K>;

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.queue.pop_front()?;

        if id.is_nil() {
            return Some(LevelEntry {
                depth,
                label: Label::Leaf,
            });
        }

        let node = self.tree.node(id);
        self.queue.push_back((node.left, depth + 1));
        self.queue.push_back((node.right, depth + 1));

        Some(LevelEntry {
            depth,
            label: Label::Key(&node.key),
        })
    }
}

impl<K, V> FusedIterator for LevelOrder<'_, K, V> {}

impl<K, V> Clone for LevelOrder<'_, K, V> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            queue: self.queue.clone(),
        }
    }
}
