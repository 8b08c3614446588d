//! Red-black tree ordered map.
//!
//! # Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      RbTree<K, V>                        │
//! │  root: NodeId ──▶ nodes: Vec<Node<K, V>>                 │
//! │                   [N0] [N1] [N2] ...  (dense, no holes)  │
//! │                                                          │
//! │  NodeId::NIL = shared BLACK sentinel leaf, never stored  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The arena owns every node. `parent`/`left`/`right` are plain
//! [`NodeId`] indices, so back-references never own anything.
//!
//! # Components
//! - `node` - Node shape, colors, link accessors
//! - `rotate` - Rotation primitives
//! - `insert` - Insertion and its fix-up state machine
//! - `delete` - Deletion and its fix-up state machine
//! - `iter` - In-order and level-order traversal
//! - `validate` - Invariant checker
//! - `stats` - Structural counters

mod delete;
mod insert;
mod iter;
mod node;
mod rotate;
mod stats;
mod validate;

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;

use crate::common::config::LEAF_MARKER;
use crate::common::{NodeId, Result, TreeConfig};

pub use iter::{Iter, Keys, Label, LevelEntry, LevelOrder, Values};
pub use node::Color;
pub use stats::TreeStats;

use node::Node;

/// An ordered map backed by a red-black tree.
///
/// # Invariants
/// After every completed `insert` / `delete`:
/// 1. The root, if present, is BLACK.
/// 2. No RED node has a RED child.
/// 3. Every path from a node down to a sentinel leaf sees the same
///    number of BLACK nodes.
/// 4. Sentinel leaves ([`NodeId::NIL`]) are BLACK and hold nothing.
/// 5. Keys are unique.
///
/// # Thread Safety
/// None. Mutation takes `&mut self`; callers sharing a tree across
/// threads must wrap it in a lock themselves.
///
/// # Usage
/// ```
/// use rbstore::RbTree;
///
/// let mut tree = RbTree::new();
/// assert!(tree.insert("b", 2));
/// assert!(tree.insert("a", 1));
/// assert!(!tree.insert("a", 9)); // duplicate, no change
///
/// assert_eq!(tree.get("a"), Some(&1));
/// assert!(tree.delete("a"));
/// assert_eq!(tree.get("a"), None);
/// ```
pub struct RbTree<K, V> {
    /// Every real node, densely packed.
    nodes: Vec<Node<K, V>>,

    /// Root node, or `NIL` for an empty tree.
    root: NodeId,

    /// Settings fixed at construction.
    config: TreeConfig,

    /// Structural counters.
    stats: TreeStats,
}

impl<K, V> RbTree<K, V> {
    /// Create an empty tree with default settings.
    pub fn new() -> Self {
        Self::from_valid_config(TreeConfig::default())
    }

    /// Create an empty tree with the given settings.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if the settings are rejected by
    ///   [`TreeConfig::validate`]
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TreeConfig) -> Self {
        Self {
            nodes: Vec::with_capacity(config.initial_capacity),
            root: NodeId::NIL,
            config,
            stats: TreeStats::default(),
        }
    }

    /// Number of keys stored.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Drop every entry. Settings and stats are kept.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = NodeId::NIL;
    }

    /// Settings this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Copy of the structural counters.
    pub fn stats(&self) -> TreeStats {
        self.stats
    }

    /// Zero the structural counters.
    pub fn reset_stats(&mut self) {
        self.stats = TreeStats::default();
    }

    /// Number of real nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        self.level_order()
            .filter(|entry| matches!(entry.label, Label::Key(_)))
            .map(|entry| entry.depth + 1)
            .max()
            .unwrap_or(0)
    }

    /// Smallest entry.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        if self.root.is_nil() {
            return None;
        }
        let node = self.node(self.minimum(self.root));
        Some((&node.key, &node.value))
    }

    /// Largest entry.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        if self.root.is_nil() {
            return None;
        }
        let node = self.node(self.maximum(self.root));
        Some((&node.key, &node.value))
    }

    /// Level-order dump, one line per depth.
    ///
    /// Keys are separated by spaces and sentinel leaves print as
    /// [`LEAF_MARKER`]. An empty tree renders as an empty string.
    ///
    /// ```
    /// use rbstore::RbTree;
    ///
    /// let tree: RbTree<_, _> = [("1", ()), ("2", ()), ("3", ())].into_iter().collect();
    /// assert_eq!(tree.render(), "2\n1 3\nL L L L");
    /// ```
    pub fn render(&self) -> String
    where
        K: fmt::Display,
    {
        let mut out = String::new();
        let mut current_depth = None;

        for entry in self.level_order() {
            if current_depth == Some(entry.depth) {
                out.push(' ');
            } else {
                if current_depth.is_some() {
                    out.push('\n');
                }
                current_depth = Some(entry.depth);
            }

            match entry.label {
                Label::Key(key) => out.push_str(&key.to_string()),
                Label::Leaf => out.push_str(LEAF_MARKER),
            }
        }

        out
    }

    /// Panic if verification is on and the tree is broken.
    ///
    /// A violation here is a bug in this module, never a caller error.
    fn check_after(&self, op: &str)
    where
        K: Ord,
    {
        if self.config.verify_invariants {
            if let Err(err) = self.validate() {
                panic!("red-black invariant violated after {}: {}", op, err);
            }
        }
    }
}

impl<K: Ord, V> RbTree<K, V> {
    // ========================================================================
    // Lookup
    // ========================================================================

    /// Locate the node holding `key`, or `NIL`.
    ///
    /// Descends from the root comparing at each real node; reaching the
    /// sentinel means the key is absent. Cost is bounded by tree height.
    fn find<Q>(&self, key: &Q) -> NodeId
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root;

        while !current.is_nil() {
            let node = self.node(current);
            match key.cmp(node.key.borrow()) {
                Ordering::Equal => return current,
                Ordering::Less => current = node.left,
                Ordering::Greater => current = node.right,
            }
        }

        NodeId::NIL
    }

    /// Look up the value stored under `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key);
        if id.is_nil() {
            None
        } else {
            Some(&self.node(id).value)
        }
    }

    /// Mutable access to the value stored under `key`.
    ///
    /// Only the value is reachable; keys and colors stay untouched.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let id = self.find(key);
        if id.is_nil() {
            None
        } else {
            Some(&mut self.node_mut(id).value)
        }
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        !self.find(key).is_nil()
    }
}

impl<K, V> Default for RbTree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for RbTree<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for RbTree<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, V> Extend<(K, V)> for RbTree<K, V> {
    /// Duplicate keys keep the value inserted first.
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[test]
    fn test_empty_tree() {
        let tree: RbTree<String, u32> = RbTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.get("anything"), None);
        assert_eq!(tree.height(), 0);
        assert_eq!(tree.first_key_value(), None);
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn test_with_config_rejects_oversized_arena() {
        let config = TreeConfig::new().with_initial_capacity(usize::MAX);
        let result: Result<RbTree<u32, u32>> = RbTree::with_config(config);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_with_config_keeps_settings() {
        let config = TreeConfig::new().with_verify_invariants(true);
        let tree: RbTree<u32, u32> = RbTree::with_config(config).unwrap();
        assert_eq!(tree.config(), &config);
    }

    #[test]
    fn test_get_mut_updates_value() {
        let mut tree = RbTree::new();
        tree.insert("k", 1);
        *tree.get_mut("k").unwrap() += 10;
        assert_eq!(tree.get("k"), Some(&11));
        assert!(tree.get_mut("missing").is_none());
    }

    #[test]
    fn test_first_and_last() {
        let tree: RbTree<u32, char> = [(5, 'e'), (1, 'a'), (9, 'i')].into_iter().collect();
        assert_eq!(tree.first_key_value(), Some((&1, &'a')));
        assert_eq!(tree.last_key_value(), Some((&9, &'i')));
    }

    #[test]
    fn test_clear() {
        let mut tree: RbTree<u32, ()> = (0..10).map(|k| (k, ())).collect();
        tree.clear();
        assert!(tree.is_empty());
        assert!(!tree.contains_key(&3));
        assert!(tree.insert(3, ()));
        assert_eq!(tree.validate(), Ok(1));
    }

    #[test]
    fn test_extend_keeps_first_value() {
        let mut tree = RbTree::new();
        tree.extend([("a", 1), ("a", 2)]);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get("a"), Some(&1));
    }

    #[test]
    fn test_render_a_through_f() {
        let tree: RbTree<&str, ()> = ["A", "B", "C", "D", "E", "F"]
            .into_iter()
            .map(|k| (k, ()))
            .collect();
        assert_eq!(tree.render(), "B\nA D\nL L C E\nL L L F\nL L");
        assert_eq!(tree.height(), 4);
    }

    #[test]
    fn test_debug_is_ordered_map() {
        let tree: RbTree<u32, u32> = [(2, 20), (1, 10)].into_iter().collect();
        assert_eq!(format!("{:?}", tree), "{1: 10, 2: 20}");
    }
}
