//! Structural counters.

use std::fmt;

/// Counts of structural work done by a tree.
///
/// The tree is single-threaded, so these are plain counters updated
/// through `&mut self`. [`RbTree::stats`](super::RbTree::stats) hands out
/// a copy that can be printed or compared freely.
///
/// # Example
/// ```
/// use rbstore::RbTree;
///
/// let mut tree = RbTree::new();
/// for key in ["1", "2", "3"] {
///     tree.insert(key, ());
/// }
/// let stats = tree.stats();
/// assert_eq!(stats.inserts, 3);
/// assert_eq!(stats.rotations, 1);
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    /// Successful insertions.
    pub inserts: u64,

    /// Successful deletions.
    pub deletes: u64,

    /// Single rotations (a double rotation counts as two).
    pub rotations: u64,

    /// Color flips on real nodes.
    pub recolors: u64,
}

impl TreeStats {
    /// Average rotations per successful mutation.
    pub fn rotations_per_op(&self) -> f64 {
        let ops = self.inserts + self.deletes;
        if ops == 0 {
            0.0
        } else {
            self.rotations as f64 / ops as f64
        }
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ inserts: {}, deletes: {}, rotations: {}, recolors: {}, rotations/op: {:.2} }}",
            self.inserts,
            self.deletes,
            self.rotations,
            self.recolors,
            self.rotations_per_op()
        )
    }
}
