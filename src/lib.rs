//! rbstore - an arena-backed red-black tree ordered map.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            rbstore                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Index Layer (index/rbtree/)                 │   │
//! │  │   insert ──▶ attach ──▶ insert_step* ──▶ rotate_*        │   │
//! │  │   delete ──▶ find ──▶ unlink ──▶ remove_step* ──▶ rotate │   │
//! │  │   get / iter / level_order / validate                    │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node arena: Vec<Node<K, V>>                 │   │
//! │  │   links are NodeId indices, NodeId::NIL = BLACK leaf     │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Common (common/): NodeId, TreeConfig, Error       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - Index structures (red-black tree)
//!
//! # Quick Start
//! ```
//! use rbstore::RbTree;
//!
//! let mut tree = RbTree::new();
//! for key in ["1", "2", "3"] {
//!     tree.insert(key.to_string(), key.len());
//! }
//!
//! assert_eq!(tree.get("2"), Some(&1));
//! assert_eq!(tree.render(), "2\n1 3\nL L L L");
//! assert!(tree.validate().is_ok());
//! ```
//!
//! # Thread Safety
//! None. The tree is a plain single-threaded value; share it behind a
//! lock if several threads need it.

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::LEAF_MARKER;
pub use common::{Error, NodeId, Result, TreeConfig};

pub use index::rbtree::{
    Color, Iter, Keys, Label, LevelEntry, LevelOrder, RbTree, TreeStats, Values,
};
