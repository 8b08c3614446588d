//! Index structures.
//!
//! - [`rbtree`] - In-memory ordered map backed by a red-black tree

pub mod rbtree;

pub use rbtree::RbTree;
