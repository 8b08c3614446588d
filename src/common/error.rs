//! Error types for rbstore.
//!
//! Tree operations report duplicates and missing keys through their return
//! values. [`Error`] covers the two things that are actual failures: a
//! configuration the arena cannot honour, and an invariant violation found
//! by [`RbTree::validate`](crate::RbTree::validate).

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in rbstore.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Settings rejected by [`TreeConfig::validate`](crate::TreeConfig::validate).
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// The root is colored RED.
    #[error("Root {0} is red")]
    RedRoot(NodeId),

    /// A RED node has a RED child.
    #[error("Red node {parent} has red child {child}")]
    RedViolation { parent: NodeId, child: NodeId },

    /// Two downward paths from `node` see different black counts.
    #[error("Black-height mismatch under {node}: left {left}, right {right}")]
    BlackHeightMismatch {
        node: NodeId,
        left: usize,
        right: usize,
    },

    /// In-order traversal is not strictly increasing at `node`.
    #[error("Key order violated at {0}")]
    OrderViolation(NodeId),

    /// A child's parent back-reference does not point at its parent.
    #[error("Node {child} does not link back to parent {parent}")]
    BrokenLink { parent: NodeId, child: NodeId },

    /// Reachable node count disagrees with the arena size.
    #[error("Reached {reachable} nodes but arena holds {stored}")]
    LengthMismatch { reachable: usize, stored: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::RedRoot(NodeId::new(0));
        assert_eq!(format!("{}", err), "Root Node(0) is red");

        let err = Error::BlackHeightMismatch {
            node: NodeId::new(2),
            left: 1,
            right: 2,
        };
        assert_eq!(
            format!("{}", err),
            "Black-height mismatch under Node(2): left 1, right 2"
        );
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
