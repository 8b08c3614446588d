//! Configuration constants and tree settings.

use crate::common::error::{Error, Result};

/// Marker printed for a sentinel leaf in level-order renders.
pub const LEAF_MARKER: &str = "L";

/// Arena slots reserved up front by [`TreeConfig::default`].
pub const DEFAULT_CAPACITY: usize = 16;

/// Maximum number of real nodes in one tree.
///
/// Node ids are `u32` and `u32::MAX` is reserved for the sentinel leaf,
/// so the arena can address `u32::MAX` slots (0 through `u32::MAX - 1`).
pub const MAX_CAPACITY: usize = u32::MAX as usize;

/// Per-tree settings.
///
/// # Example
/// ```
/// use rbstore::TreeConfig;
///
/// let config = TreeConfig::new()
///     .with_initial_capacity(1024)
///     .with_verify_invariants(true);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Number of arena slots to allocate when the tree is created.
    pub initial_capacity: usize,

    /// Run [`RbTree::validate`](crate::RbTree::validate) after every
    /// mutation and panic on a violation.
    pub verify_invariants: bool,
}

impl TreeConfig {
    /// Default settings: small arena, verification in debug builds only.
    pub fn new() -> Self {
        Self {
            initial_capacity: DEFAULT_CAPACITY,
            verify_invariants: cfg!(debug_assertions),
        }
    }

    pub fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    pub fn with_verify_invariants(mut self, verify_invariants: bool) -> Self {
        self.verify_invariants = verify_invariants;
        self
    }

    /// Reject settings the arena cannot honour.
    ///
    /// # Errors
    /// - `Error::InvalidConfig` if `initial_capacity` exceeds [`MAX_CAPACITY`]
    pub fn validate(&self) -> Result<()> {
        if self.initial_capacity > MAX_CAPACITY {
            return Err(Error::InvalidConfig(format!(
                "initial_capacity {} exceeds maximum {}",
                self.initial_capacity, MAX_CAPACITY
            )));
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new()
    }
}
