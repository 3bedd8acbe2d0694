use std::collections::TryReserveError;

use thiserror::Error;

/// Errors reported by [`AvlTree`](crate::AvlTree).
///
/// Inserting a duplicate or removing a missing value is never an error.
/// The allocation variants come from [`AvlTree::try_insert`](crate::AvlTree::try_insert);
/// the rest are invariant violations found by validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AvlError {
    #[error("failed to allocate tree node: {0}")]
    AllocFailed(#[from] TryReserveError),
    #[error("node arena is full ({} nodes)", u32::MAX)]
    CapacityExceeded,
    #[error("node order violated")]
    OrderViolated,
    #[error("cached height mismatch: expected {expected}, got {actual}")]
    HeightMismatch { expected: i32, actual: i32 },
    #[error("AVL balance violated: balance factor {balance}")]
    BalanceViolated { balance: i32 },
    #[error("{reachable} of {total} arena nodes reachable from root")]
    UnreachableNodes { reachable: usize, total: usize },
    #[error("node referenced from more than one slot")]
    DuplicateReference,
    #[error("link to node {index} points outside the arena")]
    DanglingLink { index: u32 },
}
