//! Recoverable errors reported by container accessors.

use thiserror::Error;

/// Errors returned by checked element access.
///
/// Allocation failure is not represented here: it aborts through
/// [`std::alloc::handle_alloc_error`].
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ContainerError {
    /// An index at or past the logical length.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The requested index.
        index: usize,
        /// The logical length at the time of the access.
        len: usize,
    },
    /// `front`, `back` or `top` on a container with no elements.
    #[error("container is empty")]
    Empty,
}

/// Result alias used by fallible container operations.
pub type Result<T> = std::result::Result<T, ContainerError>;
