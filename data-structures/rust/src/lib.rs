//! A hand-rolled growable array and the max priority queue built on it.
//!
//! [`DynamicArray`] owns its buffer directly and exposes the exact capacity
//! policy (0 -> 1, then doubling on append; exact on `reserve` and
//! `shrink_to_fit`). [`PriorityQueue`] keeps a binary max-heap inside one
//! `DynamicArray` and never touches memory itself.
//!
//! Checked accessors return [`ContainerError`]; `pop`/`pop_back` on an empty
//! container are silent no-ops that return `None`.

#![deny(rustdoc::broken_intra_doc_links)]

mod dynamic_array;
mod error;
mod priority_queue;
mod raw_buf;

pub use dynamic_array::{Cursor, CursorMut, DynamicArray, IntoIter};
pub use error::{ContainerError, Result};
pub use priority_queue::PriorityQueue;
