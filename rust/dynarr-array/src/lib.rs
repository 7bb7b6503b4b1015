//! A dynamically resizable array over a manually managed, contiguous buffer.
//!
//! [`DynArray`] owns its storage outright: the buffer is requested from the
//! global allocator, relocated when the capacity changes and released on
//! drop. Appends grow the capacity geometrically (2, 4, 8, ...), which keeps
//! [`DynArray::push_back`] amortized O(1), while explicit requests such as
//! [`DynArray::reserve`] and [`DynArray::shrink_to_fit`] allocate exactly the
//! requested slot count.
//!
//! Checked operations report violations through [`dynarr_common::Error`];
//! indexing is the unchecked fast path and panics on a bad index.

mod dyn_array;
mod into_iter;
mod macros;
mod raw;

#[cfg(test)]
mod tests;

pub use dyn_array::DynArray;
pub use dynarr_common::{Error, ErrorKind, Result};
pub use into_iter::IntoIter;
