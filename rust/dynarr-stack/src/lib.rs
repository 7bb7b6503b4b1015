//! A last-in, first-out stack adapter over [`DynArray`].
//!
//! [`Stack`] exposes only the top of the underlying array. Unlike
//! [`DynArray::pop_back`], popping or peeking an empty stack is reported
//! as an error.

use std::fmt;

use dynarr_array::DynArray;
use dynarr_common::{Error, Result};

/// LIFO container backed by exactly one [`DynArray`]. The last element of
/// the array is the top of the stack.
#[derive(Clone, PartialEq, Eq)]
pub struct Stack<T> {
    items: DynArray<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack without allocating.
    pub const fn new() -> Stack<T> {
        Stack {
            items: DynArray::new(),
        }
    }

    /// Creates an empty stack with room for `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Stack<T> {
        Stack {
            items: DynArray::with_capacity(capacity),
        }
    }

    /// Pushes `value` onto the top of the stack.
    pub fn push(&mut self, value: T) {
        self.items.push_back(value);
    }

    /// Removes and returns the top element.
    pub fn pop(&mut self) -> Result<T> {
        self.items.pop_back().ok_or_else(|| Error::empty("pop"))
    }

    /// Returns the top element.
    pub fn top(&self) -> Result<&T> {
        self.items
            .as_slice()
            .last()
            .ok_or_else(|| Error::empty("top"))
    }

    /// Returns the top element for modification.
    pub fn top_mut(&mut self) -> Result<&mut T> {
        self.items
            .as_mut_slice()
            .last_mut()
            .ok_or_else(|| Error::empty("top_mut"))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    /// Exchanges the contents of two stacks without moving any element.
    pub fn swap(&mut self, other: &mut Stack<T>) {
        self.items.swap(&mut other.items);
    }

    /// Returns the underlying array, bottom element first.
    pub fn into_inner(self) -> DynArray<T> {
        self.items
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stack")
            .field("items", &self.items)
            .finish()
    }
}

impl<T> From<DynArray<T>> for Stack<T> {
    fn from(items: DynArray<T>) -> Self {
        Stack { items }
    }
}

impl<T> FromIterator<T> for Stack<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stack {
            items: iter.into_iter().collect(),
        }
    }
}

impl<T> Extend<T> for Stack<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.items.extend(iter);
    }
}
