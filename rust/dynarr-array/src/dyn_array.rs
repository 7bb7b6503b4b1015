use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::Rev;
use std::mem::{self, ManuallyDrop};
use std::ops::{Deref, DerefMut, Index, IndexMut};
use std::ptr;
use std::slice::{self, SliceIndex};

use dynarr_common::{
    Error, Result,
    result::{verify_index, verify_position, verify_range},
};

use crate::into_iter::IntoIter;
use crate::raw::{RawBuffer, capacity_overflow};

/// A growable array over a single, exclusively owned contiguous buffer.
///
/// `DynArray` keeps `len` live elements at the front of a buffer of
/// `capacity` slots. Slots in `[len, capacity)` are allocated but hold no
/// value. The buffer is obtained from the global allocator directly and is
/// relocated (allocate, move the live prefix, release) whenever the
/// capacity has to change.
///
/// # Growth
///
/// Appending to a full array grows it to [`INITIAL_CAPACITY`] slots when it
/// owns no buffer yet, and multiplies the capacity by [`GROWTH_FACTOR`]
/// otherwise. Each element is therefore relocated O(1) times on average,
/// which makes [`push_back`] amortized constant time.
///
/// Explicit capacity requests ([`reserve`], [`resize`], [`insert_n`],
/// [`assign_n`]) allocate exactly what is asked for. Nothing except
/// [`shrink_to_fit`] ever reduces the capacity.
///
/// # Access tiers
///
/// - [`at`], [`front`], [`back`] and the positional mutators validate their
///   arguments and return an out-of-range [`Error`] without touching the
///   array.
/// - Indexing (`array[i]`) is the fast path. An index outside `[0, len)` is
///   a bug in the caller and panics.
/// - [`get_unchecked`] performs no check at all.
///
/// [`INITIAL_CAPACITY`]: DynArray::INITIAL_CAPACITY
/// [`GROWTH_FACTOR`]: DynArray::GROWTH_FACTOR
/// [`push_back`]: DynArray::push_back
/// [`reserve`]: DynArray::reserve
/// [`resize`]: DynArray::resize
/// [`insert_n`]: DynArray::insert_n
/// [`assign_n`]: DynArray::assign_n
/// [`shrink_to_fit`]: DynArray::shrink_to_fit
/// [`at`]: DynArray::at
/// [`front`]: DynArray::front
/// [`back`]: DynArray::back
/// [`get_unchecked`]: DynArray::get_unchecked
pub struct DynArray<T> {
    buf: RawBuffer<T>,
    len: usize,
}

unsafe impl<T: Send> Send for DynArray<T> {}

unsafe impl<T: Sync> Sync for DynArray<T> {}

impl<T> DynArray<T> {
    /// Capacity of the first buffer allocated by a growing append.
    pub const INITIAL_CAPACITY: usize = 2;

    /// Factor applied to the capacity when a growing append finds the
    /// buffer full.
    pub const GROWTH_FACTOR: usize = 2;

    /// Creates an empty array without allocating.
    pub const fn new() -> DynArray<T> {
        DynArray {
            buf: RawBuffer::new(),
            len: 0,
        }
    }

    /// Creates an empty array with exactly `capacity` slots.
    pub fn with_capacity(capacity: usize) -> DynArray<T> {
        DynArray {
            buf: RawBuffer::with_capacity(capacity),
            len: 0,
        }
    }

    /// Creates an array of `len` default values, with `capacity == len`.
    pub fn with_len(len: usize) -> DynArray<T>
    where
        T: Default,
    {
        let mut array = DynArray::with_capacity(len);
        array.fill_tail_with(len, T::default);
        array
    }

    /// Creates an array of `len` clones of `value`, with `capacity == len`.
    pub fn from_elem(len: usize, value: T) -> DynArray<T>
    where
        T: Clone,
    {
        let mut array = DynArray::with_capacity(len);
        array.fill_tail_with(len, || value.clone());
        array
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no live elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }

    /// Returns the theoretical upper bound on the number of elements.
    ///
    /// This is the largest slot count whose byte size is representable,
    /// not a promise that such an allocation would succeed.
    pub fn max_size(&self) -> usize {
        RawBuffer::<T>::max_capacity()
    }

    /// Returns a raw pointer to the buffer.
    ///
    /// The pointer is dangling (but aligned and non-null) while the array
    /// owns no buffer, and is invalidated by any operation that relocates
    /// the elements.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.ptr()
    }

    /// Returns a mutable raw pointer to the buffer. See [`as_ptr`](Self::as_ptr).
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.ptr()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Sets the number of live elements directly.
    ///
    /// # Safety
    ///
    /// Elements in `[old_len, new_len)` must have been initialized. Elements
    /// in `[new_len, old_len)` are forgotten without being dropped.
    ///
    /// # Panics
    ///
    /// Panics if `new_len` exceeds the capacity.
    pub unsafe fn set_len(&mut self, new_len: usize) {
        assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Returns the element at `index`, or an out-of-range error if
    /// `index >= len`.
    pub fn at(&self, index: usize) -> Result<&T> {
        self.as_slice()
            .get(index)
            .ok_or_else(|| Error::index_out_of_range("at", index, self.len))
    }

    /// Mutable variant of [`at`](Self::at).
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or_else(|| Error::index_out_of_range("at_mut", index, len))
    }

    /// Returns the element at `index` without any bounds check.
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[inline]
    pub unsafe fn get_unchecked(&self, index: usize) -> &T {
        debug_assert!(index < self.len);
        unsafe { &*self.as_ptr().add(index) }
    }

    /// Mutable variant of [`get_unchecked`](Self::get_unchecked).
    ///
    /// # Safety
    ///
    /// `index` must be less than `len`.
    #[inline]
    pub unsafe fn get_unchecked_mut(&mut self, index: usize) -> &mut T {
        debug_assert!(index < self.len);
        unsafe { &mut *self.as_mut_ptr().add(index) }
    }

    /// Returns the first element, or an out-of-range error if empty.
    pub fn front(&self) -> Result<&T> {
        self.as_slice().first().ok_or_else(|| Error::empty("front"))
    }

    /// Mutable variant of [`front`](Self::front).
    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice()
            .first_mut()
            .ok_or_else(|| Error::empty("front_mut"))
    }

    /// Returns the last element, or an out-of-range error if empty.
    pub fn back(&self) -> Result<&T> {
        self.as_slice().last().ok_or_else(|| Error::empty("back"))
    }

    /// Mutable variant of [`back`](Self::back).
    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.as_mut_slice()
            .last_mut()
            .ok_or_else(|| Error::empty("back_mut"))
    }

    /// Ensures the array owns at least `new_capacity` slots.
    ///
    /// If `new_capacity` exceeds the current capacity the live elements are
    /// relocated into a buffer of exactly `new_capacity` slots. Smaller
    /// requests do nothing. Note that the argument is a total slot count,
    /// not an increment over `len`.
    pub fn reserve(&mut self, new_capacity: usize) {
        if new_capacity > self.capacity() {
            unsafe { self.buf.relocate(self.len, new_capacity) };
        }
    }

    /// Reduces the capacity to exactly `len`, releasing the buffer entirely
    /// when the array is empty.
    pub fn shrink_to_fit(&mut self) {
        if self.capacity() > self.len {
            log::debug!("shrink_to_fit: capacity {} -> {}", self.capacity(), self.len);
            unsafe { self.buf.relocate(self.len, self.len) };
        }
    }

    /// Drops the elements in `[new_len, len)`. Does nothing if
    /// `new_len >= len`. The capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail = self.len - new_len;
        unsafe {
            // Shorten first so a panicking destructor cannot cause a double drop.
            self.len = new_len;
            let start = self.as_mut_ptr().add(new_len);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, tail));
        }
    }

    /// Resizes the array to `new_len`, filling new slots with clones of
    /// `value`.
    ///
    /// Growing reserves exactly `new_len` slots if the buffer is too small.
    /// Shrinking drops the tail but never releases memory.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        if new_len > self.len {
            self.reserve(new_len);
            self.fill_tail_with(new_len - self.len, || value.clone());
        } else {
            self.truncate(new_len);
        }
    }

    /// Like [`resize`](Self::resize), filling new slots with `T::default()`.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        if new_len > self.len {
            self.reserve(new_len);
            self.fill_tail_with(new_len - self.len, T::default);
        } else {
            self.truncate(new_len);
        }
    }

    /// Appends `value`, growing the buffer if it is full.
    pub fn push_back(&mut self, value: T) {
        self.grow_if_full();
        unsafe { self.as_mut_ptr().add(self.len).write(value) };
        self.len += 1;
    }

    /// Removes and returns the last element. On an empty array this is a
    /// no-op returning `None`.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(unsafe { self.as_ptr().add(self.len).read() })
    }

    /// Appends the value produced by `make`, writing it directly into the
    /// first free slot. Grows like [`push_back`](Self::push_back).
    pub fn emplace_back<F>(&mut self, make: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        self.grow_if_full();
        let len = self.len;
        unsafe {
            let slot = self.as_mut_ptr().add(len);
            slot.write(make());
            self.len = len + 1;
            &mut *slot
        }
    }

    /// Inserts the value produced by `make` at `position`, writing it
    /// directly into the opened slot.
    ///
    /// Fails with an out-of-range error if `position > len`, in which case
    /// `make` is not called. `position == len` behaves like
    /// [`emplace_back`](Self::emplace_back).
    pub fn emplace<F>(&mut self, position: usize, make: F) -> Result<&mut T>
    where
        F: FnOnce() -> T,
    {
        verify_position("emplace", position, self.len)?;
        if position == self.len {
            return Ok(self.emplace_back(make));
        }
        self.grow_if_full();
        unsafe {
            let len = self.open_gap(position, 1);
            let slot = self.as_mut_ptr().add(position);
            slot.write(make());
            self.len = len + 1;
            Ok(&mut *slot)
        }
    }

    /// Inserts `value` at `position`, shifting `[position, len)` one slot
    /// to the right.
    ///
    /// Fails with an out-of-range error if `position > len`. Grows like
    /// [`push_back`](Self::push_back) when the buffer is full.
    pub fn insert(&mut self, position: usize, value: T) -> Result<()> {
        verify_position("insert", position, self.len)?;
        if position == self.len {
            self.push_back(value);
            return Ok(());
        }
        self.grow_if_full();
        unsafe {
            let len = self.open_gap(position, 1);
            self.as_mut_ptr().add(position).write(value);
            self.len = len + 1;
        }
        Ok(())
    }

    /// Inserts `count` clones of `value` at `position`.
    ///
    /// Reserves `len + count` slots in a single allocation (only if the
    /// buffer is too small) and shifts the tail once.
    pub fn insert_n(&mut self, position: usize, count: usize, value: T) -> Result<()>
    where
        T: Clone,
    {
        verify_position("insert_n", position, self.len)?;
        if count == 0 {
            return Ok(());
        }
        self.reserve(self.required_len(count));
        unsafe {
            let len = self.open_gap(position, count);
            let gap = self.as_mut_ptr().add(position);
            for i in 0..count {
                gap.add(i).write(value.clone());
            }
            self.len = len + count;
        }
        Ok(())
    }

    /// Inserts every element produced by `iter` at `position`, preserving
    /// their order.
    ///
    /// The position is validated before the source is touched. The source
    /// is consumed exactly once, left to right.
    pub fn insert_iter<I>(&mut self, position: usize, iter: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        verify_position("insert_iter", position, self.len)?;
        let mut incoming: DynArray<T> = iter.into_iter().collect();
        let count = incoming.len();
        if count == 0 {
            return Ok(());
        }
        self.reserve(self.required_len(count));
        unsafe {
            let len = self.open_gap(position, count);
            ptr::copy_nonoverlapping(incoming.as_ptr(), self.as_mut_ptr().add(position), count);
            // The values now belong to `self`.
            incoming.set_len(0);
            self.len = len + count;
        }
        Ok(())
    }

    /// Removes and returns the element at `position`, shifting the tail one
    /// slot to the left. The capacity is unchanged.
    ///
    /// Fails with an out-of-range error if `position >= len`.
    pub fn erase(&mut self, position: usize) -> Result<T> {
        verify_index("erase", position, self.len)?;
        unsafe {
            let hole = self.as_mut_ptr().add(position);
            let removed = hole.read();
            ptr::copy(hole.add(1), hole, self.len - position - 1);
            self.len -= 1;
            Ok(removed)
        }
    }

    /// Removes the elements in `[first, last)`, shifting the tail down to
    /// `first`. The capacity is unchanged.
    ///
    /// Fails with an out-of-range error if `first >= len`, `last > len` or
    /// `last < first`. An empty range at a valid `first` is a no-op.
    pub fn erase_range(&mut self, first: usize, last: usize) -> Result<()> {
        verify_range("erase_range", first, last, self.len)?;
        let count = last - first;
        if count == 0 {
            return Ok(());
        }
        let len = self.len;
        unsafe {
            // Leak the tail rather than double-drop it if a destructor panics.
            self.len = first;
            let start = self.as_mut_ptr().add(first);
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(start, count));
            ptr::copy(start.add(count), start, len - last);
            self.len = len - count;
        }
        Ok(())
    }

    /// Replaces the contents with `count` clones of `value`.
    pub fn assign_n(&mut self, count: usize, value: T)
    where
        T: Clone,
    {
        self.clear();
        self.reserve(count);
        self.fill_tail_with(count, || value.clone());
    }

    /// Replaces the contents with the elements produced by `iter`.
    ///
    /// Capacity for the iterator's lower size bound is reserved up front,
    /// so exact-size sources are copied without intermediate growth.
    pub fn assign_iter<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        self.clear();
        self.reserve(iter.size_hint().0);
        for item in iter {
            self.push_back(item);
        }
    }

    /// Drops every live element. The buffer is kept for reuse.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Exchanges buffers, lengths and capacities with `other` without
    /// touching any element.
    pub fn swap(&mut self, other: &mut DynArray<T>) {
        mem::swap(self, other);
    }

    /// Returns a forward iterator over the live elements.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns a forward iterator yielding mutable references.
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Returns an iterator over the live elements, back to front.
    pub fn iter_rev(&self) -> Rev<slice::Iter<'_, T>> {
        self.iter().rev()
    }
}

impl<T> DynArray<T> {
    #[inline]
    fn grow_if_full(&mut self) {
        if self.len == self.capacity() {
            self.grow();
        }
    }

    #[cold]
    fn grow(&mut self) {
        let capacity = self.capacity();
        let new_capacity = if capacity == 0 {
            Self::INITIAL_CAPACITY
        } else {
            capacity
                .checked_mul(Self::GROWTH_FACTOR)
                .unwrap_or_else(|| capacity_overflow())
        };
        unsafe { self.buf.relocate(self.len, new_capacity) };
    }

    fn required_len(&self, additional: usize) -> usize {
        self.len
            .checked_add(additional)
            .unwrap_or_else(|| capacity_overflow())
    }

    /// Writes `count` values produced by `make` after the last element,
    /// reserving exactly enough room if needed.
    fn fill_tail_with<F>(&mut self, count: usize, mut make: F)
    where
        F: FnMut() -> T,
    {
        let end = self.required_len(count);
        self.reserve(end);
        while self.len < end {
            unsafe { self.as_mut_ptr().add(self.len).write(make()) };
            self.len += 1;
        }
    }

    /// Moves `[position, len)` to `[position + count, len + count)`, leaving
    /// `count` uninitialized slots at `position`. Returns the previous length.
    ///
    /// `len` is left at `position` until the caller fills the gap, so a panic
    /// in between leaks the tail instead of exposing uninitialized slots.
    ///
    /// # Safety
    ///
    /// `position <= len` and `len + count <= capacity` must hold. The caller
    /// must initialize the gap and then set `len` to the returned length
    /// plus `count`.
    unsafe fn open_gap(&mut self, position: usize, count: usize) -> usize {
        let len = self.len;
        debug_assert!(position <= len);
        debug_assert!(len + count <= self.capacity());
        unsafe {
            let start = self.as_mut_ptr().add(position);
            ptr::copy(start, start.add(count), len - position);
        }
        self.len = position;
        len
    }
}

impl<T> Drop for DynArray<T> {
    fn drop(&mut self) {
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(self.as_mut_ptr(), self.len));
        }
        // `buf` releases the allocation.
    }
}

impl<T: Clone> Clone for DynArray<T> {
    /// Deep copy into a new buffer with the same capacity as `self`.
    fn clone(&self) -> DynArray<T> {
        let mut copy = DynArray::with_capacity(self.capacity());
        for item in self.iter() {
            copy.push_back(item.clone());
        }
        copy
    }

    /// Builds the copy first and then swaps it in, so the previous buffer
    /// is released only once the new state is complete.
    fn clone_from(&mut self, source: &DynArray<T>) {
        let mut fresh = source.clone();
        self.swap(&mut fresh);
    }
}

impl<T> Default for DynArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Deref for DynArray<T> {
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> DerefMut for DynArray<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T> AsRef<[T]> for DynArray<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T> AsMut<[T]> for DynArray<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, I: SliceIndex<[T]>> Index<I> for DynArray<T> {
    type Output = I::Output;

    /// # Panics
    ///
    /// Panics if the index lies outside the live range.
    #[inline]
    fn index(&self, index: I) -> &Self::Output {
        Index::index(self.as_slice(), index)
    }
}

impl<T, I: SliceIndex<[T]>> IndexMut<I> for DynArray<T> {
    #[inline]
    fn index_mut(&mut self, index: I) -> &mut Self::Output {
        IndexMut::index_mut(self.as_mut_slice(), index)
    }
}

impl<T: fmt::Debug> fmt::Debug for DynArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq<U>, U> PartialEq<DynArray<U>> for DynArray<T> {
    fn eq(&self, other: &DynArray<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for DynArray<T> {}

impl<T: PartialEq<U>, U, const N: usize> PartialEq<[U; N]> for DynArray<T> {
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<[U]> for DynArray<T> {
    fn eq(&self, other: &[U]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq<U>, U> PartialEq<&[U]> for DynArray<T> {
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: Hash> Hash for DynArray<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T> FromIterator<T> for DynArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut array = DynArray::with_capacity(iter.size_hint().0);
        for item in iter {
            array.push_back(item);
        }
        array
    }
}

impl<T> Extend<T> for DynArray<T> {
    /// Appends through [`push_back`](DynArray::push_back), so repeated
    /// small extensions keep the amortized growth.
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Copy + 'a> Extend<&'a T> for DynArray<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T, const N: usize> From<[T; N]> for DynArray<T> {
    fn from(values: [T; N]) -> Self {
        let mut array = DynArray::with_capacity(N);
        for value in values {
            array.push_back(value);
        }
        array
    }
}

impl<T: Clone> From<&[T]> for DynArray<T> {
    fn from(values: &[T]) -> Self {
        let mut array = DynArray::with_capacity(values.len());
        for value in values {
            array.push_back(value.clone());
        }
        array
    }
}

impl<T> IntoIterator for DynArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> IntoIter<T> {
        let mut this = ManuallyDrop::new(self);
        let len = this.len;
        let buf = mem::replace(&mut this.buf, RawBuffer::new());
        IntoIter::new(buf, len)
    }
}

impl<'a, T> IntoIterator for &'a DynArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
