//! Owning handle over an uninitialized, heap-allocated block of `T` slots.
//!
//! `RawBuffer` knows nothing about which slots hold live values: it only
//! allocates, relocates and releases memory. Element lifetimes are managed
//! by the containers built on top of it.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::{self, NonNull};

pub(crate) struct RawBuffer<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuffer<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    /// Creates a handle that owns no allocation.
    pub const fn new() -> RawBuffer<T> {
        RawBuffer {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates exactly `capacity` slots. Zero capacity does not allocate.
    pub fn with_capacity(capacity: usize) -> RawBuffer<T> {
        if capacity == 0 {
            return Self::new();
        }
        RawBuffer {
            ptr: Self::allocate(capacity),
            cap: capacity,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.cap
    }

    /// Largest slot count whose byte size still fits in `isize`.
    pub fn max_capacity() -> usize {
        if Self::IS_ZST {
            usize::MAX
        } else {
            isize::MAX as usize / mem::size_of::<T>()
        }
    }

    /// Moves the first `len` slots into a fresh allocation of exactly
    /// `new_capacity` slots and releases the old one. A zero `new_capacity`
    /// leaves the handle without an allocation.
    ///
    /// # Safety
    ///
    /// The first `len` slots must be initialized, and `len` must not exceed
    /// either the current or the new capacity. After the call the values
    /// live only in the new allocation.
    pub unsafe fn relocate(&mut self, len: usize, new_capacity: usize) {
        debug_assert!(len <= self.cap);
        debug_assert!(len <= new_capacity);
        if new_capacity == self.cap {
            return;
        }
        log::trace!(
            "relocating {len} elements of {}: capacity {} -> {new_capacity}",
            std::any::type_name::<T>(),
            self.cap
        );

        let new_ptr = if new_capacity == 0 {
            NonNull::dangling()
        } else {
            Self::allocate(new_capacity)
        };
        if len > 0 {
            unsafe {
                ptr::copy_nonoverlapping(self.ptr.as_ptr(), new_ptr.as_ptr(), len);
            }
        }
        self.release();
        self.ptr = new_ptr;
        self.cap = new_capacity;
    }

    fn allocate(capacity: usize) -> NonNull<T> {
        if Self::IS_ZST {
            return NonNull::dangling();
        }
        let layout = Self::layout(capacity);
        let ptr = unsafe { alloc::alloc(layout) } as *mut T;
        NonNull::new(ptr).unwrap_or_else(|| alloc::handle_alloc_error(layout))
    }

    fn release(&mut self) {
        if self.cap != 0 && !Self::IS_ZST {
            unsafe {
                alloc::dealloc(self.ptr.as_ptr() as *mut u8, Self::layout(self.cap));
            }
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }

    fn layout(capacity: usize) -> Layout {
        Layout::array::<T>(capacity).unwrap_or_else(|_| capacity_overflow())
    }
}

impl<T> Drop for RawBuffer<T> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cold]
#[track_caller]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}
