//! Owned allocation of uninitialised slots.
//!
//! `RawBuf` only tracks the allocation. Which slots hold live values is the
//! owner's business; dropping a `RawBuf` releases memory without running any
//! element destructors.

use std::alloc::{self, Layout};
use std::marker::PhantomData;
use std::mem;
use std::ptr::NonNull;

pub(crate) struct RawBuf<T> {
    ptr: NonNull<T>,
    cap: usize,
    _marker: PhantomData<T>,
}

impl<T> RawBuf<T> {
    const IS_ZST: bool = mem::size_of::<T>() == 0;

    pub(crate) const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            cap: 0,
            _marker: PhantomData,
        }
    }

    pub(crate) fn with_capacity(cap: usize) -> Self {
        let mut buf = Self::new();
        buf.set_capacity(cap);
        buf
    }

    #[inline]
    pub(crate) fn cap(&self) -> usize {
        self.cap
    }

    #[inline]
    pub(crate) fn ptr(&self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Moves the allocation to exactly `new_cap` slots.
    ///
    /// Bytes of the first `min(cap, new_cap)` slots are carried over, so the
    /// owner must have dropped or moved out anything living at or past
    /// `new_cap` before shrinking. A `new_cap` of zero releases the buffer.
    pub(crate) fn set_capacity(&mut self, new_cap: usize) {
        if new_cap == self.cap {
            return;
        }
        if Self::IS_ZST {
            self.cap = new_cap;
            return;
        }
        if new_cap == 0 {
            self.release();
            return;
        }

        let new_layout = array_layout::<T>(new_cap);
        let new_ptr = if self.cap == 0 {
            // SAFETY: new_layout has non-zero size (T is not a ZST, new_cap > 0).
            unsafe { alloc::alloc(new_layout) }
        } else {
            let old_layout = array_layout::<T>(self.cap);
            // SAFETY: ptr was allocated by us with old_layout; the new size is
            // non-zero and did not overflow isize when building new_layout.
            unsafe { alloc::realloc(self.ptr.as_ptr().cast::<u8>(), old_layout, new_layout.size()) }
        };

        self.ptr = match NonNull::new(new_ptr.cast::<T>()) {
            Some(p) => p,
            None => alloc::handle_alloc_error(new_layout),
        };
        self.cap = new_cap;
    }

    /// Releases the allocation, leaving a zero-capacity buffer.
    pub(crate) fn release(&mut self) {
        if !Self::IS_ZST && self.cap != 0 {
            let layout = array_layout::<T>(self.cap);
            // SAFETY: ptr was allocated with this exact layout.
            unsafe { alloc::dealloc(self.ptr.as_ptr().cast::<u8>(), layout) };
        }
        self.ptr = NonNull::dangling();
        self.cap = 0;
    }
}

impl<T> Drop for RawBuf<T> {
    fn drop(&mut self) {
        self.release();
    }
}

fn array_layout<T>(cap: usize) -> Layout {
    match Layout::array::<T>(cap) {
        Ok(layout) => layout,
        Err(_) => capacity_overflow(),
    }
}

#[cold]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow");
}
