//! Growable contiguous array over a hand-managed buffer.
//!
//! Slots `[0, len)` hold live values, `[len, capacity)` are reserve space.
//! Capacity grows 0 -> 1 -> 2 -> 4 -> ... on append, is set exactly by
//! [`DynamicArray::reserve`] and [`DynamicArray::shrink_to_fit`], and is never
//! reduced implicitly.

use std::fmt;
use std::iter::FusedIterator;
use std::mem::{self, ManuallyDrop};
use std::ops::{Index, IndexMut};
use std::ptr;
use std::slice;

use crate::error::{ContainerError, Result};
use crate::raw_buf::{capacity_overflow, RawBuf};

/// A growable array with an explicit, observable capacity policy.
pub struct DynamicArray<T> {
    buf: RawBuf<T>,
    len: usize,
}

impl<T> DynamicArray<T> {
    /// Creates an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            buf: RawBuf::new(),
            len: 0,
        }
    }

    /// Creates an empty array with room for exactly `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: RawBuf::with_capacity(capacity),
            len: 0,
        }
    }

    /// Creates an array of `size` elements produced by `f`, with capacity
    /// equal to `size`.
    pub fn from_size_with<F: FnMut() -> T>(size: usize, f: F) -> Self {
        let mut arr = Self::with_capacity(size);
        arr.resize_with(size, f);
        arr
    }

    /// Creates an array of `len` default values.
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_size_with(len, T::default)
    }

    /// Creates an array of `len` clones of `value`.
    pub fn from_elem(len: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::from_size_with(len, || value.clone())
    }

    pub fn at(&self, index: usize) -> Result<&T> {
        if index >= self.len {
            return Err(ContainerError::OutOfRange {
                index,
                len: self.len,
            });
        }
        // SAFETY: index < len, so the slot is live.
        Ok(unsafe { &*self.buf.ptr().add(index) })
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut T> {
        if index >= self.len {
            return Err(ContainerError::OutOfRange {
                index,
                len: self.len,
            });
        }
        // SAFETY: index < len, and &mut self guarantees exclusivity.
        Ok(unsafe { &mut *self.buf.ptr().add(index) })
    }

    /// First element, or [`ContainerError::Empty`].
    pub fn front(&self) -> Result<&T> {
        self.data().first().ok_or(ContainerError::Empty)
    }

    pub fn front_mut(&mut self) -> Result<&mut T> {
        self.data_mut().first_mut().ok_or(ContainerError::Empty)
    }

    /// Last element, or [`ContainerError::Empty`].
    pub fn back(&self) -> Result<&T> {
        self.data().last().ok_or(ContainerError::Empty)
    }

    pub fn back_mut(&mut self) -> Result<&mut T> {
        self.data_mut().last_mut().ok_or(ContainerError::Empty)
    }

    /// The live elements as a slice.
    pub fn data(&self) -> &[T] {
        // SAFETY: the first len slots are initialised; ptr is non-null and
        // aligned even when nothing is allocated.
        unsafe { slice::from_raw_parts(self.buf.ptr(), self.len) }
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        // SAFETY: as in `data`, plus exclusivity from &mut self.
        unsafe { slice::from_raw_parts_mut(self.buf.ptr(), self.len) }
    }

    pub fn as_slice(&self) -> &[T] {
        self.data()
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.data_mut()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.len
    }

    /// Alias of [`size`](Self::size).
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.cap()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Grows capacity to exactly `new_cap`. No-op if `new_cap <= capacity()`.
    pub fn reserve(&mut self, new_cap: usize) {
        if new_cap <= self.buf.cap() {
            return;
        }
        self.buf.set_capacity(new_cap);
    }

    /// Appends `value`, doubling capacity first when full.
    pub fn push_back(&mut self, value: T) {
        if self.len == self.buf.cap() {
            let new_cap = match self.buf.cap() {
                0 => 1,
                cap => cap.checked_mul(2).unwrap_or_else(|| capacity_overflow()),
            };
            self.reserve(new_cap);
        }
        // SAFETY: len < cap after the growth above; the slot is uninitialised.
        unsafe {
            ptr::write(self.buf.ptr().add(self.len), value);
        }
        self.len += 1;
    }

    /// Removes and returns the last element. Returns `None` on an empty array
    /// without touching anything. Capacity is unchanged.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.len == 0 {
            None
        } else {
            self.len -= 1;
            // SAFETY: slot len was live; it is logically removed before the read.
            unsafe { Some(ptr::read(self.buf.ptr().add(self.len))) }
        }
    }

    /// Drops every element at or past `new_len`. No-op if `new_len >= len()`.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }
        let tail_len = self.len - new_len;
        // Length drops before the tail does.
        self.len = new_len;
        // SAFETY: slots [new_len, new_len + tail_len) were live and are no
        // longer reachable through self.
        unsafe {
            let tail = ptr::slice_from_raw_parts_mut(self.buf.ptr().add(new_len), tail_len);
            ptr::drop_in_place(tail);
        }
    }

    /// Resizes to `new_len`, filling new slots from `f`.
    ///
    /// Growing reserves exactly `new_len` when the current capacity is short.
    pub fn resize_with<F: FnMut() -> T>(&mut self, new_len: usize, mut f: F) {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }
        self.reserve(new_len);
        while self.len < new_len {
            // SAFETY: len < new_len <= cap.
            unsafe {
                ptr::write(self.buf.ptr().add(self.len), f());
            }
            self.len += 1;
        }
    }

    /// Resizes to `new_len`, filling new slots with clones of `value`.
    pub fn resize(&mut self, new_len: usize, value: T)
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone());
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    pub fn resize_default(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Drops all elements. Capacity is kept.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Reallocates to exactly `len()` slots, releasing the buffer when empty.
    pub fn shrink_to_fit(&mut self) {
        if self.buf.cap() > self.len {
            self.buf.set_capacity(self.len);
        }
    }

    /// Exchanges buffers with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(self, other);
    }

    /// Moves the whole array out, leaving `self` empty with zero capacity.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Move-assignment: drops current contents and steals `other`'s buffer,
    /// leaving `other` empty with zero capacity.
    pub fn assign_from(&mut self, other: &mut Self) {
        *self = other.take();
    }

    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.data().iter()
    }

    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.data_mut().iter_mut()
    }

    /// Cursor at logical index 0.
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor { array: self, pos: 0 }
    }

    /// Cursor one past the last live element.
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor {
            array: self,
            pos: self.len,
        }
    }

    /// Writable cursor at logical index 0.
    pub fn begin_mut(&mut self) -> CursorMut<'_, T> {
        CursorMut { array: self, pos: 0 }
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Deep copy sized to the source's length, not its capacity.
    fn clone(&self) -> Self {
        let mut new_arr = Self::with_capacity(self.len);
        for item in self.iter() {
            new_arr.push_back(item.clone());
        }
        new_arr
    }

    /// Copy-assignment that reuses the existing buffer when it is big enough.
    fn clone_from(&mut self, source: &Self) {
        if self.buf.cap() < source.len {
            *self = source.clone();
            return;
        }
        self.truncate(source.len);
        let (head, tail) = source.data().split_at(self.len);
        for (dst, src) in self.data_mut().iter_mut().zip(head) {
            dst.clone_from(src);
        }
        for item in tail {
            self.push_back(item.clone());
        }
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Index<usize> for DynamicArray<T> {
    type Output = T;
    fn index(&self, index: usize) -> &T {
        match self.at(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> IndexMut<usize> for DynamicArray<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        match self.at_mut(index) {
            Ok(v) => v,
            Err(e) => panic!("{e}"),
        }
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for DynamicArray<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for DynamicArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data() == other.data()
    }
}

impl<T: Eq> Eq for DynamicArray<T> {}

impl<T, const N: usize> From<[T; N]> for DynamicArray<T> {
    fn from(items: [T; N]) -> Self {
        let mut arr = Self::with_capacity(N);
        for item in items {
            arr.push_back(item);
        }
        arr
    }
}

impl<T: Clone> From<&[T]> for DynamicArray<T> {
    fn from(items: &[T]) -> Self {
        let mut arr = Self::with_capacity(items.len());
        for item in items {
            arr.push_back(item.clone());
        }
        arr
    }
}

impl<T> From<Vec<T>> for DynamicArray<T> {
    fn from(items: Vec<T>) -> Self {
        let mut arr = Self::with_capacity(items.len());
        for item in items {
            arr.push_back(item);
        }
        arr
    }
}

impl<T> FromIterator<T> for DynamicArray<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut arr = Self::new();
        arr.extend(iter);
        arr
    }
}

impl<T> Extend<T> for DynamicArray<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T> IntoIterator for &'a DynamicArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut DynamicArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for DynamicArray<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;
    fn into_iter(self) -> Self::IntoIter {
        let me = ManuallyDrop::new(self);
        // SAFETY: `me` is never dropped, so the buffer has exactly one owner.
        let buf = unsafe { ptr::read(&me.buf) };
        IntoIter {
            buf,
            start: 0,
            end: me.len,
        }
    }
}

unsafe impl<T: Send> Send for DynamicArray<T> {}
unsafe impl<T: Sync> Sync for DynamicArray<T> {}

/// Owning iterator returned by `DynamicArray::into_iter`.
///
/// Elements not yielded are dropped with the iterator.
pub struct IntoIter<T> {
    buf: RawBuf<T>,
    start: usize,
    end: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        // SAFETY: slots [start, end) are live; start is advanced past the read.
        let item = unsafe { ptr::read(self.buf.ptr().add(self.start)) };
        self.start += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.start;
        (n, Some(n))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        if self.start == self.end {
            return None;
        }
        self.end -= 1;
        // SAFETY: slot end was live and is now outside [start, end).
        Some(unsafe { ptr::read(self.buf.ptr().add(self.end)) })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}
impl<T> FusedIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        let remaining = self.end - self.start;
        let start = self.start;
        self.start = self.end;
        // SAFETY: [start, start + remaining) are the un-yielded live slots.
        unsafe {
            let rest = ptr::slice_from_raw_parts_mut(self.buf.ptr().add(start), remaining);
            ptr::drop_in_place(rest);
        }
    }
}

unsafe impl<T: Send> Send for IntoIter<T> {}
unsafe impl<T: Sync> Sync for IntoIter<T> {}

/// Bidirectional position over a [`DynamicArray`].
///
/// Valid positions run from `begin()` (index 0) to `end()` (index `len`).
/// Reading at the end position yields `None`; stepping never leaves that range.
pub struct Cursor<'a, T> {
    array: &'a DynamicArray<T>,
    pos: usize,
}

impl<'a, T> Cursor<'a, T> {
    pub fn index(&self) -> usize {
        self.pos
    }

    /// The element under the cursor, `None` at the end position.
    pub fn get(&self) -> Option<&'a T> {
        self.array.data().get(self.pos)
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.array.len
    }

    /// Steps forward. Returns `false` if already at the end.
    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.pos += 1;
        true
    }

    /// Steps backward. Returns `false` if already at the beginning.
    pub fn move_prev(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.array, other.array) && self.pos == other.pos
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor")
            .field("pos", &self.pos)
            .field("len", &self.array.len)
            .finish()
    }
}

/// Bidirectional position that can write through to the element under it.
///
/// Same positions and stepping rules as [`Cursor`].
pub struct CursorMut<'a, T> {
    array: &'a mut DynamicArray<T>,
    pos: usize,
}

impl<T> CursorMut<'_, T> {
    pub fn index(&self) -> usize {
        self.pos
    }

    pub fn get(&self) -> Option<&T> {
        self.array.data().get(self.pos)
    }

    /// The element under the cursor, `None` at the end position.
    pub fn get_mut(&mut self) -> Option<&mut T> {
        self.array.data_mut().get_mut(self.pos)
    }

    pub fn is_end(&self) -> bool {
        self.pos >= self.array.len
    }

    pub fn move_next(&mut self) -> bool {
        if self.is_end() {
            return false;
        }
        self.pos += 1;
        true
    }

    pub fn move_prev(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        true
    }
}

impl<T> fmt::Debug for CursorMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("pos", &self.pos)
            .field("len", &self.array.len)
            .finish()
    }
}
