//! Max priority queue stored as a binary heap inside a [`DynamicArray`].
//!
//! Positions are handled as 1-based heap indices: heap index `i` lives at
//! storage index `i - 1`, its parent at heap index `i / 2`, its children at
//! `2i` and `2i + 1`. Between public calls every parent is `>=` its children.

use std::fmt;
use std::mem;

use crate::dynamic_array::DynamicArray;
use crate::error::Result;

/// A max-heap over an owned [`DynamicArray`].
#[derive(Clone)]
pub struct PriorityQueue<T> {
    container: DynamicArray<T>,
}

impl<T: Ord> PriorityQueue<T> {
    pub const fn new() -> Self {
        PriorityQueue {
            container: DynamicArray::new(),
        }
    }

    /// Builds a queue from an iterator whose length is known up front.
    ///
    /// Storage is reserved for exactly `iter.len()` elements, filled in
    /// iteration order, then heap-ordered in one bottom-up pass.
    pub fn from_exact_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let mut container = DynamicArray::with_capacity(iter.len());
        for item in iter {
            container.push_back(item);
        }
        Self::from_array(container)
    }

    /// Adopts `array` as storage and heap-orders it in O(n).
    pub fn from_array(array: DynamicArray<T>) -> Self {
        let mut pq = PriorityQueue { container: array };
        pq.heapify();
        pq
    }

    /// Adopts `array` as storage without reordering.
    ///
    /// The caller promises `array` is already max-heap ordered. This is not
    /// checked; if it does not hold, `top` and `pop` return elements in an
    /// unspecified order (memory safety is unaffected).
    pub fn from_heap_unchecked(array: DynamicArray<T>) -> Self {
        PriorityQueue { container: array }
    }

    /// The maximum element, or [`ContainerError::Empty`](crate::ContainerError::Empty).
    pub fn top(&self) -> Result<&T> {
        self.container.front()
    }

    /// Inserts `value`, sifting it up until its parent is not smaller.
    pub fn push(&mut self, value: T) {
        self.container.push_back(value);
        let data = self.container.data_mut();
        let mut i = data.len();
        while i > 1 && data[i - 1] > data[i / 2 - 1] {
            data.swap(i - 1, i / 2 - 1);
            i /= 2;
        }
    }

    /// Removes and returns the maximum element.
    ///
    /// An empty queue is left untouched and `None` is returned; unlike
    /// [`top`](Self::top) this is not an error.
    pub fn pop(&mut self) -> Option<T> {
        if self.container.is_empty() {
            return None;
        }
        let last = self.container.len() - 1;
        self.container.data_mut().swap(0, last);
        let max = self.container.pop_back();
        self.percolate_down(1);
        max
    }

    pub fn size(&self) -> usize {
        self.container.size()
    }

    pub fn len(&self) -> usize {
        self.container.len()
    }

    pub fn is_empty(&self) -> bool {
        self.container.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.container.capacity()
    }

    /// Grows storage capacity to exactly `new_cap` if it is larger.
    pub fn reserve(&mut self, new_cap: usize) {
        self.container.reserve(new_cap);
    }

    pub fn clear(&mut self) {
        self.container.clear();
    }

    /// Exchanges storage with `other` in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        self.container.swap(&mut other.container);
    }

    /// Moves the queue out, leaving `self` empty with zero capacity.
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    pub fn as_slice(&self) -> &[T] {
        self.container.data()
    }

    /// Releases the underlying array, still in heap order.
    pub fn into_array(self) -> DynamicArray<T> {
        self.container
    }

    /// Drains the queue into ascending order.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        while let Some(v) = self.pop() {
            out.push(v);
        }
        out.reverse();
        out
    }

    /// Restores heap order below `heap_index`, returning whether any swap
    /// happened. `heap_index` is 1-based.
    fn percolate_down(&mut self, heap_index: usize) -> bool {
        let data = self.container.data_mut();
        let size = data.len();
        let mut index = heap_index;
        let mut moved = false;

        loop {
            let left = index * 2;
            let right = left + 1;
            if left > size {
                break;
            }
            // Right child wins only when strictly greater than the left.
            let bigger = if right <= size && data[left - 1] < data[right - 1] {
                right
            } else {
                left
            };
            if data[index - 1] < data[bigger - 1] {
                data.swap(index - 1, bigger - 1);
                index = bigger;
                moved = true;
            } else {
                break;
            }
        }
        moved
    }

    fn heapify(&mut self) {
        for i in (1..=self.size() / 2).rev() {
            self.percolate_down(i);
        }
    }

    #[cfg(test)]
    fn is_valid_heap(&self) -> bool {
        let data = self.as_slice();
        (2..=data.len()).all(|i| data[i / 2 - 1] >= data[i - 1])
    }
}

impl<T: Ord> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for PriorityQueue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("container", &self.container)
            .finish()
    }
}

/// Equal when storage matches element for element in heap order.
impl<T: PartialEq> PartialEq for PriorityQueue<T> {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container
    }
}

impl<T: Eq> Eq for PriorityQueue<T> {}

impl<T: Ord> From<DynamicArray<T>> for PriorityQueue<T> {
    fn from(array: DynamicArray<T>) -> Self {
        Self::from_array(array)
    }
}

impl<T: Ord> FromIterator<T> for PriorityQueue<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_array(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push(item);
        }
    }
}
