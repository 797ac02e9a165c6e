//! Fixed-capacity arrays for sortscope.
//!
//! Two variants share the same storage:
//!
//! - [`UnsortedArray`] keeps insertion order and searches linearly.
//! - [`SortedArray`] sorts on demand with a top-down merge sort and searches
//!   with an iterative binary search.
//!
//! The variants deliberately disagree on what a full array means. Adding to a
//! full `UnsortedArray` is a non-fatal [`AddStatus::Rejected`]: the value is
//! dropped and the array is left untouched. Adding to a full `SortedArray` is
//! an `Err` the caller has to handle.

use sortscope_error::{ContainerError, Result};
use sortscope_metrics::{Comparisons, SearchOutcome, SortReport};
use sortscope_ports::{Enumerable, Searchable, Sortable};

/// Densely packed buffer with a capacity fixed at construction.
///
/// `capacity` is a logical bound; the buffer grows as values arrive.
#[derive(Debug, Clone)]
struct FixedArray<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> FixedArray<T> {
    fn new(capacity: usize) -> Self {
        Self {
            items: Vec::new(),
            capacity,
        }
    }

    /// Hands the value back when there is no room for it.
    fn push(&mut self, value: T) -> std::result::Result<(), T> {
        if self.items.len() >= self.capacity {
            return Err(value);
        }
        self.items.push(value);
        Ok(())
    }

    fn get(&self, index: usize) -> Result<&T> {
        self.items.get(index).ok_or(ContainerError::IndexOutOfRange {
            index,
            len: self.items.len(),
        })
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}

/// Outcome of [`UnsortedArray::add`].
#[must_use]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddStatus {
    Stored,
    /// The value was dropped; the array is unchanged.
    Rejected(ContainerError),
}

impl AddStatus {
    pub fn is_stored(&self) -> bool {
        matches!(self, AddStatus::Stored)
    }

    pub fn rejection(&self) -> Option<&ContainerError> {
        match self {
            AddStatus::Stored => None,
            AddStatus::Rejected(err) => Some(err),
        }
    }
}

/// An insertion-ordered array with linear search.
#[derive(Debug, Clone)]
pub struct UnsortedArray<T> {
    storage: FixedArray<T>,
    comparisons: Comparisons,
}

impl<T: Eq> UnsortedArray<T> {
    /// Creates an empty array that holds at most `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: FixedArray::new(capacity),
            comparisons: Comparisons::new(),
        }
    }

    /// Appends a value, or reports that the array is full and drops it.
    pub fn add(&mut self, value: T) -> AddStatus {
        match self.storage.push(value) {
            Ok(()) => AddStatus::Stored,
            Err(_dropped) => AddStatus::Rejected(ContainerError::CapacityExceeded {
                capacity: self.storage.capacity,
            }),
        }
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.storage.get(index)
    }

    /// Scans from index 0 and stops at the first equal element.
    pub fn search(&mut self, value: &T) -> SearchOutcome {
        self.comparisons.reset();
        for item in &self.storage.items {
            self.comparisons.inc();
            if item == value {
                return SearchOutcome::found(self.comparisons.value());
            }
        }
        SearchOutcome::not_found(self.comparisons.value())
    }

    /// Empties the array and its search counter. Capacity is kept.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.comparisons.reset();
    }

    pub fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn capacity(&self) -> usize {
        self.storage.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.storage.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage.items
    }
}

impl<T: Eq> Searchable<T> for UnsortedArray<T> {
    fn search(&mut self, value: &T) -> SearchOutcome {
        UnsortedArray::search(self, value)
    }

    fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }
}

impl<T: Eq> Enumerable<T> for UnsortedArray<T> {
    fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}

/// A fixed-capacity array sorted on demand.
///
/// Sortedness is not maintained by [`SortedArray::add`]. [`SortedArray::search`]
/// assumes [`SortedArray::sort`] has run since the last `add` and does not
/// check it; on unsorted contents its answer is unspecified.
#[derive(Debug, Clone)]
pub struct SortedArray<T> {
    storage: FixedArray<T>,
    comparisons: Comparisons,
    sort_comparisons: Comparisons,
}

impl<T: Ord> SortedArray<T> {
    /// Creates an empty array that holds at most `capacity` elements.
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: FixedArray::new(capacity),
            comparisons: Comparisons::new(),
            sort_comparisons: Comparisons::new(),
        }
    }

    /// Appends a value.
    ///
    /// A full array is an error the caller must deal with, unlike
    /// [`UnsortedArray::add`] which only reports it.
    pub fn add(&mut self, value: T) -> Result<()> {
        self.storage
            .push(value)
            .map_err(|_| ContainerError::CapacityExceeded {
                capacity: self.storage.capacity,
            })
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Result<&T> {
        self.storage.get(index)
    }

    /// Stable top-down merge sort over the stored elements.
    ///
    /// Each head-to-head comparison during a merge is added to the cumulative
    /// sort counter; the returned report covers this call only.
    pub fn sort(&mut self) -> SortReport {
        let mut run = Comparisons::new();
        let items = std::mem::take(&mut self.storage.items);
        self.storage.items = merge_sort(items, &mut run);
        self.sort_comparisons.inc_by(run.value());
        SortReport {
            comparisons: run.value(),
        }
    }

    /// Iterative binary search. Requires sorted contents.
    pub fn search(&mut self, value: &T) -> SearchOutcome {
        use std::cmp::Ordering;

        self.comparisons.reset();
        let items = &self.storage.items;
        let (mut lo, mut hi) = (0, items.len());
        while lo < hi {
            // Lower midpoint of the inclusive range [lo, hi - 1].
            let mid = lo + (hi - lo - 1) / 2;
            self.comparisons.inc();
            match items[mid].cmp(value) {
                Ordering::Equal => return SearchOutcome::found(self.comparisons.value()),
                Ordering::Less => lo = mid + 1,
                Ordering::Greater => hi = mid,
            }
        }
        SearchOutcome::not_found(self.comparisons.value())
    }

    /// Empties the array and its search counter. The sort counter is kept.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.comparisons.reset();
    }

    pub fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }

    pub fn sort_comparisons(&self) -> u64 {
        self.sort_comparisons.value()
    }

    pub fn reset_sort_comparisons(&mut self) {
        self.sort_comparisons.reset();
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn capacity(&self) -> usize {
        self.storage.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.storage.len() == 0
    }

    pub fn is_full(&self) -> bool {
        self.storage.is_full()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.storage.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.storage.items
    }
}

impl<T: Ord> Searchable<T> for SortedArray<T> {
    fn search(&mut self, value: &T) -> SearchOutcome {
        SortedArray::search(self, value)
    }

    fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }
}

impl<T: Ord> Sortable for SortedArray<T> {
    fn sort(&mut self) -> SortReport {
        SortedArray::sort(self)
    }

    fn sort_comparisons(&self) -> u64 {
        self.sort_comparisons.value()
    }

    fn reset_sort_comparisons(&mut self) {
        self.sort_comparisons.reset();
    }
}

impl<T: Ord> Enumerable<T> for SortedArray<T> {
    fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.storage.len()
    }
}

fn merge_sort<T: Ord>(mut items: Vec<T>, counter: &mut Comparisons) -> Vec<T> {
    if items.len() <= 1 {
        return items;
    }
    // The left half takes the extra element of an odd split.
    let right = items.split_off(items.len().div_ceil(2));
    let left = merge_sort(items, counter);
    let right = merge_sort(right, counter);
    merge(left, right, counter)
}

fn merge<T: Ord>(left: Vec<T>, right: Vec<T>, counter: &mut Comparisons) -> Vec<T> {
    let mut merged = Vec::with_capacity(left.len() + right.len());
    let mut left = left.into_iter().peekable();
    let mut right = right.into_iter().peekable();

    while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
        counter.inc();
        // Ties go left so equal elements keep their order.
        let next = if l <= r { left.next() } else { right.next() };
        merged.extend(next);
    }

    merged.extend(left);
    merged.extend(right);
    merged
}
