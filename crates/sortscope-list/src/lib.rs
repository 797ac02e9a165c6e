//! Singly linked lists for sortscope.
//!
//! [`UnsortedLinkedList`] inserts at the head and searches linearly.
//! [`SortedLinkedList`] wraps it and adds a merge sort that relinks the
//! existing nodes instead of copying values.

use sortscope_metrics::{Comparisons, SearchOutcome, SortReport};
use sortscope_ports::{Enumerable, Searchable, Sortable};

type Link<T> = Option<Box<Node<T>>>;

/// A list node. Each list owns its chain outright.
#[derive(Debug)]
pub struct Node<T> {
    value: T,
    next: Link<T>,
}

impl<T> Node<T> {
    pub fn new(value: T) -> Self {
        Self { value, next: None }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn next(&self) -> Option<&Node<T>> {
        self.next.as_deref()
    }
}

/// Head-to-tail iterator over list values.
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.value
        })
    }
}

/// A singly linked list with head insertion and linear search.
#[derive(Debug)]
pub struct UnsortedLinkedList<T> {
    head: Link<T>,
    len: usize,
    comparisons: Comparisons,
}

impl<T: Eq> UnsortedLinkedList<T> {
    pub fn new() -> Self {
        Self {
            head: None,
            len: 0,
            comparisons: Comparisons::new(),
        }
    }

    /// Pushes a value at the head. The newest value enumerates first.
    pub fn add(&mut self, value: T) {
        let node = Box::new(Node {
            value,
            next: self.head.take(),
        });
        self.head = Some(node);
        self.len += 1;
    }

    /// Walks from the head and stops at the first equal value.
    pub fn search(&mut self, value: &T) -> SearchOutcome {
        self.comparisons.reset();
        let mut current = self.head.as_deref();
        while let Some(node) = current {
            self.comparisons.inc();
            if node.value == *value {
                return SearchOutcome::found(self.comparisons.value());
            }
            current = node.next.as_deref();
        }
        SearchOutcome::not_found(self.comparisons.value())
    }

    pub fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }
}

impl<T> UnsortedLinkedList<T> {
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    pub fn head(&self) -> Option<&Node<T>> {
        self.head.as_deref()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn clear(&mut self) {
        drop_chain(self.head.take());
        self.len = 0;
        self.comparisons.reset();
    }
}

impl<T: Eq> Default for UnsortedLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for UnsortedLinkedList<T> {
    fn drop(&mut self) {
        drop_chain(self.head.take());
    }
}

/// Unlinks node by node so long chains don't recurse on drop.
fn drop_chain<T>(mut link: Link<T>) {
    while let Some(mut node) = link {
        link = node.next.take();
    }
}

impl<'a, T> IntoIterator for &'a UnsortedLinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Eq> Searchable<T> for UnsortedLinkedList<T> {
    fn search(&mut self, value: &T) -> SearchOutcome {
        UnsortedLinkedList::search(self, value)
    }

    fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }
}

impl<T: Eq> Enumerable<T> for UnsortedLinkedList<T> {
    fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.len
    }
}

/// A linked list that can be merge-sorted in place.
///
/// Adds go to the head exactly as in [`UnsortedLinkedList`]; call
/// [`SortedLinkedList::sort`] to put the chain in order.
#[derive(Debug)]
pub struct SortedLinkedList<T> {
    list: UnsortedLinkedList<T>,
    sort_comparisons: Comparisons,
}

impl<T: Ord> SortedLinkedList<T> {
    pub fn new() -> Self {
        Self {
            list: UnsortedLinkedList::new(),
            sort_comparisons: Comparisons::new(),
        }
    }

    pub fn add(&mut self, value: T) {
        self.list.add(value);
    }

    pub fn search(&mut self, value: &T) -> SearchOutcome {
        self.list.search(value)
    }

    /// Stable merge sort that relinks the existing nodes.
    pub fn sort(&mut self) -> SortReport {
        let mut run = Comparisons::new();
        let head = self.list.head.take();
        self.list.head = merge_sort(head, &mut run);
        self.sort_comparisons.inc_by(run.value());
        SortReport {
            comparisons: run.value(),
        }
    }

    pub fn last_search_comparisons(&self) -> u64 {
        self.list.last_search_comparisons()
    }

    pub fn sort_comparisons(&self) -> u64 {
        self.sort_comparisons.value()
    }

    pub fn reset_sort_comparisons(&mut self) {
        self.sort_comparisons.reset();
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.list.iter()
    }

    pub fn head(&self) -> Option<&Node<T>> {
        self.list.head()
    }

    pub fn len(&self) -> usize {
        self.list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Empties the list and its search counter. The sort counter is kept.
    pub fn clear(&mut self) {
        self.list.clear();
    }
}

impl<T: Ord> Default for SortedLinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> Searchable<T> for SortedLinkedList<T> {
    fn search(&mut self, value: &T) -> SearchOutcome {
        self.list.search(value)
    }

    fn last_search_comparisons(&self) -> u64 {
        self.list.last_search_comparisons()
    }
}

impl<T: Ord> Sortable for SortedLinkedList<T> {
    fn sort(&mut self) -> SortReport {
        SortedLinkedList::sort(self)
    }

    fn sort_comparisons(&self) -> u64 {
        self.sort_comparisons.value()
    }

    fn reset_sort_comparisons(&mut self) {
        self.sort_comparisons.reset();
    }
}

impl<T: Ord> Enumerable<T> for SortedLinkedList<T> {
    fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    fn len(&self) -> usize {
        self.list.len()
    }
}

fn merge_sort<T: Ord>(head: Link<T>, counter: &mut Comparisons) -> Link<T> {
    let mut head = match head {
        Some(node) if node.next.is_some() => node,
        short => return short,
    };
    let right = split_after_middle(&mut head);
    let left = merge_sort(Some(head), counter);
    let right = merge_sort(right, counter);
    merge(left, right, counter)
}

/// Cuts the chain after its middle node and returns the second half.
///
/// Slow/fast pointers locate the middle: fast starts one node ahead of slow
/// and moves two nodes per step, so slow stops on the last node of the left
/// half (`[head, slow]`).
fn split_after_middle<T>(head: &mut Box<Node<T>>) -> Link<T> {
    let mut steps = 0;
    let mut fast = head.next.as_deref();
    while let Some(next) = fast.and_then(|f| f.next.as_deref()) {
        steps += 1;
        fast = next.next.as_deref();
    }

    let mut slow = head;
    for _ in 0..steps {
        slow = slow.next.as_mut()?;
    }
    slow.next.take()
}

fn merge<T: Ord>(mut left: Link<T>, mut right: Link<T>, counter: &mut Comparisons) -> Link<T> {
    let mut head: Link<T> = None;
    let mut tail = &mut head;

    loop {
        match (left.take(), right.take()) {
            (Some(mut l), Some(mut r)) => {
                counter.inc();
                // Ties go left so equal values keep their order.
                if l.value <= r.value {
                    left = l.next.take();
                    right = Some(r);
                    tail = &mut tail.insert(l).next;
                } else {
                    right = r.next.take();
                    left = Some(l);
                    tail = &mut tail.insert(r).next;
                }
            }
            (rest, None) | (None, rest) => {
                *tail = rest;
                break;
            }
        }
    }

    head
}
