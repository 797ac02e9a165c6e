//! Unbalanced binary search tree for sortscope.
//!
//! The tree never rebalances, so its shape (and therefore its height and
//! search cost) is entirely a function of insertion order.

use std::cmp::Ordering;

use sortscope_metrics::{Comparisons, SearchOutcome};
use sortscope_ports::{Enumerable, Searchable};

#[derive(Debug)]
pub struct BstNode<T> {
    value: T,
    left: Option<Box<BstNode<T>>>,
    right: Option<Box<BstNode<T>>>,
}

impl<T> BstNode<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
        }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn left(&self) -> Option<&BstNode<T>> {
        self.left.as_deref()
    }

    pub fn right(&self) -> Option<&BstNode<T>> {
        self.right.as_deref()
    }
}

#[derive(Debug)]
pub struct BinarySearchTree<T> {
    root: Option<Box<BstNode<T>>>,
    len: usize,
    comparisons: Comparisons,
}

impl<T: Ord> BinarySearchTree<T> {
    pub fn new() -> Self {
        Self {
            root: None,
            len: 0,
            comparisons: Comparisons::new(),
        }
    }

    /// Inserts `value` as a new leaf. Equal values are ignored.
    ///
    /// Returns whether the value was inserted.
    pub fn add(&mut self, value: T) -> bool {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = match value.cmp(&node.value) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *slot = Some(Box::new(BstNode::new(value)));
        self.len += 1;
        true
    }

    /// Descends from the root, counting each node visited.
    pub fn search(&mut self, value: &T) -> SearchOutcome {
        self.comparisons.reset();
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            self.comparisons.inc();
            current = match value.cmp(&node.value) {
                Ordering::Equal => return SearchOutcome::found(self.comparisons.value()),
                Ordering::Less => node.left(),
                Ordering::Greater => node.right(),
            };
        }
        SearchOutcome::not_found(self.comparisons.value())
    }
}

impl<T> BinarySearchTree<T> {
    /// Number of levels; 0 for an empty tree.
    pub fn height(&self) -> usize {
        let mut level: Vec<&BstNode<T>> = self.root.as_deref().into_iter().collect();
        let mut height = 0;
        while !level.is_empty() {
            height += 1;
            level = level
                .iter()
                .flat_map(|n| n.left().into_iter().chain(n.right()))
                .collect();
        }
        height
    }

    /// Values in ascending order.
    pub fn in_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack = Vec::new();
        let mut current = self.root.as_deref();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left();
            }
            if let Some(node) = stack.pop() {
                out.push(&node.value);
                current = node.right();
            }
        }
        out
    }

    /// Values in structural (node, left, right) order.
    pub fn pre_order(&self) -> Vec<&T> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&BstNode<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(&node.value);
            stack.extend(node.right());
            stack.extend(node.left());
        }
        out
    }

    pub fn root(&self) -> Option<&BstNode<T>> {
        self.root.as_deref()
    }

    pub fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        drop_tree(self.root.take());
        self.len = 0;
        self.comparisons.reset();
    }
}

/// Unlinks nodes onto a heap stack so a degenerate tree drops without
/// recursing once per level.
fn drop_tree<T>(root: Option<Box<BstNode<T>>>) {
    let mut stack: Vec<Box<BstNode<T>>> = root.into_iter().collect();
    while let Some(mut node) = stack.pop() {
        stack.extend(node.left.take());
        stack.extend(node.right.take());
    }
}

impl<T> Drop for BinarySearchTree<T> {
    fn drop(&mut self) {
        drop_tree(self.root.take());
    }
}

impl<T: Ord> Default for BinarySearchTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for BinarySearchTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = Self::new();
        for value in iter {
            tree.add(value);
        }
        tree
    }
}

impl<T: Ord> Searchable<T> for BinarySearchTree<T> {
    fn search(&mut self, value: &T) -> SearchOutcome {
        BinarySearchTree::search(self, value)
    }

    fn last_search_comparisons(&self) -> u64 {
        self.comparisons.value()
    }
}

impl<T: Ord> Enumerable<T> for BinarySearchTree<T> {
    fn values(&self) -> Vec<&T> {
        self.in_order()
    }

    fn len(&self) -> usize {
        self.len
    }
}
