//! Worklists with duplicate-suppressing membership.
//!
//! Both containers guarantee that an item is present at most once at any
//! moment. Membership only covers items currently queued: taking an item
//! removes it from the membership set, so the same item may be added again
//! later. Neither container is safe for concurrent access.

use std::collections::VecDeque;
use std::hash::Hash;

use crate::FxHashSet;

/// A last-in-first-out worklist.
///
/// Besides the shared worklist contract this also supports
/// [`reverse_top`](WorkStack::reverse_top), which traversal drivers use to
/// control the order freshly added items pop back out in.
pub struct WorkStack<T> {
    items: Vec<T>,
    present: FxHashSet<T>,
}

impl<T: Copy + Eq + Hash> WorkStack<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            present: FxHashSet::default(),
        }
    }

    /// Pushes `item` unless it is already queued, in which case nothing
    /// happens.
    pub fn add(&mut self, item: T) {
        if self.present.insert(item) {
            self.items.push(item);
        }
    }

    pub fn contains(&self, item: T) -> bool {
        self.present.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The item the next call to [`next`](WorkStack::next) would return,
    /// without taking it.
    pub fn peek(&self) -> Option<T> {
        self.items.last().copied()
    }

    /// Takes the most recently added item, releasing its membership.
    pub fn next(&mut self) -> Option<T> {
        let item = self.items.pop()?;
        self.present.remove(&item);
        Some(item)
    }

    /// Reverses the `n` most recently added items in place, leaving
    /// everything beneath them untouched.
    ///
    /// Panics if fewer than `n` items are queued.
    pub fn reverse_top(&mut self, n: usize) {
        let len = self.items.len();
        assert!(n <= len, "reverse_top past the bottom of the stack");
        self.items[len - n..].reverse();
    }
}

impl<T: Copy + Eq + Hash> Default for WorkStack<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A first-in-first-out worklist with the same membership contract as
/// [`WorkStack`].
pub struct WorkQueue<T> {
    items: VecDeque<T>,
    present: FxHashSet<T>,
}

impl<T: Copy + Eq + Hash> WorkQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            present: FxHashSet::default(),
        }
    }

    /// Appends `item` unless it is already queued, in which case nothing
    /// happens.
    pub fn add(&mut self, item: T) {
        if self.present.insert(item) {
            self.items.push_back(item);
        }
    }

    pub fn contains(&self, item: T) -> bool {
        self.present.contains(&item)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn peek(&self) -> Option<T> {
        self.items.front().copied()
    }

    /// Takes the oldest queued item, releasing its membership.
    pub fn next(&mut self) -> Option<T> {
        let item = self.items.pop_front()?;
        self.present.remove(&item);
        Some(item)
    }
}

impl<T: Copy + Eq + Hash> Default for WorkQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
