//! Array-backed binary min-heap with a caller-supplied priority comparator.
//!
//! Capacity policy
//! - Starts at `INITIAL_CAPACITY` slots and doubles when full.
//! - After a pop that leaves occupancy below a quarter of the capacity, the backing
//!   storage is halved, never below `MIN_CAPACITY`. A long batch of differently sized
//!   searches therefore does not keep the peak allocation of its largest member, and
//!   alternating push/pop around a boundary does not reallocate on every call.
//!
//! Ordering
//! - `less(a, b)` must be a strict "a has higher priority than b" relation.
//! - Entries with equal keys come out in unspecified order.

use std::fmt;

/// Slots allocated by `PriorityQueue::new`.
pub const INITIAL_CAPACITY: usize = 64;
/// Shrinking never goes below this many slots.
pub const MIN_CAPACITY: usize = 8;
/// Shrink once fewer than `1 / SHRINK_BELOW` of the slots are occupied.
const SHRINK_BELOW: usize = 4;

pub struct PriorityQueue<K, V, F> {
    entries: Vec<(K, V)>,
    less: F,
}

impl<K, V, F> PriorityQueue<K, V, F>
where
    F: Fn(&K, &K) -> bool,
{
    pub fn new(less: F) -> Self {
        Self::with_capacity(INITIAL_CAPACITY, less)
    }

    pub fn with_capacity(capacity: usize, less: F) -> Self {
        Self {
            entries: Vec::with_capacity(capacity.max(MIN_CAPACITY)),
            less,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Allocated slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    pub fn insert(&mut self, key: K, value: V) {
        if self.entries.len() == self.entries.capacity() {
            let grow_by = self.entries.capacity().max(MIN_CAPACITY);
            self.entries.reserve_exact(grow_by);
        }
        self.entries.push((key, value));
        self.sift_up(self.entries.len() - 1);
    }

    /// Highest-priority entry. Panics on an empty queue; check `is_empty` first.
    pub fn peek(&self) -> (&K, &V) {
        match self.entries.first() {
            Some((key, value)) => (key, value),
            None => panic!("peek on an empty priority queue"),
        }
    }

    /// Remove and return the highest-priority entry. Panics on an empty queue; check
    /// `is_empty` first.
    pub fn pop(&mut self) -> (K, V) {
        assert!(!self.entries.is_empty(), "pop on an empty priority queue");
        let top = self.entries.swap_remove(0);
        if !self.entries.is_empty() {
            self.sift_down(0);
        }
        self.maybe_shrink();
        top
    }

    fn maybe_shrink(&mut self) {
        let capacity = self.entries.capacity();
        if capacity > MIN_CAPACITY && self.entries.len() < capacity / SHRINK_BELOW {
            self.entries.shrink_to((capacity / 2).max(MIN_CAPACITY));
        }
    }

    #[inline]
    fn higher(&self, a: usize, b: usize) -> bool {
        (self.less)(&self.entries[a].0, &self.entries[b].0)
    }

    fn sift_up(&mut self, mut node: usize) {
        while node > 0 {
            let parent = (node - 1) / 2;
            if !self.higher(node, parent) {
                break;
            }
            self.entries.swap(node, parent);
            node = parent;
        }
    }

    fn sift_down(&mut self, mut node: usize) {
        let n = self.entries.len();
        loop {
            let left = 2 * node + 1;
            if left >= n {
                break;
            }
            let right = left + 1;
            let child = if right < n && self.higher(right, left) {
                right
            } else {
                left
            };
            if !self.higher(child, node) {
                break;
            }
            self.entries.swap(node, child);
            node = child;
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, F> fmt::Debug for PriorityQueue<K, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PriorityQueue")
            .field("len", &self.entries.len())
            .field("capacity", &self.entries.capacity())
            .field("entries", &self.entries)
            .finish()
    }
}
