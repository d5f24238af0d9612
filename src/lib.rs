//! KSelect is a data structure that keeps track of the k smallest values seen
//! so far in a stream of values, without retaining the rest.  It is a bounded
//! min-max heap: a binary heap stored in a flat vector whose levels alternate
//! between "min" and "max" ordering, which gives O(1) access to both the
//! smallest held value and the largest held value (the eviction candidate).
//!
//! Once k values have been seen, showing it a new value either discards that
//! value in O(1) (the common case under selective pressure — the value is not
//! smaller than the current k-th smallest) or replaces the current maximum and
//! repairs the heap in O(log k).  Memory use is O(k) no matter how long the
//! stream is.
//!
//! Ordering is delegated to a comparator fixed at construction.  `new` uses
//! the element's `Ord` instance, which is numeric order for numeric types and
//! lexicographic order for strings; `with_comparator` accepts any total order,
//! e.g. `f64::total_cmp`, or a reversed order to keep the k largest instead.
//! A comparator that is not a total order leaves the heap ordering
//! unspecified; that is a precondition, not a checked error.
//!
//! KSelect is designed for streaming use cases.  You show it values as they
//! come in, and at any time `min` gives the smallest value seen and `kmin`
//! gives the current k-th smallest — `kmin` is `None` until k values have
//! been seen, since no true k-th smallest exists before that.  `offer` pushes
//! a value and hands back the resulting `kmin` in one step, which makes the
//! structure usable as a stateful view over the stream: each step feeds one
//! value and yields the current cutoff.

use std::cmp::Ordering;
use std::fmt::Debug;

// Levels of the implicit tree alternate min, max, min, ... from the root.
// Position i sits on level floor(log2(i+1)).
#[inline]
fn is_min_level(i: usize) -> bool {
    (i + 1).ilog2() & 1 == 0
}

/// Keeps the k smallest elements of a stream, under a total order supplied at
/// construction.
#[derive(Clone)]
pub struct KSelect<T, C = fn(&T, &T) -> Ordering> {
    // The held elements, as an implicit min-max tree: children of i are at
    // 2i+1 and 2i+2.  Never holds more than `capacity` elements.
    heap: Vec<T>,
    // The k in "k smallest".  Fixed at construction; 0 means permanently empty.
    capacity: usize,
    // The total order.  Less means "closer to being kept".
    compare: C,
}

impl<T: Ord> KSelect<T> {
    /// Returns a new KSelect that will keep the `capacity` smallest elements
    /// in `Ord` order.  A capacity of 0 is allowed and keeps nothing.
    pub fn new(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            capacity,
            compare: T::cmp,
        }
    }
}

impl<T, C: Fn(&T, &T) -> Ordering> KSelect<T, C> {
    /// Returns a new KSelect that will keep the `capacity` smallest elements
    /// under `compare`, which must be a total order.
    pub fn with_comparator(capacity: usize, compare: C) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
            capacity,
            compare,
        }
    }

    /// Returns the number of elements currently held, at most `capacity`.
    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no elements are held.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the capacity k fixed at construction.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the smallest element held, or None if empty.
    #[inline]
    pub fn min(&self) -> Option<&T> {
        self.heap.first()
    }

    /// Returns the current k-th smallest element — the largest of the held
    /// set, i.e. the next eviction candidate — or None until k elements are
    /// held, since no true k-th smallest exists before that.
    #[inline]
    pub fn kmin(&self) -> Option<&T> {
        if self.heap.len() == self.capacity {
            self.heap.get(self.max_index())
        } else {
            None
        }
    }

    /// Considers a new element.  Until k elements are held it is always kept;
    /// after that it is kept only if it is strictly smaller than the current
    /// k-th smallest, which it then displaces.  An element equal to the
    /// current maximum is discarded, not substituted.
    pub fn push(&mut self, element: T) {
        if self.capacity == 0 {
            return;
        }
        if self.heap.len() < self.capacity {
            self.heap.push(element);
            let i = self.heap.len() - 1;
            if i > 0 {
                self.sift_up(i);
            }
            return;
        }
        if self.capacity == 1 {
            // Sole slot: compare and replace, no heap maintenance.
            if (self.compare)(&element, &self.heap[0]) == Ordering::Less {
                self.heap[0] = element;
            }
            return;
        }
        let max = self.max_index();
        if (self.compare)(&element, &self.heap[max]) != Ordering::Less {
            return; // not among the k smallest
        }
        self.heap[max] = element;
        // The candidate may be the new global minimum; the root holds the
        // minimum, so trade places with it first.  Whatever ends up in the
        // max slot then only ever needs to travel toward the leaves — the
        // max slot has a subtree, so a parent swap is not available here the
        // way it is for a freshly appended leaf.
        if self.cmp_at(max, 0) == Ordering::Less {
            self.heap.swap(max, 0);
        }
        self.sift_down(max);
    }

    /// Pushes an element and returns the resulting k-th smallest, as `kmin`.
    /// This is the streaming view: each call feeds one value and yields the
    /// current cutoff.  It never signals an end; the caller decides when to
    /// stop, and the underlying state carries over between calls.
    pub fn offer(&mut self, element: T) -> Option<&T> {
        self.push(element);
        self.kmin()
    }

    /// Removes all elements.  The capacity is unchanged.
    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Returns an iterator over the held elements in heap (not sorted) order.
    /// The usual scans are available through it: `iter().any(..)`,
    /// `iter().all(..)`, `iter().find(..)`, and so on.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.heap.iter()
    }

    /// Consumes the KSelect and returns the held elements in heap order.
    pub fn into_vec(self) -> Vec<T> {
        self.heap
    }

    /// Consumes the KSelect and returns the held elements in ascending order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let KSelect {
            mut heap, compare, ..
        } = self;
        heap.sort_by(|a, b| compare(a, b));
        heap
    }

    // Index of the largest held element.  The root is the global minimum;
    // the global maximum is at index 1 or 2, whichever compares larger.
    fn max_index(&self) -> usize {
        match self.heap.len() {
            0 | 1 => 0,
            2 => 1,
            _ => {
                if self.cmp_at(1, 2) == Ordering::Less {
                    2
                } else {
                    1
                }
            }
        }
    }

    #[inline]
    fn cmp_at(&self, a: usize, b: usize) -> Ordering {
        (self.compare)(&self.heap[a], &self.heap[b])
    }

    // Restores the heap property upward from a freshly appended leaf at i
    // (i > 0).  One comparison against the parent establishes the driving
    // relation (Less on min levels, Greater on max levels) and may cross one
    // level; the parent's value lands back in the leaf slot, which has no
    // subtree to disturb.  The walk then continues in grandparent steps,
    // which stay on levels of the same parity.
    fn sift_up(&mut self, mut i: usize) {
        let parent = (i - 1) >> 1;
        let ord = self.cmp_at(i, parent);
        let mut rel = Ordering::Less;
        if is_min_level(i) {
            if ord == Ordering::Greater {
                // Larger than its max-level parent: climb the max levels.
                self.heap.swap(i, parent);
                i = parent;
                rel = Ordering::Greater;
            }
        } else if ord == Ordering::Less {
            // Smaller than its min-level parent: climb the min levels.
            self.heap.swap(i, parent);
            i = parent;
        } else {
            rel = Ordering::Greater;
        }
        while i >= 3 {
            let gp = (((i - 1) >> 1) - 1) >> 1;
            if self.cmp_at(i, gp) == rel {
                self.heap.swap(i, gp);
                i = gp;
            } else {
                break;
            }
        }
    }

    // Restores the heap property downward from i.  Each round finds the
    // extremal element among i's children and grandchildren.  A grandchild
    // move stays on levels of the same parity but can leave the skipped
    // middle level inconsistent, which is repaired in place; a direct-child
    // move flips the driving relation.
    fn sift_down(&mut self, mut i: usize) {
        let mut rel = if is_min_level(i) {
            Ordering::Less
        } else {
            Ordering::Greater
        };
        while let Some(m) = self.extremal_descendant(i, rel) {
            if self.cmp_at(m, i) != rel {
                break; // no descendant beats i; ties never swap
            }
            self.heap.swap(i, m);
            if m > 2 * i + 2 {
                // m is a grandchild; its parent on the middle level may now
                // be out of order with the value that moved down.
                let parent = (m - 1) >> 1;
                if self.cmp_at(parent, m) == rel {
                    self.heap.swap(parent, m);
                }
            } else {
                rel = rel.reverse();
            }
            i = m;
        }
    }

    // Index of the extremal (per rel) element among i's up to 2 children and
    // up to 4 grandchildren, or None if i is a leaf.
    fn extremal_descendant(&self, i: usize, rel: Ordering) -> Option<usize> {
        let len = self.heap.len();
        let left = 2 * i + 1;
        if left >= len {
            return None;
        }
        let right = left + 1;
        if right >= len {
            return Some(left);
        }
        let mut m = if self.cmp_at(right, left) == rel {
            right
        } else {
            left
        };
        let first_gc = 4 * i + 3;
        for gc in first_gc..(first_gc + 4).min(len) {
            if self.cmp_at(gc, m) == rel {
                m = gc;
            }
        }
        Some(m)
    }
}

impl<T: Clone, C: Fn(&T, &T) -> Ordering> KSelect<T, C> {
    /// Returns a snapshot of the held elements in heap (not sorted) order.
    pub fn to_vec(&self) -> Vec<T> {
        self.heap.clone()
    }

    /// Returns a snapshot of the held elements in ascending order.
    pub fn to_sorted_vec(&self) -> Vec<T> {
        let mut v = self.heap.clone();
        v.sort_by(|a, b| (self.compare)(a, b));
        v
    }
}

impl<T: PartialEq, C> KSelect<T, C> {
    /// Returns true if an equal element is currently held.  Linear scan.
    pub fn contains(&self, element: &T) -> bool {
        self.heap.contains(element)
    }
}

impl<T, C: Fn(&T, &T) -> Ordering> Extend<T> for KSelect<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        if self.capacity == 0 {
            return;
        }
        for element in iter {
            self.push(element);
        }
    }
}

impl<'a, T, C> IntoIterator for &'a KSelect<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;
    fn into_iter(self) -> Self::IntoIter {
        self.heap.iter()
    }
}

// Custom Debug implementation; the comparator has no useful rendering.
impl<T: Debug, C> Debug for KSelect<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KSelect {{ capacity: {}, heap: [", self.capacity)?;
        for (i, v) in self.heap.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v:?}")?;
        }
        write!(f, "] }}")
    }
}
