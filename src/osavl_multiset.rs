use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use alloc::collections::VecDeque;

use smallvec::SmallVec;

use crate::order::{Comparator, NaturalOrder};
use crate::raw::{Arena, Handle, Node, RawOSAvlMultiset};

mod capacity;
mod order_statistic;

/// An ordered multiset based on an AVL tree with order-statistic
/// annotations.
///
/// Equal values are coalesced: inserting a value that compares equal to a
/// stored one bumps that node's multiplicity instead of growing the tree,
/// so a million copies of one value cost a single node. Every node also
/// caches its subtree's height and element count, which is what makes the
/// rank queries [`kth`](OSAvlMultiset::kth) and
/// [`rank_of`](OSAvlMultiset::rank_of) logarithmic.
///
/// The ordering is chosen once, at construction: either the value type's
/// natural [`Ord`] (the default, [`NaturalOrder`]) or an injected
/// [`Comparator`], typically a closure. It is a logic error for the
/// comparator to answer inconsistently across calls, or for an element to
/// be mutated (through [`Cell`], [`RefCell`], global state, I/O, or unsafe
/// code) in a way that changes how it compares while it is in the set. The
/// behavior resulting from such a logic error is not specified and may
/// include panics, wrong answers, or non-termination, but is always
/// memory-safe.
///
/// Individual elements can never be removed; the container grows through
/// [`insert`](OSAvlMultiset::insert) and is emptied only as a whole, by
/// [`clear`](OSAvlMultiset::clear) or by dropping it.
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlMultiset;
///
/// let mut scores = OSAvlMultiset::new();
///
/// // Duplicates are welcome.
/// scores.insert(70);
/// scores.insert(85);
/// scores.insert(70);
/// scores.insert(92);
///
/// assert_eq!(scores.len(), 4);
/// assert_eq!(scores.count(&70), 2);
///
/// // Rank queries are 1-indexed: the median of the four scores.
/// assert_eq!(scores.kth(2), Some(&70));
///
/// // How many scores are at most 85?
/// assert_eq!(scores.rank_of(&85), Some(3));
/// ```
///
/// An `OSAvlMultiset` with a known list of items can be initialized from
/// an array:
///
/// ```
/// use osavl_tree::OSAvlMultiset;
///
/// let set = OSAvlMultiset::from([1, 2, 2, 3]);
/// assert_eq!(set.len(), 4);
/// ```
pub struct OSAvlMultiset<T, C = NaturalOrder> {
    raw: RawOSAvlMultiset<T, C>,
}

/// An iterator over the elements of an `OSAvlMultiset` in ascending order,
/// duplicates repeated.
///
/// This `struct` is created by the [`iter`] method on [`OSAvlMultiset`].
/// See its documentation for more.
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlMultiset;
///
/// let set = OSAvlMultiset::from([2, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&2));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: OSAvlMultiset::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    distinct: Distinct<'a, T>,
    /// The entry currently being drained from the front: the value and how
    /// many more times it is due to be yielded.
    front: Option<(&'a T, usize)>,
    back: Option<(&'a T, usize)>,
    /// Elements not yet yielded from either end. The two pending entries
    /// and the undrained part of `distinct` together hold exactly this
    /// many elements.
    remaining: usize,
}

/// An iterator over the distinct values of an `OSAvlMultiset` in ascending
/// order, each paired with its multiplicity.
///
/// This `struct` is created by the [`distinct`] method on
/// [`OSAvlMultiset`]. See its documentation for more.
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlMultiset;
///
/// let set = OSAvlMultiset::from([10, 20, 10]);
/// let pairs: Vec<_> = set.distinct().collect();
/// assert_eq!(pairs, [(&10, 2), (&20, 1)]);
/// ```
///
/// [`distinct`]: OSAvlMultiset::distinct
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Distinct<'a, T: 'a> {
    nodes: &'a Arena<Node<T>>,
    /// Ancestors pending on the forward walk; the top is the next node in
    /// ascending order.
    front: SmallVec<[Handle; 16]>,
    /// Ancestors pending on the backward walk; the top is the next node in
    /// descending order.
    back: SmallVec<[Handle; 16]>,
    /// Nodes not yet yielded from either end. When the two walks meet, the
    /// stacks still overlap; this count is what stops iteration.
    remaining: usize,
}

/// An iterator over the distinct values of an `OSAvlMultiset` in
/// breadth-first order: the root first, then each level left to right.
///
/// This `struct` is created by the [`level_order`] method on
/// [`OSAvlMultiset`]. The order exposes the tree's current shape, which
/// depends on its rebalancing history; use it for structural inspection,
/// not for sorted traversal.
///
/// # Examples
///
/// ```
/// use osavl_tree::OSAvlMultiset;
///
/// // Ascending inserts force a rotation; 2 ends up as the root.
/// let set = OSAvlMultiset::from([1, 2, 3]);
/// let top_down: Vec<_> = set.level_order().collect();
/// assert_eq!(top_down, [&2, &1, &3]);
/// ```
///
/// [`level_order`]: OSAvlMultiset::level_order
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct LevelOrder<'a, T: 'a> {
    nodes: &'a Arena<Node<T>>,
    queue: VecDeque<Handle>,
    remaining: usize,
}

impl<T> OSAvlMultiset<T> {
    /// Makes a new, empty `OSAvlMultiset` ordered by the value type's
    /// natural order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set = OSAvlMultiset::new();
    ///
    /// // entries can now be inserted into the empty set
    /// set.insert(1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn new() -> OSAvlMultiset<T> {
        OSAvlMultiset {
            raw: RawOSAvlMultiset::new(NaturalOrder),
        }
    }
}

impl<T, C> OSAvlMultiset<T, C> {
    /// Makes a new, empty `OSAvlMultiset` ordered by `order`.
    ///
    /// Any closure of type `Fn(&T, &T) -> Ordering` is a valid order. The
    /// choice is fixed for the container's lifetime; even
    /// [`clear`](OSAvlMultiset::clear) retains it.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set = OSAvlMultiset::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    /// set.insert(1);
    /// set.insert(3);
    /// set.insert(2);
    ///
    /// // Descending order: rank 1 is the largest value.
    /// assert_eq!(set.kth(1), Some(&3));
    /// assert_eq!(set.first(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn with_comparator(order: C) -> OSAvlMultiset<T, C> {
        OSAvlMultiset {
            raw: RawOSAvlMultiset::new(order),
        }
    }

    /// Returns the smallest value under the active order, or `None` if the
    /// multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([3, 1, 2]);
    /// assert_eq!(set.first(), Some(&1));
    ///
    /// let empty: OSAvlMultiset<i32> = OSAvlMultiset::new();
    /// assert_eq!(empty.first(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first()
    }

    /// Returns the largest value under the active order, or `None` if the
    /// multiset is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([3, 1, 2]);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last()
    }

    /// Returns the number of elements in the multiset, duplicates counted.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([1, 1, 1]);
    /// assert_eq!(set.len(), 3);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the multiset contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set = OSAvlMultiset::new();
    /// assert!(set.is_empty());
    /// set.insert(1);
    /// assert!(!set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of distinct values, ignoring multiplicities.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([7, 7, 7, 9]);
    /// assert_eq!(set.len(), 4);
    /// assert_eq!(set.distinct_len(), 2);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub const fn distinct_len(&self) -> usize {
        self.raw.distinct_len()
    }

    /// Drops every element, keeping the allocated node storage and the
    /// ordering capability for reuse.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set = OSAvlMultiset::from([1, 2, 3]);
    /// set.clear();
    /// assert!(set.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator that visits the elements in ascending order under
    /// the active order, yielding each value once per occurrence.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([20, 10, 20]);
    /// let elements: Vec<_> = set.iter().copied().collect();
    /// assert_eq!(elements, [10, 20, 20]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; the full walk is O(n).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            distinct: self.distinct(),
            front: None,
            back: None,
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator that visits the distinct values in ascending order
    /// under the active order, each paired with its multiplicity.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([30, 10, 30, 30]);
    /// let pairs: Vec<_> = set.distinct().collect();
    /// assert_eq!(pairs, [(&10, 1), (&30, 3)]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create the iterator; the full walk is O(distinct values).
    pub fn distinct(&self) -> Distinct<'_, T> {
        let mut iter = Distinct {
            nodes: self.raw.nodes(),
            front: SmallVec::new(),
            back: SmallVec::new(),
            remaining: self.raw.distinct_len(),
        };
        iter.push_left_spine(self.raw.root());
        iter.push_right_spine(self.raw.root());
        iter
    }

    /// Gets an iterator that visits the distinct values in breadth-first
    /// order: the root first, then each level left to right.
    ///
    /// The sequence exposes the tree's current shape, which depends on its
    /// rebalancing history. This is the structural inspection hook; the
    /// tree never traces or prints its own mutations.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([3, 2, 1]);
    /// let top_down: Vec<_> = set.level_order().collect();
    /// assert_eq!(top_down, [&2, &1, &3]);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1) to create the iterator; the full walk is O(distinct values).
    pub fn level_order(&self) -> LevelOrder<'_, T> {
        let mut queue = VecDeque::new();
        if let Some(root) = self.raw.root() {
            queue.push_back(root);
        }
        LevelOrder {
            nodes: self.raw.nodes(),
            queue,
            remaining: self.raw.distinct_len(),
        }
    }
}

impl<T, C: Comparator<T>> OSAvlMultiset<T, C> {
    /// Adds a value to the multiset and returns its multiplicity after the
    /// insertion: 1 for a first occurrence, more for a coalesced
    /// duplicate.
    ///
    /// Duplicates never grow the tree; they bump the multiplicity of the
    /// node that already holds the equal value.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set = OSAvlMultiset::new();
    /// assert_eq!(set.insert(10), 1);
    /// assert_eq!(set.insert(10), 2);
    ///
    /// assert_eq!(set.len(), 2);
    /// assert_eq!(set.distinct_len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) comparisons and at most one single or double rotation.
    pub fn insert(&mut self, value: T) -> usize {
        self.raw.insert(value)
    }

    /// Returns the multiplicity of `value`, or 0 if it is not present.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([5, 5, 5]);
    /// assert_eq!(set.count(&5), 3);
    /// assert_eq!(set.count(&7), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        self.raw.count(value)
    }

    /// Returns `true` if the multiset contains at least one element equal
    /// to `value` under the active order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([1, 2, 3]);
    /// assert!(set.contains(&1));
    /// assert!(!set.contains(&4));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn contains(&self, value: &T) -> bool {
        self.raw.count(value) > 0
    }
}

impl<T: Hash, C> Hash for OSAvlMultiset<T, C> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for (value, count) in self.distinct() {
            value.hash(state);
            count.hash(state);
        }
    }
}

impl<T: PartialEq, C> PartialEq for OSAvlMultiset<T, C> {
    fn eq(&self, other: &OSAvlMultiset<T, C>) -> bool {
        self.len() == other.len() && self.distinct().eq(other.distinct())
    }
}

impl<T: Eq, C> Eq for OSAvlMultiset<T, C> {}

impl<T: Clone, C: Clone> Clone for OSAvlMultiset<T, C> {
    fn clone(&self) -> Self {
        OSAvlMultiset {
            raw: self.raw.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for OSAvlMultiset<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C: Default> Default for OSAvlMultiset<T, C> {
    /// Creates an empty `OSAvlMultiset` with a default-constructed order.
    fn default() -> Self {
        OSAvlMultiset::with_comparator(C::default())
    }
}

impl<T: Ord> FromIterator<T> for OSAvlMultiset<T> {
    /// Builds a naturally ordered multiset by inserting the items in
    /// iteration order.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = OSAvlMultiset::new();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for OSAvlMultiset<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Copy, C: Comparator<T>> Extend<&'a T> for OSAvlMultiset<T, C> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for OSAvlMultiset<T> {
    /// Builds a naturally ordered multiset by inserting the array's items
    /// in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([1, 2, 2, 3]);
    /// assert_eq!(set.count(&2), 2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T, C> IntoIterator for &'a OSAvlMultiset<T, C> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        loop {
            if let Some((value, pending)) = &mut self.front {
                if *pending > 0 {
                    *pending -= 1;
                    return Some(*value);
                }
            }
            // Refill from the forward walk; once that is drained, the only
            // elements left live in the back entry, so steal it.
            self.front = self.distinct.next().or_else(|| self.back.take());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        loop {
            if let Some((value, pending)) = &mut self.back {
                if *pending > 0 {
                    *pending -= 1;
                    return Some(*value);
                }
            }
            self.back = self.distinct.next_back().or_else(|| self.front.take());
        }
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            distinct: self.distinct.clone(),
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<T> Distinct<'_, T> {
    /// Pushes `link` and the chain of its left descendants onto the
    /// forward stack, leaving the subtree's smallest node on top.
    fn push_left_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.front.push(handle);
            link = self.nodes.get(handle).left();
        }
    }

    /// Mirror of [`Self::push_left_spine`] for the backward stack.
    fn push_right_spine(&mut self, mut link: Option<Handle>) {
        while let Some(handle) = link {
            self.back.push(handle);
            link = self.nodes.get(handle).right();
        }
    }
}

impl<'a, T> Iterator for Distinct<'a, T> {
    type Item = (&'a T, usize);

    fn next(&mut self) -> Option<(&'a T, usize)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let handle = self
            .front
            .pop()
            .expect("`Distinct::next()` - nodes remain but the forward stack is empty!");
        let node = self.nodes.get(handle);
        self.push_left_spine(node.right());
        Some((node.value(), node.frequency()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<(&'a T, usize)> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Distinct<'a, T> {
    fn next_back(&mut self) -> Option<(&'a T, usize)> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let handle = self
            .back
            .pop()
            .expect("`Distinct::next_back()` - nodes remain but the backward stack is empty!");
        let node = self.nodes.get(handle);
        self.push_right_spine(node.left());
        Some((node.value(), node.frequency()))
    }
}

impl<T> ExactSizeIterator for Distinct<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Distinct<'_, T> {}

impl<T> Clone for Distinct<'_, T> {
    fn clone(&self) -> Self {
        Distinct {
            nodes: self.nodes,
            front: self.front.clone(),
            back: self.back.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Distinct<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for LevelOrder<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let handle = self.queue.pop_front()?;
        self.remaining -= 1;

        let node = self.nodes.get(handle);
        if let Some(left) = node.left() {
            self.queue.push_back(left);
        }
        if let Some(right) = node.right() {
            self.queue.push_back(right);
        }
        Some(node.value())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for LevelOrder<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for LevelOrder<'_, T> {}

impl<T> Clone for LevelOrder<'_, T> {
    fn clone(&self) -> Self {
        LevelOrder {
            nodes: self.nodes,
            queue: self.queue.clone(),
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for LevelOrder<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
