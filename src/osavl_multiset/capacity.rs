use crate::order::NaturalOrder;
use crate::raw::RawOSAvlMultiset;

use super::OSAvlMultiset;

impl<T> OSAvlMultiset<T> {
    /// Makes a new, empty, naturally ordered `OSAvlMultiset` with room for
    /// at least `capacity` distinct values before the node storage
    /// reallocates.
    ///
    /// Duplicates coalesce into existing nodes, so they never consume
    /// capacity.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set = OSAvlMultiset::with_capacity(10);
    /// set.insert(1);
    /// assert!(set.capacity() >= 10);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn with_capacity(capacity: usize) -> OSAvlMultiset<T> {
        OSAvlMultiset {
            raw: RawOSAvlMultiset::with_capacity(capacity, NaturalOrder),
        }
    }
}

impl<T, C> OSAvlMultiset<T, C> {
    /// Makes a new, empty `OSAvlMultiset` ordered by `order`, with room
    /// for at least `capacity` distinct values before the node storage
    /// reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let mut set =
    ///     OSAvlMultiset::with_capacity_and_comparator(10, |a: &i32, b: &i32| b.cmp(a));
    /// set.insert(1);
    /// set.insert(2);
    /// assert_eq!(set.first(), Some(&2));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, order: C) -> OSAvlMultiset<T, C> {
        OSAvlMultiset {
            raw: RawOSAvlMultiset::with_capacity(capacity, order),
        }
    }

    /// Returns the number of distinct values the multiset can hold without
    /// reallocating its node storage.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set: OSAvlMultiset<i32> = OSAvlMultiset::with_capacity(100);
    /// assert!(set.capacity() >= 100);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
