use core::ops::Index;

use crate::order::Comparator;
use crate::order_statistic::Rank;

use super::OSAvlMultiset;

impl<T, C> OSAvlMultiset<T, C> {
    /// Returns the `n`-th smallest element under the active order, or
    /// `None` if `n` is 0 or exceeds [`len`](OSAvlMultiset::len).
    ///
    /// Ranks are 1-indexed and duplicates occupy consecutive ranks, so a
    /// value with multiplicity 3 answers three adjacent ranks.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([20, 10, 20]);
    /// assert_eq!(set.kth(1), Some(&10));
    /// assert_eq!(set.kth(2), Some(&20));
    /// assert_eq!(set.kth(3), Some(&20));
    ///
    /// assert_eq!(set.kth(0), None);
    /// assert_eq!(set.kth(4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn kth(&self, n: usize) -> Option<&T> {
        self.raw.kth(n)
    }
}

impl<T, C: Comparator<T>> OSAvlMultiset<T, C> {
    /// Returns the 1-based rank of `value`'s last occurrence, or `None` if
    /// it is not present.
    ///
    /// Because duplicates occupy consecutive ranks, the rank of the last
    /// occurrence equals the number of elements that are less than or
    /// equal to `value` under the active order. For a present value the
    /// two queries compose: `set.kth(set.rank_of(&v)?)` yields an element
    /// equal to `v`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::OSAvlMultiset;
    ///
    /// let set = OSAvlMultiset::from([10, 20, 10, 30]);
    /// assert_eq!(set.rank_of(&10), Some(2));
    /// assert_eq!(set.rank_of(&20), Some(3));
    /// assert_eq!(set.rank_of(&30), Some(4));
    ///
    /// // 15 is not in the multiset, even though smaller elements are.
    /// assert_eq!(set.rank_of(&15), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn rank_of(&self, value: &T) -> Option<usize> {
        self.raw.rank_of(value)
    }
}

impl<T, C> Index<Rank> for OSAvlMultiset<T, C> {
    type Output = T;

    /// Returns a reference to the element with the given 1-based [`Rank`].
    ///
    /// # Examples
    ///
    /// ```
    /// use osavl_tree::{OSAvlMultiset, Rank};
    ///
    /// let set = OSAvlMultiset::from([20, 10, 20]);
    /// assert_eq!(set[Rank(1)], 10);
    /// assert_eq!(set[Rank(3)], 20);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if the rank is out of bounds; `Rank(0)` always is.
    fn index(&self, rank: Rank) -> &T {
        self.kth(rank.0).expect("index out of bounds")
    }
}
