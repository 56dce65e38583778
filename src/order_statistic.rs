/// A one-based rank into the sorted order of a multiset.
///
/// Ranks count elements, duplicates included: `Rank(1)` is the smallest
/// element and `Rank(len)` the largest, matching the convention of
/// [`kth`](crate::OSAvlMultiset::kth) and
/// [`rank_of`](crate::OSAvlMultiset::rank_of).
///
/// # Examples
///
/// ```
/// use osavl_tree::{OSAvlMultiset, Rank};
///
/// let set = OSAvlMultiset::from([20, 10, 20]);
///
/// assert_eq!(set[Rank(1)], 10);
/// assert_eq!(set[Rank(3)], 20);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
