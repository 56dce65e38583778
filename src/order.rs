use core::cmp::Ordering;

/// A three-way comparison capability over `T`.
///
/// An [`OSAvlMultiset`](crate::OSAvlMultiset) is constructed with exactly
/// one comparator and routes every comparison it ever performs through it:
/// the ordering choice is fixed for the container's lifetime.
///
/// Two forms are available out of the box:
///
/// - [`NaturalOrder`], which delegates to the value type's [`Ord`]
///   implementation and is the default;
/// - any closure or function of type `Fn(&T, &T) -> Ordering`, via the
///   blanket implementation below.
///
/// A comparator **must** be a strict total order and answer consistently
/// across calls: `compare(a, b) == Greater` exactly when
/// `compare(b, a) == Less`, equality is symmetric, and both relations are
/// transitive. The container stays memory-safe under a misbehaving
/// comparator, but its contents and query answers are then unspecified.
///
/// # Examples
///
/// ```
/// use core::cmp::Ordering;
/// use osavl_tree::{Comparator, NaturalOrder};
///
/// assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
///
/// let descending = |a: &i32, b: &i32| b.cmp(a);
/// assert_eq!(descending.compare(&1, &2), Ordering::Greater);
/// ```
pub trait Comparator<T> {
    /// Compares two values, returning where `a` stands relative to `b`.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// The natural total order of the value type, via [`Ord`].
///
/// This is the default comparator; constructing a multiset with
/// [`OSAvlMultiset::new`](crate::OSAvlMultiset::new) selects it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NaturalOrder;

impl<T: Ord> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}

impl<T, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, a: &T, b: &T) -> Ordering {
        self(a, b)
    }
}
