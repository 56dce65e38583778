use core::num::NonZero;

#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in the [`Arena`](super::arena::Arena).
///
/// Stored as `NonZero` so that the `Option<Handle>` child links in a tree
/// node occupy no more space than `Handle` itself; an absent child is the
/// niche, not an extra discriminant. The arena hands these out densely,
/// starting at slot 0.
///
/// Under `cfg(test)` the backing integer shrinks to `u16` so the capacity
/// limit is actually reachable in tests.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Number of distinct slots a handle can address, and therefore the
    /// most distinct values one tree can hold.
    pub(crate) const CAPACITY: usize = RawHandle::MAX as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index < Self::CAPACITY, "`Handle::from_index()` - `index` >= `Handle::CAPACITY`!");
        // After the assert, `index` fits in `RawHandle` and `index + 1` is
        // nonzero.
        #[allow(clippy::cast_possible_truncation)]
        Self(NonZero::new(index as RawHandle + 1).unwrap())
    }

    #[inline]
    pub(crate) const fn to_index(self) -> usize {
        self.0.get() as usize - 1
    }
}
