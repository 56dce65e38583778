use alloc::vec::Vec;

use super::handle::Handle;

/// Append-only slab of tree nodes.
///
/// An insert-only AVL multiset never releases an individual node, so there
/// is no free list and no per-slot tombstone: a handle, once issued, stays
/// valid until [`Arena::clear`] drops the whole tree.
#[derive(Clone)]
pub(crate) struct Arena<T> {
    slots: Vec<T>,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live nodes, which for this arena is every slot ever
    /// allocated since the last `clear`.
    pub(crate) const fn len(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        // The new slot's index is the current length, which must still be
        // addressable by a handle.
        assert!(
            self.slots.len() < Handle::CAPACITY,
            "`Arena::alloc()` - arena is at maximum capacity ({})",
            Handle::CAPACITY
        );
        self.slots.push(element);
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        &self.slots[handle.to_index()]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        &mut self.slots[handle.to_index()]
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
    }
}
