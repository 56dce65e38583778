use super::handle::Handle;

/// Cached per-subtree metadata, as seen by a parent node.
///
/// An absent child contributes the `Default` aggregates: height 0, size 0.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Aggregates {
    /// Longest root-to-leaf node count in the subtree; a lone leaf is 1.
    pub(crate) height: u8,
    /// Total elements in the subtree, duplicates counted.
    pub(crate) size: usize,
}

/// A single tree node: one distinct value, its duplicate count, the child
/// links, and the cached aggregates of the subtree it roots.
///
/// The value is immutable for the node's lifetime; everything else changes
/// only through the mutators below, and every child-link or frequency
/// mutation must be followed by [`Node::refresh_aggregates`].
#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    value: T,
    left: Option<Handle>,
    right: Option<Handle>,
    /// Duplicate insertions coalesced here. Always >= 1.
    frequency: usize,
    aggregates: Aggregates,
}

impl<T> Node<T> {
    /// A freshly inserted value: no children, frequency 1, height 1, size 1.
    pub(crate) const fn leaf(value: T) -> Self {
        Self {
            value,
            left: None,
            right: None,
            frequency: 1,
            aggregates: Aggregates { height: 1, size: 1 },
        }
    }

    pub(crate) const fn value(&self) -> &T {
        &self.value
    }

    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    pub(crate) const fn frequency(&self) -> usize {
        self.frequency
    }

    pub(crate) const fn size(&self) -> usize {
        self.aggregates.size
    }

    pub(crate) const fn aggregates(&self) -> Aggregates {
        self.aggregates
    }

    pub(crate) const fn set_left(&mut self, link: Option<Handle>) {
        self.left = link;
    }

    pub(crate) const fn set_right(&mut self, link: Option<Handle>) {
        self.right = link;
    }

    /// Coalesces one duplicate insertion into this node.
    ///
    /// Returns the new frequency. Heights are untouched by a frequency
    /// bump; only sizes need refreshing afterwards.
    pub(crate) const fn bump_frequency(&mut self) -> usize {
        self.frequency += 1;
        self.frequency
    }

    /// Recomputes the cached aggregates from the two child summaries:
    /// `height = 1 + max(child heights)`, `size = left + right + frequency`.
    pub(crate) fn refresh_aggregates(&mut self, left: Aggregates, right: Aggregates) {
        self.aggregates = Aggregates {
            height: 1 + left.height.max(right.height),
            size: left.size + right.size + self.frequency,
        };
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn leaf_invariants() {
        let node = Node::leaf(42);
        assert_eq!(*node.value(), 42);
        assert_eq!(node.left(), None);
        assert_eq!(node.right(), None);
        assert_eq!(node.frequency(), 1);
        assert_eq!(node.aggregates(), Aggregates { height: 1, size: 1 });
    }

    #[test]
    fn bump_frequency_counts_duplicates() {
        let mut node = Node::leaf("a");
        assert_eq!(node.bump_frequency(), 2);
        assert_eq!(node.bump_frequency(), 3);
        assert_eq!(node.frequency(), 3);
    }

    #[test]
    fn refresh_aggregates_recomputes_both_fields() {
        let mut node = Node::leaf(10);
        node.bump_frequency();

        // A taller left subtree of 4 elements, a single-node right subtree.
        let left = Aggregates { height: 2, size: 4 };
        let right = Aggregates { height: 1, size: 1 };
        node.refresh_aggregates(left, right);
        assert_eq!(node.aggregates(), Aggregates { height: 3, size: 7 });

        // Absent children fall back to the zero aggregates.
        node.refresh_aggregates(Aggregates::default(), Aggregates::default());
        assert_eq!(node.aggregates(), Aggregates { height: 1, size: 2 });
    }
}
