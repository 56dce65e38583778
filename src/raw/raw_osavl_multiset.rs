use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Aggregates, Node};
use crate::order::Comparator;

/// The core AVL multiset implementation backing `OSAvlMultiset`.
///
/// Nodes live in an arena and refer to each other by handle; the tree has
/// no parent links. Insertion recurses down the search path and every
/// recursive step returns the (possibly new) root handle of its subtree,
/// which the caller reattaches as its own child. Rebalancing therefore
/// happens on the way back up, with at most one single or double rotation
/// per insert.
#[derive(Clone)]
pub(crate) struct RawOSAvlMultiset<T, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of elements, duplicates counted. Refreshed from the
    /// root's cached size after every insert.
    len: usize,
    /// The comparison capability. Fixed at construction.
    order: C,
}

impl<T, C> RawOSAvlMultiset<T, C> {
    /// Creates a new, empty multiset ordered by `order`.
    pub(crate) const fn new(order: C) -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
            order,
        }
    }

    /// Creates a new, empty multiset with room for `capacity` distinct
    /// values before the node arena reallocates.
    pub(crate) fn with_capacity(capacity: usize, order: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            order,
        }
    }

    /// Returns the number of elements, duplicates counted.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the multiset contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct values, which is the node count.
    pub(crate) const fn distinct_len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the capacity of the node arena.
    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Drops every element. The ordering capability is retained.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Returns the root handle, if the tree is non-empty.
    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    /// Returns the node arena, for walking the tree by handle.
    pub(crate) const fn nodes(&self) -> &Arena<Node<T>> {
        &self.nodes
    }

    /// Returns the smallest value under the active order.
    pub(crate) fn first(&self) -> Option<&T> {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            match node.left() {
                Some(left) => current = left,
                None => return Some(node.value()),
            }
        }
    }

    /// Returns the largest value under the active order.
    pub(crate) fn last(&self) -> Option<&T> {
        let mut current = self.root?;
        loop {
            let node = self.nodes.get(current);
            match node.right() {
                Some(right) => current = right,
                None => return Some(node.value()),
            }
        }
    }

    /// Selects the element with 1-indexed rank `n` in sorted order, or
    /// `None` when `n` is 0 or exceeds `len`.
    ///
    /// Descends by subtree sizes alone; no comparisons are performed. Let
    /// `ls` be the left child's size: ranks `1..=ls` lie in the left
    /// subtree, the next `frequency` ranks are this node's value, and the
    /// rest lie to the right with `ls + frequency` ranks already spoken
    /// for.
    pub(crate) fn kth(&self, n: usize) -> Option<&T> {
        if n == 0 || n > self.len {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = n;

        loop {
            let node = self.nodes.get(current);
            let left_size = self.aggregates_of(node.left()).size;

            if remaining <= left_size {
                current = node
                    .left()
                    .expect("`kth()` - left subtree accounts for the rank but the child is absent!");
            } else if remaining <= left_size + node.frequency() {
                return Some(node.value());
            } else {
                remaining -= left_size + node.frequency();
                current = node
                    .right()
                    .expect("`kth()` - right subtree accounts for the rank but the child is absent!");
            }
        }
    }

    /// Aggregates of an optional subtree; an absent child is height 0,
    /// size 0.
    fn aggregates_of(&self, link: Option<Handle>) -> Aggregates {
        link.map_or(Aggregates::default(), |handle| self.nodes.get(handle).aggregates())
    }

    /// Recomputes one node's cached aggregates from its current children.
    fn update_aggregates(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left(), node.right())
        };
        let left = self.aggregates_of(left);
        let right = self.aggregates_of(right);
        self.nodes.get_mut(handle).refresh_aggregates(left, right);
    }

    /// `height(left) - height(right)` for the node at `handle`. Between
    /// inserts this lies in `-1..=1`; during rebalancing it can reach ±2.
    fn height_diff(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        let left = self.aggregates_of(node.left()).height;
        let right = self.aggregates_of(node.right()).height;
        i16::from(left) - i16::from(right)
    }

    /// Restores the AVL property at `handle` after one insertion below it
    /// and returns the subtree's (possibly new) root handle.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        match self.height_diff(handle) {
            2 => {
                let left = self
                    .nodes
                    .get(handle)
                    .left()
                    .expect("`rebalance()` - left-heavy node has no left child!");
                // A freshly violated node never has a balanced tall child:
                // the left child leans left (single rotation) or right
                // (double rotation).
                if self.height_diff(left) < 0 {
                    let rotated = self.rotate_left(left);
                    self.nodes.get_mut(handle).set_left(Some(rotated));
                    self.update_aggregates(handle);
                }
                self.rotate_right(handle)
            }
            -2 => {
                let right = self
                    .nodes
                    .get(handle)
                    .right()
                    .expect("`rebalance()` - right-heavy node has no right child!");
                if self.height_diff(right) > 0 {
                    let rotated = self.rotate_right(right);
                    self.nodes.get_mut(handle).set_right(Some(rotated));
                    self.update_aggregates(handle);
                }
                self.rotate_left(handle)
            }
            _ => handle,
        }
    }

    /// Right rotation: promotes the left child over the node at `handle`.
    ///
    /// The pivot's right subtree moves across to become the demoted node's
    /// left subtree. Aggregates are refreshed on the demoted node first,
    /// then on the pivot. Returns the pivot as the subtree's new root.
    fn rotate_right(&mut self, handle: Handle) -> Handle {
        let pivot = self
            .nodes
            .get(handle)
            .left()
            .expect("`rotate_right()` - node has no left child to promote!");
        let across = self.nodes.get(pivot).right();

        self.nodes.get_mut(handle).set_left(across);
        self.nodes.get_mut(pivot).set_right(Some(handle));

        self.update_aggregates(handle);
        self.update_aggregates(pivot);
        pivot
    }

    /// Left rotation: promotes the right child over the node at `handle`.
    /// Exact mirror of [`Self::rotate_right`].
    fn rotate_left(&mut self, handle: Handle) -> Handle {
        let pivot = self
            .nodes
            .get(handle)
            .right()
            .expect("`rotate_left()` - node has no right child to promote!");
        let across = self.nodes.get(pivot).left();

        self.nodes.get_mut(handle).set_right(across);
        self.nodes.get_mut(pivot).set_left(Some(handle));

        self.update_aggregates(handle);
        self.update_aggregates(pivot);
        pivot
    }
}

impl<T, C: Comparator<T>> RawOSAvlMultiset<T, C> {
    /// Inserts `value`, coalescing it into an existing node when the
    /// comparator reports equality. Returns the multiplicity of `value`
    /// after this insertion.
    pub(crate) fn insert(&mut self, value: T) -> usize {
        let (root, multiplicity) = self.insert_at(self.root, value);
        self.root = Some(root);
        self.len = self.nodes.get(root).size();
        multiplicity
    }

    /// Inserts below `link` and returns the subtree's (possibly new) root
    /// handle plus the inserted value's multiplicity.
    fn insert_at(&mut self, link: Option<Handle>, value: T) -> (Handle, usize) {
        let Some(handle) = link else {
            return (self.nodes.alloc(Node::leaf(value)), 1);
        };

        match self.order.compare(&value, self.nodes.get(handle).value()) {
            Ordering::Less => {
                let left = self.nodes.get(handle).left();
                let (child, multiplicity) = self.insert_at(left, value);
                self.nodes.get_mut(handle).set_left(Some(child));
                self.update_aggregates(handle);
                (self.rebalance(handle), multiplicity)
            }
            // Equal values pile onto one node; heights are untouched, so
            // no rebalancing can be needed on this path.
            Ordering::Equal => {
                let multiplicity = self.nodes.get_mut(handle).bump_frequency();
                self.update_aggregates(handle);
                (handle, multiplicity)
            }
            Ordering::Greater => {
                let right = self.nodes.get(handle).right();
                let (child, multiplicity) = self.insert_at(right, value);
                self.nodes.get_mut(handle).set_right(Some(child));
                self.update_aggregates(handle);
                (self.rebalance(handle), multiplicity)
            }
        }
    }

    /// Returns the 1-indexed rank of the **last** occurrence of `value`:
    /// the count of stored elements that order at or before it. `None` if
    /// the value is absent.
    pub(crate) fn rank_of(&self, value: &T) -> Option<usize> {
        let mut current = self.root;
        let mut preceding = 0;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.order.compare(value, node.value()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => {
                    return Some(preceding + self.aggregates_of(node.left()).size + node.frequency());
                }
                Ordering::Greater => {
                    preceding += self.aggregates_of(node.left()).size + node.frequency();
                    current = node.right();
                }
            }
        }

        None
    }

    /// Returns the multiplicity of `value`, or 0 if it is absent.
    pub(crate) fn count(&self, value: &T) -> usize {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.order.compare(value, node.value()) {
                Ordering::Less => current = node.left(),
                Ordering::Equal => return node.frequency(),
                Ordering::Greater => current = node.right(),
            }
        }

        0
    }
}
