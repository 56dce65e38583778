//! An order-statistic AVL multiset for Rust.
//!
//! This crate provides [`OSAvlMultiset`], an ordered multiset that keeps
//! duplicates and answers positional queries in O(log n):
//!
//! - [`kth`](OSAvlMultiset::kth) - Get the n-th smallest element (1-indexed)
//! - [`rank_of`](OSAvlMultiset::rank_of) - Get the 1-based rank of a value's
//!   last occurrence, i.e. how many elements are at or before it
//! - Indexing by [`Rank`] - e.g., `set[Rank(1)]` for the smallest element
//!
//! The ordering is pluggable: the value type's natural [`Ord`] order by
//! default, or any [`Comparator`] (typically a closure) injected at
//! construction.
//!
//! # Example
//!
//! ```
//! use osavl_tree::{OSAvlMultiset, Rank};
//!
//! let mut latencies = OSAvlMultiset::new();
//! latencies.insert(12);
//! latencies.insert(7);
//! latencies.insert(12);
//! latencies.insert(31);
//!
//! // Duplicates are kept and counted.
//! assert_eq!(latencies.len(), 4);
//! assert_eq!(latencies.count(&12), 2);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(latencies.kth(1), Some(&7)); // the minimum
//! assert_eq!(latencies.kth(3), Some(&12)); // duplicates occupy adjacent ranks
//!
//! // How many latencies are at most 12?
//! assert_eq!(latencies.rank_of(&12), Some(3));
//!
//! // Index by rank
//! assert_eq!(latencies[Rank(4)], 31);
//! ```
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **Multiset semantics** - Equal values coalesce into one node with a multiplicity
//! - **O(log n) rank operations** - Efficient order-statistic queries via subtree size augmentation
//! - **Pluggable ordering** - Natural `Ord` order or an injected comparator, fixed at construction
//!
//! # Implementation
//!
//! The multiset is an AVL tree whose nodes live in a contiguous arena and
//! refer to each other by handle, with no parent pointers and no unsafe
//! code. Each node caches its subtree's height and element count; the
//! heights drive rebalancing and the counts drive the rank queries.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod order;
mod order_statistic;
mod raw;

pub mod osavl_multiset;

pub use order::{Comparator, NaturalOrder};
pub use order_statistic::Rank;
pub use osavl_multiset::OSAvlMultiset;
