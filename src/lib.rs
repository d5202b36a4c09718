//! An order-statistic red-black tree map for Rust.
//!
//! This crate provides [`OSRBTreeMap`], an ordered map with the familiar
//! `BTreeMap`-style API plus O(log n) positional queries:
//!
//! - [`get_by_rank`](OSRBTreeMap::get_by_rank) and
//!   [`select_key_by_rank`](OSRBTreeMap::select_key_by_rank) - Get the entry at a given sorted position
//! - [`rank_of`](OSRBTreeMap::rank_of) - Get the sorted position of a key
//! - Indexing by [`Rank`] - e.g., `map[Rank(0)]` for the first entry
//!
//! Ranks are zero-based everywhere.
//!
//! # Example
//!
//! ```
//! use osrb_tree::{OSRBTreeMap, Rank};
//!
//! let mut scores = OSRBTreeMap::new();
//! scores.insert(71, "Dana");
//! scores.insert(88, "Eli");
//! scores.insert(64, "Faye");
//!
//! // Standard ordered map operations work as expected
//! assert_eq!(scores.get(&88), Some(&"Eli"));
//! assert_eq!(scores.len(), 3);
//!
//! // Order-statistic operations (O(log n))
//! assert_eq!(scores.select_key_by_rank(1), Ok(&71));
//! assert_eq!(scores.rank_of(&88), Some(2));
//! assert_eq!(scores[Rank(0)], "Faye");
//! ```
//!
//! # Ordering
//!
//! Keys are ordered by a [`Comparator`]. The default, [`Natural`], defers to
//! [`Ord`]; [`OSRBTreeMap::with_order_fn`] and [`OSRBTreeMap::with_comparator`]
//! accept any other total order.
//!
//! # Features
//!
//! - **`no_std` compatible** - Only requires `alloc`, no standard library dependency
//! - **O(log n) rank operations** - Every node records the size of its subtree
//! - **Linear-time bulk loading** - [`OSRBTreeMap::from_sorted_iter`] and `From<BTreeMap>`
//!   build a balanced tree without rotations
//!
//! # Implementation
//!
//! The map is a red-black tree whose nodes live in an arena and refer to their
//! children and parent by index. Values are kept in a second arena so that a
//! value can be borrowed mutably while the structure is read.
//!
//! The crate does not install a logger. It emits a few [`log`] records at
//! `trace` and `debug` level for bulk operations and rejected requests.

#![no_std]
// These forbid rules and lint groups are meant to be very restrictive.
// NOTE: The mutable iterators need a small amount of unsafe code.
// #![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
// Enable coverage attributes for nightly builds.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod compare;
mod error;
mod order_statistic;
mod raw;

pub mod osrbtree_map;

pub use compare::{Comparator, Natural, OrderBy};
pub use error::Error;
pub use order_statistic::Rank;
pub use osrbtree_map::OSRBTreeMap;
