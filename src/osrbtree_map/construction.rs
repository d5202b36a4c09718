use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::cmp::Ordering;

use super::OSRBTreeMap;
use crate::Error;
use crate::compare::{Comparator, Natural, OrderBy};
use crate::raw::RawOSRBTreeMap;

impl<K, V, C> OSRBTreeMap<K, V, C> {
    /// Makes a new, empty map whose keys are ordered by `comparator`.
    ///
    /// # Examples
    ///
    /// ```
    /// use core::cmp::Ordering;
    /// use osrb_tree::{Comparator, OSRBTreeMap};
    ///
    /// struct CaseInsensitive;
    ///
    /// impl Comparator<str, String> for CaseInsensitive {
    ///     fn compare(&self, probe: &str, key: &String) -> Ordering {
    ///         probe.to_lowercase().cmp(&key.to_lowercase())
    ///     }
    /// }
    ///
    /// impl Comparator<String> for CaseInsensitive {
    ///     fn compare(&self, probe: &String, key: &String) -> Ordering {
    ///         probe.to_lowercase().cmp(&key.to_lowercase())
    ///     }
    /// }
    ///
    /// let mut hosts = OSRBTreeMap::with_comparator(CaseInsensitive);
    /// hosts.insert(String::from("Example.COM"), 1);
    /// assert_eq!(hosts.get("example.com"), Some(&1));
    /// ```
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::new(comparator),
        }
    }

    /// Builds a map ordered by `comparator` from arbitrary entries. Later
    /// entries overwrite the values of earlier ones with an equal key.
    ///
    /// # Complexity
    ///
    /// O(n log n)
    pub fn from_iter_with_comparator<I>(iter: I, comparator: C) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        C: Comparator<K>,
    {
        let mut map = OSRBTreeMap::with_comparator(comparator);
        map.extend(iter);
        map
    }

    /// Builds a map ordered by `comparator` from entries already in strictly
    /// ascending key order under that comparator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsortedInput`] naming the first entry whose key does
    /// not order strictly after the one before it. Duplicate keys are rejected
    /// the same way.
    ///
    /// # Complexity
    ///
    /// O(n): the tree is assembled directly, without rotations.
    pub fn from_sorted_iter_with_comparator<I>(iter: I, comparator: C) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        C: Comparator<K>,
    {
        let entries: Vec<(K, V)> = iter.into_iter().collect();
        Ok(OSRBTreeMap {
            raw: RawOSRBTreeMap::from_sorted_vec(entries, comparator)?,
        })
    }
}

impl<K, V, F> OSRBTreeMap<K, V, OrderBy<F>>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Makes a new, empty map whose keys are ordered by a closure.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut by_priority = OSRBTreeMap::with_order_fn(|a: &u8, b: &u8| b.cmp(a));
    /// by_priority.insert(1, "low");
    /// by_priority.insert(9, "urgent");
    /// by_priority.insert(5, "normal");
    ///
    /// assert_eq!(by_priority.first_key_value(), Some((&9, &"urgent")));
    /// ```
    #[must_use]
    pub const fn with_order_fn(order: F) -> Self {
        OSRBTreeMap::with_comparator(OrderBy(order))
    }
}

impl<K: Ord, V> OSRBTreeMap<K, V> {
    /// Builds a map from entries already in strictly ascending key order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsortedInput`] if a key is not strictly greater than
    /// the one before it.
    ///
    /// # Complexity
    ///
    /// O(n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map = OSRBTreeMap::from_sorted_iter((0..1000).map(|k| (k, k * k))).unwrap();
    /// assert_eq!(map.select_value_by_rank(30), Ok(&900));
    ///
    /// let unsorted = OSRBTreeMap::from_sorted_iter([(1, 'a'), (3, 'b'), (2, 'c')]);
    /// assert_eq!(unsorted.unwrap_err(), Error::UnsortedInput { position: 2 });
    /// ```
    pub fn from_sorted_iter<I>(iter: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        OSRBTreeMap::from_sorted_iter_with_comparator(iter, Natural)
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OSRBTreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        OSRBTreeMap::from_iter_with_comparator(iter, Natural)
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for OSRBTreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

/// Converts a `BTreeMap` in linear time; its keys are already strictly
/// ascending under the same `Ord`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use osrb_tree::OSRBTreeMap;
///
/// let source: BTreeMap<_, _> = (0..100).map(|k| (k, k.to_string())).collect();
/// let map = OSRBTreeMap::from(source);
/// assert_eq!(map.select_value_by_rank(42).unwrap(), "42");
/// ```
impl<K: Ord, V> From<BTreeMap<K, V>> for OSRBTreeMap<K, V> {
    fn from(map: BTreeMap<K, V>) -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::from_ascending_vec(map.into_iter().collect(), Natural),
        }
    }
}
