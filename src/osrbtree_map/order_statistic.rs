use core::ops::{Index, IndexMut};

use super::OSRBTreeMap;
use crate::compare::Comparator;
use crate::{Error, Rank};

impl<K, V, C> OSRBTreeMap<K, V, C> {
    /// Returns the key-value pair at position `rank` in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert("a", 10);
    /// map.insert("c", 30);
    /// map.insert("b", 20);
    ///
    /// assert_eq!(map.get_by_rank(1), Some((&"b", &20)));
    /// assert!(map.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<(&K, &V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.entry_at(handle))
    }

    /// Returns the key and a mutable reference to the value at position `rank`
    /// in sorted order.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    /// The key is returned as a shared reference because mutating it would
    /// violate the map's ordering invariants.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::from([(10, "a"), (5, "b")]);
    ///
    /// if let Some((key, value)) = map.get_by_rank_mut(0) {
    ///     assert_eq!(*key, 5);
    ///     *value = "updated";
    /// }
    /// assert_eq!(map.get(&5), Some(&"updated"));
    /// ```
    #[must_use]
    pub fn get_by_rank_mut(&mut self, rank: usize) -> Option<(&K, &mut V)> {
        let handle = self.raw.select(rank)?;
        Some(self.raw.entry_at_mut(handle))
    }

    /// Returns the key at position `rank` in sorted order.
    ///
    /// The rank is zero-based.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfBounds`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::{Error, OSRBTreeMap};
    ///
    /// let map: OSRBTreeMap<i32, ()> = (1..=9).map(|k| (k * k, ())).collect();
    ///
    /// assert_eq!(map.select_key_by_rank(4), Ok(&25));
    /// assert_eq!(map.select_key_by_rank(9), Err(Error::RankOutOfBounds { rank: 9, len: 9 }));
    /// ```
    pub fn select_key_by_rank(&self, rank: usize) -> Result<&K, Error> {
        match self.get_by_rank(rank) {
            Some((key, _)) => Ok(key),
            None => Err(self.rank_out_of_bounds(rank)),
        }
    }

    /// Returns the value whose key sits at position `rank` in sorted order.
    ///
    /// The rank is zero-based.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfBounds`] if `rank >= self.len()`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map = OSRBTreeMap::from([(3, "three"), (1, "one"), (2, "two")]);
    ///
    /// assert_eq!(map.select_value_by_rank(0), Ok(&"one"));
    /// assert!(map.select_value_by_rank(3).is_err());
    /// ```
    pub fn select_value_by_rank(&self, rank: usize) -> Result<&V, Error> {
        match self.get_by_rank(rank) {
            Some((_, value)) => Ok(value),
            None => Err(self.rank_out_of_bounds(rank)),
        }
    }

    /// Returns the zero-based rank of `key` in sorted order, or `None` if the
    /// key is not present. This is the number of keys that order before it.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map = OSRBTreeMap::new();
    /// map.insert(10, "a");
    /// map.insert(20, "b");
    ///
    /// assert_eq!(map.rank_of(&20), Some(1));
    /// assert_eq!(map.rank_of(&15), None);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        self.raw.rank_of(key)
    }

    fn rank_out_of_bounds(&self, rank: usize) -> Error {
        let len = self.len();
        log::debug!("rank {rank} requested from a map of length {len}");
        Error::RankOutOfBounds { rank, len }
    }
}

/// Indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let map = OSRBTreeMap::from([("a", 1), ("b", 2)]);
///
/// assert_eq!(map[Rank(0)], 1);
/// ```
impl<K, V, C> Index<Rank> for OSRBTreeMap<K, V, C> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

/// Mutably indexes into the map by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::from([("a", 1), ("b", 2)]);
/// map[Rank(1)] = 5;
///
/// assert_eq!(map.get(&"b"), Some(&5));
/// ```
impl<K, V, C> IndexMut<Rank> for OSRBTreeMap<K, V, C> {
    fn index_mut(&mut self, rank: Rank) -> &mut Self::Output {
        self.get_by_rank_mut(rank.0).map(|(_, v)| v).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::{Error, OSRBTreeMap, Rank};

    #[test]
    fn empty_map_rejects_every_rank() {
        let map: OSRBTreeMap<u32, u32> = OSRBTreeMap::new();
        assert_eq!(map.select_key_by_rank(0), Err(Error::RankOutOfBounds { rank: 0, len: 0 }));
        assert_eq!(map.select_value_by_rank(0), Err(Error::RankOutOfBounds { rank: 0, len: 0 }));
        assert!(map.get_by_rank(0).is_none());
        assert!(map.rank_of(&0).is_none());
    }

    #[test]
    fn rank_and_select_are_inverse() {
        let map: OSRBTreeMap<i64, ()> = (0..500).map(|k| ((k * 7919) % 1009, ())).collect();
        for rank in 0..map.len() {
            let key = map.select_key_by_rank(rank).unwrap();
            assert_eq!(map.rank_of(key), Some(rank));
        }
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_end_panics() {
        let map = OSRBTreeMap::from([(1, 1)]);
        let _ = map[Rank(1)];
    }
}
