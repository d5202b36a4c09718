use super::OSRBTreeMap;
use crate::compare::Natural;
use crate::raw::RawOSRBTreeMap;

impl<K, V> OSRBTreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before
    /// the node storage reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let map: OSRBTreeMap<i32, i32> = OSRBTreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OSRBTreeMap::with_capacity_and_comparator(capacity, Natural)
    }
}

impl<K, V, C> OSRBTreeMap<K, V, C> {
    /// Creates an empty map ordered by `comparator`, with room for at least
    /// `capacity` entries.
    #[must_use]
    pub fn with_capacity_and_comparator(capacity: usize, comparator: C) -> Self {
        OSRBTreeMap {
            raw: RawOSRBTreeMap::with_capacity(capacity, comparator),
        }
    }

    /// Returns the number of entries the map can hold without reallocating.
    ///
    /// Slots freed by removals are reused before the storage grows.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
