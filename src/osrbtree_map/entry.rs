use core::fmt;
use core::mem;

use crate::compare::Natural;
use crate::raw::{Handle, RawOSRBTreeMap, Side};

/// A view into a single entry in a map, which may either be vacant or occupied.
///
/// This `enum` is constructed from the [`entry`] method on [`crate::OSRBTreeMap`].
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTreeMap;
/// use osrb_tree::osrbtree_map::Entry;
///
/// let mut stock = OSRBTreeMap::new();
///
/// match stock.entry("bolts") {
///     Entry::Vacant(v) => {
///         v.insert(100);
///     }
///     Entry::Occupied(mut o) => {
///         *o.get_mut() += 100;
///     }
/// }
/// assert_eq!(stock["bolts"], 100);
/// ```
///
/// [`entry`]: crate::OSRBTreeMap::entry
pub enum Entry<'a, K: 'a, V: 'a, C = Natural> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, K, V, C>),

    /// An occupied entry.
    Occupied(OccupiedEntry<'a, K, V, C>),
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for Entry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Vacant(v) => f.debug_tuple("Entry").field(v).finish(),
            Entry::Occupied(o) => f.debug_tuple("Entry").field(o).finish(),
        }
    }
}

/// A view into a vacant entry in an `OSRBTreeMap`.
/// It is part of the [`Entry`] enum.
///
/// The entry remembers the empty slot found while looking the key up, so
/// inserting through it does not search the tree a second time.
pub struct VacantEntry<'a, K, V, C = Natural> {
    pub(crate) key: K,
    pub(crate) parent: Option<Handle>,
    pub(crate) side: Side,
    pub(crate) tree: &'a mut RawOSRBTreeMap<K, V, C>,
}

impl<K: fmt::Debug, V, C> fmt::Debug for VacantEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VacantEntry").field(&self.key).finish()
    }
}

/// A view into an occupied entry in an `OSRBTreeMap`.
/// It is part of the [`Entry`] enum.
pub struct OccupiedEntry<'a, K, V, C = Natural> {
    pub(crate) handle: Handle,
    pub(crate) tree: &'a mut RawOSRBTreeMap<K, V, C>,
}

impl<K: fmt::Debug, V: fmt::Debug, C> fmt::Debug for OccupiedEntry<'_, K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry").field("key", self.key()).field("value", self.get()).finish()
    }
}

impl<'a, K, V, C> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default if empty, and returns
    /// a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<&str, u32> = OSRBTreeMap::new();
    /// map.entry("retries").or_insert(3);
    ///
    /// assert_eq!(map["retries"], 3);
    /// ```
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of the default function if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<&str, String> = OSRBTreeMap::new();
    /// map.entry("greeting").or_insert_with(|| "hello".to_string());
    ///
    /// assert_eq!(map["greeting"], "hello");
    /// ```
    pub fn or_insert_with<F: FnOnce() -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(default()),
        }
    }

    /// Ensures a value is in the entry by inserting, if empty, the result of a
    /// function given the entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<&str, usize> = OSRBTreeMap::new();
    /// map.entry("checksum").or_insert_with_key(|key| key.len());
    ///
    /// assert_eq!(map["checksum"], 8);
    /// ```
    pub fn or_insert_with_key<F: FnOnce(&K) -> V>(self, default: F) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => {
                let value = default(&v.key);
                v.insert(value)
            }
        }
    }

    /// Returns a reference to this entry's key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<&str, usize> = OSRBTreeMap::new();
    /// assert_eq!(map.entry("timeout").key(), &"timeout");
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        match self {
            Entry::Occupied(o) => o.key(),
            Entry::Vacant(v) => v.key(),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut hits: OSRBTreeMap<&str, usize> = OSRBTreeMap::new();
    ///
    /// hits.entry("/index").and_modify(|e| *e += 1).or_insert(1);
    /// assert_eq!(hits["/index"], 1);
    ///
    /// hits.entry("/index").and_modify(|e| *e += 1).or_insert(1);
    /// assert_eq!(hits["/index"], 2);
    /// ```
    #[allow(clippy::return_self_not_must_use)]
    pub fn and_modify<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        if let Entry::Occupied(ref mut o) = self {
            f(o.get_mut());
        }
        self
    }

    /// Sets the value of the entry, and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<&str, u8> = OSRBTreeMap::new();
    /// let entry = map.entry("level").insert_entry(4);
    ///
    /// assert_eq!(entry.key(), &"level");
    /// assert_eq!(entry.get(), &4);
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        match self {
            Entry::Occupied(mut o) => {
                o.insert(value);
                o
            }
            Entry::Vacant(v) => v.insert_entry(value),
        }
    }
}

impl<'a, K, V: Default, C> Entry<'a, K, V, C> {
    /// Ensures a value is in the entry by inserting the default value if empty,
    /// and returns a mutable reference to the value in the entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    ///
    /// let mut map: OSRBTreeMap<&str, Option<usize>> = OSRBTreeMap::new();
    /// map.entry("owner").or_default();
    ///
    /// assert_eq!(map["owner"], None);
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn or_default(self) -> &'a mut V {
        match self {
            Entry::Occupied(o) => o.into_mut(),
            Entry::Vacant(v) => v.insert(V::default()),
        }
    }
}

impl<'a, K, V, C> VacantEntry<'a, K, V, C> {
    /// Gets a reference to the key that would be used when inserting a value
    /// through the `VacantEntry`.
    #[allow(clippy::must_use_candidate)]
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Take ownership of the key.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use osrb_tree::osrbtree_map::Entry;
    ///
    /// let mut map: OSRBTreeMap<String, usize> = OSRBTreeMap::new();
    ///
    /// if let Entry::Vacant(v) = map.entry("spare".to_string()) {
    ///     assert_eq!(v.into_key(), "spare");
    /// }
    /// assert!(map.is_empty());
    /// ```
    #[allow(clippy::must_use_candidate)]
    pub fn into_key(self) -> K {
        self.key
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns a mutable reference to it.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use osrb_tree::osrbtree_map::Entry;
    ///
    /// let mut map: OSRBTreeMap<&str, u32> = OSRBTreeMap::new();
    ///
    /// if let Entry::Vacant(v) = map.entry("port") {
    ///     *v.insert(8000) += 80;
    /// }
    /// assert_eq!(map["port"], 8080);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) for rebalancing; the tree is not searched again.
    pub fn insert(self, value: V) -> &'a mut V {
        let handle = self.tree.insert_at(self.parent, self.side, self.key, value);
        self.tree.value_mut(handle)
    }

    /// Sets the value of the entry with the `VacantEntry`'s key,
    /// and returns an `OccupiedEntry`.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use osrb_tree::osrbtree_map::Entry;
    ///
    /// let mut map: OSRBTreeMap<&str, u32> = OSRBTreeMap::new();
    ///
    /// if let Entry::Vacant(v) = map.entry("port") {
    ///     let entry = v.insert_entry(8080);
    ///     assert_eq!(entry.get(), &8080);
    /// }
    /// assert_eq!(map["port"], 8080);
    /// ```
    pub fn insert_entry(self, value: V) -> OccupiedEntry<'a, K, V, C> {
        let handle = self.tree.insert_at(self.parent, self.side, self.key, value);
        OccupiedEntry {
            handle,
            tree: self.tree,
        }
    }
}

impl<'a, K, V, C> OccupiedEntry<'a, K, V, C> {
    /// Gets a reference to the key in the entry.
    ///
    /// This is the key stored in the map, not the key that was used to probe
    /// the entry. They can differ when the comparator only looks at part of
    /// the key.
    #[must_use]
    pub fn key(&self) -> &K {
        self.tree.key(self.handle)
    }

    /// Take ownership of the key and value from the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use osrb_tree::osrbtree_map::Entry;
    ///
    /// let mut map = OSRBTreeMap::from([("host", "localhost")]);
    ///
    /// if let Entry::Occupied(o) = map.entry("host") {
    ///     assert_eq!(o.remove_entry(), ("host", "localhost"));
    /// }
    /// assert!(map.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn remove_entry(self) -> (K, V) {
        self.tree.remove_node(self.handle)
    }

    /// Gets a reference to the value in the entry.
    #[must_use]
    pub fn get(&self) -> &V {
        self.tree.value(self.handle)
    }

    /// Gets a mutable reference to the value in the entry.
    ///
    /// If you need a reference to the `OccupiedEntry` that may outlive the
    /// destruction of the `Entry` value, see [`into_mut`].
    ///
    /// [`into_mut`]: OccupiedEntry::into_mut
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use osrb_tree::osrbtree_map::Entry;
    ///
    /// let mut map = OSRBTreeMap::from([("budget", 10)]);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("budget") {
    ///     *o.get_mut() *= 3;
    ///     assert_eq!(*o.get(), 30);
    ///     *o.get_mut() += 2;
    /// }
    /// assert_eq!(map["budget"], 32);
    /// ```
    pub fn get_mut(&mut self) -> &mut V {
        self.tree.value_mut(self.handle)
    }

    /// Converts the entry into a mutable reference to its value.
    ///
    /// If you need multiple references to the `OccupiedEntry`, see [`get_mut`].
    ///
    /// [`get_mut`]: OccupiedEntry::get_mut
    #[must_use = "`self` will be dropped if the result is not used"]
    pub fn into_mut(self) -> &'a mut V {
        self.tree.value_mut(self.handle)
    }

    /// Sets the value of the entry with the `OccupiedEntry`'s key,
    /// and returns the entry's old value.
    ///
    /// # Examples
    ///
    /// ```
    /// use osrb_tree::OSRBTreeMap;
    /// use osrb_tree::osrbtree_map::Entry;
    ///
    /// let mut map = OSRBTreeMap::from([("mode", "debug")]);
    ///
    /// if let Entry::Occupied(mut o) = map.entry("mode") {
    ///     assert_eq!(o.insert("release"), "debug");
    /// }
    /// assert_eq!(map["mode"], "release");
    /// ```
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Takes the value of the entry out of the map, and returns it.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[allow(clippy::must_use_candidate)]
    pub fn remove(self) -> V {
        self.remove_entry().1
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use crate::OSRBTreeMap;
    use crate::osrbtree_map::Entry;

    #[test]
    fn vacant_insert_keeps_tree_valid() {
        let mut map = OSRBTreeMap::new();
        for key in [50, 20, 80, 10, 30, 70, 90, 25, 27, 26] {
            match map.entry(key) {
                Entry::Vacant(v) => {
                    v.insert(key * 10);
                }
                Entry::Occupied(_) => panic!("{key} inserted twice"),
            }
            map.raw.validate_invariants();
        }
        assert_eq!(map.len(), 10);
        assert_eq!(map.rank_of(&27), Some(4));
    }

    #[test]
    fn occupied_remove_rebalances() {
        let mut map: OSRBTreeMap<i32, i32> = (0..64).map(|k| (k, k)).collect();
        for key in (0..64).step_by(3) {
            let Entry::Occupied(o) = map.entry(key) else {
                panic!("{key} missing");
            };
            assert_eq!(o.remove_entry(), (key, key));
            map.raw.validate_invariants();
        }
        assert_eq!(map.len(), 64 - 22);
    }

    #[test]
    fn entry_keeps_stored_key() {
        let mut map = OSRBTreeMap::with_order_fn(|a: &(u8, &str), b: &(u8, &str)| a.0.cmp(&b.0));
        map.insert((1, "first"), ());
        let entry = map.entry((1, "lookup"));
        assert_eq!(entry.key(), &(1, "first"));
    }
}
