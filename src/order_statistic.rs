/// A zero-based position in the sorted order of a map.
///
/// Indexing an [`OSRBTreeMap`](crate::OSRBTreeMap) with a `Rank` panics when
/// the rank is out of bounds; use
/// [`get_by_rank`](crate::OSRBTreeMap::get_by_rank) or
/// [`select_key_by_rank`](crate::OSRBTreeMap::select_key_by_rank) for a
/// checked lookup.
///
/// # Examples
///
/// ```
/// use osrb_tree::{OSRBTreeMap, Rank};
///
/// let mut map = OSRBTreeMap::new();
/// map.insert("b", 20);
/// map.insert("a", 10);
///
/// assert_eq!(map[Rank(0)], 10);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
