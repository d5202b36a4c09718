//! Ordering functions for [`OSRBTreeMap`](crate::OSRBTreeMap).

use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;

/// A total order used to arrange the keys of a map.
///
/// `compare(probe, key)` orders a lookup `probe` of type `Q` against a stored
/// key of type `K`. Inserting requires `Comparator<K>`; lookups with a borrowed
/// form require `Comparator<Q, K>`.
///
/// Implementations must be consistent: the order must not change while keys
/// are stored, and `Comparator<Q, K>` must agree with `Comparator<K>` on the
/// keys it can see. Violating this is a logic error; the map stays memory safe
/// but lookups may return wrong results.
pub trait Comparator<Q: ?Sized, K: ?Sized = Q> {
    /// Returns how `probe` is ordered relative to `key`.
    fn compare(&self, probe: &Q, key: &K) -> Ordering;
}

/// The natural order of the key type, as defined by [`Ord`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub struct Natural;

impl<Q, K> Comparator<Q, K> for Natural
where
    Q: ?Sized + Ord,
    K: Borrow<Q>,
{
    #[inline]
    fn compare(&self, probe: &Q, key: &K) -> Ordering {
        probe.cmp(key.borrow())
    }
}

/// An order given by a closure or function.
///
/// # Examples
///
/// ```
/// use osrb_tree::OSRBTreeMap;
///
/// // Longest words first, ties broken alphabetically.
/// let mut map = OSRBTreeMap::with_order_fn(|a: &&str, b: &&str| b.len().cmp(&a.len()).then(a.cmp(b)));
/// map.insert("fig", 1);
/// map.insert("banana", 2);
/// map.insert("kiwi", 3);
///
/// let keys: Vec<_> = map.keys().copied().collect();
/// assert_eq!(keys, ["banana", "kiwi", "fig"]);
/// ```
#[derive(Clone, Copy, Default)]
pub struct OrderBy<F>(pub F);

impl<K, F> Comparator<K> for OrderBy<F>
where
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, probe: &K, key: &K) -> Ordering {
        (self.0)(probe, key)
    }
}

impl<F> fmt::Debug for OrderBy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OrderBy").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::String;

    #[test]
    fn natural_accepts_borrowed_probes() {
        let stored = String::from("m");
        assert_eq!(Natural.compare("a", &stored), Ordering::Less);
        assert_eq!(Natural.compare("m", &stored), Ordering::Equal);
        assert_eq!(Natural.compare("z", &stored), Ordering::Greater);
    }

    #[test]
    fn order_by_delegates_to_closure() {
        let reverse = OrderBy(|a: &i32, b: &i32| b.cmp(a));
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&2, &2), Ordering::Equal);
    }
}
