//! Linear-time construction from entries already in key order.

use alloc::vec::Vec;
use core::cmp::Ordering;

use super::{Color, Handle, Node, RawOSRBTreeMap, Side};
use crate::compare::Comparator;
use crate::error::Error;

impl<K, V, C> RawOSRBTreeMap<K, V, C> {
    /// Builds a tree from entries in strictly ascending key order.
    ///
    /// The input is checked before anything is allocated; the first position
    /// whose key does not order strictly after its predecessor is reported.
    pub(crate) fn from_sorted_vec(entries: Vec<(K, V)>, comparator: C) -> Result<Self, Error>
    where
        C: Comparator<K>,
    {
        if let Some(index) = entries
            .windows(2)
            .position(|pair| comparator.compare(&pair[0].0, &pair[1].0) != Ordering::Less)
        {
            let position = index + 1;
            log::debug!("rejected sorted build of {} entries at position {position}", entries.len());
            return Err(Error::UnsortedInput { position });
        }

        Ok(Self::from_ascending_vec(entries, comparator))
    }

    /// Builds a tree from entries whose keys are already known to be strictly
    /// ascending, such as the contents of another ordered map.
    pub(crate) fn from_ascending_vec(entries: Vec<(K, V)>, comparator: C) -> Self {
        let mut tree = Self::with_capacity(entries.len(), comparator);
        tree.assemble(entries);
        tree
    }

    /// Fills an empty tree from entries the caller guarantees are strictly
    /// ascending.
    pub(super) fn assemble(&mut self, entries: Vec<(K, V)>) {
        debug_assert!(self.is_empty(), "`assemble()` - tree is not empty");

        let count = entries.len();
        let mut source = entries.into_iter();
        self.root = self.build_subtree(&mut source, count, 1, red_depth(count));
        debug_assert!(source.next().is_none(), "`assemble()` - entries left over");
        log::trace!("built tree of {count} entries");
    }

    /// Builds a subtree of `count` entries drawn in order from `source`, its
    /// root sitting at `depth` (the tree root is depth 1).
    ///
    /// The left subtree takes the smaller half, so every path ends at the
    /// deepest level or one above it. Nodes on the deepest level are red and
    /// all others black, which gives every path the same black height.
    fn build_subtree<I>(&mut self, source: &mut I, count: usize, depth: usize, red_depth: usize) -> Option<Handle>
    where
        I: Iterator<Item = (K, V)>,
    {
        if count == 0 {
            return None;
        }

        let left_count = (count - 1) / 2;
        let left = self.build_subtree(source, left_count, depth + 1, red_depth);

        let (key, value) = source.next().expect("`build_subtree()` - source ran short");
        let value = self.values.alloc(value);
        let mut node = Node::new_leaf(key, value, None);
        node.set_size(count);
        node.set_color(if depth == red_depth && depth > 1 { Color::Red } else { Color::Black });
        node.set_child(Side::Left, left);
        let handle = self.nodes.alloc(node);

        let right = self.build_subtree(source, count - 1 - left_count, depth + 1, red_depth);
        self.nodes.get_mut(handle).set_child(Side::Right, right);
        for child in [left, right].into_iter().flatten() {
            self.nodes.get_mut(child).set_parent(Some(handle));
        }

        Some(handle)
    }
}

/// Depth of the deepest level in a tree of `count` nodes split as
/// `build_subtree` splits them.
fn red_depth(count: usize) -> usize {
    (usize::BITS - count.leading_zeros()) as usize
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::compare::{Natural, OrderBy};
    use alloc::vec;
    use pretty_assertions::assert_eq;

    fn pairs(keys: impl IntoIterator<Item = i32>) -> Vec<(i32, i32)> {
        keys.into_iter().map(|k| (k, -k)).collect()
    }

    #[test]
    fn red_depth_tracks_tree_height() {
        assert_eq!(red_depth(0), 0);
        assert_eq!(red_depth(1), 1);
        assert_eq!(red_depth(2), 2);
        assert_eq!(red_depth(3), 2);
        assert_eq!(red_depth(4), 3);
        assert_eq!(red_depth(7), 3);
        assert_eq!(red_depth(8), 4);
    }

    #[test]
    fn every_size_builds_a_valid_tree() {
        for count in 0..300 {
            let tree = RawOSRBTreeMap::from_sorted_vec(pairs(0..count), Natural).unwrap();
            tree.validate_invariants();
            assert_eq!(tree.len(), count as usize);
            for key in 0..count {
                assert_eq!(tree.rank_of(&key), Some(key as usize));
                assert_eq!(tree.get(&key), Some(&-key));
            }
        }
    }

    #[test]
    fn built_tree_accepts_further_updates() {
        let mut tree = RawOSRBTreeMap::from_sorted_vec(pairs((0..100).map(|k| k * 2)), Natural).unwrap();
        for key in 0..100 {
            tree.insert(key * 2 + 1, 0);
        }
        tree.validate_invariants();
        for key in 0..50 {
            tree.remove(&(key * 4));
        }
        tree.validate_invariants();
        assert_eq!(tree.len(), 150);
    }

    #[test]
    fn out_of_order_input_is_rejected() {
        let result = RawOSRBTreeMap::from_sorted_vec(pairs([1, 3, 2, 4]), Natural);
        assert_eq!(result.err(), Some(Error::UnsortedInput { position: 2 }));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        let result = RawOSRBTreeMap::from_sorted_vec(pairs([1, 1]), Natural);
        assert_eq!(result.err(), Some(Error::UnsortedInput { position: 1 }));
    }

    #[test]
    fn order_is_checked_with_the_tree_comparator() {
        let descending = OrderBy(|a: &i32, b: &i32| b.cmp(a));
        let tree = RawOSRBTreeMap::from_sorted_vec(vec![(3, ()), (2, ()), (1, ())], descending).unwrap();
        tree.validate_invariants();
        assert_eq!(tree.keys_in_order(), [3, 2, 1]);

        let ascending = vec![(1, ()), (2, ())];
        assert!(RawOSRBTreeMap::from_sorted_vec(ascending, descending).is_err());
    }
}
