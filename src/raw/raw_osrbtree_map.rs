use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::{Arena, Handle};
use super::node::{Color, Node, Side};
use crate::compare::Comparator;

mod build;
mod fixup;

/// The red-black tree backing `OSRBTreeMap`.
///
/// Every node carries the size of its subtree, which is what makes rank
/// queries logarithmic. The entry count is the root's size.
#[derive(Clone)]
pub(crate) struct RawOSRBTreeMap<K, V, C> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<K>>,
    /// Arena storing all values, addressed by `Node::value`.
    values: Arena<V>,
    root: Option<Handle>,
    comparator: C,
}

/// Outcome of a descent looking for a key.
pub(crate) enum SearchResult {
    /// The key is stored at this node.
    Found(Handle),
    /// The key is absent; a new node for it belongs in `side` of `parent`,
    /// or at the root when `parent` is `None`.
    Vacant { parent: Option<Handle>, side: Side },
}

impl<K, V, C> RawOSRBTreeMap<K, V, C> {
    pub(crate) const fn new(comparator: C) -> Self {
        Self {
            nodes: Arena::new(),
            values: Arena::new(),
            root: None,
            comparator,
        }
    }

    pub(crate) fn with_capacity(capacity: usize, comparator: C) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            values: Arena::with_capacity(capacity),
            root: None,
            comparator,
        }
    }

    /// Returns the number of entries, read off the root's subtree size.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.size_of(self.root)
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    pub(crate) fn comparator(&self) -> &C {
        &self.comparator
    }

    pub(crate) fn clear(&mut self) {
        log::trace!("clearing tree of {} entries", self.len());
        self.nodes.clear();
        self.values.clear();
        self.root = None;
    }

    /// Drops the comparator, keeping the entries. Only positional operations
    /// remain available, which is all an owning iterator needs.
    pub(crate) fn into_unordered(self) -> RawOSRBTreeMap<K, V, ()> {
        RawOSRBTreeMap {
            nodes: self.nodes,
            values: self.values,
            root: self.root,
            comparator: (),
        }
    }

    /// Both arenas, for iterators that walk the structure without the tree.
    pub(crate) fn parts(&self) -> (&Arena<Node<K>>, &Arena<V>) {
        (&self.nodes, &self.values)
    }

    /// Like [`parts`](Self::parts), with the value arena writable. The node
    /// arena stays shared so the structure cannot change underneath.
    pub(crate) fn parts_mut(&mut self) -> (&Arena<Node<K>>, &mut Arena<V>) {
        (&self.nodes, &mut self.values)
    }

    /// Returns the node holding the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        Some(self.nodes.extreme(self.root?, Side::Left))
    }

    /// Returns the node holding the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        Some(self.nodes.extreme(self.root?, Side::Right))
    }

    pub(crate) fn key(&self, handle: Handle) -> &K {
        self.nodes.get(handle).key()
    }

    pub(crate) fn value(&self, handle: Handle) -> &V {
        self.values.get(self.nodes.get(handle).value())
    }

    pub(crate) fn value_mut(&mut self, handle: Handle) -> &mut V {
        self.values.get_mut(self.nodes.get(handle).value())
    }

    /// Returns the stored key alongside its value.
    pub(crate) fn entry_at(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get(node.value()))
    }

    /// Returns the stored key alongside a writable value. Keys and values live
    /// in separate arenas, so the two borrows do not overlap.
    pub(crate) fn entry_at_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.nodes.get(handle);
        (node.key(), self.values.get_mut(node.value()))
    }

    /// Returns the node at zero-based `rank` in key order.
    pub(crate) fn select(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;
        loop {
            let node = self.nodes.get(current);
            let left_size = self.nodes.size_of(node.left());
            match remaining.cmp(&left_size) {
                Ordering::Less => {
                    current = node.left().expect("`select()` - subtree size invariant violated");
                }
                Ordering::Equal => return Some(current),
                Ordering::Greater => {
                    remaining -= left_size + 1;
                    current = node.right().expect("`select()` - subtree size invariant violated");
                }
            }
        }
    }

    /// Empties the tree into a vector of entries in key order. O(n), no
    /// rebalancing.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut result = Vec::with_capacity(self.len());
        let mut stack: SmallVec<[Handle; 64]> = SmallVec::new();
        let mut current = self.root.take();

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left();
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.nodes.take(handle);
            current = node.right();
            let (key, value) = node.into_parts();
            result.push((key, self.values.take(value)));
        }

        log::trace!("drained {} entries", result.len());
        self.nodes.clear();
        self.values.clear();
        result
    }

    /// Keeps only the entries for which `keep` returns `true`, visiting them
    /// in key order and rebuilding the survivors in one linear pass.
    pub(crate) fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&K, &mut V) -> bool,
    {
        // Every verdict is collected before the structure changes, so a
        // panicking predicate leaves all entries in place.
        let mut verdicts = Vec::with_capacity(self.len());
        let mut cursor = self.first();
        while let Some(handle) = cursor {
            let (key, value) = self.entry_at_mut(handle);
            verdicts.push(keep(key, value));
            cursor = self.nodes.step(handle, Side::Right);
        }
        if verdicts.iter().all(|&kept| kept) {
            return;
        }

        let kept: Vec<(K, V)> = self
            .drain_to_vec()
            .into_iter()
            .zip(verdicts)
            .filter_map(|(entry, kept)| kept.then_some(entry))
            .collect();
        self.assemble(kept);
    }

    /// Allocates a red leaf for `key` and hangs it in `side` of `parent`, or
    /// makes it the root when `parent` is `None`. Sizes along the path grow by
    /// one; colors are left for the caller to repair.
    fn attach(&mut self, parent: Option<Handle>, side: Side, key: K, value: V) -> Handle {
        let value = self.values.alloc(value);
        let handle = self.nodes.alloc(Node::new_leaf(key, value, parent));
        match parent {
            Some(parent) => {
                debug_assert!(self.nodes.get(parent).child(side).is_none(), "`attach()` - slot is occupied");
                self.nodes.get_mut(parent).set_child(side, Some(handle));
                self.adjust_sizes(Some(parent), Growth::Grow);
            }
            None => {
                debug_assert!(self.root.is_none(), "`attach()` - tree already has a root");
                self.root = Some(handle);
            }
        }
        handle
    }

    /// Inserts a new entry at a vacant slot found by [`search`](Self::search)
    /// and rebalances. Returns the handle of the new entry, which stays valid
    /// until the next removal.
    pub(crate) fn insert_at(&mut self, parent: Option<Handle>, side: Side, key: K, value: V) -> Handle {
        let handle = self.attach(parent, side, key, value);
        self.fix_after_insert(handle);
        handle
    }

    /// Removes the entry stored at `target` and rebalances.
    pub(crate) fn remove_node(&mut self, target: Handle) -> (K, V) {
        let node = self.nodes.get(target);

        // A node with two children trades places with its successor, which
        // has no left child, and the successor's slot is removed instead.
        let victim = match (node.left(), node.right()) {
            (Some(_), Some(right)) => {
                let successor = self.nodes.extreme(right, Side::Left);
                let (target_node, successor_node) = self.nodes.get_pair_mut(target, successor);
                target_node.swap_payload(successor_node);
                successor
            }
            _ => target,
        };

        let removed = self.nodes.get(victim);
        let child = removed.left().or(removed.right());
        let parent = removed.parent();
        let color = removed.color();
        let side = parent.map(|p| self.side_of(victim, p));

        self.replace_child(parent, victim, child);
        if let Some(child) = child {
            self.nodes.get_mut(child).set_parent(parent);
        }
        self.adjust_sizes(parent, Growth::Shrink);

        let (key, value) = self.nodes.take(victim).into_parts();
        let value = self.values.take(value);

        if color == Color::Black {
            match (child, parent, side) {
                (Some(child), _, _) => {
                    // A black node with one child always has a red child.
                    debug_assert_eq!(self.nodes.get(child).color(), Color::Red);
                    self.nodes.get_mut(child).set_color(Color::Black);
                }
                (None, Some(parent), Some(side)) => self.fix_after_remove(parent, side),
                _ => {}
            }
        }

        (key, value)
    }

    pub(crate) fn pop_first(&mut self) -> Option<(K, V)> {
        let first = self.first()?;
        Some(self.remove_node(first))
    }

    pub(crate) fn pop_last(&mut self) -> Option<(K, V)> {
        let last = self.last()?;
        Some(self.remove_node(last))
    }

    /// Rotates at `pivot`, moving it down into its `side` slot and lifting its
    /// child from the opposite side into its place.
    ///
    /// Only the pivot and the lifted child change their child sets, so only
    /// their sizes are recomputed. The lifted child inherits the pivot's old
    /// size since the subtree holds the same nodes.
    fn rotate(&mut self, pivot: Handle, side: Side) {
        let lifted = self
            .nodes
            .get(pivot)
            .child(side.opposite())
            .expect("`rotate()` - pivot has no child to lift");
        let transferred = self.nodes.get(lifted).child(side);
        let parent = self.nodes.get(pivot).parent();
        let subtree_size = self.nodes.get(pivot).size();

        self.nodes.get_mut(pivot).set_child(side.opposite(), transferred);
        if let Some(transferred) = transferred {
            self.nodes.get_mut(transferred).set_parent(Some(pivot));
        }

        self.replace_child(parent, pivot, Some(lifted));
        self.nodes.get_mut(lifted).set_parent(parent);

        self.nodes.get_mut(lifted).set_child(side, Some(pivot));
        self.nodes.get_mut(pivot).set_parent(Some(lifted));

        let pivot_node = self.nodes.get(pivot);
        let pivot_size = 1 + self.nodes.size_of(pivot_node.left()) + self.nodes.size_of(pivot_node.right());
        self.nodes.get_mut(pivot).set_size(pivot_size);
        self.nodes.get_mut(lifted).set_size(subtree_size);
    }

    /// Points the slot that held `old` (a child of `parent`, or the root) at
    /// `new`. Does not touch `new`'s parent link.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let side = self.side_of(old, parent);
                self.nodes.get_mut(parent).set_child(side, new);
            }
            None => self.root = new,
        }
    }

    /// Which slot of `parent` holds `child`.
    fn side_of(&self, child: Handle, parent: Handle) -> Side {
        if self.nodes.get(parent).left() == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(self.nodes.get(parent).right(), Some(child), "`side_of()` - not a child");
            Side::Right
        }
    }

    fn is_red(&self, handle: Option<Handle>) -> bool {
        self.nodes.color_of(handle) == Color::Red
    }

    fn set_color(&mut self, handle: Handle, color: Color) {
        self.nodes.get_mut(handle).set_color(color);
    }

    /// Adds or removes one entry from the size of every node from `from` up to
    /// the root.
    fn adjust_sizes(&mut self, from: Option<Handle>, growth: Growth) {
        let mut current = from;
        while let Some(handle) = current {
            let node = self.nodes.get_mut(handle);
            let size = match growth {
                Growth::Grow => node.size() + 1,
                Growth::Shrink => node.size() - 1,
            };
            node.set_size(size);
            current = node.parent();
        }
    }
}

#[derive(Clone, Copy)]
enum Growth {
    Grow,
    Shrink,
}

impl<K, V, C> RawOSRBTreeMap<K, V, C> {
    /// Descends from the root comparing `key` with the comparator.
    pub(crate) fn search<Q>(&self, key: &Q) -> SearchResult
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.comparator.compare(key, node.key()) {
                Ordering::Less => side = Side::Left,
                Ordering::Greater => side = Side::Right,
                Ordering::Equal => return SearchResult::Found(handle),
            }
            parent = Some(handle);
            current = node.child(side);
        }

        SearchResult::Vacant { parent, side }
    }

    /// Returns the node storing `key`, if any.
    pub(crate) fn find<Q>(&self, key: &Q) -> Option<Handle>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        match self.search(key) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant { .. } => None,
        }
    }

    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        let handle = self.find(key)?;
        Some(self.value(handle))
    }

    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        let handle = self.find(key)?;
        Some(self.value_mut(handle))
    }

    pub(crate) fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        let handle = self.find(key)?;
        Some(self.entry_at(handle))
    }

    pub(crate) fn contains_key<Q>(&self, key: &Q) -> bool
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        self.find(key).is_some()
    }

    /// Inserts a key-value pair. If the key is already present its value is
    /// replaced in place and the old value returned; the stored key is kept
    /// and the shape of the tree does not change.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V>
    where
        C: Comparator<K>,
    {
        match self.search(&key) {
            SearchResult::Found(handle) => Some(core::mem::replace(self.value_mut(handle), value)),
            SearchResult::Vacant { parent, side } => {
                self.insert_at(parent, side, key, value);
                None
            }
        }
    }

    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        let handle = self.find(key)?;
        Some(self.remove_node(handle))
    }

    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Returns the zero-based rank of `key`: the number of stored keys that
    /// order before it.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        Q: ?Sized,
        C: Comparator<Q, K>,
    {
        let mut current = self.root;
        let mut rank = 0;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match self.comparator.compare(key, node.key()) {
                Ordering::Less => current = node.left(),
                Ordering::Greater => {
                    rank += self.nodes.size_of(node.left()) + 1;
                    current = node.right();
                }
                Ordering::Equal => return Some(rank + self.nodes.size_of(node.left())),
            }
        }

        None
    }
}
