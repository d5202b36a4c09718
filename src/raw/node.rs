use super::arena::{Arena, Handle};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Color {
    Red,
    Black,
}

/// Which child slot of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Red-black tree node augmented with the size of its subtree.
///
/// The value lives in a separate arena and is referenced by `value`, so the
/// structural fields can be read while a caller holds a mutable value borrow.
#[derive(Clone)]
pub(crate) struct Node<K> {
    key: K,
    value: Handle,
    color: Color,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
    // Number of nodes in the subtree rooted here, this node included.
    size: usize,
}

impl<K> Node<K> {
    /// Creates a detached red leaf.
    pub(crate) fn new_leaf(key: K, value: Handle, parent: Option<Handle>) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            parent,
            left: None,
            right: None,
            size: 1,
        }
    }

    #[inline]
    pub(crate) fn key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub(crate) fn value(&self) -> Handle {
        self.value
    }

    /// Moves the payload out of the node, consuming it.
    pub(crate) fn into_parts(self) -> (K, Handle) {
        (self.key, self.value)
    }

    /// Exchanges key and value with another node, leaving all links alone.
    pub(crate) fn swap_payload(&mut self, other: &mut Self) {
        core::mem::swap(&mut self.key, &mut other.key);
        core::mem::swap(&mut self.value, &mut other.value);
    }

    #[inline]
    pub(crate) fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    #[inline]
    pub(crate) fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    #[inline]
    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) fn set_size(&mut self, size: usize) {
        self.size = size;
    }
}

/// Navigation over a node arena. Shared by the tree engine and the iterators,
/// which only hold the arena and not the whole tree.
impl<K> Arena<Node<K>> {
    /// Size of a possibly empty subtree.
    #[inline]
    pub(crate) fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.get(h).size())
    }

    /// Color of a possibly empty subtree; empty subtrees count as black.
    #[inline]
    pub(crate) fn color_of(&self, handle: Option<Handle>) -> Color {
        handle.map_or(Color::Black, |h| self.get(h).color())
    }

    /// Follows `side` links from `handle` to the end.
    pub(crate) fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Returns the in-order neighbour of `handle`: the successor for
    /// `Side::Right`, the predecessor for `Side::Left`.
    pub(crate) fn step(&self, handle: Handle, toward: Side) -> Option<Handle> {
        if let Some(child) = self.get(handle).child(toward) {
            return Some(self.extreme(child, toward.opposite()));
        }
        let mut current = handle;
        while let Some(parent) = self.get(current).parent() {
            if self.get(parent).child(toward.opposite()) == Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn step_walks_in_order_both_ways() {
        //     b
        //    / \
        //   a   d
        //      /
        //     c
        let mut nodes = Arena::new();
        let v = Handle::from_index(0);
        let b = nodes.alloc(Node::new_leaf('b', v, None));
        let a = nodes.alloc(Node::new_leaf('a', v, Some(b)));
        let d = nodes.alloc(Node::new_leaf('d', v, Some(b)));
        let c = nodes.alloc(Node::new_leaf('c', v, Some(d)));
        nodes.get_mut(b).set_child(Side::Left, Some(a));
        nodes.get_mut(b).set_child(Side::Right, Some(d));
        nodes.get_mut(d).set_child(Side::Left, Some(c));

        let mut forward = Vec::new();
        let mut current = Some(nodes.extreme(b, Side::Left));
        while let Some(h) = current {
            forward.push(*nodes.get(h).key());
            current = nodes.step(h, Side::Right);
        }
        assert_eq!(forward, ['a', 'b', 'c', 'd']);

        let mut backward = Vec::new();
        let mut current = Some(nodes.extreme(b, Side::Right));
        while let Some(h) = current {
            backward.push(*nodes.get(h).key());
            current = nodes.step(h, Side::Left);
        }
        assert_eq!(backward, ['d', 'c', 'b', 'a']);

        assert_eq!(nodes.size_of(None), 0);
        assert_eq!(nodes.color_of(None), Color::Black);
        assert_eq!(nodes.color_of(Some(c)), Color::Red);
    }

    #[test]
    fn opposite_is_an_involution() {
        for side in [Side::Left, Side::Right] {
            assert_ne!(side.opposite(), side);
            assert_eq!(side.opposite().opposite(), side);
        }
    }

    #[test]
    fn child_slots_are_independent() {
        let mut node = Node::new_leaf("k", Handle::from_index(0), None);
        assert_eq!(node.color(), Color::Red);
        assert_eq!(node.size(), 1);

        node.set_child(Side::Left, Some(Handle::from_index(1)));
        assert_eq!(node.left(), Some(Handle::from_index(1)));
        assert_eq!(node.child(Side::Right), None);

        node.set_child(Side::Right, Some(Handle::from_index(2)));
        assert_eq!(node.right(), Some(Handle::from_index(2)));
        assert_eq!(node.child(Side::Left), Some(Handle::from_index(1)));
    }

    #[test]
    fn swap_payload_keeps_links() {
        let mut a = Node::new_leaf(1, Handle::from_index(10), Some(Handle::from_index(3)));
        let mut b = Node::new_leaf(2, Handle::from_index(20), None);
        b.set_color(Color::Black);

        a.swap_payload(&mut b);

        assert_eq!((*a.key(), a.value()), (2, Handle::from_index(20)));
        assert_eq!((*b.key(), b.value()), (1, Handle::from_index(10)));
        assert_eq!(a.parent(), Some(Handle::from_index(3)));
        assert_eq!(a.color(), Color::Red);
        assert_eq!(b.color(), Color::Black);
    }
}
