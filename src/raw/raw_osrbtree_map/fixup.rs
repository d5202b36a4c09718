//! Red-black rebalancing after a structural insert or removal.
//!
//! Each repair step first classifies the local configuration into one of a
//! handful of cases, then applies the recoloring and rotation for that case.
//! Mirror-image configurations share a case and differ only in `side`.

use super::{Color, Handle, RawOSRBTreeMap, Side};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum InsertCase {
    /// The red node is the root.
    Root,
    /// The red node hangs below a black parent; nothing to repair.
    BlackParent,
    /// Parent and uncle are both red.
    RedUncle { parent: Handle, uncle: Handle, grandparent: Handle },
    /// The node is the inner grandchild: it hangs on the opposite side of its
    /// parent from the side the parent hangs on the grandparent.
    Inner { parent: Handle, side: Side },
    /// The node and its parent hang on the same `side`.
    Outer { parent: Handle, grandparent: Handle, side: Side },
}

/// Configurations around a subtree one black node short, found in `side` of
/// `parent`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum RemoveCase {
    /// Red sibling, which a rotation turns into one of the black-sibling cases.
    RedSibling { sibling: Handle },
    /// Black sibling whose children are both black.
    BlackNephews { sibling: Handle },
    /// Black sibling whose child nearer the short side is red and whose far
    /// child is black.
    NearNephewRed { sibling: Handle, near: Handle },
    /// Black sibling whose child away from the short side is red.
    FarNephewRed { sibling: Handle, far: Handle },
}

impl<K, V, C> RawOSRBTreeMap<K, V, C> {
    pub(super) fn classify_insert(&self, node: Handle) -> InsertCase {
        let Some(parent) = self.nodes.get(node).parent() else {
            return InsertCase::Root;
        };
        if !self.is_red(Some(parent)) {
            return InsertCase::BlackParent;
        }

        // A red parent is never the root.
        let grandparent = self
            .nodes
            .get(parent)
            .parent()
            .expect("`classify_insert()` - red node without a parent");
        let side = self.side_of(parent, grandparent);
        let uncle = self.nodes.get(grandparent).child(side.opposite());

        if let Some(uncle) = uncle.filter(|&u| self.is_red(Some(u))) {
            return InsertCase::RedUncle {
                parent,
                uncle,
                grandparent,
            };
        }
        if self.side_of(node, parent) == side {
            InsertCase::Outer {
                parent,
                grandparent,
                side,
            }
        } else {
            InsertCase::Inner { parent, side }
        }
    }

    /// Restores the red-black properties after `node` was attached as a red
    /// leaf.
    pub(super) fn fix_after_insert(&mut self, mut node: Handle) {
        loop {
            match self.classify_insert(node) {
                InsertCase::Root | InsertCase::BlackParent => break,
                InsertCase::RedUncle {
                    parent,
                    uncle,
                    grandparent,
                } => {
                    self.set_color(parent, Color::Black);
                    self.set_color(uncle, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    node = grandparent;
                }
                InsertCase::Inner { parent, side } => {
                    // Lifts `node` above its parent, turning this into the
                    // outer case one level up.
                    self.rotate(parent, side);
                    node = parent;
                }
                InsertCase::Outer {
                    parent,
                    grandparent,
                    side,
                } => {
                    self.rotate(grandparent, side.opposite());
                    self.set_color(parent, Color::Black);
                    self.set_color(grandparent, Color::Red);
                    break;
                }
            }
        }

        if let Some(root) = self.root {
            self.set_color(root, Color::Black);
        }
    }

    pub(super) fn classify_remove(&self, parent: Handle, side: Side) -> RemoveCase {
        // The short side lost a black node, so the other side has at least one.
        let sibling = self
            .nodes
            .get(parent)
            .child(side.opposite())
            .expect("`classify_remove()` - short subtree without a sibling");
        if self.is_red(Some(sibling)) {
            return RemoveCase::RedSibling { sibling };
        }

        let sibling_node = self.nodes.get(sibling);
        let near = sibling_node.child(side);
        let far = sibling_node.child(side.opposite());

        match (near, far) {
            (_, Some(far)) if self.is_red(Some(far)) => RemoveCase::FarNephewRed { sibling, far },
            (Some(near), _) if self.is_red(Some(near)) => RemoveCase::NearNephewRed { sibling, near },
            _ => RemoveCase::BlackNephews { sibling },
        }
    }

    /// Restores the red-black properties after a black node was spliced out
    /// of `side` of `parent`, leaving that subtree one black node short.
    pub(super) fn fix_after_remove(&mut self, mut parent: Handle, mut side: Side) {
        loop {
            match self.classify_remove(parent, side) {
                RemoveCase::RedSibling { sibling } => {
                    // Makes the sibling black; the new sibling is one of its
                    // black children.
                    self.set_color(sibling, Color::Black);
                    self.set_color(parent, Color::Red);
                    self.rotate(parent, side);
                }
                RemoveCase::BlackNephews { sibling } => {
                    self.set_color(sibling, Color::Red);
                    if self.is_red(Some(parent)) {
                        self.set_color(parent, Color::Black);
                        break;
                    }
                    // The whole subtree at `parent` is now short; push the
                    // deficit up a level.
                    let Some(grandparent) = self.nodes.get(parent).parent() else {
                        break;
                    };
                    side = self.side_of(parent, grandparent);
                    parent = grandparent;
                }
                RemoveCase::NearNephewRed { sibling, near } => {
                    self.set_color(near, Color::Black);
                    self.set_color(sibling, Color::Red);
                    self.rotate(sibling, side.opposite());
                }
                RemoveCase::FarNephewRed { sibling, far } => {
                    let parent_color = self.nodes.get(parent).color();
                    self.set_color(sibling, parent_color);
                    self.set_color(parent, Color::Black);
                    self.set_color(far, Color::Black);
                    self.rotate(parent, side);
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::compare::Natural;

    type Tree = RawOSRBTreeMap<i32, (), Natural>;

    fn graft_root(key: i32, color: Color) -> (Tree, Handle) {
        let mut tree = Tree::new(Natural);
        let root = tree.graft(None, Side::Left, key, (), color);
        (tree, root)
    }

    #[test]
    fn lone_root_is_repainted_black() {
        let (mut tree, root) = graft_root(1, Color::Red);
        assert_eq!(tree.classify_insert(root), InsertCase::Root);
        tree.fix_after_insert(root);
        tree.validate_invariants();
    }

    #[test]
    fn black_parent_needs_no_repair() {
        let (mut tree, root) = graft_root(10, Color::Black);
        let leaf = tree.graft(Some(root), Side::Right, 20, (), Color::Red);
        assert_eq!(tree.classify_insert(leaf), InsertCase::BlackParent);

        let shape = tree.shape();
        tree.fix_after_insert(leaf);
        assert_eq!(tree.shape(), shape);
    }

    #[test]
    fn red_uncle_recolors_and_climbs() {
        //       20B
        //      /   \
        //    10R   30R
        //    /
        //   5R
        let (mut tree, root) = graft_root(20, Color::Black);
        let left = tree.graft(Some(root), Side::Left, 10, (), Color::Red);
        let right = tree.graft(Some(root), Side::Right, 30, (), Color::Red);
        let leaf = tree.graft(Some(left), Side::Left, 5, (), Color::Red);

        assert_eq!(
            tree.classify_insert(leaf),
            InsertCase::RedUncle {
                parent: left,
                uncle: right,
                grandparent: root,
            }
        );
        tree.fix_after_insert(leaf);
        tree.validate_invariants();
        assert_eq!(tree.node_at(left).color(), Color::Black);
        assert_eq!(tree.node_at(right).color(), Color::Black);
        assert_eq!(tree.node_at(leaf).color(), Color::Red);
    }

    #[test]
    fn inner_grandchild_is_lifted_to_the_top() {
        //     20B
        //     /
        //   10R
        //     \
        //     15R
        let (mut tree, root) = graft_root(20, Color::Black);
        let left = tree.graft(Some(root), Side::Left, 10, (), Color::Red);
        let leaf = tree.graft(Some(left), Side::Right, 15, (), Color::Red);

        assert_eq!(
            tree.classify_insert(leaf),
            InsertCase::Inner {
                parent: left,
                side: Side::Left,
            }
        );
        tree.fix_after_insert(leaf);
        tree.validate_invariants();
        assert_eq!(tree.root_handle(), Some(leaf));
        assert_eq!(tree.keys_in_order(), [10, 15, 20]);
    }

    #[test]
    fn outer_grandchild_rotates_grandparent() {
        //   10B
        //     \
        //     20R
        //       \
        //       30R
        let (mut tree, root) = graft_root(10, Color::Black);
        let right = tree.graft(Some(root), Side::Right, 20, (), Color::Red);
        let leaf = tree.graft(Some(right), Side::Right, 30, (), Color::Red);

        assert_eq!(
            tree.classify_insert(leaf),
            InsertCase::Outer {
                parent: right,
                grandparent: root,
                side: Side::Right,
            }
        );
        tree.fix_after_insert(leaf);
        tree.validate_invariants();
        assert_eq!(tree.root_handle(), Some(right));
        assert_eq!(tree.node_at(root).size(), 1);
        assert_eq!(tree.node_at(right).size(), 3);
    }

    // The removal fixtures model the moment right after a black leaf was
    // spliced out of the left side of the root.

    #[test]
    fn black_nephews_repaint_sibling() {
        //   10B
        //     \
        //     20B
        let (mut tree, root) = graft_root(10, Color::Black);
        let sibling = tree.graft(Some(root), Side::Right, 20, (), Color::Black);

        assert_eq!(tree.classify_remove(root, Side::Left), RemoveCase::BlackNephews { sibling });
        tree.fix_after_remove(root, Side::Left);
        tree.validate_invariants();
        assert_eq!(tree.node_at(sibling).color(), Color::Red);
    }

    #[test]
    fn black_nephews_under_red_parent_stop_there() {
        //       20B
        //      /   \
        //    10R   30B
        //      \
        //      15B
        let (mut tree, root) = graft_root(20, Color::Black);
        let parent = tree.graft(Some(root), Side::Left, 10, (), Color::Red);
        tree.graft(Some(root), Side::Right, 30, (), Color::Black);
        let sibling = tree.graft(Some(parent), Side::Right, 15, (), Color::Black);

        assert_eq!(tree.classify_remove(parent, Side::Left), RemoveCase::BlackNephews { sibling });
        tree.fix_after_remove(parent, Side::Left);
        tree.validate_invariants();
        assert_eq!(tree.node_at(parent).color(), Color::Black);
    }

    #[test]
    fn red_sibling_is_rotated_up() {
        //   10B
        //     \
        //     30R
        //    /   \
        //  20B   40B
        let (mut tree, root) = graft_root(10, Color::Black);
        let sibling = tree.graft(Some(root), Side::Right, 30, (), Color::Red);
        tree.graft(Some(sibling), Side::Left, 20, (), Color::Black);
        tree.graft(Some(sibling), Side::Right, 40, (), Color::Black);

        assert_eq!(tree.classify_remove(root, Side::Left), RemoveCase::RedSibling { sibling });
        tree.fix_after_remove(root, Side::Left);
        tree.validate_invariants();
        assert_eq!(tree.root_handle(), Some(sibling));
        assert_eq!(tree.keys_in_order(), [10, 20, 30, 40]);
    }

    #[test]
    fn far_nephew_finishes_in_one_rotation() {
        //   10B
        //     \
        //     20B
        //       \
        //       30R
        let (mut tree, root) = graft_root(10, Color::Black);
        let sibling = tree.graft(Some(root), Side::Right, 20, (), Color::Black);
        let far = tree.graft(Some(sibling), Side::Right, 30, (), Color::Red);

        assert_eq!(tree.classify_remove(root, Side::Left), RemoveCase::FarNephewRed { sibling, far });
        tree.fix_after_remove(root, Side::Left);
        tree.validate_invariants();
        assert_eq!(tree.root_handle(), Some(sibling));
    }

    #[test]
    fn near_nephew_is_turned_outward_first() {
        //   10B
        //     \
        //     20B
        //     /
        //   15R
        let (mut tree, root) = graft_root(10, Color::Black);
        let sibling = tree.graft(Some(root), Side::Right, 20, (), Color::Black);
        let near = tree.graft(Some(sibling), Side::Left, 15, (), Color::Red);

        assert_eq!(tree.classify_remove(root, Side::Left), RemoveCase::NearNephewRed { sibling, near });
        tree.fix_after_remove(root, Side::Left);
        tree.validate_invariants();
        assert_eq!(tree.root_handle(), Some(near));
        assert_eq!(tree.keys_in_order(), [10, 15, 20]);
    }

    #[test]
    fn far_nephew_wins_when_both_are_red() {
        let (mut tree, root) = graft_root(10, Color::Black);
        let sibling = tree.graft(Some(root), Side::Right, 20, (), Color::Black);
        tree.graft(Some(sibling), Side::Left, 15, (), Color::Red);
        let far = tree.graft(Some(sibling), Side::Right, 30, (), Color::Red);

        assert_eq!(tree.classify_remove(root, Side::Left), RemoveCase::FarNephewRed { sibling, far });
        tree.fix_after_remove(root, Side::Left);
        tree.validate_invariants();
    }
}
