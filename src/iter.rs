use core::iter::FusedIterator;

use crate::{arena::Link, Dir, OrderedTree};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}

enum CameFrom {
    Parent,
    LeftChild,
    RightChild,
}

impl<T, C> OrderedTree<T, C> {
    /// Calls `visit` on every element in pre-order: a node, then its left subtree, then its right
    /// subtree.
    pub fn pre_order(&self, visit: impl FnMut(&T)) {
        self.walk(Order::Pre, visit);
    }

    /// Calls `visit` on every element in in-order, which is ascending comparator order.
    pub fn in_order(&self, visit: impl FnMut(&T)) {
        self.walk(Order::In, visit);
    }

    /// Calls `visit` on every element in post-order: a node's left subtree, then its right
    /// subtree, then the node.
    pub fn post_order(&self, visit: impl FnMut(&T)) {
        self.walk(Order::Post, visit);
    }

    /// Returns a snapshot of the elements in ascending order.
    pub fn materialize(&self) -> Vec<T>
    where
        T: Clone,
    {
        let mut elements = Vec::with_capacity(self.len());
        self.in_order(|element| elements.push(element.clone()));
        elements
    }

    /// Returns an iterator over the elements in ascending order.
    pub fn iter(&self) -> Iter<'_, T, C> {
        Iter::new(self)
    }

    // Visits every node once, following parent links back up instead of keeping a stack, so a
    // degenerate tree cannot exhaust the call stack.
    fn walk(&self, order: Order, mut visit: impl FnMut(&T)) {
        let Some(mut cur) = self.root else {
            return;
        };

        let mut from = CameFrom::Parent;

        loop {
            let node = &self.nodes[cur];

            match from {
                CameFrom::Parent => {
                    if order == Order::Pre {
                        visit(&node.element);
                    }

                    // Upon entering a new subtree, descend left first.
                    match node.left() {
                        Some(left) => cur = left,
                        None => from = CameFrom::LeftChild,
                    }
                }

                CameFrom::LeftChild => {
                    if order == Order::In {
                        visit(&node.element);
                    }

                    match node.right() {
                        Some(right) => {
                            cur = right;
                            from = CameFrom::Parent;
                        }
                        None => from = CameFrom::RightChild,
                    }
                }

                CameFrom::RightChild => {
                    if order == Order::Post {
                        visit(&node.element);
                    }

                    // Both subtrees are exhausted, so ascend one level.
                    let Some(parent) = node.parent else {
                        return;
                    };

                    from = match self.which_child(parent, cur) {
                        Dir::Left => CameFrom::LeftChild,
                        Dir::Right => CameFrom::RightChild,
                    };
                    cur = parent;
                }
            }
        }
    }
}

/// An iterator over the elements of an [`OrderedTree`] in ascending order.
pub struct Iter<'tree, T, C> {
    tree: &'tree OrderedTree<T, C>,

    front: Link,
    back: Link,

    len: usize,
}

impl<'tree, T, C> Iter<'tree, T, C> {
    pub(crate) fn new(tree: &'tree OrderedTree<T, C>) -> Self {
        Iter {
            tree,

            front: tree.first_node(),
            back: tree.last_node(),
            len: tree.len(),
        }
    }
}

impl<'tree, T, C> Clone for Iter<'tree, T, C> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<'tree, T, C> Iterator for Iter<'tree, T, C> {
    type Item = &'tree T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let tree = self.tree;
        let cur = self.front?;

        self.front = tree.successor_raw(cur);
        self.len -= 1;

        Some(&tree.nodes[cur].element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.len, Some(self.len))
    }
}

impl<'tree, T, C> DoubleEndedIterator for Iter<'tree, T, C> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.len == 0 {
            return None;
        }

        let tree = self.tree;
        let cur = self.back?;

        self.back = tree.predecessor_raw(cur);
        self.len -= 1;

        Some(&tree.nodes[cur].element)
    }
}

impl<'tree, T, C> ExactSizeIterator for Iter<'tree, T, C> {}

impl<'tree, T, C> FusedIterator for Iter<'tree, T, C> {}

impl<'tree, T, C> IntoIterator for &'tree OrderedTree<T, C> {
    type Item = &'tree T;
    type IntoIter = Iter<'tree, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::OrderedTree;

    fn collect(tree: &OrderedTree<u32>, walk: fn(&OrderedTree<u32>, &mut Vec<u32>)) -> Vec<u32> {
        let mut out = Vec::new();
        walk(tree, &mut out);
        out
    }

    #[test]
    fn degenerate_tree_walks_without_recursion() {
        let tree: OrderedTree<u32> = (0..5_000).collect();
        assert_eq!(tree.height(), 5_000);

        let mut count = 0;
        tree.post_order(|_| count += 1);
        assert_eq!(count, 5_000);

        let pre = collect(&tree, |t, out| t.pre_order(|&e| out.push(e)));
        assert!(pre.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn iter_from_both_ends() {
        let tree: OrderedTree<u32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();

        let mut it = tree.iter();
        assert_eq!(it.len(), 7);
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&7));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next_back(), Some(&6));
        assert_eq!(it.len(), 3);
        assert_eq!(it.clone().collect::<Vec<_>>(), [&3, &4, &5]);
        assert_eq!(it.rev().collect::<Vec<_>>(), [&5, &4, &3]);
    }

    #[test]
    fn empty_tree() {
        let tree: OrderedTree<u32> = OrderedTree::natural();

        assert_eq!(tree.iter().next(), None);
        assert!(collect(&tree, |t, out| t.in_order(|&e| out.push(e))).is_empty());
        assert!(tree.materialize().is_empty());
    }
}
