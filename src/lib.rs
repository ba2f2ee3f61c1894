//! A parent-linked binary search tree ordered by a caller-supplied comparator, and a set built on
//! top of it.
//!
//! The tree does not balance itself: its height depends on the order in which elements are
//! inserted. Nodes live in an arena and refer to one another through generation-checked
//! [`NodeId`] handles, so the parent link carries no ownership.
//!
//! ```
//! use ordtree::OrderedTree;
//!
//! let mut tree = OrderedTree::new(|a: &i32, b: &i32| b.cmp(a));
//!
//! for value in [50, 25, 75] {
//!     assert_eq!(tree.insert(value), None);
//! }
//!
//! assert_eq!(tree.insert(25), Some(25));
//! assert_eq!(tree.materialize(), vec![75, 50, 25]);
//! ```

mod arbitrary;
mod arena;
mod builder;
mod cursor;
mod debug;
mod error;
mod iter;
pub mod set;

#[cfg(any(test, feature = "model"))]
pub mod model;

#[cfg(test)]
mod tests;

use core::{cmp::Ordering, fmt, mem, ops::Not};

pub use compare::{natural, Compare, Natural};

use crate::arena::{Arena, Link, Node};

pub use crate::{
    arena::NodeId,
    builder::Builder,
    cursor::{Cursor, CursorMut},
    error::Error,
    iter::Iter,
    set::BoundedSet,
};

/// An ordered container keyed by a three-way comparator.
///
/// Duplicate elements (those comparing `Equal` to an element already present) are rejected.
///
/// The behavior of the tree is unspecified if an element's ordering relative to another element
/// changes while both are in the tree.
#[derive(Clone)]
pub struct OrderedTree<T, C = Natural<T>> {
    nodes: Arena<T>,
    root: Link,
    len: usize,
    cmp: C,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Dir {
    Left = 0,
    Right = 1,
}

impl Not for Dir {
    type Output = Dir;

    fn not(self) -> Self::Output {
        match self {
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }
}

// The outcome of a descent from the root.
enum Search {
    Found(NodeId),
    // The empty slot the key would occupy: a child of the given node, or the root.
    Vacant(Option<(NodeId, Dir)>),
}

impl<T: Ord> OrderedTree<T> {
    /// Returns an empty tree ordered by the natural order of its elements.
    pub fn natural() -> OrderedTree<T> {
        OrderedTree::new(compare::natural())
    }
}

impl<T: Ord> Default for OrderedTree<T> {
    fn default() -> Self {
        OrderedTree::natural()
    }
}

impl<T, C> OrderedTree<T, C>
where
    C: Compare<T>,
{
    /// Returns an empty tree ordered by `cmp`.
    pub fn new(cmp: C) -> OrderedTree<T, C> {
        OrderedTree::with_capacity(cmp, 0)
    }

    pub(crate) fn with_capacity(cmp: C, capacity: usize) -> OrderedTree<T, C> {
        OrderedTree {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
            cmp,
        }
    }

    /// Checks every structural invariant of the tree, panicking on the first violation.
    #[doc(hidden)]
    pub fn assert_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.len, 0, "empty tree must have length 0");
            assert_eq!(self.nodes.occupied(), 0, "empty tree must not hold nodes");
            return;
        };

        assert_eq!(self.nodes[root].parent, None, "root must not have a parent");

        let mut reached = 0;
        let mut stack = vec![root];

        while let Some(node) = stack.pop() {
            reached += 1;
            assert!(
                reached <= self.nodes.occupied(),
                "more nodes reachable than allocated; the links contain a cycle"
            );

            for dir in [Dir::Left, Dir::Right] {
                let Some(child) = self.nodes[node].child(dir) else {
                    continue;
                };

                // Ensure child's parent link points to this node.
                assert_eq!(
                    self.nodes[child].parent,
                    Some(node),
                    "child's parent link does not point at its parent"
                );

                let expected = match dir {
                    Dir::Left => Ordering::Less,
                    Dir::Right => Ordering::Greater,
                };
                let ordering = self
                    .cmp
                    .compare(&self.nodes[child].element, &self.nodes[node].element);
                assert_eq!(ordering, expected, "child is on the wrong side of its parent");

                stack.push(child);
            }
        }

        assert_eq!(reached, self.len, "length does not match reachable nodes");
        assert_eq!(
            self.nodes.occupied(),
            self.len,
            "length does not match allocated nodes"
        );

        // Parent/child ordering alone does not bound whole subtrees; the in-order sequence does.
        let mut prev: Option<&T> = None;
        for element in self.iter() {
            if let Some(prev) = prev {
                assert_eq!(
                    self.cmp.compare(prev, element),
                    Ordering::Less,
                    "in-order sequence is not strictly ascending"
                );
            }
            prev = Some(element);
        }
    }

    // Descends from the root looking for `key`.
    fn search<Q>(&self, key: &Q) -> Search
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        let mut opt_cur = self.root;
        let mut slot = None;

        while let Some(cur) = opt_cur {
            let node = &self.nodes[cur];

            let dir = match self.cmp.compare(key, &node.element) {
                Ordering::Less => Dir::Left,
                Ordering::Equal => return Search::Found(cur),
                Ordering::Greater => Dir::Right,
            };

            slot = Some((cur, dir));
            opt_cur = node.child(dir);
        }

        Search::Vacant(slot)
    }

    /// Inserts `element` into the tree.
    ///
    /// If the tree already holds an element comparing equal to `element`, the tree is left
    /// untouched and `element` is handed back. Otherwise the element becomes a new leaf and `None`
    /// is returned.
    ///
    /// This operation completes in _O(height)_ time. No rebalancing takes place.
    pub fn insert(&mut self, element: T) -> Option<T> {
        let slot = match self.search(&element) {
            Search::Found(_) => return Some(element),
            Search::Vacant(slot) => slot,
        };

        let parent = slot.map(|(parent, _)| parent);
        let id = self.nodes.alloc(Node::new(element, parent));

        match slot {
            Some((parent, dir)) => {
                self.nodes[parent].set_child(dir, Some(id));
            }
            None => self.root = Some(id),
        }

        self.len += 1;
        None
    }

    /// Returns a reference to the stored element comparing equal to `key`.
    pub fn find<Q>(&self, key: &Q) -> Option<&T>
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        self.find_node(key).map(|id| &self.nodes[id].element)
    }

    /// Returns a handle to the node holding the element comparing equal to `key`.
    pub fn find_node<Q>(&self, key: &Q) -> Option<NodeId>
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        match self.search(key) {
            Search::Found(id) => Some(id),
            Search::Vacant(_) => None,
        }
    }

    /// Returns `true` if the tree holds an element comparing equal to `key`.
    #[inline]
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        self.find_node(key).is_some()
    }

    /// Removes the element comparing equal to `key` and returns it.
    ///
    /// A node with two children is not unlinked itself: the element of its in-order successor is
    /// moved into it and the successor's node is freed instead. Any [`NodeId`] for that node
    /// obtained before the call therefore names the successor's element afterwards, and a handle
    /// for the successor no longer resolves.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        C: Compare<Q, T>,
        Q: ?Sized,
    {
        let node = self.find_node(key)?;
        Some(self.remove_at(node))
    }
}

impl<T, C> OrderedTree<T, C> {
    /// Returns `true` if the tree contains no elements.
    pub fn is_empty(&self) -> bool {
        let empty = self.len == 0;
        debug_assert_eq!(empty, self.root.is_none());
        empty
    }

    /// Returns the number of elements in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns a reference to the tree's comparator.
    pub fn cmp(&self) -> &C {
        &self.cmp
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack: Vec<(NodeId, usize)> = self.root.map(|root| (root, 1)).into_iter().collect();

        while let Some((node, depth)) = stack.pop() {
            height = height.max(depth);

            for dir in [Dir::Left, Dir::Right] {
                if let Some(child) = self.nodes[node].child(dir) {
                    stack.push((child, depth + 1));
                }
            }
        }

        height
    }

    /// Returns the element held by the node `id`, or `None` if the handle is stale or was issued
    /// by another tree.
    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.element)
    }

    /// Returns a handle to the node holding the minimum element.
    pub fn first_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.extremum(root, Dir::Left))
    }

    /// Returns a handle to the node holding the maximum element.
    pub fn last_node(&self) -> Option<NodeId> {
        self.root.map(|root| self.extremum(root, Dir::Right))
    }

    /// Returns the minimum element of the tree.
    pub fn first(&self) -> Option<&T> {
        self.first_node().map(|id| &self.nodes[id].element)
    }

    /// Returns the maximum element of the tree.
    pub fn last(&self) -> Option<&T> {
        self.last_node().map(|id| &self.nodes[id].element)
    }

    /// Removes and returns the minimum element of the tree.
    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.first_node()?;
        Some(self.remove_at(first))
    }

    /// Removes and returns the maximum element of the tree.
    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.last_node()?;
        Some(self.remove_at(last))
    }

    /// Returns the node holding the next element in ascending order.
    ///
    /// Returns `None` if `node` holds the maximum element, or if the handle is stale or was issued by
    /// another tree.
    pub fn successor(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?;
        self.successor_raw(node)
    }

    /// Returns the node holding the previous element in ascending order.
    ///
    /// Returns `None` if `node` holds the minimum element, or if the handle is stale or was issued by
    /// another tree.
    pub fn predecessor(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node)?;
        self.predecessor_raw(node)
    }

    /// Removes the node `id` from the tree and returns the element it held.
    ///
    /// Fails with [`Error::NotFound`] if the handle is stale or was issued by another tree. See
    /// [`remove`](OrderedTree::remove) for how a node with two children is handled.
    pub fn remove_node(&mut self, id: NodeId) -> Result<T, Error> {
        if self.nodes.get(id).is_none() {
            return Err(Error::NotFound);
        }

        Ok(self.remove_at(id))
    }

    /// Removes every element from the tree, dropping them in post-order.
    pub fn clear(&mut self) {
        self.drain_post_order(drop);
    }

    /// Dismantles the tree and returns its elements in post-order.
    pub fn into_elements(mut self) -> Vec<T> {
        let mut elements = Vec::with_capacity(self.len);
        self.drain_post_order(|element| elements.push(element));
        elements
    }

    // Support methods ========================================================

    pub(crate) fn successor_raw(&self, node: NodeId) -> Link {
        self.neighbor(node, Dir::Right)
    }

    pub(crate) fn predecessor_raw(&self, node: NodeId) -> Link {
        self.neighbor(node, Dir::Left)
    }

    // Returns the closest node in direction `dir` in the in-order sequence.
    fn neighbor(&self, node: NodeId, dir: Dir) -> Link {
        if let Some(child) = self.nodes[node].child(dir) {
            return Some(self.extremum(child, !dir));
        }

        // Climb while `cur` is a `dir` child; the first ancestor reached from the other side is
        // the neighbor.
        let mut cur = node;
        while let Some(parent) = self.nodes[cur].parent {
            if self.which_child(parent, cur) == !dir {
                return Some(parent);
            }
            cur = parent;
        }

        None
    }

    // Returns the outermost node in direction `dir` of the subtree rooted at `root`.
    fn extremum(&self, root: NodeId, dir: Dir) -> NodeId {
        let mut cur = root;

        while let Some(child) = self.nodes[cur].child(dir) {
            cur = child;
        }

        cur
    }

    fn which_child(&self, parent: NodeId, child: NodeId) -> Dir {
        if self.nodes[parent].left() == Some(child) {
            Dir::Left
        } else {
            debug_assert_eq!(self.nodes[parent].right(), Some(child));
            Dir::Right
        }
    }

    // Replaces the child link of `parent` pointing at `old_child` with `new_child`.
    //
    // `new_child`'s parent link is not updated.
    fn replace_child(&mut self, parent: NodeId, old_child: NodeId, new_child: Link) {
        let dir = self.which_child(parent, old_child);

        debug_assert!(
            new_child.is_none() || self.nodes[parent].child(!dir) != new_child,
            "`new_child` must not be a child of `parent`"
        );

        self.nodes[parent].set_child(dir, new_child);
    }

    #[inline]
    fn replace_child_or_set_root(&mut self, parent: Link, old_child: NodeId, new_child: Link) {
        match parent {
            Some(parent) => self.replace_child(parent, old_child, new_child),
            None => self.root = new_child,
        }
    }

    fn maybe_set_parent(&mut self, opt_node: Link, parent: Link) {
        let Some(node) = opt_node else {
            return;
        };

        self.nodes[node].set_parent(parent);
    }

    // Removes the live node `node` and returns the element it held.
    //
    // There are three cases:
    //
    // 1. `node` is a leaf. It is detached from its parent, or the root is cleared.
    // 2. `node` has one child. The child is spliced into `node`'s place.
    // 3. `node` has two children. Its successor, the minimum of its right subtree, has no left
    //    child and is unlinked as in case 1 or 2. The successor's element then replaces `node`'s
    //    element, which keeps the ordering intact: it is greater than everything in `node`'s left
    //    subtree and less than everything left in its right subtree.
    pub(crate) fn remove_at(&mut self, node: NodeId) -> T {
        let removed = match (self.nodes[node].left(), self.nodes[node].right()) {
            (Some(_), Some(right)) => {
                let successor = self.extremum(right, Dir::Left);
                let elevated = self.unlink(successor);
                mem::replace(&mut self.nodes[node].element, elevated)
            }

            _ => self.unlink(node),
        };

        self.len -= 1;
        removed
    }

    // Frees `node`, which has at most one child, and splices that child into its place.
    fn unlink(&mut self, node: NodeId) -> T {
        let freed = self.nodes.free(node).expect("unlinked node must be live");

        debug_assert!(
            freed.left().is_none() || freed.right().is_none(),
            "unlinked node must have at most one child"
        );

        let child = freed.left().or(freed.right());
        self.replace_child_or_set_root(freed.parent, node, child);
        self.maybe_set_parent(child, freed.parent);

        freed.element
    }

    // Frees every node in post-order, passing each element to `f`.
    //
    // A node is freed only once it has become a leaf, so no freed node is ever visited again.
    fn drain_post_order(&mut self, mut f: impl FnMut(T)) {
        let mut opt_cur = self.root.take();

        while let Some(cur) = opt_cur {
            let leaf = self.first_in_post_order(cur);
            let freed = self.nodes.free(leaf).expect("post-order walk reached a freed node");
            debug_assert!(freed.is_leaf());

            if let Some(parent) = freed.parent {
                let dir = self.which_child(parent, leaf);
                self.nodes[parent].set_child(dir, None);
            }

            self.len -= 1;
            f(freed.element);

            opt_cur = freed.parent;
        }

        debug_assert_eq!(self.len, 0);
        debug_assert_eq!(self.nodes.occupied(), 0);
    }

    // Descends from `root` to the first node of its subtree in post-order.
    fn first_in_post_order(&self, root: NodeId) -> NodeId {
        let mut cur = root;

        loop {
            let node = &self.nodes[cur];
            match node.left().or(node.right()) {
                Some(child) => cur = child,
                None => return cur,
            }
        }
    }
}

impl<T, C> Drop for OrderedTree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C> fmt::Debug for OrderedTree<T, C>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T, C> Extend<T> for OrderedTree<T, C>
where
    C: Compare<T>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.insert(element);
        }
    }
}

impl<T: Ord> FromIterator<T> for OrderedTree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut tree = OrderedTree::natural();
        tree.extend(iter);
        tree
    }
}
