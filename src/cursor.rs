use crate::{arena::Link, NodeId, OrderedTree};

/// A cursor over an [`OrderedTree`].
///
/// A cursor points either to an element of the tree or to a "ghost" non-element that connects the
/// last element to the first.
pub struct Cursor<'tree, T, C> {
    tree: &'tree OrderedTree<T, C>,
    ptr: Link,
}

impl<'tree, T, C> Cursor<'tree, T, C> {
    /// Moves the cursor to the next element of the tree.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method moves it to the first
    /// element. If it is pointing to the last element, this method moves it to the "ghost"
    /// non-element.
    pub fn move_next(&mut self) {
        self.ptr = match self.ptr {
            Some(p) => self.tree.successor_raw(p),
            None => self.tree.first_node(),
        };
    }

    /// Moves the cursor to the previous element of the tree.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method moves it to the last
    /// element. If it is pointing to the first element, this method moves it to the "ghost"
    /// non-element.
    pub fn move_prev(&mut self) {
        self.ptr = match self.ptr {
            Some(p) => self.tree.predecessor_raw(p),
            None => self.tree.last_node(),
        };
    }

    /// Returns the handle of the node pointed to by the cursor.
    pub fn node(&self) -> Option<NodeId> {
        self.ptr
    }

    /// Returns a reference to the element pointed to by the cursor.
    ///
    /// This returns `None` if the cursor is currently pointing to the "ghost" non-element.
    pub fn get(&self) -> Option<&'tree T> {
        let tree = self.tree;
        self.ptr.map(|p| &tree.nodes[p].element)
    }

    /// Returns a reference to the next element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the first element.
    /// If it is pointing to the last element, this method returns `None`.
    pub fn peek_next(&self) -> Option<&'tree T> {
        let tree = self.tree;
        peek(tree, self.ptr, OrderedTree::successor_raw, OrderedTree::first_node)
    }

    /// Returns a reference to the previous element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the last element.
    /// If it is pointing to the first element, this method returns `None`.
    pub fn peek_prev(&self) -> Option<&'tree T> {
        let tree = self.tree;
        peek(tree, self.ptr, OrderedTree::predecessor_raw, OrderedTree::last_node)
    }
}

/// A cursor over an [`OrderedTree`] which supports removal.
///
/// A cursor points either to an element of the tree or to a "ghost" non-element that connects the
/// last element to the first.
pub struct CursorMut<'tree, T, C> {
    tree: &'tree mut OrderedTree<T, C>,
    ptr: Link,
}

impl<'tree, T, C> CursorMut<'tree, T, C> {
    /// Returns a read-only cursor pointing to the current element.
    ///
    /// The `CursorMut` remains immutably borrowed for the lifetime of the returned `Cursor`.
    pub fn as_cursor(&self) -> Cursor<'_, T, C> {
        Cursor {
            tree: &*self.tree,
            ptr: self.ptr,
        }
    }

    #[cfg(any(test, feature = "model"))]
    pub(crate) fn tree(&self) -> &OrderedTree<T, C> {
        &*self.tree
    }

    /// Moves the cursor to the next element of the tree.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method will move it to the first
    /// element. If it is pointing to the last element, this method will move it to the "ghost"
    /// non-element.
    pub fn move_next(&mut self) {
        self.ptr = match self.ptr {
            Some(p) => self.tree.successor_raw(p),
            None => self.tree.first_node(),
        };
    }

    /// Moves the cursor to the previous element of the tree.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method will move it to the last
    /// element. If it is pointing to the first element, this method will move it to the "ghost"
    /// non-element.
    pub fn move_prev(&mut self) {
        self.ptr = match self.ptr {
            Some(p) => self.tree.predecessor_raw(p),
            None => self.tree.last_node(),
        };
    }

    /// Returns the handle of the node pointed to by the cursor.
    pub fn node(&self) -> Option<NodeId> {
        self.ptr
    }

    /// Returns a reference to the element pointed to by the cursor.
    ///
    /// This returns `None` if the cursor is currently pointing to the "ghost" non-element.
    pub fn get(&self) -> Option<&T> {
        self.ptr.map(|p| &self.tree.nodes[p].element)
    }

    /// Returns a reference to the next element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the first element.
    /// If it is pointing to the last element, this method returns `None`.
    pub fn peek_next(&self) -> Option<&T> {
        peek(&*self.tree, self.ptr, OrderedTree::successor_raw, OrderedTree::first_node)
    }

    /// Returns a reference to the previous element.
    ///
    /// If the cursor is pointing to the "ghost" non-element, this method returns the last element.
    /// If it is pointing to the first element, this method returns `None`.
    pub fn peek_prev(&self) -> Option<&T> {
        peek(&*self.tree, self.ptr, OrderedTree::predecessor_raw, OrderedTree::last_node)
    }

    /// Removes the current element from the tree.
    ///
    /// This returns the removed element and moves the cursor to the next element. If the cursor is
    /// pointing to the "ghost" non-element, this method returns `None`, and neither the tree nor
    /// the cursor is modified.
    ///
    /// When the current node has two children, the next element is moved into it, so the cursor
    /// keeps the same [`NodeId`].
    pub fn remove_current(&mut self) -> Option<T> {
        let current = self.ptr?;

        let node = &self.tree.nodes[current];
        self.ptr = if node.left().is_some() && node.right().is_some() {
            Some(current)
        } else {
            self.tree.successor_raw(current)
        };

        Some(self.tree.remove_at(current))
    }

    /// Removes the current element from the tree.
    ///
    /// This returns the removed element and moves the cursor to the previous element. If the cursor
    /// is pointing to the "ghost" non-element, this method returns `None`, and neither the tree nor
    /// the cursor is modified.
    pub fn remove_current_and_move_prev(&mut self) -> Option<T> {
        let current = self.ptr?;

        // The predecessor of a node with two children lies in its left subtree, which removal
        // leaves alone.
        self.ptr = self.tree.predecessor_raw(current);

        Some(self.tree.remove_at(current))
    }
}

fn peek<'tree, T, C>(
    tree: &'tree OrderedTree<T, C>,
    ptr: Link,
    step: fn(&OrderedTree<T, C>, NodeId) -> Link,
    wrap: fn(&OrderedTree<T, C>) -> Link,
) -> Option<&'tree T> {
    let next = match ptr {
        Some(p) => step(tree, p),
        None => wrap(tree),
    };

    next.map(|p| &tree.nodes[p].element)
}

impl<T, C> OrderedTree<T, C> {
    /// Returns a cursor pointing at the minimum element, or at the "ghost" if the tree is empty.
    pub fn cursor_first(&self) -> Cursor<'_, T, C> {
        Cursor {
            tree: self,
            ptr: self.first_node(),
        }
    }

    /// Returns a cursor pointing at the maximum element, or at the "ghost" if the tree is empty.
    pub fn cursor_last(&self) -> Cursor<'_, T, C> {
        Cursor {
            tree: self,
            ptr: self.last_node(),
        }
    }

    /// Returns a cursor pointing at the node `id`, or `None` if the handle is stale or foreign.
    pub fn cursor_at(&self, id: NodeId) -> Option<Cursor<'_, T, C>> {
        self.nodes.get(id)?;
        Some(Cursor {
            tree: self,
            ptr: Some(id),
        })
    }

    /// Returns an editing cursor pointing at the minimum element.
    pub fn cursor_first_mut(&mut self) -> CursorMut<'_, T, C> {
        let ptr = self.first_node();
        CursorMut { tree: self, ptr }
    }

    /// Returns an editing cursor pointing at the maximum element.
    pub fn cursor_last_mut(&mut self) -> CursorMut<'_, T, C> {
        let ptr = self.last_node();
        CursorMut { tree: self, ptr }
    }
}
