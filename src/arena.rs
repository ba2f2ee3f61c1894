//! Slab storage for tree nodes.
//!
//! Nodes refer to each other by [`NodeId`] rather than by pointer. A node's children are owned in
//! the sense that they are freed with it; its parent link is just another handle.

use core::{
    mem,
    ops::{Index, IndexMut},
    sync::atomic::{AtomicU64, Ordering},
};

use slab::Slab;

use crate::Dir;

/// A handle to a node of an [`OrderedTree`](crate::OrderedTree).
///
/// Handles are generation-checked. Once the node a handle names has been freed, the handle no
/// longer resolves, even after its slot is reused by a later insertion. A slot whose generation
/// counter is exhausted is retired rather than reused.
///
/// Handles also record the tree that issued them and never resolve in another tree. A tree
/// produced by [`Clone`] is the exception: it accepts the handles of its original, each naming
/// the corresponding node of the copy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    tree: u64,
    index: usize,
    generation: u32,
}

impl NodeId {
    pub(crate) fn index(self) -> usize {
        self.index
    }
}

pub(crate) type Link = Option<NodeId>;

#[derive(Clone, Debug)]
pub(crate) struct Node<T> {
    pub(crate) element: T,
    pub(crate) parent: Link,
    children: [Link; 2],
}

impl<T> Node<T> {
    pub(crate) fn new(element: T, parent: Link) -> Node<T> {
        Node {
            element,
            parent,
            children: [None; 2],
        }
    }

    #[inline]
    pub(crate) fn child(&self, dir: Dir) -> Link {
        self.children[dir as usize]
    }

    #[inline]
    pub(crate) fn left(&self) -> Link {
        self.child(Dir::Left)
    }

    #[inline]
    pub(crate) fn right(&self) -> Link {
        self.child(Dir::Right)
    }

    #[inline]
    pub(crate) fn is_leaf(&self) -> bool {
        self.left().is_none() && self.right().is_none()
    }

    #[inline]
    pub(crate) fn set_parent(&mut self, parent: Link) -> Link {
        mem::replace(&mut self.parent, parent)
    }

    #[inline]
    pub(crate) fn set_child(&mut self, dir: Dir, child: Link) -> Link {
        mem::replace(&mut self.children[dir as usize], child)
    }
}

static NEXT_TAG: AtomicU64 = AtomicU64::new(0);

#[derive(Clone, Debug)]
pub(crate) struct Arena<T> {
    // Identifies the arena, so a handle minted by another tree never resolves here.
    tag: u64,
    // A `None` entry is a retired slot whose generation is exhausted; it is never handed out again.
    nodes: Slab<Option<Node<T>>>,
    generations: Vec<u32>,
    retired: usize,
}

impl<T> Arena<T> {
    pub(crate) fn with_capacity(capacity: usize) -> Arena<T> {
        Arena {
            tag: NEXT_TAG.fetch_add(1, Ordering::Relaxed),
            nodes: Slab::with_capacity(capacity),
            generations: Vec::with_capacity(capacity),
            retired: 0,
        }
    }

    /// Returns the number of live nodes.
    pub(crate) fn occupied(&self) -> usize {
        self.nodes.len() - self.retired
    }

    pub(crate) fn alloc(&mut self, node: Node<T>) -> NodeId {
        let index = self.nodes.insert(Some(node));

        // Slab hands out fresh keys in order, so a new key is always one past the last generation.
        if index == self.generations.len() {
            self.generations.push(0);
        }

        NodeId {
            tree: self.tag,
            index,
            generation: self.generations[index],
        }
    }

    /// Frees the node named by `id`, returning it, or `None` if `id` is stale or foreign.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<Node<T>> {
        self.get(id)?;

        let generation = &mut self.generations[id.index];
        match generation.checked_add(1) {
            Some(next) => {
                *generation = next;
                self.nodes.remove(id.index)
            }
            None => {
                self.retired += 1;
                self.nodes[id.index].take()
            }
        }
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<T>> {
        if !self.owns(id) {
            return None;
        }

        self.nodes.get(id.index)?.as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<T>> {
        if !self.owns(id) {
            return None;
        }

        self.nodes.get_mut(id.index)?.as_mut()
    }

    fn owns(&self, id: NodeId) -> bool {
        id.tree == self.tag && self.generations.get(id.index) == Some(&id.generation)
    }
}

impl<T> Index<NodeId> for Arena<T> {
    type Output = Node<T>;

    fn index(&self, id: NodeId) -> &Node<T> {
        self.get(id).expect("stale node handle")
    }
}

impl<T> IndexMut<NodeId> for Arena<T> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.get_mut(id).expect("stale node handle")
    }
}
