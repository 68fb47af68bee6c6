use crate::arena::{Handle, TypedArena};
use std::cmp;
use std::fmt;

/// One of the two child slots of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A struct representing an internal node of an avl tree.
pub struct Node<T> {
    pub key: T,
    pub height: i32,
    pub left: Option<Handle>,
    pub right: Option<Handle>,
    pub parent: Option<Handle>,
}

impl<T> Node<T> {
    pub fn new(key: T) -> Self {
        Node {
            key,
            height: 0,
            left: None,
            right: None,
            parent: None,
        }
    }

    pub fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn child_mut(&mut self, side: Side) -> &mut Option<Handle> {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}

// absent subtrees have height -1 so that a leaf has height 0
pub fn height<T>(nodes: &TypedArena<Node<T>>, node: Option<Handle>) -> i32 {
    node.map_or(-1, |node| nodes[node].height)
}

pub fn balance<T>(nodes: &TypedArena<Node<T>>, node: Handle) -> i32 {
    let Node { left, right, .. } = nodes[node];
    height(nodes, left) - height(nodes, right)
}

pub fn update_height<T>(nodes: &mut TypedArena<Node<T>>, node: Handle) {
    let Node { left, right, .. } = nodes[node];
    let new_height = cmp::max(height(nodes, left), height(nodes, right)) + 1;
    nodes[node].height = new_height;
}

/// A read-only view of a node in an `AvlSet<T>`.
///
/// A `NodeRef` borrows the set, so the tree cannot be modified while it is alive. It exposes
/// the node's key, cached height, and links to its neighbours, which is enough to walk or
/// render the whole tree from `AvlSet::root`.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(1);
/// set.insert(2);
/// set.insert(3);
///
/// let root = set.root().unwrap();
/// assert_eq!(root.key(), &2);
/// assert_eq!(root.height(), 1);
/// assert_eq!(root.left().map(|node| *node.key()), Some(1));
/// assert_eq!(root.right().map(|node| *node.key()), Some(3));
/// assert!(root.parent().is_none());
/// ```
pub struct NodeRef<'a, T> {
    nodes: &'a TypedArena<Node<T>>,
    handle: Handle,
}

impl<'a, T> NodeRef<'a, T> {
    pub(crate) fn new(nodes: &'a TypedArena<Node<T>>, handle: Handle) -> Self {
        NodeRef { nodes, handle }
    }

    fn node(&self) -> &'a Node<T> {
        let nodes = self.nodes;
        &nodes[self.handle]
    }

    fn link(&self, handle: Option<Handle>) -> Option<NodeRef<'a, T>> {
        handle.map(|handle| NodeRef::new(self.nodes, handle))
    }

    /// Returns the key stored in this node.
    pub fn key(&self) -> &'a T {
        &self.node().key
    }

    /// Returns the height of the subtree rooted at this node. A leaf has height 0.
    pub fn height(&self) -> i32 {
        self.node().height
    }

    /// Returns the height of the left subtree minus the height of the right subtree.
    pub fn balance(&self) -> i32 {
        balance(self.nodes, self.handle)
    }

    pub fn left(&self) -> Option<NodeRef<'a, T>> {
        self.link(self.node().left)
    }

    pub fn right(&self) -> Option<NodeRef<'a, T>> {
        self.link(self.node().right)
    }

    pub fn child(&self, side: Side) -> Option<NodeRef<'a, T>> {
        self.link(self.node().child(side))
    }

    /// Returns the parent of this node, or `None` if this node is the root.
    pub fn parent(&self) -> Option<NodeRef<'a, T>> {
        self.link(self.node().parent)
    }
}

impl<'a, T> Clone for NodeRef<'a, T> {
    fn clone(&self) -> Self {
        NodeRef::new(self.nodes, self.handle)
    }
}

impl<'a, T> Copy for NodeRef<'a, T> {}

impl<'a, T> PartialEq for NodeRef<'a, T> {
    fn eq(&self, other: &NodeRef<'a, T>) -> bool {
        self.handle == other.handle && std::ptr::eq(self.nodes, other.nodes)
    }
}

impl<'a, T> Eq for NodeRef<'a, T> {}

impl<'a, T> fmt::Debug for NodeRef<'a, T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("key", self.key())
            .field("height", &self.height())
            .field("balance", &self.balance())
            .finish()
    }
}
