use crate::arena::{Handle, TypedArena};
use crate::avl_tree::node::{self, Node, NodeRef, Side};
use log::{debug, trace};
use std::cmp::Ordering;
use std::mem;

/// The restructuring applied by a single call to `Tree::rebalance`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rotation {
    /// Single left rotation of a right-right heavy node.
    Left,
    /// Single right rotation of a left-left heavy node.
    Right,
    /// Left rotation of the left child followed by a right rotation of the node.
    LeftRight,
    /// Right rotation of the right child followed by a left rotation of the node.
    RightLeft,
}

pub struct Tree<T> {
    nodes: TypedArena<Node<T>>,
    root: Option<Handle>,
}

impl<T> Tree<T> {
    pub fn new(chunk_size: usize) -> Self {
        Tree {
            nodes: TypedArena::new(chunk_size),
            root: None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.nodes.clear();
    }

    pub fn root(&self) -> Option<NodeRef<T>> {
        self.root.map(|root| NodeRef::new(&self.nodes, root))
    }

    pub fn height(&self) -> i32 {
        node::height(&self.nodes, self.root)
    }

    pub fn key(&self, node: Handle) -> &T {
        &self.nodes[node].key
    }

    pub fn root_handle(&self) -> Option<Handle> {
        self.root
    }

    pub fn child(&self, node: Handle, side: Side) -> Option<Handle> {
        self.nodes[node].child(side)
    }

    // returns the last node on the path from `node` that follows `side` links
    pub fn extreme(&self, mut node: Handle, side: Side) -> Handle {
        while let Some(next) = self.nodes[node].child(side) {
            node = next;
        }
        node
    }

    pub fn find(&self, key: &T) -> Option<Handle>
    where
        T: Ord,
    {
        let mut curr = self.root;
        while let Some(node) = curr {
            curr = match key.cmp(&self.nodes[node].key) {
                Ordering::Less => self.nodes[node].left,
                Ordering::Greater => self.nodes[node].right,
                Ordering::Equal => return Some(node),
            };
        }
        None
    }

    pub fn take(&mut self, node: Handle) -> T {
        self.nodes.free(&node).key
    }

    fn set_child(&mut self, parent: Handle, side: Side, child: Option<Handle>) {
        *self.nodes[parent].child_mut(side) = child;
        if let Some(child) = child {
            self.nodes[child].parent = Some(parent);
        }
    }

    // puts `new` in the position `old` occupies under `parent`, or at the root
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            Some(parent) => {
                let side = if self.nodes[parent].left == Some(old) {
                    Side::Left
                } else {
                    Side::Right
                };
                self.set_child(parent, side, new);
            },
            None => {
                self.root = new;
                if let Some(new) = new {
                    self.nodes[new].parent = None;
                }
            },
        }
    }

    // rotates `node` down towards `side`, promoting its child on the opposite side
    fn rotate(&mut self, node: Handle, side: Side) {
        let heavy = side.opposite();
        let pivot = self.nodes[node]
            .child(heavy)
            .expect("Expected child node to promote to be `Some`.");
        let inner = self.nodes[pivot].child(side);
        let parent = self.nodes[node].parent;

        self.replace_child(parent, node, Some(pivot));
        self.set_child(pivot, side, Some(node));
        self.set_child(node, heavy, inner);

        if let Some(inner) = inner {
            node::update_height(&mut self.nodes, inner);
        }
        node::update_height(&mut self.nodes, node);
        node::update_height(&mut self.nodes, pivot);
    }

    fn rotate_left(&mut self, node: Handle) {
        self.rotate(node, Side::Left);
    }

    fn rotate_right(&mut self, node: Handle) {
        self.rotate(node, Side::Right);
    }

    fn rebalance(&mut self, node: Handle) -> Option<Rotation> {
        node::update_height(&mut self.nodes, node);

        let rotation = match node::balance(&self.nodes, node) {
            -2 => {
                let right = self.nodes[node]
                    .right
                    .expect("Expected right child node to be `Some`.");
                if node::balance(&self.nodes, right) == 1 {
                    self.rotate_right(right);
                    self.rotate_left(node);
                    Rotation::RightLeft
                } else {
                    self.rotate_left(node);
                    Rotation::Left
                }
            },
            2 => {
                let left = self.nodes[node]
                    .left
                    .expect("Expected left child node to be `Some`.");
                if node::balance(&self.nodes, left) == -1 {
                    self.rotate_left(left);
                    self.rotate_right(node);
                    Rotation::LeftRight
                } else {
                    self.rotate_right(node);
                    Rotation::Right
                }
            },
            _ => return None,
        };

        debug!("Applied {:?} rotation.", rotation);
        Some(rotation)
    }

    // walks from `start` to the root, rebalancing every node on the way
    fn retrace<F>(&mut self, start: Option<Handle>, on_rotate: &mut F)
    where
        F: FnMut(Rotation),
    {
        let mut curr = start;
        while let Some(node) = curr {
            if let Some(rotation) = self.rebalance(node) {
                on_rotate(rotation);
            }
            curr = self.nodes[node].parent;
        }
    }

    pub fn insert<F>(&mut self, key: T, on_rotate: &mut F) -> Option<T>
    where
        T: Ord,
        F: FnMut(Rotation),
    {
        let mut parent = None;
        let mut side = Side::Left;
        let mut curr = self.root;
        while let Some(node) = curr {
            side = match key.cmp(&self.nodes[node].key) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => {
                    trace!("Key already exists; insert ignored.");
                    return Some(key);
                },
            };
            parent = Some(node);
            curr = self.nodes[node].child(side);
        }

        let leaf = self.nodes.allocate(Node::new(key));
        match parent {
            Some(parent) => self.set_child(parent, side, Some(leaf)),
            None => self.root = Some(leaf),
        }
        self.retrace(parent, on_rotate);
        None
    }

    pub fn remove<F>(&mut self, key: &T, on_rotate: &mut F) -> Option<T>
    where
        T: Ord,
        F: FnMut(Rotation),
    {
        let target = match self.find(key) {
            Some(target) => target,
            None => {
                trace!("Key not found; remove ignored.");
                return None;
            },
        };

        let Node { left, right, parent, .. } = self.nodes[target];
        let (removed, start) = match (left, right) {
            (Some(_), Some(right)) => {
                // the successor has no left child, so it is spliced out like a one-child node
                let successor = self.extreme(right, Side::Left);
                let Node { right, parent, .. } = self.nodes[successor];
                self.replace_child(parent, successor, right);
                let successor_key = self.take(successor);
                let removed = mem::replace(&mut self.nodes[target].key, successor_key);
                (removed, parent)
            },
            (child, None) | (None, child) => {
                self.replace_child(parent, target, child);
                (self.take(target), parent)
            },
        };

        self.retrace(start, on_rotate);
        Some(removed)
    }
}
