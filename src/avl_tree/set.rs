use crate::arena::Handle;
use crate::avl_tree::node::{NodeRef, Side};
use crate::avl_tree::tree::{Rotation, Tree};
use std::fmt;

const DEFAULT_CHUNK_SIZE: usize = 64;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of the two child subtrees of any node differ by at most one. Every node also keeps a
/// link to its parent, which lets insertions and removals rebalance by walking from the point
/// of change up to the root.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlSet;
///
/// let mut set = AvlSet::new();
/// set.insert(0);
/// set.insert(3);
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.min(), Some(&0));
///
/// assert_eq!(set.remove(&0), Some(0));
/// assert_eq!(set.remove(&1), None);
/// ```
pub struct AvlSet<T> {
    tree: Tree<T>,
}

impl<T> AvlSet<T> {
    /// Constructs a new, empty `AvlSet<T>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// ```
    pub fn new() -> Self {
        Self::with_chunk_size(DEFAULT_CHUNK_SIZE)
    }

    /// Constructs a new, empty `AvlSet<T>` whose nodes are allocated `chunk_size` at a time.
    ///
    /// # Panics
    ///
    /// Panics if `chunk_size` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::with_chunk_size(1024);
    /// ```
    pub fn with_chunk_size(chunk_size: usize) -> Self {
        AvlSet {
            tree: Tree::new(chunk_size),
        }
    }

    /// Inserts a key into the set. If the key already exists in the set, the set is left
    /// unchanged and the rejected key is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.insert(1), None);
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Some(1));
    /// ```
    pub fn insert(&mut self, key: T) -> Option<T>
    where
        T: Ord,
    {
        self.insert_with(key, |_| ())
    }

    /// Inserts a key into the set like `insert`, calling `on_rotate` for every rotation applied
    /// while rebalancing.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Rotation};
    ///
    /// let mut set = AvlSet::new();
    /// let mut rotations = Vec::new();
    /// for key in &[3, 1, 2] {
    ///     set.insert_with(*key, |rotation| rotations.push(rotation));
    /// }
    /// assert_eq!(rotations, vec![Rotation::LeftRight]);
    /// ```
    pub fn insert_with<F>(&mut self, key: T, mut on_rotate: F) -> Option<T>
    where
        T: Ord,
        F: FnMut(Rotation),
    {
        self.tree.insert(key, &mut on_rotate)
    }

    /// Removes a key from the set. If the key exists in the set, it will return the removed
    /// key. Otherwise it will return `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.remove(&1), Some(1));
    /// assert_eq!(set.remove(&1), None);
    /// ```
    pub fn remove(&mut self, key: &T) -> Option<T>
    where
        T: Ord,
    {
        self.remove_with(key, |_| ())
    }

    /// Removes a key from the set like `remove`, calling `on_rotate` for every rotation applied
    /// while rebalancing. A single removal may rotate at every level up to the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, Rotation};
    ///
    /// let mut set = AvlSet::new();
    /// for key in &[2, 1, 3, 4] {
    ///     set.insert(*key);
    /// }
    ///
    /// let mut rotations = Vec::new();
    /// assert_eq!(set.remove_with(&1, |rotation| rotations.push(rotation)), Some(1));
    /// assert_eq!(rotations, vec![Rotation::Left]);
    /// ```
    pub fn remove_with<F>(&mut self, key: &T, mut on_rotate: F) -> Option<T>
    where
        T: Ord,
        F: FnMut(Rotation),
    {
        self.tree.remove(key, &mut on_rotate)
    }

    /// Checks if a key exists in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool
    where
        T: Ord,
    {
        self.tree.find(key).is_some()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// assert_eq!(set.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new();
    /// assert!(set.is_empty());
    /// ```
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clears the set, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(2);
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns the height of the tree: 0 for a single node, -1 for an empty set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.height(), -1);
    /// for key in 0..7 {
    ///     set.insert(key);
    /// }
    /// assert_eq!(set.height(), 2);
    /// ```
    pub fn height(&self) -> i32 {
        self.tree.height()
    }

    /// Returns a read-only view of the root node, or `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert!(set.root().is_none());
    /// set.insert(3);
    /// set.insert(1);
    /// assert_eq!(set.root().map(|node| *node.key()), Some(3));
    /// ```
    pub fn root(&self) -> Option<NodeRef<T>> {
        self.tree.root()
    }

    /// Returns the minimum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        self.extreme(Side::Left)
    }

    /// Returns the maximum key of the set. Returns `None` if the set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// set.insert(3);
    /// assert_eq!(set.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        self.extreme(Side::Right)
    }

    fn extreme(&self, side: Side) -> Option<&T> {
        self.tree
            .root_handle()
            .map(|root| self.tree.key(self.tree.extreme(root, side)))
    }

    /// Returns an iterator over the set. The iterator will yield keys using in-order traversal.
    /// Each call starts a fresh traversal from the smallest key.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(3);
    /// set.insert(1);
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> AvlSetIter<T> {
        AvlSetIter {
            tree: &self.tree,
            current: self.tree.root_handle(),
            stack: Vec::new(),
        }
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type Item = T;
    type IntoIter = AvlSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            current: self.tree.root_handle(),
            tree: self.tree,
            stack: Vec::new(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T>
where
    T: 'a,
{
    type Item = &'a T;
    type IntoIter = AvlSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields owned keys.
pub struct AvlSetIntoIter<T> {
    tree: Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<T> Iterator for AvlSetIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = self.tree.child(node, Side::Left);
        }
        self.stack.pop().map(|node| {
            self.current = self.tree.child(node, Side::Right);
            // the left subtree has already been yielded, so nothing links back into it
            self.tree.take(node)
        })
    }
}

/// An iterator for `AvlSet<T>`.
///
/// This iterator traverses the elements of the set in-order and yields immutable references.
pub struct AvlSetIter<'a, T>
where
    T: 'a,
{
    tree: &'a Tree<T>,
    current: Option<Handle>,
    stack: Vec<Handle>,
}

impl<'a, T> Iterator for AvlSetIter<'a, T>
where
    T: 'a,
{
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        while let Some(node) = self.current {
            self.stack.push(node);
            self.current = tree.child(node, Side::Left);
        }
        self.stack.pop().map(|node| {
            self.current = tree.child(node, Side::Right);
            tree.key(node)
        })
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for AvlSet<T>
where
    T: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}
