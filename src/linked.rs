//! A linked binary tree holding key/value pairs. Nodes live in an arena and are addressed by
//! handle, so every node can keep a non-owning link back to its parent.
//!
//! The tree keeps no ordering between keys. Its shape is decided purely by position:
//! construction and [`add`][Tree::add] fill slots in level order, and
//! [`remove`][Tree::remove] plugs the hole it leaves with the removed node's rightmost deepest
//! descendant. A tree built that way stays complete.
//!
//! # Examples
//!
//! ```
//! use keyed_tree::linked::Tree;
//!
//! let mut tree = Tree::from_level_order(["A", "B", "C"], [1, 2, 3]).unwrap();
//!
//! //     A
//! //    / \
//! //   B   C
//! let mut pairs = Vec::new();
//! tree.visit_pre_order(|k, v| pairs.push((*k, *v)));
//! assert_eq!(pairs, [("A", 1), ("B", 2), ("C", 3)]);
//!
//! // New nodes go in the first free slot in level order: under `B`, on the left.
//! tree.add("D", 4).unwrap();
//! assert_eq!(tree.len(), 4);
//!
//! // Removing `A` moves the last node in level order (`D`) up into its place.
//! assert_eq!(tree.remove(&"A"), Some(1));
//! assert_eq!(tree.root(), Some((&"D", &4)));
//! assert_eq!(tree.get(&"A"), None);
//! ```

use std::borrow::Borrow;
use std::collections::VecDeque;
use std::fmt;
use std::mem;

use tracing::{debug, trace};

use crate::arena::{Arena, Handle};
use crate::error::TreeError;
use crate::util::Side;
use crate::visit::{Order, Visitor};

/// A possibly-absent reference to another node in the same arena.
type Link = Option<Handle>;

/// A binary tree of key/value pairs. Keys need not be unique; lookups find the first matching
/// node in pre-order.
#[derive(Clone)]
pub struct Tree<K, V> {
    nodes: Arena<Node<K, V>>,
    root: Link,
}

impl<K, V> Default for Tree<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for Tree<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    /// Formats the pairs in level order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.level_order_handles().map(|h| self.pair(h)))
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for Tree<K, V> {
    /// Builds a complete tree by filling slots in level order. An empty iterator gives an empty
    /// tree.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();
        let mut tree = Self {
            nodes: Arena::with_capacity(lower),
            root: None,
        };

        // `placed[i]` is the handle of the `i`th pair. Slot `i` hangs off slot `(i - 1) / 2`.
        let mut placed: Vec<Handle> = Vec::with_capacity(lower);
        for (index, (key, value)) in iter.enumerate() {
            let parent = index.checked_sub(1).map(|p| placed[p / 2]);
            let handle = tree.nodes.alloc(Node::new(key, value, parent));
            match parent {
                Some(parent) => {
                    *tree.nodes.get_mut(parent).child_mut(Side::of_level_order_index(index)) =
                        Some(handle)
                }
                None => tree.root = Some(handle),
            }
            placed.push(handle);
        }

        tree
    }
}

impl<K, V> Tree<K, V> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Generates a `Tree` with a single node.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::linked::Tree;
    ///
    /// let tree = Tree::with_root(1, "one");
    /// assert_eq!(tree.len(), 1);
    /// assert_eq!(tree.root(), Some((&1, &"one")));
    /// ```
    pub fn with_root(key: K, value: V) -> Self {
        let mut nodes = Arena::with_capacity(1);
        let root = nodes.alloc(Node::new(key, value, None));
        Self {
            nodes,
            root: Some(root),
        }
    }

    /// Builds a complete binary tree from parallel sequences of keys and values. The first pair
    /// becomes the root, the second its left child, the third its right child, and so on, level
    /// by level and left to right.
    ///
    /// # Errors
    ///
    /// [`TreeError::LengthMismatch`] if `keys` and `values` have different lengths and
    /// [`TreeError::EmptyInput`] if both are empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::{linked::Tree, TreeError};
    ///
    /// let tree = Tree::from_level_order(1..=7, 1..=7).unwrap();
    /// assert_eq!(tree.len(), 7);
    /// assert_eq!(tree.count_leaf_nodes(), 4);
    ///
    /// let empty = Tree::<i32, i32>::from_level_order(None, None);
    /// assert_eq!(empty.unwrap_err(), TreeError::EmptyInput);
    /// ```
    pub fn from_level_order<IK, IV>(keys: IK, values: IV) -> Result<Self, TreeError>
    where
        IK: IntoIterator<Item = K>,
        IV: IntoIterator<Item = V>,
    {
        let keys: Vec<K> = keys.into_iter().collect();
        let values: Vec<V> = values.into_iter().collect();

        if keys.len() != values.len() {
            debug!(
                keys = keys.len(),
                values = values.len(),
                "rejected level-order construction"
            );
            return Err(TreeError::LengthMismatch {
                keys: keys.len(),
                values: values.len(),
            });
        }
        if keys.is_empty() {
            debug!("rejected level-order construction from empty input");
            return Err(TreeError::EmptyInput);
        }

        Ok(keys.into_iter().zip(values).collect())
    }

    /// Builds a tree whose root holds `key` and `value`, with the root of `left` as its left
    /// child and the root of `right` as its right child. Either subtree may be empty. Both
    /// subtrees are consumed.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::linked::Tree;
    ///
    /// let left = Tree::from_level_order(["b", "d"], [2, 4]).unwrap();
    /// let tree = Tree::from_subtrees(left, "a", 1, Tree::with_root("c", 3));
    ///
    /// let mut keys = Vec::new();
    /// tree.visit_level_order(|k, _| keys.push(*k));
    /// assert_eq!(keys, ["a", "b", "c", "d"]);
    /// assert_eq!(tree.len(), 4);
    /// ```
    pub fn from_subtrees(left: Self, key: K, value: V, right: Self) -> Self {
        let (left_len, right_len) = (left.len(), right.len());
        let mut tree = Self {
            nodes: Arena::with_capacity(left_len + right_len + 1),
            root: None,
        };
        let root = tree.nodes.alloc(Node::new(key, value, None));
        tree.root = Some(root);

        tree.graft(left, root, Side::Left);
        tree.graft(right, root, Side::Right);

        trace!(left = left_len, right = right_len, "composed tree from subtrees");
        tree
    }

    /// Moves every node of `other` into this tree's arena, hanging `other`'s root off `parent`
    /// in the `side` slot.
    fn graft(&mut self, mut other: Self, parent: Handle, side: Side) {
        let Some(other_root) = other.root.take() else {
            return;
        };

        let mut queue = VecDeque::from([(other_root, parent, side)]);
        while let Some((old, parent, side)) = queue.pop_front() {
            let node = other.nodes.take(old);
            let new = self.nodes.alloc(Node::new(node.key, node.value, Some(parent)));
            *self.nodes.get_mut(parent).child_mut(side) = Some(new);

            if let Some(left) = node.left {
                queue.push_back((left, new, Side::Left));
            }
            if let Some(right) = node.right {
                queue.push_back((right, new, Side::Right));
            }
        }
    }

    /// The number of nodes in the tree.
    #[doc(alias = "size")]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no nodes.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// The key and value stored at the root, if any.
    pub fn root(&self) -> Option<(&K, &V)> {
        self.root.map(|h| self.pair(h))
    }

    /// The number of levels in the tree. An empty tree has height 0 and a lone root height 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut level: Vec<Handle> = self.root.into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|h| {
                    let node = self.nodes.get(h);
                    node.left.into_iter().chain(node.right)
                })
                .collect();
        }
        height
    }

    /// Whether any node holds `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::linked::Tree;
    ///
    /// let tree = Tree::from_level_order(vec!["x".to_string()], vec![0]).unwrap();
    /// assert!(tree.contains("x"));
    /// assert!(!tree.contains("y"));
    /// assert!(!Tree::<String, i32>::new().contains("x"));
    /// ```
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Potentially finds the value associated with the given key. When several nodes share the
    /// key, the first one reached in pre-order wins. If no node has the key, `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::linked::Tree;
    ///
    /// let tree = Tree::from_level_order([1, 2, 2], ["a", "b", "c"]).unwrap();
    ///
    /// assert_eq!(tree.get(&2), Some(&"b"));
    /// assert_eq!(tree.get(&42), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.find(key).map(|h| &self.nodes.get(h).value)
    }

    /// Like [`get`][Tree::get] but allows the value to be changed in place.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let handle = self.find(key)?;
        Some(&mut self.nodes.get_mut(handle).value)
    }

    /// Inserts a new node in the first empty child slot found by a level-order scan from the
    /// root: the left slot of a node is tried before its right slot, and a node's siblings are
    /// all tried before any of its children.
    ///
    /// # Errors
    ///
    /// [`TreeError::EmptyTree`] if the tree has no root. Use [`Tree::with_root`] to start one.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::{linked::Tree, TreeError};
    ///
    /// let mut tree = Tree::from_level_order(["a", "b"], [1, 2]).unwrap();
    /// tree.add("c", 3).unwrap();
    ///
    /// // `c` filled the root's right slot rather than going under `b`.
    /// assert_eq!(tree.height(), 2);
    ///
    /// assert_eq!(Tree::new().add("a", 1), Err(TreeError::EmptyTree));
    /// ```
    pub fn add(&mut self, key: K, value: V) -> Result<(), TreeError> {
        let Some(root) = self.root else {
            debug!("rejected add to an empty tree");
            return Err(TreeError::EmptyTree);
        };

        let (parent, side) = self.first_free_slot(root);
        let child = self.nodes.alloc(Node::new(key, value, Some(parent)));
        *self.nodes.get_mut(parent).child_mut(side) = Some(child);

        trace!(?side, len = self.len(), "added node");
        Ok(())
    }

    /// Scans one node at a time in level order for a missing child.
    fn first_free_slot(&self, root: Handle) -> (Handle, Side) {
        let mut queue = VecDeque::from([root]);
        while let Some(handle) = queue.pop_front() {
            let node = self.nodes.get(handle);
            match (node.left, node.right) {
                (None, _) => return (handle, Side::Left),
                (Some(_), None) => return (handle, Side::Right),
                (Some(left), Some(right)) => {
                    queue.push_back(left);
                    queue.push_back(right);
                }
            }
        }
        unreachable!("every finite tree has a node with a free child slot")
    }

    /// Removes the first node (in pre-order) holding `key` and returns its value. If no node
    /// holds the key, nothing happens and `None` is returned.
    ///
    /// Rather than restructuring the tree, the key and value of the target's rightmost deepest
    /// descendant (the last node reached by a level-order walk starting at the target) are
    /// moved into the target, and that descendant is unlinked. A leaf target is simply unlinked.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::linked::Tree;
    ///
    /// //       a
    /// //     /   \
    /// //    b     c
    /// //   / \
    /// //  d   e
    /// let mut tree = Tree::from_level_order(["a", "b", "c", "d", "e"], [1, 2, 3, 4, 5]).unwrap();
    ///
    /// assert_eq!(tree.remove(&"b"), Some(2));
    /// assert_eq!(tree.remove(&"b"), None);
    ///
    /// //       a
    /// //     /   \
    /// //    e     c
    /// //   /
    /// //  d
    /// let mut keys = Vec::new();
    /// tree.visit_level_order(|k, _| keys.push(*k));
    /// assert_eq!(keys, ["a", "e", "c", "d"]);
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let Some(target) = self.find(key) else {
            trace!("remove found no matching key");
            return None;
        };

        let deepest = self.breadth_first(target).fold(target, |_, h| h);
        let removed = self.unlink_leaf(deepest);

        let value = if deepest == target {
            removed.value
        } else {
            let node = self.nodes.get_mut(target);
            node.key = removed.key;
            mem::replace(&mut node.value, removed.value)
        };

        trace!(promoted = deepest != target, len = self.len(), "removed node");
        Some(value)
    }

    /// Detaches a childless node from its parent (or from the tree, for the root) and frees it.
    fn unlink_leaf(&mut self, handle: Handle) -> Node<K, V> {
        let node = self.nodes.take(handle);
        debug_assert!(node.is_leaf(), "only leaves can be unlinked");

        match node.parent {
            Some(parent) => {
                let parent = self.nodes.get_mut(parent);
                if parent.left == Some(handle) {
                    parent.left = None;
                } else {
                    parent.right = None;
                }
            }
            None => self.root = None,
        }

        node
    }

    /// Calls `visitor` on every node: the node first, then its left subtree, then its right
    /// subtree.
    pub fn visit_pre_order<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle);
            visitor(&node.key, &node.value);
            stack.extend(node.right);
            stack.extend(node.left);
        }
    }

    /// Calls `visitor` on every node: the left subtree first, then the node, then its right
    /// subtree.
    pub fn visit_in_order<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        let mut stack = Vec::new();
        let mut current = self.root;
        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left;
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.nodes.get(handle);
            visitor(&node.key, &node.value);
            current = node.right;
        }
    }

    /// Calls `visitor` on every node: the left subtree first, then the right subtree, then the
    /// node.
    pub fn visit_post_order<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        // The flag marks nodes whose children have already been pushed.
        let mut stack: Vec<(Handle, bool)> = self.root.map(|h| (h, false)).into_iter().collect();
        while let Some((handle, expanded)) = stack.pop() {
            let node = self.nodes.get(handle);
            if expanded {
                visitor(&node.key, &node.value);
            } else {
                stack.push((handle, true));
                stack.extend(node.right.map(|h| (h, false)));
                stack.extend(node.left.map(|h| (h, false)));
            }
        }
    }

    /// Calls `visitor` on every node, level by level from the root, left to right.
    pub fn visit_level_order<F>(&self, mut visitor: F)
    where
        F: FnMut(&K, &V),
    {
        for handle in self.level_order_handles() {
            let node = self.nodes.get(handle);
            visitor(&node.key, &node.value);
        }
    }

    /// Runs `visitor` over the tree in the given `order`.
    ///
    /// # Examples
    ///
    /// ```
    /// use keyed_tree::{linked::Tree, Order};
    ///
    /// let tree = Tree::from_level_order(["a", "b", "c"], [1, 2, 3]).unwrap();
    ///
    /// let mut keys = Vec::new();
    /// tree.walk(Order::InOrder, &mut |k: &&str, _: &i32| keys.push(k.to_string()));
    /// assert_eq!(keys, ["b", "a", "c"]);
    /// ```
    pub fn walk<W>(&self, order: Order, visitor: &mut W)
    where
        W: Visitor<K, V> + ?Sized,
    {
        let visit = |key: &K, value: &V| visitor.visit(key, value);
        match order {
            Order::PreOrder => self.visit_pre_order(visit),
            Order::InOrder => self.visit_in_order(visit),
            Order::PostOrder => self.visit_post_order(visit),
            Order::LevelOrder => self.visit_level_order(visit),
        }
    }

    /// The number of nodes without children.
    pub fn count_leaf_nodes(&self) -> usize {
        self.level_order_handles()
            .filter(|&h| self.nodes.get(h).is_leaf())
            .count()
    }

    /// Finds the first node holding `key`, searching the root, then the whole left subtree,
    /// then the whole right subtree.
    fn find<Q>(&self, key: &Q) -> Link
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        let mut stack: Vec<Handle> = self.root.into_iter().collect();
        while let Some(handle) = stack.pop() {
            let node = self.nodes.get(handle);
            if node.key.borrow() == key {
                return Some(handle);
            }
            stack.extend(node.right);
            stack.extend(node.left);
        }
        None
    }

    fn level_order_handles(&self) -> BreadthFirst<'_, K, V> {
        BreadthFirst {
            nodes: &self.nodes,
            queue: self.root.into_iter().collect(),
        }
    }

    fn breadth_first(&self, start: Handle) -> BreadthFirst<'_, K, V> {
        BreadthFirst {
            nodes: &self.nodes,
            queue: VecDeque::from([start]),
        }
    }

    fn pair(&self, handle: Handle) -> (&K, &V) {
        let node = self.nodes.get(handle);
        (&node.key, &node.value)
    }
}

/// Handles of a subtree in level order.
struct BreadthFirst<'a, K, V> {
    nodes: &'a Arena<Node<K, V>>,
    queue: VecDeque<Handle>,
}

impl<K, V> Iterator for BreadthFirst<'_, K, V> {
    type Item = Handle;

    fn next(&mut self) -> Option<Handle> {
        let handle = self.queue.pop_front()?;
        let node = self.nodes.get(handle);
        self.queue.extend(node.left);
        self.queue.extend(node.right);
        Some(handle)
    }
}

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link,
    right: Link,
    /// Back-reference only; the parent owns this node, not the other way round.
    parent: Link,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V, parent: Link) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent,
        }
    }

    fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    fn child_mut(&mut self, side: Side) -> &mut Link {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }
}
