//! The callback side of a traversal.

/// Something that can be shown every key/value pair of a tree, one at a time.
///
/// Any `FnMut(&K, &V)` closure is a `Visitor`, so most callers never implement this by hand. It
/// exists for visitors that carry state the caller wants to read back afterwards.
///
/// A visitor only ever sees shared references, so it cannot change the tree it is walking.
///
/// # Examples
///
/// ```
/// use keyed_tree::{KeyedBinaryTree, Order, Visitor};
///
/// #[derive(Default)]
/// struct Sum(i32);
///
/// impl<K> Visitor<K, i32> for Sum {
///     fn visit(&mut self, _key: &K, value: &i32) {
///         self.0 += value;
///     }
/// }
///
/// let tree = KeyedBinaryTree::from_level_order(["a", "b", "c"], [1, 2, 3]).unwrap();
/// let mut sum = Sum::default();
/// tree.walk(Order::PostOrder, &mut sum);
/// assert_eq!(sum.0, 6);
/// ```
pub trait Visitor<K, V> {
    /// Called once for each node in the tree.
    fn visit(&mut self, key: &K, value: &V);
}

impl<K, V, F> Visitor<K, V> for F
where
    F: FnMut(&K, &V),
{
    fn visit(&mut self, key: &K, value: &V) {
        self(key, value)
    }
}

/// The order in which a traversal reaches each node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then its left subtree, then its right subtree.
    PreOrder,
    /// Left subtree, then the node, then its right subtree.
    InOrder,
    /// Left subtree, then right subtree, then the node.
    PostOrder,
    /// Breadth first: by depth, then left to right.
    LevelOrder,
}

impl Order {
    /// Every order, handy for checks that must hold regardless of traversal.
    pub const ALL: [Order; 4] = [
        Order::PreOrder,
        Order::InOrder,
        Order::PostOrder,
        Order::LevelOrder,
    ];
}
