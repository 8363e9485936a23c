//! This crate exposes a keyed binary tree whose shape is driven by position rather than by key
//! order.
//!
//! ## Keyed Binary Tree
//!
//! A binary tree stores records in `Node`s, each of which has at most two child `Node`s, a
//! left one and a right one. The tree in this crate attaches a key and a value to every
//! `Node` but, unlike a Binary Search Tree, places no ordering constraint between them. Where a
//! `Node` goes is decided by *level order*: the order in which a breadth-first walk, depth by
//! depth and left to right, reaches the slots of the tree.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Building a tree from a sequence, or adding to one, always fills the first free slot in level
//! order. Removing a `Node` copies its *rightmost deepest descendant* (the last `Node` a
//! breadth-first walk from it reaches) into its place and drops that descendant instead. Together
//! these keep a tree that starts out complete (every level full except possibly the last, which
//! fills left to right) complete.
//!
//! Trees can be walked in pre-order, in-order, post-order, or level order. Every walk hands each
//! key/value pair to a caller-supplied [`Visitor`].
//!
//! ```
//! use keyed_tree::{KeyedBinaryTree, Order};
//!
//! let keys = ["A", "B", "C", "D", "E"];
//! let tree = KeyedBinaryTree::from_level_order(keys, 0..5).unwrap();
//!
//! let mut min: Option<(&str, i32)> = None;
//! tree.walk(Order::PostOrder, &mut |k: &&'static str, v: &i32| {
//!     if min.map_or(true, |(_, m)| *v < m) {
//!         min = Some((*k, *v));
//!     }
//! });
//! assert_eq!(min, Some(("A", 0)));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
pub mod error;
pub mod linked;
mod util;
pub mod visit;


pub use error::{ErrorKind, TreeError};
pub use visit::{Order, Visitor};

/// The crate's tree, under a more descriptive name.
pub type KeyedBinaryTree<K, V> = linked::Tree<K, V>;
