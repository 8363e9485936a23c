//! Errors raised when a tree operation's contract is violated. Lookups that simply miss are not
//! errors; they return `None`.

use thiserror::Error;

/// Broad classification of a [`TreeError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The caller passed arguments the operation cannot accept.
    InvalidArgument,
    /// The tree is not in a state that permits the operation.
    InvalidState,
}

/// The ways a tree operation can be refused.
///
/// # Examples
///
/// ```
/// use keyed_tree::{ErrorKind, KeyedBinaryTree, TreeError};
///
/// let err = KeyedBinaryTree::from_level_order(vec!["a", "b"], vec![1]).unwrap_err();
/// assert_eq!(err, TreeError::LengthMismatch { keys: 2, values: 1 });
/// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
/// assert_eq!(
///     err.to_string(),
///     "length of keys (2) and values (1) must be the same"
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum TreeError {
    /// Bulk construction was given key and value sequences of different lengths.
    #[error("length of keys ({keys}) and values ({values}) must be the same")]
    LengthMismatch {
        /// How many keys were supplied.
        keys: usize,
        /// How many values were supplied.
        values: usize,
    },
    /// Bulk construction was given no keys and no values.
    #[error("keys and values must not be empty")]
    EmptyInput,
    /// A node was added to a tree that has no root to hang it from.
    #[error("cannot add to an empty tree; construct it with a root first")]
    EmptyTree,
}

impl TreeError {
    /// Which class of failure this is.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::LengthMismatch { .. } | Self::EmptyInput => ErrorKind::InvalidArgument,
            Self::EmptyTree => ErrorKind::InvalidState,
        }
    }
}
