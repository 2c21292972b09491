//! # Sibling Trie
//!
//! A mutable prefix tree (trie) mapping string keys to values.
//!
//! Every edge of the tree is labelled by one key unit (a `char` for string
//! keys, a `u8` for byte keys). The children of a node are kept as a
//! singly-linked list scanned linearly, which keeps nodes small and preserves
//! insertion order: enumeration visits a node before its children, and
//! siblings in the order they were first created.
//!
//! ## Features
//!
//! - **Strict inserts**: setting a key that already holds a value is an error,
//!   not a silent overwrite
//! - **Pruning**: removing a key unlinks every node left without a value or children
//! - **Lazy enumeration**: entries are produced depth-first on demand
//!
//! ## Example
//!
//! ```rust
//! use sibling_trie::{StringTrie, TrieError};
//!
//! let mut trie = StringTrie::new();
//! trie.set("cat", 1).unwrap();
//! trie.set("car", 2).unwrap();
//! trie.set("dog", 3).unwrap();
//!
//! assert_eq!(trie.size(), 3);
//! assert_eq!(trie.get("car"), Some(&2));
//! assert_eq!(trie.set("cat", 4), Err(TrieError::DuplicateKey));
//!
//! assert_eq!(trie.remove("cat"), Ok(1));
//! assert_eq!(trie.get("cat"), None);
//! assert_eq!(trie.get("car"), Some(&2));
//! ```

pub mod key_units;
pub mod node;
mod trie;

// Re-export public types
pub use crate::key_units::KeyUnits;
pub use crate::node::Node;
pub use crate::trie::{BytesTrie, Iter, StringTrie, Trie};

/// Target used for all `tracing` events emitted by this crate.
pub const LOG_TARGET: &str = "sibling_trie";

/// Errors that can occur in trie operations
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrieError {
    /// `set` was called with a key that already holds a value
    #[error("key already holds a value")]
    DuplicateKey,

    /// `remove` was called with a key whose path does not exist
    #[error("no such key")]
    KeyNotFound,

    /// `remove` was called with a key that is only a prefix of stored keys
    #[error("key has no value")]
    NoValueAtKey,

    /// A node has no child for the requested unit. Only raised when the
    /// tree's bookkeeping is inconsistent.
    #[error("no such child")]
    ChildNotFound,
}
