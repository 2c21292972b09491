//! The main trie implementation.
//!
//! This module contains the `Trie` type, which provides the primary API for working
//! with the prefix tree. Every operation walks from the root, consuming one key
//! unit per level.

use std::fmt;
use std::marker::PhantomData;

use tracing::trace;

use crate::key_units::KeyUnits;
use crate::node::{Entries, Node};
use crate::{TrieError, LOG_TARGET};

/// A trie keyed by `str`, one `char` per level.
pub type StringTrie<V> = Trie<str, V>;

/// A trie keyed by `[u8]`, one byte per level.
pub type BytesTrie<V> = Trie<[u8], V>;

/// A mutable prefix tree mapping keys of type `K` to values of type `V`.
///
/// Nodes are created on demand by [`set`](Trie::set) and pruned by
/// [`remove`](Trie::remove) once they carry neither a value nor children, so
/// the tree never holds dead branches after a removal.
pub struct Trie<K: ?Sized + KeyUnits, V> {
    /// The root node, labelled by no unit. Holds the value of the empty key.
    root: Node<K::Unit, V>,

    /// The number of values stored in the trie
    size: usize,

    /// The number of non-root nodes currently linked into the tree
    node_count: usize,

    _key: PhantomData<fn(&K)>,
}

impl<K: ?Sized + KeyUnits, V> Trie<K, V> {
    /// Creates a new, empty trie.
    ///
    /// # Examples
    ///
    /// ```
    /// use sibling_trie::StringTrie;
    ///
    /// let trie = StringTrie::<i32>::new();
    /// assert!(trie.is_empty());
    /// ```
    pub fn new() -> Self {
        Trie {
            root: Node::root(),
            size: 0,
            node_count: 0,
            _key: PhantomData,
        }
    }

    /// Builds a trie by calling [`set`](Trie::set) for every entry, in
    /// iteration order.
    ///
    /// Fails with [`TrieError::DuplicateKey`] on the first key that repeats.
    ///
    /// # Examples
    ///
    /// ```
    /// use sibling_trie::StringTrie;
    ///
    /// let trie = StringTrie::from_entries(vec![("cat", 1), ("car", 2)]).unwrap();
    /// assert_eq!(trie.size(), 2);
    /// ```
    pub fn from_entries<'k, I>(entries: I) -> Result<Self, TrieError>
    where
        I: IntoIterator<Item = (&'k K, V)>,
        K: 'k,
    {
        let mut trie = Trie::new();
        for (key, value) in entries {
            trie.set(key, value)?;
        }
        Ok(trie)
    }

    /// Returns the number of values stored in the trie. O(1).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the number of values stored in the trie.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the trie contains no values.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the root node, for inspecting the tree shape.
    pub fn root(&self) -> &Node<K::Unit, V> {
        &self.root
    }

    /// Stores `value` under `key`.
    ///
    /// Missing nodes along the key's path are created. If `key` already holds
    /// a value the trie keeps it and [`TrieError::DuplicateKey`] is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use sibling_trie::{StringTrie, TrieError};
    ///
    /// let mut trie = StringTrie::new();
    /// trie.set("hello", 1).unwrap();
    ///
    /// assert_eq!(trie.set("hello", 2), Err(TrieError::DuplicateKey));
    /// assert_eq!(trie.get("hello"), Some(&1));
    /// ```
    pub fn set(&mut self, key: &K, value: V) -> Result<(), TrieError> {
        let mut node = &mut self.root;

        for unit in key.units() {
            if node.get_child(unit).is_none() {
                node.create_child(unit);
                self.node_count += 1;
                trace!(
                    target: LOG_TARGET,
                    unit = ?unit,
                    nodes = self.node_count,
                    "Created trie node"
                );
            }
            node = node.get_child_mut(unit).ok_or(TrieError::ChildNotFound)?;
        }

        // Nodes created above stay linked if this fails. A key that already
        // holds a value never needs new nodes.
        if node.has_value() {
            return Err(TrieError::DuplicateKey);
        }

        node.set_value(value);
        self.size += 1;
        trace!(target: LOG_TARGET, size = self.size, "Stored value");
        Ok(())
    }

    /// Retrieves a reference to the value stored for `key`, if any.
    ///
    /// A key that is only a prefix of stored keys has no value.
    ///
    /// # Examples
    ///
    /// ```
    /// use sibling_trie::StringTrie;
    ///
    /// let trie = StringTrie::from_entries(vec![("cat", 1)]).unwrap();
    ///
    /// assert_eq!(trie.get("cat"), Some(&1));
    /// assert_eq!(trie.get("ca"), None);
    /// assert_eq!(trie.get("dog"), None);
    /// ```
    pub fn get(&self, key: &K) -> Option<&V> {
        self.landing_node(key)?.value()
    }

    /// Retrieves a mutable reference to the value stored for `key`, if any.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut node = &mut self.root;
        for unit in key.units() {
            node = node.get_child_mut(unit)?;
        }
        node.value_mut()
    }

    /// Returns `true` if the trie holds a value for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Removes the value stored for `key` and returns it.
    ///
    /// Nodes left with neither a value nor children are unlinked, walking back
    /// towards the root until a node that still carries data is reached.
    ///
    /// Fails with [`TrieError::KeyNotFound`] when the key's path does not
    /// exist, and with [`TrieError::NoValueAtKey`] when it exists but holds no
    /// value. The trie is left untouched in both cases.
    ///
    /// # Examples
    ///
    /// ```
    /// use sibling_trie::{StringTrie, TrieError};
    ///
    /// let mut trie = StringTrie::from_entries(vec![("cat", 1), ("car", 2)]).unwrap();
    ///
    /// assert_eq!(trie.remove("cat"), Ok(1));
    /// assert_eq!(trie.remove("ca"), Err(TrieError::NoValueAtKey));
    /// assert_eq!(trie.remove("dog"), Err(TrieError::KeyNotFound));
    /// assert_eq!(trie.get("car"), Some(&2));
    /// ```
    pub fn remove(&mut self, key: &K) -> Result<V, TrieError> {
        let units: Vec<K::Unit> = key.units().collect();

        // Depth of the deepest node on the path that outlives the removal: the
        // root, or a node holding a value or branching off the path. Every node
        // below it has no value and a single child.
        let mut anchor = 0;
        let mut node = &self.root;
        for (depth, &unit) in units.iter().enumerate() {
            if node.has_value() || node.children().nth(1).is_some() {
                anchor = depth;
            }
            node = node.get_child(unit).ok_or(TrieError::KeyNotFound)?;
        }
        if !node.has_value() {
            return Err(TrieError::NoValueAtKey);
        }
        let prune = !units.is_empty() && !node.has_children();

        let value = self
            .node_at_mut(&units)
            .and_then(Node::take_value)
            .ok_or(TrieError::NoValueAtKey)?;
        self.size -= 1;

        if prune {
            // The detached branch is dropped here, with every emptied node.
            self.node_at_mut(&units[..anchor])
                .ok_or(TrieError::ChildNotFound)?
                .remove_child(units[anchor])?;

            let pruned = units.len() - anchor;
            self.node_count -= pruned;
            trace!(
                target: LOG_TARGET,
                pruned,
                depth = anchor,
                nodes = self.node_count,
                "Pruned trie nodes"
            );
        }

        trace!(target: LOG_TARGET, size = self.size, nodes = self.node_count, "Removed value");
        Ok(value)
    }

    /// Returns an iterator over all entries.
    ///
    /// A node's entry comes before those of its children, and children are
    /// visited depth-first in the order they were created. Sort the output if
    /// lexicographic order is needed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sibling_trie::StringTrie;
    ///
    /// let trie = StringTrie::from_entries(vec![("b", 1), ("a", 2), ("ab", 3)]).unwrap();
    ///
    /// let keys: Vec<String> = trie.iter().map(|(key, _)| key).collect();
    /// assert_eq!(keys, vec!["b", "a", "ab"]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            entries: self.root.produce_entries(&[]),
            remaining: self.size,
        }
    }

    fn landing_node(&self, key: &K) -> Option<&Node<K::Unit, V>> {
        let mut node = &self.root;
        for unit in key.units() {
            node = node.get_child(unit)?;
        }
        Some(node)
    }

    fn node_at_mut(&mut self, units: &[K::Unit]) -> Option<&mut Node<K::Unit, V>> {
        let mut node = &mut self.root;
        for &unit in units {
            node = node.get_child_mut(unit)?;
        }
        Some(node)
    }
}

impl<K: ?Sized + KeyUnits, V> Default for Trie<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ?Sized + KeyUnits, V: Clone> Clone for Trie<K, V> {
    fn clone(&self) -> Self {
        Trie {
            root: self.root.clone(),
            size: self.size,
            node_count: self.node_count,
            _key: PhantomData,
        }
    }
}

impl<K, V> fmt::Debug for Trie<K, V>
where
    K: ?Sized + KeyUnits,
    K::Owned: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// An iterator over the entries of a [`Trie`].
///
/// Created by [`Trie::iter`]. Yields owned keys rebuilt from the units along
/// each path, with references to the stored values.
pub struct Iter<'a, K: ?Sized + KeyUnits, V> {
    entries: Entries<'a, K, V>,
    remaining: usize,
}

impl<'a, K: ?Sized + KeyUnits, V> Iterator for Iter<'a, K, V> {
    type Item = (K::Owned, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.entries.next()?;
        self.remaining = self.remaining.saturating_sub(1);
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K: ?Sized + KeyUnits, V> ExactSizeIterator for Iter<'a, K, V> {}

impl<'a, K: ?Sized + KeyUnits, V> IntoIterator for &'a Trie<K, V> {
    type Item = (K::Owned, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
