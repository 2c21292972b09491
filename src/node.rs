//! Node implementation for the prefix tree.
//!
//! Each `Node` labels one edge of the trie with a key unit and keeps its
//! children as a singly-linked list: the node owns the head of the list through
//! `first_child`, and every child owns the rest of the chain through
//! `next_sibling`. Children are appended at the tail, so the chain order is the
//! insertion order and enumeration follows it.

use std::fmt;
use std::marker::PhantomData;

use crate::key_units::KeyUnits;
use crate::TrieError;

type Link<U, V> = Option<Box<Node<U, V>>>;

/// A single position in the key space.
///
/// Read access is public so the tree shape can be inspected through
/// [`Trie::root`](crate::Trie::root). Mutation goes through the `Trie`, which
/// keeps the size and node bookkeeping consistent.
pub struct Node<U, V> {
    /// The unit labelling the edge from the parent, `None` only for the root
    item: Option<U>,

    /// The value of the key that ends here, if any
    value: Option<V>,

    first_child: Link<U, V>,

    next_sibling: Link<U, V>,
}

impl<U, V> Node<U, V> {
    /// Creates the unlabelled root node.
    pub(crate) fn root() -> Self {
        Node {
            item: None,
            value: None,
            first_child: None,
            next_sibling: None,
        }
    }

    fn with_item(item: U) -> Self {
        Node {
            item: Some(item),
            value: None,
            first_child: None,
            next_sibling: None,
        }
    }

    /// Returns the value stored at this node, if a key ends here.
    pub fn value(&self) -> Option<&V> {
        self.value.as_ref()
    }

    pub(crate) fn value_mut(&mut self) -> Option<&mut V> {
        self.value.as_mut()
    }

    /// Returns whether a key ends at this node.
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// Stores a value, returning the one it replaces.
    pub(crate) fn set_value(&mut self, value: V) -> Option<V> {
        self.value.replace(value)
    }

    pub(crate) fn take_value(&mut self) -> Option<V> {
        self.value.take()
    }

    /// Returns whether this node has at least one child. O(1).
    pub fn has_children(&self) -> bool {
        self.first_child.is_some()
    }

    /// Iterates the children in chain order.
    pub fn children(&self) -> Children<'_, U, V> {
        Children {
            next: self.first_child.as_deref(),
        }
    }

    /// Materializes the child chain in insertion order.
    pub fn get_children(&self) -> Vec<&Self> {
        self.children().collect()
    }
}

impl<U: Copy + Eq, V> Node<U, V> {
    /// Returns the unit labelling the edge into this node.
    pub fn item(&self) -> Option<U> {
        self.item
    }

    /// Finds the child reached through `item` by scanning the sibling chain.
    pub fn get_child(&self, item: U) -> Option<&Self> {
        self.children().find(|child| child.item == Some(item))
    }

    pub(crate) fn get_child_mut(&mut self, item: U) -> Option<&mut Self> {
        let mut child = self.first_child.as_deref_mut();
        while let Some(node) = child {
            if node.item == Some(item) {
                return Some(node);
            }
            child = node.next_sibling.as_deref_mut();
        }
        None
    }

    /// Appends a valueless child labelled `item` to the end of the chain.
    ///
    /// No duplicate check is made: callers look the unit up with
    /// [`get_child`](Self::get_child) first, otherwise two edges with the same
    /// label end up in the chain.
    pub(crate) fn create_child(&mut self, item: U) -> &mut Self {
        let mut link = &mut self.first_child;
        while let Some(node) = link {
            link = &mut node.next_sibling;
        }
        link.insert(Box::new(Node::with_item(item)))
    }

    /// Unlinks the first child labelled `item` and returns it detached from
    /// the chain.
    ///
    /// The removed subtree is not inspected. Callers only unlink children that
    /// hold no value and have no children of their own. Anything below a
    /// removed child is dropped with it.
    pub(crate) fn remove_child(&mut self, item: U) -> Result<Box<Self>, TrieError> {
        let position = self
            .children()
            .position(|child| child.item == Some(item))
            .ok_or(TrieError::ChildNotFound)?;

        let mut link = &mut self.first_child;
        for _ in 0..position {
            match link {
                Some(node) => link = &mut node.next_sibling,
                None => return Err(TrieError::ChildNotFound),
            }
        }

        let mut removed = link.take().ok_or(TrieError::ChildNotFound)?;
        *link = removed.next_sibling.take();
        Ok(removed)
    }

    /// Lazily yields `(key, value)` for this node and every descendant that
    /// holds a value.
    ///
    /// `prefix` holds the units leading to this node's parent. A node is
    /// yielded before its children, and children are visited depth-first in
    /// chain order. Each call starts a fresh traversal.
    pub fn produce_entries<K>(&self, prefix: &[U]) -> Entries<'_, K, V>
    where
        K: ?Sized + KeyUnits<Unit = U>,
    {
        Entries {
            start: Some(self),
            stack: Vec::new(),
            units: prefix.to_vec(),
            _key: PhantomData,
        }
    }
}

impl<U, V> Drop for Node<U, V> {
    // Nodes are detached onto a heap stack before they drop, so neither key
    // length nor fan-out turns into recursion depth.
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<U, V>>> = Vec::new();
        pending.extend(self.first_child.take());
        pending.extend(self.next_sibling.take());

        while let Some(mut node) = pending.pop() {
            pending.extend(node.first_child.take());
            pending.extend(node.next_sibling.take());
        }
    }
}

impl<U: Clone, V: Clone> Node<U, V> {
    fn shallow_copy(&self) -> Self {
        Node {
            item: self.item.clone(),
            value: self.value.clone(),
            first_child: None,
            next_sibling: None,
        }
    }
}

/// Copies the node and its whole subtree. The copy is detached: siblings
/// following `self` in its parent's chain are not copied.
impl<U: Clone, V: Clone> Clone for Node<U, V> {
    fn clone(&self) -> Self {
        // Pre-order copies of every descendant, each with the index of its
        // parent (0 for `self`, i + 1 for `copies[i]`).
        let mut copies: Vec<(usize, Option<Box<Node<U, V>>>)> = Vec::new();
        let mut pending: Vec<(&Node<U, V>, usize)> = Vec::new();
        pending.extend(self.first_child.as_deref().map(|child| (child, 0)));

        while let Some((node, parent)) = pending.pop() {
            copies.push((parent, Some(Box::new(node.shallow_copy()))));
            let index = copies.len();
            pending.extend(node.next_sibling.as_deref().map(|sibling| (sibling, parent)));
            pending.extend(node.first_child.as_deref().map(|child| (child, index)));
        }

        // Children come after their parent and later siblings after earlier
        // ones, so linking back to front prepends each chain in order.
        let mut root = self.shallow_copy();
        for i in (0..copies.len()).rev() {
            let (parent, node) = &mut copies[i];
            let parent = *parent;
            let mut node = match node.take() {
                Some(node) => node,
                None => continue,
            };

            let target = if parent == 0 {
                &mut root
            } else {
                match copies[parent - 1].1.as_deref_mut() {
                    Some(target) => target,
                    None => continue,
                }
            };
            node.next_sibling = target.first_child.take();
            target.first_child = Some(node);
        }

        root
    }
}

impl<U: fmt::Debug, V: fmt::Debug> fmt::Debug for Node<U, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("item", &self.item)
            .field("value", &self.value)
            .field(
                "children",
                &self.children().map(|child| &child.item).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Iterator over the children of a node, in chain order.
pub struct Children<'a, U, V> {
    next: Option<&'a Node<U, V>>,
}

impl<'a, U, V> Iterator for Children<'a, U, V> {
    type Item = &'a Node<U, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        self.next = node.next_sibling.as_deref();
        Some(node)
    }
}

/// Depth-first iterator over the entries below a node.
///
/// Created by [`Node::produce_entries`].
pub struct Entries<'a, K: ?Sized + KeyUnits, V> {
    /// The node the traversal starts from; its own siblings are not visited
    start: Option<&'a Node<K::Unit, V>>,

    /// Nodes still to visit, with the prefix length leading to their parent
    stack: Vec<(&'a Node<K::Unit, V>, usize)>,

    /// Units of the key being built
    units: Vec<K::Unit>,

    _key: PhantomData<fn(&K)>,
}

impl<'a, K: ?Sized + KeyUnits, V> Entries<'a, K, V> {
    /// Moves onto `node` and schedules what follows it. Returns its value.
    fn visit(
        &mut self,
        node: &'a Node<K::Unit, V>,
        depth: usize,
        siblings: bool,
    ) -> Option<&'a V> {
        self.units.truncate(depth);
        if let Some(item) = node.item {
            self.units.push(item);
        }

        // The sibling goes underneath the first child so the whole child
        // subtree is drained before it.
        if siblings {
            if let Some(sibling) = node.next_sibling.as_deref() {
                self.stack.push((sibling, depth));
            }
        }
        if let Some(child) = node.first_child.as_deref() {
            self.stack.push((child, self.units.len()));
        }

        node.value.as_ref()
    }
}

impl<'a, K: ?Sized + KeyUnits, V> Iterator for Entries<'a, K, V> {
    type Item = (K::Owned, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(start) = self.start.take() {
            let depth = self.units.len();
            if let Some(value) = self.visit(start, depth, false) {
                return Some((K::from_units(&self.units), value));
            }
        }

        while let Some((node, depth)) = self.stack.pop() {
            if let Some(value) = self.visit(node, depth, true) {
                return Some((K::from_units(&self.units), value));
            }
        }

        None
    }
}
