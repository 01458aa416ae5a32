//! Trie vertices and the descent steps computed from them.

use crate::Key;

/// A vertex of the trie. Nodes live in the arena of their [`Trie`](super::Trie) and refer to
/// their children by index. A node without a value is a glue node that only forks two subtrees.
#[derive(Clone)]
pub(crate) struct Node<K, T> {
    pub(crate) key: K,
    pub(crate) value: Option<T>,
    pub(crate) left: Option<usize>,
    pub(crate) right: Option<usize>,
}

impl<K, T> Node<K, T> {
    pub(crate) fn new(key: K, value: Option<T>) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }

    /// get the tuple of key and value.
    pub(crate) fn key_value(&self) -> Option<(&K, &T)> {
        self.value.as_ref().map(|v| (&self.key, v))
    }

    #[inline(always)]
    pub(crate) fn child(&self, right: bool) -> Option<usize> {
        if right {
            self.right
        } else {
            self.left
        }
    }

    pub(crate) fn is_glue(&self) -> bool {
        self.value.is_none()
    }

    pub(crate) fn num_children(&self) -> usize {
        self.left.is_some() as usize + self.right.is_some() as usize
    }
}

impl<K: Key, T> Node<K, T> {
    /// Bit position at which the children of this node branch off. This is the bit-length of
    /// the node's key, both for real and for glue nodes.
    #[inline(always)]
    pub(crate) fn bit_index(&self) -> u8 {
        self.key.bit_len()
    }
}

/// One step of a lookup descent.
pub(crate) enum Step {
    /// The current node holds the key we look for.
    Reached,
    /// Enter the child and continue the descent.
    Enter { next: usize, right: bool },
    /// The key is not stored below the current node.
    Missing,
}

/// One step of an insertion descent.
pub(crate) enum InsertStep<K> {
    /// The current node holds the key already; overwrite its value.
    Reached,
    /// Enter the child and continue the descent.
    Enter { next: usize },
    /// The child slot is empty. Attach the new node there.
    Extend { right: bool },
    /// The new key covers the child in slot `right`. The new node takes the slot and adopts the
    /// old child at `child_right`, acting as its own branch point.
    ForkAtKey { right: bool, child_right: bool },
    /// The new key and the child in slot `right` diverge before either ends. A glue node with key
    /// `glue_key` takes the slot; the new node goes to its `key_right` side and the old child to
    /// the other one.
    ForkWithGlue {
        glue_key: K,
        right: bool,
        key_right: bool,
    },
}
