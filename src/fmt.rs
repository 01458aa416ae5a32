//! Formatting implementation for the trie and the per-family tree.

use std::fmt::{Debug, Formatter, Result};

use crate::{FamilyKey, RadixTree, Trie};

impl<K: Debug, T: Debug> Debug for Trie<K, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        DebugTrie(self, 0).fmt(f)
    }
}

/// Renders the subtree at a node as nested maps, glue nodes without a value.
struct DebugTrie<'a, K, T>(&'a Trie<K, T>, usize);

impl<K: Debug, T: Debug> Debug for DebugTrie<'_, K, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let trie = self.0;
        let node = &trie.table[self.1];
        match (node.value.as_ref(), node.left, node.right) {
            (None, None, None) => node.key.fmt(f),
            (None, None, Some(child)) | (None, Some(child), None) => f
                .debug_map()
                .entry(&node.key, &Self(trie, child))
                .finish(),
            (None, Some(left), Some(right)) => f
                .debug_map()
                .entry(&node.key, &(Self(trie, left), Self(trie, right)))
                .finish(),
            (Some(v), None, None) => f.debug_map().entry(&node.key, v).finish(),
            (Some(v), None, Some(child)) | (Some(v), Some(child), None) => f
                .debug_map()
                .entry(&node.key, &(v, Self(trie, child)))
                .finish(),
            (Some(v), Some(left), Some(right)) => f
                .debug_map()
                .entry(&node.key, &(v, Self(trie, left), Self(trie, right)))
                .finish(),
        }
    }
}

impl<P, T> Debug for RadixTree<P, T>
where
    P: FamilyKey,
    P::V4: Debug,
    P::V6: Debug,
    T: Debug,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.debug_struct("RadixTree")
            .field("v4", &self.v4)
            .field("v6", &self.v6)
            .finish()
    }
}
