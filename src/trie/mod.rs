//! Single-family Patricia trie.

use log::{debug, trace};

use crate::{to_right, Key, Release};

mod node;
mod remove;

pub(crate) use node::{InsertStep, Node, Step};

/// Patricia trie over keys of a single family, mapping each stored prefix to a payload.
///
/// The nodes are kept in an arena and refer to their children by index, so no node ever points
/// back to its parent. Index 0 is the root: a structural anchor holding the zero-length key,
/// which only carries a payload if the zero-length prefix itself is inserted.
#[derive(Clone)]
pub struct Trie<K, T> {
    pub(crate) table: Vec<Node<K, T>>,
    free: Vec<usize>,
}

impl<K, T> Default for Trie<K, T>
where
    K: Key,
{
    fn default() -> Self {
        Self {
            table: vec![Node::new(K::zero(), None)],
            free: Vec::new(),
        }
    }
}

impl<K, T> Trie<K, T>
where
    K: Key,
{
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if no payload is stored in the trie.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// assert!(trie.is_empty());
    /// trie.insert("10.42.0.0/16".parse()?, 'E');
    /// assert!(!trie.is_empty());
    /// trie.remove(&"10.42.0.0/16".parse()?);
    /// assert!(trie.is_empty());
    /// # Ok(())
    /// # }
    /// ```
    pub fn is_empty(&self) -> bool {
        let root = &self.table[0];
        root.value.is_none() && root.left.is_none() && root.right.is_none()
    }

    /// Get the payload of a prefix by matching exactly on its bits and bit-length. A stored
    /// prefix that merely covers `key` does not match.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// trie.insert("217.72.195.0/24".parse()?, 'B');
    /// assert_eq!(trie.search_exact(&"217.72.195.0/24".parse()?), Some(&'B'));
    /// assert_eq!(trie.search_exact(&"217.72.195.42/32".parse()?), None);
    /// assert_eq!(trie.search_exact(&"217.72.194.0/23".parse()?), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_exact(&self, key: &K) -> Option<&T> {
        self.locate(key)
            .and_then(|idx| self.table[idx].value.as_ref())
    }

    /// Get a mutable reference to the payload of a prefix, matching exactly.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// let key = "10.42.0.0/16".parse()?;
    /// trie.insert(key, 1);
    /// *trie.search_exact_mut(&key).unwrap() += 1;
    /// assert_eq!(trie.search_exact(&key), Some(&2));
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_exact_mut(&mut self, key: &K) -> Option<&mut T> {
        let idx = self.locate(key)?;
        self.table[idx].value.as_mut()
    }

    /// Check if a prefix is stored with exactly this bit-length.
    pub fn contains_key(&self, key: &K) -> bool {
        self.search_exact(key).is_some()
    }

    /// Get the payload of the longest stored prefix that covers `key`.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// trie.insert("217.72.192.0/20".parse()?, 'A');
    /// trie.insert("217.72.195.0/24".parse()?, 'B');
    /// assert_eq!(trie.search_best(&"217.72.195.42/32".parse()?), Some(&'B'));
    /// assert_eq!(trie.search_best(&"217.72.192.1/32".parse()?), Some(&'A'));
    /// assert_eq!(trie.search_best(&"217.72.195.0/23".parse()?), Some(&'A'));
    /// assert_eq!(trie.search_best(&"217.72.0.0/16".parse()?), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_best(&self, key: &K) -> Option<&T> {
        self.search_best_entry(key).map(|(_, v)| v)
    }

    /// Get the longest stored prefix that covers `key`, together with its payload.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// trie.insert("10.42.0.0/16".parse()?, 'E');
    /// assert_eq!(
    ///     trie.search_best_entry(&"10.42.1.8/32".parse()?),
    ///     Some((&"10.42.0.0/16".parse()?, &'E'))
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_best_entry<'a>(&'a self, key: &K) -> Option<(&'a K, &'a T)> {
        let mut idx = 0;
        let mut best: Option<(&K, &T)> = None;
        loop {
            // every visited node covers `key`; deeper ones are more specific.
            best = self.table[idx].key_value().or(best);
            match self.step(idx, key) {
                Step::Enter { next, .. } => idx = next,
                Step::Reached | Step::Missing => return best,
            }
        }
    }

    /// Insert a payload for `key`. If the identical prefix is stored already, its payload is
    /// replaced and the old one is handed back; the trie never releases it.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// assert_eq!(trie.insert("10.42.0.0/16".parse()?, 1), None);
    /// assert_eq!(trie.insert("10.42.0.0/24".parse()?, 2), None);
    /// assert_eq!(trie.insert("10.42.0.0/16".parse()?, 3), Some(1));
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, key: K, value: T) -> Option<T> {
        let mut idx = 0;
        loop {
            match self.insert_step(idx, &key) {
                InsertStep::Enter { next } => idx = next,
                InsertStep::Reached => {
                    trace!("insert /{}: overwrite", key.bit_len());
                    return self.table[idx].value.replace(value);
                }
                InsertStep::Extend { right } => {
                    trace!(
                        "insert /{}: extend below bit {}",
                        key.bit_len(),
                        self.table[idx].bit_index()
                    );
                    let new = self.new_node(key, Some(value));
                    self.set_child(idx, new, right);
                    return None;
                }
                InsertStep::ForkAtKey { right, child_right } => {
                    trace!("insert /{}: fork at the new key", key.bit_len());
                    let new = self.new_node(key, Some(value));
                    let child = self.set_child(idx, new, right);
                    debug_assert!(child.is_some(), "forked an empty slot");
                    if let Some(child) = child {
                        self.set_child(new, child, child_right);
                    }
                    return None;
                }
                InsertStep::ForkWithGlue {
                    glue_key,
                    right,
                    key_right,
                } => {
                    trace!(
                        "insert /{}: fork with glue at bit {}",
                        key.bit_len(),
                        glue_key.bit_len()
                    );
                    let glue = self.new_node(glue_key, None);
                    let new = self.new_node(key, Some(value));
                    let child = self.set_child(idx, glue, right);
                    debug_assert!(child.is_some(), "forked an empty slot");
                    self.set_child(glue, new, key_right);
                    if let Some(child) = child {
                        self.set_child(glue, child, !key_right);
                    }
                    return None;
                }
            }
        }
    }

    /// Tear down the trie, handing every stored payload to `releaser` exactly once. The trie is
    /// consumed and cannot be used afterwards.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv6Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv6Net, _> = Trie::new();
    /// trie.insert("2001:220::/35".parse()?, 6);
    /// trie.insert("2001:220::/48".parse()?, 7);
    /// let mut sum = 0;
    /// trie.destroy(|v: i32| sum += v);
    /// assert_eq!(sum, 13);
    /// # Ok(())
    /// # }
    /// ```
    pub fn destroy<R>(mut self, mut releaser: R)
    where
        R: Release<T>,
    {
        let released = self.release_all(&mut releaser);
        debug!("trie destroyed, released {released} payloads");
    }
}

/// Private function implementations
impl<K, T> Trie<K, T>
where
    K: Key,
{
    /// Walk the whole tree with an explicit stack, hand every payload to `releaser` and reset the
    /// trie to the bare root. Returns the number of released payloads.
    pub(crate) fn release_all<R>(&mut self, releaser: &mut R) -> usize
    where
        R: Release<T>,
    {
        let mut released = 0;
        let mut stack = vec![0];
        while let Some(idx) = stack.pop() {
            let node = &mut self.table[idx];
            if let Some(value) = node.value.take() {
                releaser.release(value);
                released += 1;
            }
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.table.truncate(1);
        self.free.clear();
        released
    }

    /// Descend from the root and return the index of the node with the identical key, which may
    /// be a glue node.
    pub(crate) fn locate(&self, key: &K) -> Option<usize> {
        let mut idx = 0;
        loop {
            match self.step(idx, key) {
                Step::Reached => return Some(idx),
                Step::Enter { next, .. } => idx = next,
                Step::Missing => return None,
            }
        }
    }

    #[inline(always)]
    fn get_child(&self, idx: usize, right: bool) -> Option<usize> {
        self.table[idx].child(right)
    }

    /// set the child of a node (either to the left or the right), and return the index of the old child.
    #[inline(always)]
    pub(crate) fn set_child(&mut self, idx: usize, child: usize, right: bool) -> Option<usize> {
        if right {
            self.table[idx].right.replace(child)
        } else {
            self.table[idx].left.replace(child)
        }
    }

    /// remove a child from a node (just the reference).
    #[inline(always)]
    pub(crate) fn clear_child(&mut self, idx: usize, right: bool) -> Option<usize> {
        if right {
            self.table[idx].right.take()
        } else {
            self.table[idx].left.take()
        }
    }

    /// insert a new node into the table and return its index. Slots freed by deletion are
    /// reused first.
    #[inline(always)]
    fn new_node(&mut self, key: K, value: Option<T>) -> usize {
        if let Some(idx) = self.free.pop() {
            self.table[idx] = Node::new(key, value);
            idx
        } else {
            self.table.push(Node::new(key, value));
            self.table.len() - 1
        }
    }

    /// Return an unlinked node to the free list.
    pub(crate) fn free_node(&mut self, idx: usize) {
        debug_assert_ne!(idx, 0, "the root is never freed");
        let node = &mut self.table[idx];
        debug_assert!(node.value.is_none() && node.num_children() == 0);
        node.left = None;
        node.right = None;
        self.free.push(idx);
    }

    /// Which way to go from `cur` to find `key`.
    #[inline(always)]
    pub(crate) fn step(&self, cur: usize, key: &K) -> Step {
        let cur_k = &self.table[cur].key;
        if cur_k.identical(key) {
            Step::Reached
        } else {
            let right = to_right(cur_k, key);
            match self.get_child(cur, right) {
                Some(child) if self.table[child].key.contains(key) => {
                    Step::Enter { next: child, right }
                }
                _ => Step::Missing,
            }
        }
    }

    /// Walk the reachable tree and check that every child is covered by its parent, sits on
    /// the side given by the parent's branch bit, and that every non-root glue node forks two
    /// subtrees. Unreachable slots must all be on the free list.
    #[cfg(test)]
    pub(crate) fn well_formed(&self) -> bool {
        let mut reachable = 0;
        let mut stack = vec![0];
        while let Some(idx) = stack.pop() {
            reachable += 1;
            let node = &self.table[idx];
            if idx != 0 && node.is_glue() && node.num_children() != 2 {
                return false;
            }
            for right in [false, true] {
                if let Some(child) = node.child(right) {
                    let child_k = &self.table[child].key;
                    if !node.key.contains(child_k)
                        || child_k.bit_len() <= node.bit_index()
                        || to_right(&node.key, child_k) != right
                    {
                        return false;
                    }
                    stack.push(child);
                }
            }
        }
        reachable + self.free.len() == self.table.len()
    }

    /// Which way to go from `cur` to insert `key`, and how to attach it once we get there.
    #[inline(always)]
    fn insert_step(&self, cur: usize, key: &K) -> InsertStep<K> {
        let cur_k = &self.table[cur].key;
        if cur_k.identical(key) {
            InsertStep::Reached
        } else {
            let right = to_right(cur_k, key);
            if let Some(child) = self.get_child(cur, right) {
                let child_k = &self.table[child].key;
                if child_k.contains(key) {
                    InsertStep::Enter { next: child }
                } else if key.contains(child_k) {
                    InsertStep::ForkAtKey {
                        right,
                        child_right: to_right(key, child_k),
                    }
                } else {
                    let glue_key = key.longest_common_prefix(child_k);
                    let key_right = to_right(&glue_key, key);
                    InsertStep::ForkWithGlue {
                        glue_key,
                        right,
                        key_right,
                    }
                }
            } else {
                InsertStep::Extend { right }
            }
        }
    }
}
