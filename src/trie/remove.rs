//! Code to remove entries from the trie.

use log::trace;

use super::*;

impl<K, T> Trie<K, T>
where
    K: Key,
{
    /// Remove the payload stored for exactly `key` and hand it back. Removing an absent key is a
    /// no-op. Afterwards, nodes that no longer hold a payload and fork fewer than two subtrees are
    /// collapsed.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// trie.insert("217.72.192.0/20".parse()?, 'A');
    /// trie.insert("217.72.195.0/24".parse()?, 'B');
    /// assert_eq!(trie.remove(&"217.72.195.0/24".parse()?), Some('B'));
    /// assert_eq!(trie.remove(&"217.72.195.0/24".parse()?), None);
    /// assert_eq!(trie.search_best(&"217.72.195.42/32".parse()?), Some(&'A'));
    /// # Ok(())
    /// # }
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<T> {
        // the search path, as pairs of (parent, direction taken at the parent).
        let mut path: Vec<(usize, bool)> = Vec::new();
        let mut idx = 0;
        loop {
            match self.step(idx, key) {
                Step::Reached => break,
                Step::Enter { next, right } => {
                    path.push((idx, right));
                    idx = next;
                }
                Step::Missing => return None,
            }
        }
        let value = self.table[idx].value.take()?;
        self.collapse(idx, path);
        Some(value)
    }

    /// Remove the payload stored for exactly `key` and pass it to `releaser`. Returns `true` if
    /// the key was present (and the releaser was called once), or `false` if nothing was stored.
    ///
    /// ```
    /// # use netradix::*;
    /// # use ipnet::Ipv4Net;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut trie: Trie<Ipv4Net, _> = Trie::new();
    /// trie.insert("10.42.0.0/16".parse()?, "E".to_string());
    /// let mut released = Vec::new();
    /// assert!(trie.remove_with(&"10.42.0.0/16".parse()?, |s: String| released.push(s)));
    /// assert!(!trie.remove_with(&"10.42.0.0/16".parse()?, |s: String| released.push(s)));
    /// assert_eq!(released, vec!["E".to_string()]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn remove_with<R>(&mut self, key: &K, mut releaser: R) -> bool
    where
        R: Release<T>,
    {
        match self.remove(key) {
            Some(value) => {
                releaser.release(value);
                true
            }
            None => false,
        }
    }

    /// Collapse the tree upwards from `idx`, which just lost its payload. `path` holds the
    /// ancestors of `idx` together with the direction taken at each of them.
    ///
    /// A leaf is detached and its parent re-examined; a node with a single child is replaced by
    /// that child in its parent's slot, which leaves the parent's child count unchanged and ends
    /// the collapse. The root always stays in place.
    fn collapse(&mut self, mut idx: usize, mut path: Vec<(usize, bool)>) {
        while let Some((parent, right)) = path.pop() {
            let node = &self.table[idx];
            if node.value.is_some() {
                break;
            }
            match (node.left, node.right) {
                (Some(_), Some(_)) => break,
                (Some(child), None) | (None, Some(child)) => {
                    trace!("collapse: splice bit {} out", node.bit_index());
                    let child_right = node.right.is_some();
                    self.clear_child(idx, child_right);
                    self.set_child(parent, child, right);
                    self.free_node(idx);
                    idx = parent;
                    break;
                }
                (None, None) => {
                    trace!("collapse: detach leaf at bit {}", node.bit_index());
                    self.clear_child(parent, right);
                    self.free_node(idx);
                    idx = parent;
                }
            }
        }
        debug_assert!(
            self.is_settled(idx),
            "payload-less node with a single child survived the collapse"
        );
    }

    /// A node other than the root is settled if it holds a payload or forks two subtrees.
    fn is_settled(&self, idx: usize) -> bool {
        let node = &self.table[idx];
        idx == 0 || !node.is_glue() || node.num_children() == 2
    }
}
