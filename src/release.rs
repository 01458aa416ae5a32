//! Caller-supplied release of payloads.

/// Capability invoked once for every payload that leaves the trie through
/// [`Trie::remove_with`](crate::Trie::remove_with) or [`Trie::destroy`](crate::Trie::destroy).
/// Every `FnMut(T)` closure is a releaser.
///
/// ```
/// # use netradix::*;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut tree: NetRadixTree<String> = NetRadixTree::new();
/// tree.insert_str("10.42.0.0/16", "E".to_string())?;
/// tree.insert_str("2001:220::/35", "F".to_string())?;
///
/// let mut released = Vec::new();
/// tree.destroy(|payload: String| released.push(payload));
/// released.sort();
/// assert_eq!(released, vec!["E".to_string(), "F".to_string()]);
/// # Ok(())
/// # }
/// ```
pub trait Release<T> {
    /// Take ownership of a payload that is no longer stored in the trie.
    fn release(&mut self, payload: T);
}

impl<T, F> Release<T> for F
where
    F: FnMut(T),
{
    fn release(&mut self, payload: T) {
        self(payload)
    }
}
