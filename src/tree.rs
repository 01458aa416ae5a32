//! One trie per address family, behind a single handle.
//!
//! IPv4 and IPv6 prefixes never share nodes: every operation first splits the key by family and
//! then runs on the trie of that family.

use either::{Left, Right};
use ipnet::IpNet;
use log::debug;

use crate::{parse_prefix, FamilyKey, Release, Result, Trie};

macro_rules! fork {
    ($self:ident, $key:ident, $func:ident $(, $args:expr)*) => {
        match $key.split() {
            Left(k) => $self.v4.$func(k $(, $args)*),
            Right(k) => $self.v6.$func(k $(, $args)*),
        }
    };
}

macro_rules! fork_ref {
    ($self:ident, $key:ident, $func:ident $(, $args:expr)*) => {
        match $key.split_ref() {
            Left(k) => $self.v4.$func(k $(, $args)*),
            Right(k) => $self.v6.$func(k $(, $args)*),
        }
    };
}

/// Prefix tree over both address families, implemented as two separate tries.
#[derive(Clone)]
pub struct RadixTree<P, T>
where
    P: FamilyKey,
{
    /// Trie holding the IPv4 prefixes
    pub v4: Trie<P::V4, T>,
    /// Trie holding the IPv6 prefixes
    pub v6: Trie<P::V6, T>,
}

/// The tree used by the textual API, keyed by [`ipnet::IpNet`].
pub type NetRadixTree<T> = RadixTree<IpNet, T>;

impl<P, T> Default for RadixTree<P, T>
where
    P: FamilyKey,
{
    fn default() -> Self {
        Self {
            v4: Trie::new(),
            v6: Trie::new(),
        }
    }
}

impl<P: FamilyKey, T> RadixTree<P, T> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if neither family stores a payload.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }

    /// Insert a payload for `key` and return the payload it replaces, if any.
    ///
    /// ```
    /// # use netradix::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: NetRadixTree<_> = NetRadixTree::new();
    /// assert_eq!(tree.insert("10.42.0.0/16".parse()?, 1), None);
    /// assert_eq!(tree.insert("2001:220::/35".parse()?, 2), None);
    /// assert_eq!(tree.insert("10.42.0.0/16".parse()?, 3), Some(1));
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert(&mut self, key: P, value: T) -> Option<T> {
        fork!(self, key, insert, value)
    }

    /// Get the payload stored for exactly `key`.
    ///
    /// ```
    /// # use netradix::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: NetRadixTree<_> = NetRadixTree::new();
    /// tree.insert("2001:220::/35".parse()?, 'F');
    /// assert_eq!(tree.search_exact(&"2001:220::/35".parse()?), Some(&'F'));
    /// assert_eq!(tree.search_exact(&"2001:220::/128".parse()?), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_exact(&self, key: &P) -> Option<&T> {
        fork_ref!(self, key, search_exact)
    }

    /// Get a mutable reference to the payload stored for exactly `key`.
    pub fn search_exact_mut(&mut self, key: &P) -> Option<&mut T> {
        fork_ref!(self, key, search_exact_mut)
    }

    /// Check if `key` is stored with exactly this bit-length.
    pub fn contains_key(&self, key: &P) -> bool {
        fork_ref!(self, key, contains_key)
    }

    /// Get the payload of the longest stored prefix of the same family that covers `key`.
    ///
    /// ```
    /// # use netradix::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree: NetRadixTree<_> = NetRadixTree::new();
    /// tree.insert("0.0.0.0/0".parse()?, 'D');
    /// tree.insert("2001:220::/35".parse()?, 'F');
    /// assert_eq!(tree.search_best(&"2001:220::/128".parse()?), Some(&'F'));
    /// assert_eq!(tree.search_best(&"2001:db8::1/128".parse()?), None);
    /// assert_eq!(tree.search_best(&"15.161.13.75/32".parse()?), Some(&'D'));
    /// # Ok(())
    /// # }
    /// ```
    pub fn search_best(&self, key: &P) -> Option<&T> {
        fork_ref!(self, key, search_best)
    }

    /// Get the longest stored prefix that covers `key`, together with its payload.
    pub fn search_best_entry(&self, key: &P) -> Option<(P, &T)> {
        match key.split_ref() {
            Left(k) => self.v4.search_best_entry(k).map(|(k, t)| (P::from_v4(k), t)),
            Right(k) => self.v6.search_best_entry(k).map(|(k, t)| (P::from_v6(k), t)),
        }
    }

    /// Remove the payload stored for exactly `key` and hand it back. Removing an absent key is a
    /// no-op.
    pub fn remove(&mut self, key: &P) -> Option<T> {
        fork_ref!(self, key, remove)
    }

    /// Remove the payload stored for exactly `key` and pass it to `releaser`. Returns `true` if
    /// the key was present.
    pub fn remove_with<R>(&mut self, key: &P, releaser: R) -> bool
    where
        R: Release<T>,
    {
        fork_ref!(self, key, remove_with, releaser)
    }

    /// Tear down both tries, handing every stored payload to `releaser` exactly once.
    pub fn destroy<R>(mut self, mut releaser: R)
    where
        R: Release<T>,
    {
        let v4 = self.v4.release_all(&mut releaser);
        let v6 = self.v6.release_all(&mut releaser);
        debug!("tree destroyed, released {v4} IPv4 and {v6} IPv6 payloads");
    }
}

/// Textual API. Every function parses its argument with [`parse_prefix`]; a missing mask denotes
/// a host route.
impl<T> RadixTree<IpNet, T> {
    /// Parse `prefix` and insert `value` for it. Returns the payload it replaces, if any.
    ///
    /// ```
    /// # use netradix::*;
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut tree = NetRadixTree::new();
    /// tree.insert_str("172.16.2.2", "D")?;
    /// assert_eq!(tree.search_exact_str("172.16.2.2/32")?, Some(&"D"));
    /// assert!(tree.insert_str("172.16.2.2/33", "X").is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn insert_str(&mut self, prefix: &str, value: T) -> Result<Option<T>> {
        let key = parse(prefix)?;
        Ok(self.insert(key, value))
    }

    /// Parse `prefix` and look up its payload by exact match.
    pub fn search_exact_str(&self, prefix: &str) -> Result<Option<&T>> {
        let key = parse(prefix)?;
        Ok(self.search_exact(&key))
    }

    /// Parse `prefix` and look up the payload of the longest covering prefix.
    pub fn search_best_str(&self, prefix: &str) -> Result<Option<&T>> {
        let key = parse(prefix)?;
        Ok(self.search_best(&key))
    }

    /// Parse `prefix` and remove its payload, handing it back. Removing an absent prefix is not
    /// an error.
    pub fn remove_str(&mut self, prefix: &str) -> Result<Option<T>> {
        let key = parse(prefix)?;
        Ok(self.remove(&key))
    }
}

fn parse(prefix: &str) -> Result<IpNet> {
    parse_prefix(prefix).map_err(|e| {
        debug!("rejected prefix {prefix:?}: {e}");
        e
    })
}
