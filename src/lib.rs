//! This crate provides a Patricia trie (a path-compressed binary radix tree) for IP prefixes. It
//! stores a payload per prefix and answers two kinds of lookups: exact match on the prefix and its
//! bit-length, and longest-prefix match. IPv4 and IPv6 live in separate tries, so a prefix of one
//! family never matches a query of the other.
//!
//! Keys are taken from [ipnet](https://docs.rs/ipnet), and optionally from
//! [ipnetwork](https://crates.io/crates/ipnetwork) (feature `ipnetwork`) or
//! [cidr](https://crates.io/crates/cidr) (feature `cidr`). Any tuple `(R, u8)` where `R` is an
//! unsigned primitive integer works as a single-family key as well.
//!
//! ```
//! # use netradix::*;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut tree = NetRadixTree::new();
//! tree.insert_str("217.72.192.0/20", "A")?;
//! tree.insert_str("217.72.195.0/24", "B")?;
//! tree.insert_str("2001:220::/35", "F")?;
//!
//! assert_eq!(tree.search_best_str("217.72.195.42")?, Some(&"B"));
//! assert_eq!(tree.search_best_str("217.72.192.1")?, Some(&"A"));
//! assert_eq!(tree.search_exact_str("217.72.195.42")?, None);
//! assert_eq!(tree.search_best_str("2001:220::")?, Some(&"F"));
//! assert_eq!(tree.remove_str("217.72.195.0/24")?, Some("B"));
//! assert_eq!(tree.search_best_str("217.72.195.42")?, Some(&"A"));
//! # Ok(())
//! # }
//! ```
//!
//! # Description of the Tree
//!
//! Each node consists of a prefix, a container for a potential payload (`Option`), and two
//! optional children. To descend, we look at the most significant bit that is **not** part of the
//! node's prefix: if it is not set we take the left branch, otherwise the right one. A node
//! without a payload is a *glue* node; it only exists to fork two subtrees whose prefixes diverge
//! below it.
//!
//! The nodes are stored in an arena and refer to each other by index. The root is a permanent
//! anchor holding the zero-length prefix.
//!
//! # Operations on the tree
//!
//! The following are the computational complexities of the functions, where `w` is the bit-width
//! of the address family.
//!
//! | Operation                                  | Complexity |
//! |--------------------------------------------|------------|
//! | `insert`                                   | `O(w)`     |
//! | `search_exact`, `search_best`              | `O(w)`     |
//! | `remove`, `remove_with`                    | `O(w)`     |
//! | `destroy` (calling the releaser on `T`)    | `O(n)`     |
//! | `is_empty`                                 | `O(1)`     |
//!
//! [`Trie::remove`] never leaves a node behind that holds no payload and forks fewer than two
//! subtrees: such nodes are collapsed on the way up. A node that still forks two subtrees keeps
//! its prefix and turns into a glue node.

#![allow(clippy::collapsible_else_if)]
#![deny(missing_docs)]

mod error;
mod family;
mod fmt;
mod key;
mod parse;
mod release;
#[cfg(test)]
mod fuzzing;

pub mod trie;
pub mod tree;

pub use error::{Error, Result};
pub use family::{Family, FamilyKey};
pub use key::Key;
pub use parse::parse_prefix;
pub use release::Release;
pub use tree::{NetRadixTree, RadixTree};
pub use trie::Trie;

#[inline(always)]
pub(crate) fn to_right<K: Key>(branch: &K, child: &K) -> bool {
    child.is_bit_set(branch.bit_len())
}
