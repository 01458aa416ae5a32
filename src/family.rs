//! Address families and keys that carry their family with them.

use std::fmt;
use std::net::IpAddr;

use either::Either;

use crate::Key;

/// The address family of a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Family {
    /// 32-bit addresses
    Ipv4,
    /// 128-bit addresses
    Ipv6,
}

impl Family {
    /// The family of an address.
    pub fn of(addr: &IpAddr) -> Self {
        match addr {
            IpAddr::V4(_) => Family::Ipv4,
            IpAddr::V6(_) => Family::Ipv6,
        }
    }

    /// Maximal bit-length of a prefix in this family.
    pub fn max_bits(self) -> u8 {
        match self {
            Family::Ipv4 => 32,
            Family::Ipv6 => 128,
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Ipv4 => f.write_str("IPv4"),
            Family::Ipv6 => f.write_str("IPv6"),
        }
    }
}

/// A key that is either an IPv4 or an IPv6 prefix, for instance [`ipnet::IpNet`]. The
/// [`RadixTree`](crate::RadixTree) uses it to pick the trie of the right family.
pub trait FamilyKey {
    /// Key type of the IPv4 family.
    type V4: Key + Clone;
    /// Key type of the IPv6 family.
    type V6: Key + Clone;

    /// Get either `Left(V4)` or `Right(V6)`.
    fn split(self) -> Either<Self::V4, Self::V6>;

    /// Get either `Left(V4)` or `Right(V6)`, as a reference.
    fn split_ref(&self) -> Either<&Self::V4, &Self::V6>;

    /// Construct a key from a reference to the IPv4 variant.
    fn from_v4(k: &Self::V4) -> Self;

    /// Construct a key from a reference to the IPv6 variant.
    fn from_v6(k: &Self::V6) -> Self;

    /// The family of this key.
    fn family(&self) -> Family {
        match self.split_ref() {
            Either::Left(_) => Family::Ipv4,
            Either::Right(_) => Family::Ipv6,
        }
    }
}

impl FamilyKey for ipnet::IpNet {
    type V4 = ipnet::Ipv4Net;
    type V6 = ipnet::Ipv6Net;

    fn split(self) -> Either<ipnet::Ipv4Net, ipnet::Ipv6Net> {
        match self {
            ipnet::IpNet::V4(k) => Either::Left(k),
            ipnet::IpNet::V6(k) => Either::Right(k),
        }
    }

    fn split_ref(&self) -> Either<&ipnet::Ipv4Net, &ipnet::Ipv6Net> {
        match self {
            ipnet::IpNet::V4(k) => Either::Left(k),
            ipnet::IpNet::V6(k) => Either::Right(k),
        }
    }

    fn from_v4(k: &ipnet::Ipv4Net) -> Self {
        ipnet::IpNet::V4(*k)
    }

    fn from_v6(k: &ipnet::Ipv6Net) -> Self {
        ipnet::IpNet::V6(*k)
    }
}

#[cfg(feature = "ipnetwork")]
impl FamilyKey for ipnetwork::IpNetwork {
    type V4 = ipnetwork::Ipv4Network;
    type V6 = ipnetwork::Ipv6Network;

    fn split(self) -> Either<ipnetwork::Ipv4Network, ipnetwork::Ipv6Network> {
        match self {
            ipnetwork::IpNetwork::V4(k) => Either::Left(k),
            ipnetwork::IpNetwork::V6(k) => Either::Right(k),
        }
    }

    fn split_ref(&self) -> Either<&ipnetwork::Ipv4Network, &ipnetwork::Ipv6Network> {
        match self {
            ipnetwork::IpNetwork::V4(k) => Either::Left(k),
            ipnetwork::IpNetwork::V6(k) => Either::Right(k),
        }
    }

    fn from_v4(k: &ipnetwork::Ipv4Network) -> Self {
        ipnetwork::IpNetwork::V4(*k)
    }

    fn from_v6(k: &ipnetwork::Ipv6Network) -> Self {
        ipnetwork::IpNetwork::V6(*k)
    }
}

#[cfg(feature = "cidr")]
impl FamilyKey for cidr::IpCidr {
    type V4 = cidr::Ipv4Cidr;
    type V6 = cidr::Ipv6Cidr;

    fn split(self) -> Either<cidr::Ipv4Cidr, cidr::Ipv6Cidr> {
        match self {
            cidr::IpCidr::V4(k) => Either::Left(k),
            cidr::IpCidr::V6(k) => Either::Right(k),
        }
    }

    fn split_ref(&self) -> Either<&cidr::Ipv4Cidr, &cidr::Ipv6Cidr> {
        match self {
            cidr::IpCidr::V4(k) => Either::Left(k),
            cidr::IpCidr::V6(k) => Either::Right(k),
        }
    }

    fn from_v4(k: &cidr::Ipv4Cidr) -> Self {
        cidr::IpCidr::V4(*k)
    }

    fn from_v6(k: &cidr::Ipv6Cidr) -> Self {
        cidr::IpCidr::V6(*k)
    }
}
