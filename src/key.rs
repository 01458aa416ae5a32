//! Bit-level view of a network prefix, as consumed by the trie.

use ipnet::{Ipv4Net, Ipv6Net};
#[cfg(feature = "ipnetwork")]
use ipnetwork::{Ipv4Network, Ipv6Network};
use num_traits::{CheckedShr, PrimInt, Unsigned, Zero};

/// A normalized prefix key: the address bits together with the number of leading bits that are
/// significant. Bits are indexed from the most significant one (bit 0) onwards.
pub trait Key: Sized {
    /// Integer holding the address bits. This must be one of `u8`, `u16`, `u32`, `u64`, or
    /// `u128`. Its width is the maximal bit-length of the key.
    type R: Unsigned + PrimInt + Zero + CheckedShr;

    /// Raw address bits, ignoring the bit-length. Bits beyond the bit-length may be set; all
    /// comparisons go through [`Key::mask`].
    fn repr(&self) -> Self::R;

    /// Number of significant leading bits.
    fn bit_len(&self) -> u8;

    /// Create a new key from the address bits and the bit-length.
    fn from_repr_len(repr: Self::R, len: u8) -> Self;

    /// Largest bit-length a key of this type can have (32 for IPv4, 128 for IPv6).
    fn max_bits() -> u8 {
        Self::R::zero().count_zeros() as u8
    }

    /// `self.repr()` with every bit beyond `self.bit_len()` cleared. If you can guarantee that
    /// `repr` is already masked, simply re-implement this function for your type.
    fn mask(&self) -> Self::R {
        self.repr() & mask_from_len(self.bit_len())
    }

    /// The zero-length key that covers everything.
    fn zero() -> Self {
        Self::from_repr_len(Self::R::zero(), 0)
    }

    /// Length of the longest common prefix of `self` and `other`, i.e., the first bit position at
    /// which they differ, bounded by both bit-lengths.
    fn common_prefix_len(&self, other: &Self) -> u8 {
        ((self.mask() ^ other.mask()).leading_zeros() as u8)
            .min(self.bit_len())
            .min(other.bit_len())
    }

    /// The longest common prefix of `self` and `other`, with all remaining bits cleared.
    fn longest_common_prefix(&self, other: &Self) -> Self {
        let len = self.common_prefix_len(other);
        Self::from_repr_len(self.mask() & mask_from_len(len), len)
    }

    /// Check if `self` covers `other`, that is, `other` is at least as long and agrees with
    /// `self` on the first `self.bit_len()` bits. Returns `true` if both are identical.
    fn contains(&self, other: &Self) -> bool {
        if self.bit_len() > other.bit_len() {
            return false;
        }
        other.repr() & mask_from_len(self.bit_len()) == self.mask()
    }

    /// Check if a specific bit is set (counted from the left, where 0 is the first bit from the
    /// left). Bits beyond the bit-length always read as unset.
    fn is_bit_set(&self, bit: u8) -> bool {
        let mask = (!Self::R::zero())
            .checked_shr(bit as u32)
            .unwrap_or_else(Self::R::zero)
            ^ (!Self::R::zero())
                .checked_shr(1u32 + bit as u32)
                .unwrap_or_else(Self::R::zero);
        mask & self.mask() != Self::R::zero()
    }

    /// Two keys are identical iff they have the same bit-length and agree on all of those bits.
    fn identical(&self, other: &Self) -> bool {
        self.mask() == other.mask() && self.bit_len() == other.bit_len()
    }
}

pub(crate) fn mask_from_len<R>(len: u8) -> R
where
    R: PrimInt + Zero,
{
    if len as u32 >= R::zero().count_zeros() {
        !R::zero()
    } else if len == 0 {
        R::zero()
    } else {
        !((!R::zero()) >> len as usize)
    }
}

impl Key for Ipv4Net {
    type R = u32;

    fn repr(&self) -> u32 {
        self.addr().into()
    }

    fn bit_len(&self) -> u8 {
        self.prefix_len()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        Ipv4Net::new(repr.into(), len.min(32)).unwrap_or_default()
    }

    fn mask(&self) -> u32 {
        self.network().into()
    }

    fn zero() -> Self {
        Default::default()
    }

    fn identical(&self, other: &Self) -> bool {
        self.trunc() == other.trunc()
    }
}

impl Key for Ipv6Net {
    type R = u128;

    fn repr(&self) -> u128 {
        self.addr().into()
    }

    fn bit_len(&self) -> u8 {
        self.prefix_len()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        Ipv6Net::new(repr.into(), len.min(128)).unwrap_or_default()
    }

    fn mask(&self) -> u128 {
        self.network().into()
    }

    fn zero() -> Self {
        Default::default()
    }

    fn identical(&self, other: &Self) -> bool {
        self.trunc() == other.trunc()
    }
}

#[cfg(feature = "ipnetwork")]
impl Key for Ipv4Network {
    type R = u32;

    fn repr(&self) -> u32 {
        self.ip().into()
    }

    fn bit_len(&self) -> u8 {
        self.prefix()
    }

    fn from_repr_len(repr: u32, len: u8) -> Self {
        let len = len.min(32);
        Ipv4Network::new(repr.into(), len)
            .unwrap_or_else(|_| Ipv4Network::from(std::net::Ipv4Addr::UNSPECIFIED))
    }

    fn mask(&self) -> u32 {
        self.network().into()
    }
}

#[cfg(feature = "ipnetwork")]
impl Key for Ipv6Network {
    type R = u128;

    fn repr(&self) -> u128 {
        self.ip().into()
    }

    fn bit_len(&self) -> u8 {
        self.prefix()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        let len = len.min(128);
        Ipv6Network::new(repr.into(), len)
            .unwrap_or_else(|_| Ipv6Network::from(std::net::Ipv6Addr::UNSPECIFIED))
    }

    fn mask(&self) -> u128 {
        self.network().into()
    }
}

#[cfg(feature = "cidr")]
impl Key for cidr::Ipv4Cidr {
    type R = u32;

    fn repr(&self) -> u32 {
        self.first_address().into()
    }

    fn bit_len(&self) -> u8 {
        self.network_length()
    }

    // cidr rejects host bits, so the address is masked before construction.
    fn from_repr_len(repr: u32, len: u8) -> Self {
        let len = len.min(32);
        let repr = repr & mask_from_len::<u32>(len);
        cidr::Ipv4Cidr::new(repr.into(), len)
            .unwrap_or_else(|_| cidr::Ipv4Cidr::new_host(std::net::Ipv4Addr::UNSPECIFIED))
    }

    fn mask(&self) -> u32 {
        self.first_address().into()
    }
}

#[cfg(feature = "cidr")]
impl Key for cidr::Ipv6Cidr {
    type R = u128;

    fn repr(&self) -> u128 {
        self.first_address().into()
    }

    fn bit_len(&self) -> u8 {
        self.network_length()
    }

    fn from_repr_len(repr: u128, len: u8) -> Self {
        let len = len.min(128);
        let repr = repr & mask_from_len::<u128>(len);
        cidr::Ipv6Cidr::new(repr.into(), len)
            .unwrap_or_else(|_| cidr::Ipv6Cidr::new_host(std::net::Ipv6Addr::UNSPECIFIED))
    }

    fn mask(&self) -> u128 {
        self.first_address().into()
    }
}

impl<R> Key for (R, u8)
where
    R: Unsigned + PrimInt + Zero + CheckedShr,
{
    type R = R;

    fn repr(&self) -> R {
        self.0
    }

    fn bit_len(&self) -> u8 {
        self.1
    }

    fn from_repr_len(repr: R, len: u8) -> Self {
        (repr, len)
    }
}
