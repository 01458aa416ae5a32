//! Minimal `address["/" maskLength]` grammar used by the textual API.

use std::net::IpAddr;

use ipnet::IpNet;

use crate::{Error, Family, Result};

/// Parse a textual prefix into a key. The address is either dotted-decimal (IPv4) or colon-hex
/// (IPv6). If no mask is given, the key is a host route (32 bits for IPv4, 128 bits for IPv6).
/// Host bits beyond the mask are cleared.
///
/// ```
/// # use netradix::parse_prefix;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(parse_prefix("217.72.195.42/24")?, "217.72.195.0/24".parse()?);
/// assert_eq!(parse_prefix("172.16.2.2")?, "172.16.2.2/32".parse()?);
/// assert_eq!(parse_prefix("2001:220::")?, "2001:220::/128".parse()?);
/// assert!(parse_prefix("10.42.0.0/33").is_err());
/// # Ok(())
/// # }
/// ```
pub fn parse_prefix(text: &str) -> Result<IpNet> {
    let text = text.trim();
    let (addr, mask) = match text.split_once('/') {
        Some((addr, mask)) => (addr, Some(mask)),
        None => (text, None),
    };

    let addr: IpAddr = addr
        .parse()
        .map_err(|_| Error::InvalidAddress(addr.to_string()))?;
    let max = Family::of(&addr).max_bits();

    let len = match mask {
        None => max,
        Some(mask) => parse_mask(mask, max)?,
    };

    IpNet::new(addr, len)
        .map(|net| net.trunc())
        .map_err(|_| Error::InvalidMaskLength {
            mask: len.to_string(),
            max,
        })
}

fn parse_mask(mask: &str, max: u8) -> Result<u8> {
    if mask.is_empty() || !mask.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::InvalidMaskLength {
            mask: mask.to_string(),
            max,
        });
    }
    match mask.parse::<u8>() {
        Ok(len) if len <= max => Ok(len),
        _ => Err(Error::InvalidMaskLength {
            mask: mask.to_string(),
            max,
        }),
    }
}
