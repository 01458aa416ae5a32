//! Errors raised while building keys from text.

/// Error produced when a textual prefix cannot be turned into a key. Lookups and removals never
/// fail on a missing prefix; absence is reported as `None`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The address part is neither dotted-decimal IPv4 nor colon-hex IPv6.
    #[error("invalid address: {0:?}")]
    InvalidAddress(String),
    /// The mask part is not a decimal number in `[0, max]`.
    #[error("invalid mask length {mask:?} (must be between 0 and {max})")]
    InvalidMaskLength {
        /// the mask as written
        mask: String,
        /// maximal bit-length of the address family
        max: u8,
    },
}

/// Result type of the textual API.
pub type Result<T, E = Error> = std::result::Result<T, E>;
