//! Error types.

/// Error parsing an invalid string representation of UUID.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
pub enum ParseError {
    /// The string is not in the 8-4-4-4-12 hexadecimal form.
    #[error("invalid string representation")]
    Malformed,

    /// The string contains fewer than 16 hexadecimal octets.
    #[error("expected 16 hexadecimal octets, found {found}")]
    OctetCount {
        /// The number of octets found, at most 15.
        found: usize,
    },
}

/// Error generating a UUID.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The random number source could not supply random data.
    #[error("random number source failed")]
    Entropy(#[from] rand::Error),

    /// The destination buffer cannot hold 16 bytes at the requested offset.
    #[error("buffer of length {len} cannot hold 16 bytes at offset {offset}")]
    BufferTooSmall {
        /// The length of the destination buffer.
        len: usize,
        /// The requested offset.
        offset: usize,
    },
}
