//! Error types for mnemonic and key-tree operations.

/// A convenient Result type alias for mnemokey operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur anywhere in the derivation pipeline.
///
/// Every variant describes a deterministic condition: feeding the same
/// inputs again yields the same error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Entropy size is not one of 128, 160, 192, 224 or 256 bits.
    #[error("invalid entropy size {0} bits, must be 128, 160, 192, 224, or 256")]
    InvalidEntropySize(usize),

    /// The platform randomness source failed to produce bytes.
    #[error("random source unavailable")]
    RandomSourceUnavailable,

    /// Mnemonic word count is not 12, 15, 18, 21 or 24.
    #[error("invalid word count {0}, must be 12, 15, 18, 21, or 24")]
    InvalidWordCount(usize),

    /// The word at this position is not in the word list.
    #[error("mnemonic word #{0} is not in the word list")]
    UnknownWord(usize),

    /// Embedded mnemonic checksum does not match the entropy.
    #[error("mnemonic checksum mismatch")]
    InvalidChecksum,

    /// Mnemonic prefix is too short for unambiguous expansion.
    #[error("prefix \"{prefix}\" is too short (minimum {min_len} characters)")]
    PrefixTooShort {
        /// The prefix that was too short.
        prefix: String,
        /// Minimum required prefix length.
        min_len: usize,
    },

    /// Mnemonic prefix does not match any word in the word list.
    #[error("prefix \"{0}\" does not match any BIP-39 word")]
    UnknownPrefix(String),

    /// Mnemonic prefix matches more than one word.
    #[error("prefix \"{prefix}\" is ambiguous, matches: {}", candidates.join(", "))]
    AmbiguousPrefix {
        /// The ambiguous prefix.
        prefix: String,
        /// Words that match the prefix.
        candidates: Vec<String>,
    },

    /// Seed length is outside 16..=64 bytes.
    #[error("invalid seed length {0}, must be between 16 and 64 bytes")]
    InvalidSeedLength(usize),

    /// Derivation path text is not of the form `m/44'/60'/0'/0/1`.
    #[error("malformed derivation path \"{0}\"")]
    MalformedPath(String),

    /// A child index is 2^31 or above where a 31-bit index is required.
    #[error("child index {0} is out of range, must be below 2^31")]
    InvalidChildIndex(u32),

    /// A hardened child was requested from a public-only extended key.
    #[error("hardened derivation requires a private key")]
    HardenedDerivationRequiresPrivateKey,

    /// The parent is already at depth 255.
    #[error("maximum derivation depth of 255 exceeded")]
    MaxDepthExceeded,

    /// The derived scalar was zero or not below the curve order.
    ///
    /// Deriving the same index again reproduces this; pick another index.
    #[error("derived key is outside the valid range for secp256k1")]
    DerivationFailure,

    /// The extended key holds only a public component.
    #[error("extended key does not contain a private key")]
    NotAPrivateKey,

    /// Public key bytes do not encode a valid, non-identity curve point.
    #[error("invalid public key")]
    InvalidPublicKey,

    /// Private key bytes are zero or not below the curve order.
    #[error("invalid private key")]
    InvalidPrivateKey,

    /// Malformed Base58 or hex input.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// Decoded data has an unexpected length.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Extended key version bytes are not a known `xprv`/`xpub`/`tprv`/`tpub`.
    #[error("unknown extended key version {0:02x?}")]
    UnknownVersion([u8; 4]),
}
