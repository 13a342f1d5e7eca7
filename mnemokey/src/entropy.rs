//! Entropy sourcing for mnemonic generation.
//!
//! The codec never produces randomness on its own; it asks an
//! [`EntropySource`] to fill a buffer of the requested size. Any
//! cryptographically secure `rand_core` generator is a source, and
//! [`OsEntropy`] draws from the operating system.

use rand_core::{CryptoRng, RngCore};

use crate::error::{Error, Result};

/// Entropy sizes accepted by BIP-39, in bits.
pub const ENTROPY_BITS: [usize; 5] = [128, 160, 192, 224, 256];

/// A supplier of cryptographically secure random bytes.
pub trait EntropySource {
    /// Fill `dest` completely with random bytes.
    ///
    /// A failure is fatal for the caller; there is nothing to retry.
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()>;
}

impl<R: RngCore + CryptoRng> EntropySource for R {
    fn fill_entropy(&mut self, dest: &mut [u8]) -> Result<()> {
        self.try_fill_bytes(dest).map_err(|err| {
            tracing::error!(%err, "random source failed");
            Error::RandomSourceUnavailable
        })
    }
}

/// The operating system's randomness source.
pub type OsEntropy = rand_core::OsRng;

/// Check that `bits` is a supported BIP-39 entropy size.
pub fn check_entropy_bits(bits: usize) -> Result<()> {
    if ENTROPY_BITS.contains(&bits) {
        Ok(())
    } else {
        Err(Error::InvalidEntropySize(bits))
    }
}
