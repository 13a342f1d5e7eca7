//! A mnemonic bundled with its seed.

use zeroize::Zeroizing;

use crate::entropy::EntropySource;
use crate::error::Result;
use crate::extended_key::{ExtendedKey, Network};
use crate::mnemonic::Mnemonic;
use crate::types::Seed;

/// An HD wallet root: a BIP-39 mnemonic and the seed stretched from it.
///
/// # Passphrase Support
///
/// An optional BIP-39 passphrase (the "25th word") is mixed into the seed.
/// The same mnemonic with different passphrases yields unrelated key trees.
#[derive(Clone)]
pub struct Wallet {
    mnemonic: Mnemonic,
    seed: Seed,
    has_passphrase: bool,
    network: Network,
}

impl Wallet {
    /// Generate a new wallet from `entropy_bits` of fresh entropy.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidEntropySize`](crate::Error::InvalidEntropySize) for an
    /// unsupported size, or
    /// [`Error::RandomSourceUnavailable`](crate::Error::RandomSourceUnavailable)
    /// if the source fails.
    pub fn generate<S: EntropySource + ?Sized>(
        source: &mut S,
        entropy_bits: usize,
        passphrase: Option<&str>,
    ) -> Result<Self> {
        let mnemonic = Mnemonic::generate(source, entropy_bits)?;
        Ok(Self::from_parsed(mnemonic, passphrase))
    }

    /// Create a wallet from raw entropy bytes (16, 20, 24, 28 or 32 bytes).
    pub fn from_entropy(entropy: &[u8], passphrase: Option<&str>) -> Result<Self> {
        let mnemonic = Mnemonic::from_entropy(entropy)?;
        Ok(Self::from_parsed(mnemonic, passphrase))
    }

    /// Create a wallet from an existing mnemonic phrase.
    ///
    /// The phrase is validated (word list and checksum) before the seed is
    /// derived.
    pub fn from_mnemonic(phrase: &str, passphrase: Option<&str>) -> Result<Self> {
        let mnemonic = Mnemonic::parse(phrase)?;
        Ok(Self::from_parsed(mnemonic, passphrase))
    }

    /// Create a wallet from an already validated mnemonic.
    pub fn from_parsed(mnemonic: Mnemonic, passphrase: Option<&str>) -> Self {
        let passphrase = passphrase.unwrap_or("");
        let seed = mnemonic.to_seed(passphrase);

        Self {
            mnemonic,
            seed,
            has_passphrase: !passphrase.is_empty(),
            network: Network::Mainnet,
        }
    }

    /// Use `network` for extended keys produced by [`master_key`](Self::master_key).
    pub fn with_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// The BIP-32 master node for this wallet's seed.
    pub fn master_key(&self) -> Result<ExtendedKey> {
        ExtendedKey::new_master(self.seed.as_bytes(), self.network)
    }

    /// Get the mnemonic.
    pub fn mnemonic(&self) -> &Mnemonic {
        &self.mnemonic
    }

    /// The mnemonic phrase.
    ///
    /// **Security Warning**: the phrase reconstructs every derived key.
    pub fn phrase(&self) -> Zeroizing<String> {
        self.mnemonic.phrase()
    }

    /// Get the seed.
    pub fn seed(&self) -> &Seed {
        &self.seed
    }

    /// Get the network.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Check if a non-empty passphrase was used to derive the seed.
    pub const fn has_passphrase(&self) -> bool {
        self.has_passphrase
    }

    /// Get the word count of the mnemonic.
    pub fn word_count(&self) -> usize {
        self.mnemonic.word_count()
    }
}

impl core::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Wallet")
            .field("mnemonic", &self.mnemonic)
            .field("seed", &self.seed)
            .field("has_passphrase", &self.has_passphrase)
            .field("network", &self.network)
            .finish()
    }
}
