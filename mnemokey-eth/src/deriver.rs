//! Ethereum address derivation from a wallet, and the one-shot pipeline.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use zeroize::Zeroizing;

use mnemokey::{
    seed_from_phrase, DerivationPath, EntropySource, Error, ExtendedKey, KeyPair, Network, Result,
    Wallet,
};

use crate::address::Address;
use crate::derivation_style::DerivationStyle;

/// Path used when the caller does not pick one: the second address of the
/// first standard account.
pub const DEFAULT_PATH: &str = "m/44'/60'/0'/0/1";

/// Ethereum address deriver over a wallet's seed.
///
/// # Example
///
/// ```
/// use mnemokey::Wallet;
/// use mnemokey_eth::Deriver;
///
/// let wallet = Wallet::from_entropy(&[0u8; 16], None)?;
/// let deriver = Deriver::new(&wallet);
/// let addr = deriver.derive(0, false, 1)?;
/// assert_eq!(addr.address.to_string(), "0x6fac4d18c912343bf86fa7049364dd4e424ab9c0");
/// # Ok::<(), mnemokey::Error>(())
/// ```
#[derive(Debug)]
pub struct Deriver<'a> {
    wallet: &'a Wallet,
}

/// A derived Ethereum address with associated keys.
#[derive(Clone)]
pub struct DerivedAddress {
    /// Derivation path used (e.g., `m/44'/60'/0'/0/1`).
    pub path: DerivationPath,
    /// Private key in hex format without 0x prefix (zeroized on drop).
    pub private_key_hex: Zeroizing<String>,
    /// Public key in uncompressed hex format.
    pub public_key_hex: String,
    /// The account address.
    pub address: Address,
}

impl DerivedAddress {
    /// Build from a leaf node reached by walking `path`.
    ///
    /// Fails with [`Error::NotAPrivateKey`] for a public-only leaf.
    pub fn from_leaf(path: DerivationPath, leaf: &ExtendedKey) -> Result<Self> {
        let key_pair = KeyPair::from_extended_key(leaf)?;
        let address = Address::from_public_key(key_pair.public_key());
        let public_key = key_pair.public_key().to_encoded_point(false);

        Ok(Self {
            path,
            private_key_hex: Zeroizing::new(hex::encode(key_pair.secret_bytes().as_slice())),
            public_key_hex: hex::encode(public_key.as_bytes()),
            address,
        })
    }
}

impl core::fmt::Debug for DerivedAddress {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DerivedAddress")
            .field("path", &self.path)
            .field("private_key_hex", &"[REDACTED]")
            .field("public_key_hex", &self.public_key_hex)
            .field("address", &self.address)
            .finish()
    }
}

impl<'a> Deriver<'a> {
    /// Create a new Ethereum deriver from a wallet.
    pub const fn new(wallet: &'a Wallet) -> Self {
        Self { wallet }
    }

    /// Derive at the BIP-44 path `m/44'/60'/account'/change/address_index`.
    pub fn derive(&self, account: u32, change: bool, address_index: u32) -> Result<DerivedAddress> {
        let path = DerivationPath::bip44_ethereum(account, u32::from(change), address_index)?;
        self.derive_at_path(&path)
    }

    /// Derive an address at a custom derivation path.
    pub fn derive_at_path(&self, path: &DerivationPath) -> Result<DerivedAddress> {
        let leaf = self.wallet.master_key()?.derive_path(path)?;
        let derived = DerivedAddress::from_leaf(path.clone(), &leaf)?;
        tracing::debug!(%path, address = %derived.address, "derived address");
        Ok(derived)
    }

    /// Derive an address using a specific wallet derivation style.
    pub fn derive_with_style(&self, style: DerivationStyle, index: u32) -> Result<DerivedAddress> {
        self.derive_at_path(&style.path(index)?)
    }

    /// Derive `count` consecutive addresses under `style`, starting at `start_index`.
    ///
    /// The master key is computed once; each path is walked independently.
    /// The first index at or above 2^31 fails with
    /// [`Error::InvalidChildIndex`] naming that index.
    pub fn derive_many_with(
        &self,
        style: DerivationStyle,
        start_index: u32,
        count: u32,
    ) -> Result<Vec<DerivedAddress>> {
        let master = self.wallet.master_key()?;
        (0..count)
            .map(|offset| {
                let index = start_index
                    .checked_add(offset)
                    .ok_or(Error::InvalidChildIndex(start_index))?;
                let path = style.path(index)?;
                let leaf = master.derive_path(&path)?;
                DerivedAddress::from_leaf(path, &leaf)
            })
            .collect()
    }

    /// Derive `count` consecutive standard addresses under `account`.
    pub fn derive_many(
        &self,
        account: u32,
        change: bool,
        start_index: u32,
        count: u32,
    ) -> Result<Vec<DerivedAddress>> {
        (0..count)
            .map(|offset| {
                let index = start_index
                    .checked_add(offset)
                    .ok_or(Error::InvalidChildIndex(start_index))?;
                self.derive(account, change, index)
            })
            .collect()
    }
}

/// Run the whole pipeline for an existing phrase: validate, stretch, walk
/// `path` and encode the address.
pub fn derive_address(phrase: &str, passphrase: &str, path: &DerivationPath) -> Result<Address> {
    let seed = seed_from_phrase(phrase, passphrase)?;
    let leaf = ExtendedKey::new_master(seed.as_bytes(), Network::Mainnet)?.derive_path(path)?;
    let key_pair = KeyPair::from_extended_key(&leaf)?;
    Ok(Address::from_public_key(key_pair.public_key()))
}

/// Run the whole pipeline from fresh entropy.
///
/// Returns the new wallet (to show or store its phrase) and the account at
/// `path`.
pub fn generate_account<S: EntropySource + ?Sized>(
    source: &mut S,
    entropy_bits: usize,
    passphrase: Option<&str>,
    path: &DerivationPath,
) -> Result<(Wallet, DerivedAddress)> {
    let wallet = Wallet::generate(source, entropy_bits, passphrase)?;
    let derived = Deriver::new(&wallet).derive_at_path(path)?;
    Ok((wallet, derived))
}
