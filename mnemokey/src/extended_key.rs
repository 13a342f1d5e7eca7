//! BIP-32 extended keys and child key derivation (CKD).
//!
//! An [`ExtendedKey`] is one node of the hierarchical deterministic tree:
//! key material, a chain code, and the metadata needed for serialisation.
//! Private and public-only nodes share one type; [`KeyMaterial`] tags which
//! one a node is, and [`ExtendedKey::derive_child`] matches on it to pick
//! the hash input and to gate hardened steps.

use core::fmt;

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::elliptic_curve::PrimeField;
use k256::{FieldBytes, NonZeroScalar, ProjectivePoint, PublicKey, Scalar, SecretKey};
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::hash::{double_sha256, hash160, hmac_sha512};
use crate::hdpath::{ChildIndex, DerivationPath};

/// HMAC key for master key generation.
const MASTER_KEY_DOMAIN: &[u8] = b"Bitcoin seed";

/// Serialised payload length, before the checksum.
const PAYLOAD_LEN: usize = 78;
/// Serialised length including the 4-byte checksum.
const ENCODED_LEN: usize = PAYLOAD_LEN + 4;

/// Network an extended key is serialised for.
///
/// Only the version bytes differ; derivation is identical.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Network {
    /// `xprv` / `xpub`.
    #[default]
    Mainnet,
    /// `tprv` / `tpub`.
    Testnet,
}

impl Network {
    /// Version bytes for a private extended key.
    pub const fn private_version(self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0x04, 0x88, 0xAD, 0xE4],
            Self::Testnet => [0x04, 0x35, 0x83, 0x94],
        }
    }

    /// Version bytes for a public extended key.
    pub const fn public_version(self) -> [u8; 4] {
        match self {
            Self::Mainnet => [0x04, 0x88, 0xB2, 0x1E],
            Self::Testnet => [0x04, 0x35, 0x87, 0xCF],
        }
    }

    /// Look up version bytes, returning the network and whether the key is private.
    pub fn from_version(version: [u8; 4]) -> Option<(Self, bool)> {
        [Self::Mainnet, Self::Testnet]
            .into_iter()
            .find_map(|network| {
                if version == network.private_version() {
                    Some((network, true))
                } else if version == network.public_version() {
                    Some((network, false))
                } else {
                    None
                }
            })
    }

    /// Get the network name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mainnet => "mainnet",
            Self::Testnet => "testnet",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl core::str::FromStr for Network {
    type Err = ParseNetworkError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Self::Mainnet),
            "testnet" | "test" => Ok(Self::Testnet),
            _ => Err(ParseNetworkError(s.into())),
        }
    }
}

/// Error returned when parsing an unknown network name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown network '{0}', expected mainnet or testnet")]
pub struct ParseNetworkError(pub(crate) String);

/// Key material held by an extended key node.
#[derive(Clone)]
pub enum KeyMaterial {
    /// Private node: a secp256k1 scalar in `[1, n-1]`.
    Private(SecretKey),
    /// Public-only node: a non-identity curve point.
    Public(PublicKey),
}

impl KeyMaterial {
    /// The public key, computing `k·G` for a private node.
    pub fn public_key(&self) -> PublicKey {
        match self {
            Self::Private(secret) => secret.public_key(),
            Self::Public(public) => *public,
        }
    }
}

/// One node of a BIP-32 key tree.
///
/// Derivation never mutates a node; every step returns a new one. The chain
/// code is wiped on drop, the secret scalar by `k256` itself.
#[derive(Clone)]
pub struct ExtendedKey {
    key: KeyMaterial,
    chain_code: [u8; 32],
    depth: u8,
    parent_fingerprint: [u8; 4],
    child_index: u32,
    network: Network,
}

impl Drop for ExtendedKey {
    fn drop(&mut self) {
        self.chain_code.zeroize();
    }
}

impl ExtendedKey {
    /// Generate the master node from a BIP-39 seed (or any 16 to 64 byte seed).
    pub fn new_master(seed: &[u8], network: Network) -> Result<Self> {
        if !(16..=64).contains(&seed.len()) {
            return Err(Error::InvalidSeedLength(seed.len()));
        }

        let i = hmac_sha512(MASTER_KEY_DOMAIN, &[seed])?;
        let (il, ir) = i.split_at(32);
        let secret = parse_scalar(il)
            .and_then(|scalar| Option::<NonZeroScalar>::from(NonZeroScalar::new(scalar)))
            .map(SecretKey::from)
            .ok_or(Error::DerivationFailure)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        tracing::debug!(%network, "generated master key");

        Ok(Self {
            key: KeyMaterial::Private(secret),
            chain_code,
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_index: 0,
            network,
        })
    }

    /// Derive the child at raw index `index`; bit 31 set means hardened.
    ///
    /// Fails with [`Error::MaxDepthExceeded`] when this node is at depth 255,
    /// [`Error::HardenedDerivationRequiresPrivateKey`] for a hardened index on
    /// a public-only node, and [`Error::DerivationFailure`] when the derived
    /// key is invalid (probability below 2^-127).
    pub fn derive_child(&self, index: u32) -> Result<Self> {
        let depth = self.depth.checked_add(1).ok_or(Error::MaxDepthExceeded)?;
        let hardened = index >= ChildIndex::HARDENED_OFFSET;
        let index_bytes = index.to_be_bytes();
        let parent_public = self.key.public_key();

        let i = match &self.key {
            KeyMaterial::Private(secret) if hardened => {
                let secret_bytes = Zeroizing::new(<[u8; 32]>::from(secret.to_bytes()));
                hmac_sha512(&self.chain_code, &[&[0u8], &secret_bytes[..], &index_bytes])?
            }
            KeyMaterial::Public(_) if hardened => {
                return Err(Error::HardenedDerivationRequiresPrivateKey);
            }
            _ => {
                let point = parent_public.to_encoded_point(true);
                hmac_sha512(&self.chain_code, &[point.as_bytes(), &index_bytes])?
            }
        };

        let (il, ir) = i.split_at(32);
        let tweak = parse_scalar(il).ok_or(Error::DerivationFailure)?;

        let key = match &self.key {
            KeyMaterial::Private(secret) => {
                let child = tweak + secret.to_nonzero_scalar().as_ref();
                let child: NonZeroScalar =
                    Option::from(NonZeroScalar::new(child)).ok_or(Error::DerivationFailure)?;
                KeyMaterial::Private(SecretKey::from(child))
            }
            KeyMaterial::Public(public) => {
                let point = ProjectivePoint::GENERATOR * tweak + public.to_projective();
                let child = PublicKey::from_affine(point.to_affine())
                    .map_err(|_| Error::DerivationFailure)?;
                KeyMaterial::Public(child)
            }
        };

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        tracing::trace!(index = %ChildIndex::from(index), depth, "derived child key");

        Ok(Self {
            key,
            chain_code,
            depth,
            parent_fingerprint: fingerprint_of(&parent_public),
            child_index: index,
            network: self.network,
        })
    }

    /// Walk `path` from this node, deriving each segment in order.
    ///
    /// The first failing step aborts the walk and its error is returned.
    pub fn derive_path(&self, path: &DerivationPath) -> Result<Self> {
        let leaf = path
            .indices()
            .iter()
            .try_fold(self.clone(), |node, index| node.derive_child(index.to_u32()))?;
        tracing::debug!(%path, depth = leaf.depth, "derived path");
        Ok(leaf)
    }

    /// The public-only counterpart of this node (BIP-32 "neuter").
    pub fn to_public(&self) -> Self {
        Self {
            key: KeyMaterial::Public(self.key.public_key()),
            chain_code: self.chain_code,
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_index: self.child_index,
            network: self.network,
        }
    }

    /// Whether this node holds a private key.
    pub fn is_private(&self) -> bool {
        matches!(self.key, KeyMaterial::Private(_))
    }

    /// The node's key material.
    pub fn key(&self) -> &KeyMaterial {
        &self.key
    }

    /// The secret key, if this is a private node.
    pub fn secret_key(&self) -> Option<&SecretKey> {
        match &self.key {
            KeyMaterial::Private(secret) => Some(secret),
            KeyMaterial::Public(_) => None,
        }
    }

    /// The node's public key.
    pub fn public_key(&self) -> PublicKey {
        self.key.public_key()
    }

    /// Get the chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Depth in the tree; 0 for the master node.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// First 4 bytes of the parent's key identifier; zero for the master node.
    pub fn parent_fingerprint(&self) -> [u8; 4] {
        self.parent_fingerprint
    }

    /// Raw index this node was derived at.
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Get the network.
    pub fn network(&self) -> Network {
        self.network
    }

    /// Key identifier: hash160 of the compressed public key.
    pub fn identifier(&self) -> [u8; 20] {
        hash160(self.public_key().to_encoded_point(true).as_bytes())
    }

    /// First 4 bytes of [`identifier`](Self::identifier).
    pub fn fingerprint(&self) -> [u8; 4] {
        fingerprint_of(&self.public_key())
    }

    /// Serialise as Base58Check (`xprv…`, `xpub…`, `tprv…` or `tpub…`).
    pub fn to_base58(&self) -> Zeroizing<String> {
        let mut data = Zeroizing::new(Vec::with_capacity(ENCODED_LEN));
        let version = if self.is_private() {
            self.network.private_version()
        } else {
            self.network.public_version()
        };

        data.extend_from_slice(&version);
        data.push(self.depth);
        data.extend_from_slice(&self.parent_fingerprint);
        data.extend_from_slice(&self.child_index.to_be_bytes());
        data.extend_from_slice(&self.chain_code);
        match &self.key {
            KeyMaterial::Private(secret) => {
                data.push(0);
                data.extend_from_slice(&Zeroizing::new(<[u8; 32]>::from(secret.to_bytes()))[..]);
            }
            KeyMaterial::Public(public) => {
                data.extend_from_slice(public.to_encoded_point(true).as_bytes());
            }
        }

        let checksum = double_sha256(&data);
        data.extend_from_slice(&checksum[..4]);

        Zeroizing::new(bs58::encode(&data[..]).into_string())
    }

    /// Parse a Base58Check-encoded extended key.
    pub fn from_base58(encoded: &str) -> Result<Self> {
        let data = Zeroizing::new(
            bs58::decode(encoded.trim())
                .into_vec()
                .map_err(|_| Error::InvalidEncoding)?,
        );

        if data.len() != ENCODED_LEN {
            return Err(Error::InvalidLength {
                expected: ENCODED_LEN,
                actual: data.len(),
            });
        }

        let (payload, checksum) = data.split_at(PAYLOAD_LEN);
        if double_sha256(payload)[..4] != *checksum {
            return Err(Error::InvalidChecksum);
        }

        let mut version = [0u8; 4];
        version.copy_from_slice(&payload[0..4]);
        let (network, private) =
            Network::from_version(version).ok_or(Error::UnknownVersion(version))?;

        let depth = payload[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&payload[5..9]);
        let mut index_bytes = [0u8; 4];
        index_bytes.copy_from_slice(&payload[9..13]);
        let child_index = u32::from_be_bytes(index_bytes);

        // A master node has neither a parent nor an index.
        if depth == 0 && (parent_fingerprint != [0u8; 4] || child_index != 0) {
            return Err(Error::InvalidEncoding);
        }

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&payload[13..45]);

        let key_data = &payload[45..];
        let key = if private {
            if key_data[0] != 0 {
                return Err(Error::InvalidPrivateKey);
            }
            let secret =
                SecretKey::from_slice(&key_data[1..]).map_err(|_| Error::InvalidPrivateKey)?;
            KeyMaterial::Private(secret)
        } else {
            if !matches!(key_data[0], 0x02 | 0x03) {
                return Err(Error::InvalidPublicKey);
            }
            let public = PublicKey::from_sec1_bytes(key_data).map_err(|_| Error::InvalidPublicKey)?;
            KeyMaterial::Public(public)
        };

        Ok(Self {
            key,
            chain_code,
            depth,
            parent_fingerprint,
            child_index,
            network,
        })
    }
}

/// Parse 32 big-endian bytes as a scalar, rejecting values `>= n`.
fn parse_scalar(bytes: &[u8]) -> Option<Scalar> {
    let repr = <[u8; 32]>::try_from(bytes).ok()?;
    Option::from(Scalar::from_repr(FieldBytes::from(repr)))
}

fn fingerprint_of(public: &PublicKey) -> [u8; 4] {
    let id = hash160(public.to_encoded_point(true).as_bytes());
    let mut fingerprint = [0u8; 4];
    fingerprint.copy_from_slice(&id[..4]);
    fingerprint
}

impl core::str::FromStr for ExtendedKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_base58(s)
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("ExtendedKey");
        match &self.key {
            KeyMaterial::Private(_) => debug.field("key", &"[REDACTED]"),
            KeyMaterial::Public(public) => debug.field(
                "key",
                &hex::encode(public.to_encoded_point(true).as_bytes()),
            ),
        };
        debug
            .field("depth", &self.depth)
            .field("parent_fingerprint", &hex::encode(self.parent_fingerprint))
            .field("child_index", &ChildIndex::from(self.child_index))
            .field("network", &self.network)
            .finish_non_exhaustive()
    }
}
