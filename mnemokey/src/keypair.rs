//! secp256k1 key pairs extracted from leaf extended keys.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{PublicKey, SecretKey};
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use crate::extended_key::{ExtendedKey, KeyMaterial};

/// A secp256k1 private scalar and its public point `k·G`.
///
/// The scalar is wiped on drop.
#[derive(Clone)]
pub struct KeyPair {
    secret: SecretKey,
    public: PublicKey,
}

impl KeyPair {
    /// Take the key pair out of a private leaf node.
    ///
    /// Fails with [`Error::NotAPrivateKey`] for a public-only node.
    pub fn from_extended_key(leaf: &ExtendedKey) -> Result<Self> {
        match leaf.key() {
            KeyMaterial::Private(secret) => Ok(Self::from_secret_key(secret.clone())),
            KeyMaterial::Public(_) => Err(Error::NotAPrivateKey),
        }
    }

    /// Build a key pair from a secret key.
    pub fn from_secret_key(secret: SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    /// Build a key pair from a 32-byte big-endian scalar.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != 32 {
            return Err(Error::InvalidLength {
                expected: 32,
                actual: bytes.len(),
            });
        }
        let secret = SecretKey::from_slice(bytes).map_err(|_| Error::InvalidPrivateKey)?;
        Ok(Self::from_secret_key(secret))
    }

    /// Get the secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret
    }

    /// The 32-byte private scalar.
    pub fn secret_bytes(&self) -> Zeroizing<[u8; 32]> {
        Zeroizing::new(self.secret.to_bytes().into())
    }

    /// Get the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// SEC1 compressed public key (33 bytes).
    pub fn public_key_compressed(&self) -> [u8; 33] {
        let mut out = [0u8; 33];
        out.copy_from_slice(self.public.to_encoded_point(true).as_bytes());
        out
    }

    /// SEC1 uncompressed public key (65 bytes, leading `0x04`).
    pub fn public_key_uncompressed(&self) -> [u8; 65] {
        let mut out = [0u8; 65];
        out.copy_from_slice(self.public.to_encoded_point(false).as_bytes());
        out
    }
}

impl TryFrom<&ExtendedKey> for KeyPair {
    type Error = Error;

    fn try_from(leaf: &ExtendedKey) -> Result<Self> {
        Self::from_extended_key(leaf)
    }
}

impl core::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret", &"[REDACTED]")
            .field("public", &self.public)
            .finish()
    }
}
