//! Hash functions used by the mnemonic codec, key tree and address encoding.

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};
use sha3::Keccak256;
use zeroize::Zeroizing;

use crate::error::{Error, Result};

type HmacSha512 = Hmac<Sha512>;

/// Compute SHA-256 hash
#[inline]
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Compute double SHA-256 hash (Base58Check checksums)
#[inline]
pub fn double_sha256(data: &[u8]) -> [u8; 32] {
    sha256(&sha256(data))
}

/// Compute Hash160 (SHA-256 followed by RIPEMD-160, used for key fingerprints)
#[inline]
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

/// Compute Keccak-256 hash (used in Ethereum)
#[inline]
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    Keccak256::digest(data).into()
}

/// HMAC-SHA512 over the concatenation of `parts`.
///
/// The output is key material (BIP-32 `IL || IR`) and is zeroized on drop.
pub fn hmac_sha512(key: &[u8], parts: &[&[u8]]) -> Result<Zeroizing<[u8; 64]>> {
    let mut mac = <HmacSha512 as Mac>::new_from_slice(key).map_err(|_| Error::InvalidLength {
        expected: 128,
        actual: key.len(),
    })?;
    for part in parts {
        mac.update(part);
    }

    let mut out = Zeroizing::new([0u8; 64]);
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}
