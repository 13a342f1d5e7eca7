//! Ethereum addresses.
//!
//! An address is the last 20 bytes of Keccak-256 over the 64-byte
//! uncompressed public key coordinates `x || y` (no SEC1 `0x04` tag).
//! `alloy_primitives::Address` provides the EIP-55 checksummed rendering.

use alloy_primitives::Address as AlloyAddress;
use k256::elliptic_curve::sec1::ToEncodedPoint;

use mnemokey::hash::keccak256;
use mnemokey::{Error, PublicKey, Result};

/// Ethereum address (20 bytes).
///
/// `Display` renders lowercase `0x` + 40 hex digits; use
/// [`to_checksum_string`](Address::to_checksum_string) for EIP-55.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address(AlloyAddress);

impl Address {
    /// Create from raw 20-byte address.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(AlloyAddress::new(bytes))
    }

    /// Derive the address of a public key.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let point = public_key.to_encoded_point(false);
        // Skip the 0x04 tag; hash x || y.
        let hash = keccak256(&point.as_bytes()[1..]);
        Self(AlloyAddress::from_slice(&hash[12..]))
    }

    /// Derive the address of a SEC1-encoded public key (33 or 65 bytes).
    ///
    /// Fails with [`Error::InvalidPublicKey`] for the identity point or any
    /// bytes that do not decode to a curve point.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        let public_key = PublicKey::from_sec1_bytes(bytes).map_err(|_| Error::InvalidPublicKey)?;
        Ok(Self::from_public_key(&public_key))
    }

    /// Get the raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        self.0.as_ref()
    }

    /// Convert to EIP-55 checksummed string.
    pub fn to_checksum_string(&self) -> String {
        self.0.to_checksum(None)
    }

    /// Get the inner alloy Address.
    pub const fn inner(&self) -> &AlloyAddress {
        &self.0
    }
}

impl core::fmt::Display for Address {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_slice()))
    }
}

impl core::str::FromStr for Address {
    type Err = Error;

    /// Parse `0x`-prefixed or bare hex in any letter case. The EIP-55
    /// checksum is not enforced.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 40 {
            return Err(Error::InvalidLength {
                expected: 40,
                actual: digits.len(),
            });
        }

        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes).map_err(|_| Error::InvalidEncoding)?;
        Ok(Self::from_bytes(bytes))
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

impl From<[u8; 20]> for Address {
    fn from(bytes: [u8; 20]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl From<AlloyAddress> for Address {
    fn from(addr: AlloyAddress) -> Self {
        Self(addr)
    }
}

impl From<Address> for [u8; 20] {
    fn from(addr: Address) -> Self {
        *addr.0.as_ref()
    }
}

impl From<&PublicKey> for Address {
    fn from(public_key: &PublicKey) -> Self {
        Self::from_public_key(public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;
    use mnemokey::KeyPair;

    /// EIP-55 test address
    const TEST_ADDR_LOWER: &str = "0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed";
    const TEST_ADDR_CHECKSUM: &str = "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed";

    mod parsing_tests {
        use super::*;

        #[test]
        fn from_checksum_str() {
            let addr: Address = TEST_ADDR_CHECKSUM.parse().unwrap();
            assert_eq!(addr.as_bytes(), &hex!("5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"));
        }

        #[test]
        fn from_bare_hex() {
            let addr: Address = TEST_ADDR_LOWER[2..].parse().unwrap();
            assert_eq!(addr.to_string(), TEST_ADDR_LOWER);
        }

        #[test]
        fn rejects_bad_input() {
            assert!(matches!(
                "0x1234".parse::<Address>(),
                Err(Error::InvalidLength { expected: 40, actual: 4 })
            ));
            assert_eq!(
                "0xzzaeb6053f3e94c9b9a09f33669435e7ef1beaed".parse::<Address>(),
                Err(Error::InvalidEncoding)
            );
        }
    }

    mod display_tests {
        use super::*;

        #[test]
        fn to_checksum_string() {
            let addr: Address = TEST_ADDR_LOWER.parse().unwrap();
            assert_eq!(addr.to_checksum_string(), TEST_ADDR_CHECKSUM);
        }

        #[test]
        fn display_is_lowercase() {
            let addr: Address = TEST_ADDR_CHECKSUM.parse().unwrap();
            assert_eq!(addr.to_string(), TEST_ADDR_LOWER);
            assert_eq!(addr.to_string().len(), 42);
        }
    }

    #[test]
    fn from_public_key_matches_account_vector() {
        // m/44'/60'/0'/0/0 of "abandon ... about"
        let pair = KeyPair::from_secret_bytes(&hex!(
            "1ab42cc412b618bdea3a599e3c9bae199ebf030895b039e9db1e30dafb12b727"
        ))
        .unwrap();
        let addr = Address::from_public_key(pair.public_key());
        assert_eq!(addr.to_string(), "0x9858effd232b4033e47d90003d41ec34ecaeda94");
        let alloy = AlloyAddress::from_raw_public_key(&pair.public_key_uncompressed()[1..]);
        assert_eq!(addr, Address::from(alloy));
    }

    #[test]
    fn from_sec1_bytes_accepts_both_encodings() {
        let pair = KeyPair::from_secret_bytes(&[0x42; 32]).unwrap();
        let compressed = Address::from_sec1_bytes(&pair.public_key_compressed()).unwrap();
        let uncompressed = Address::from_sec1_bytes(&pair.public_key_uncompressed()).unwrap();
        assert_eq!(compressed, uncompressed);
    }

    #[test]
    fn identity_point_is_rejected() {
        assert_eq!(Address::from_sec1_bytes(&[0x00]), Err(Error::InvalidPublicKey));
        assert_eq!(Address::from_sec1_bytes(&[0x04; 65]), Err(Error::InvalidPublicKey));
        assert_eq!(Address::from_sec1_bytes(&[]), Err(Error::InvalidPublicKey));
    }
}
