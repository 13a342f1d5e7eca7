use proptest::prelude::*;

use mnemokey::{KeyPair, Wallet};
use mnemokey_eth::{Address, DerivationStyle, Deriver};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn address_text_round_trips(secret in prop::array::uniform32(any::<u8>())) {
        // Not all 32-byte arrays are valid private keys (must be < curve order, nonzero).
        if let Ok(pair) = KeyPair::from_secret_bytes(&secret) {
            let address = Address::from_public_key(pair.public_key());
            let lower = address.to_string();
            let checksum = address.to_checksum_string();

            prop_assert_eq!(lower.len(), 42);
            prop_assert!(lower.starts_with("0x"));
            prop_assert_eq!(&lower, &lower.to_lowercase());
            prop_assert_eq!(checksum.to_lowercase(), lower.clone());
            prop_assert_eq!(lower.parse::<Address>().unwrap(), address);
            prop_assert_eq!(checksum.parse::<Address>().unwrap(), address);
        }
    }

    #[test]
    fn sec1_encodings_agree(secret in prop::array::uniform32(any::<u8>())) {
        if let Ok(pair) = KeyPair::from_secret_bytes(&secret) {
            let compressed = Address::from_sec1_bytes(&pair.public_key_compressed()).unwrap();
            let uncompressed = Address::from_sec1_bytes(&pair.public_key_uncompressed()).unwrap();
            prop_assert_eq!(compressed, uncompressed);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn derivation_is_deterministic(
        entropy in prop::collection::vec(any::<u8>(), 16),
        index in 0u32..1000,
    ) {
        let first = Wallet::from_entropy(&entropy, None).unwrap();
        let second = Wallet::from_entropy(&entropy, None).unwrap();
        for style in DerivationStyle::all() {
            let a = Deriver::new(&first).derive_with_style(*style, index).unwrap();
            let b = Deriver::new(&second).derive_with_style(*style, index).unwrap();
            prop_assert_eq!(a.address, b.address);
            prop_assert_eq!(a.private_key_hex, b.private_key_hex);
        }
    }
}
