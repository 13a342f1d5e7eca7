use proptest::prelude::*;

use mnemokey::{ChildIndex, DerivationPath, Error, ExtendedKey, Network};

fn master(seed: &[u8]) -> Option<ExtendedKey> {
    // An invalid master scalar has probability below 2^-127; skip it.
    ExtendedKey::new_master(seed, Network::Mainnet).ok()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn derive_child_is_deterministic(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in any::<u32>(),
    ) {
        if let Some(master) = master(&seed) {
            let first = master.derive_child(index).unwrap();
            let second = master.derive_child(index).unwrap();
            prop_assert_eq!(first.to_base58(), second.to_base58());
            prop_assert_eq!(first.chain_code(), second.chain_code());
            prop_assert_eq!(first.depth(), 1);
            prop_assert_eq!(first.parent_fingerprint(), master.fingerprint());
        }
    }

    #[test]
    fn hardened_from_public_always_fails(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in ChildIndex::HARDENED_OFFSET..=u32::MAX,
    ) {
        if let Some(master) = master(&seed) {
            prop_assert_eq!(
                master.to_public().derive_child(index).unwrap_err(),
                Error::HardenedDerivationRequiresPrivateKey
            );
        }
    }

    #[test]
    fn public_derivation_matches_private(
        seed in prop::collection::vec(any::<u8>(), 16..=64),
        index in 0..ChildIndex::HARDENED_OFFSET,
    ) {
        if let Some(master) = master(&seed) {
            let via_private = master.derive_child(index).unwrap().to_public();
            let via_public = master.to_public().derive_child(index).unwrap();
            prop_assert_eq!(via_private.to_base58(), via_public.to_base58());
        }
    }

    #[test]
    fn path_display_round_trips(
        segments in prop::collection::vec((0..ChildIndex::HARDENED_OFFSET, any::<bool>()), 0..8),
    ) {
        let text = segments.iter().fold(String::from("m"), |mut acc, (index, hardened)| {
            acc.push_str(&format!("/{}{}", index, if *hardened { "'" } else { "" }));
            acc
        });

        let path: DerivationPath = text.parse().unwrap();
        prop_assert_eq!(path.depth(), segments.len());
        prop_assert_eq!(path.to_string(), text);
        for (parsed, (index, hardened)) in path.indices().iter().zip(&segments) {
            prop_assert_eq!(parsed.index(), *index);
            prop_assert_eq!(parsed.is_hardened(), *hardened);
        }
    }
}
