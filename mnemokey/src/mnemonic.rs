//! BIP-39 mnemonic codec and seed derivation.
//!
//! A mnemonic is stored as its entropy plus the word-list [`Language`]; the
//! phrase is rendered on demand:
//!
//! ```text
//! entropy (ENT bits) || SHA-256(entropy)[..ENT/32 bits]  ->  11-bit groups  ->  words
//! ```
//!
//! The seed is PBKDF2-HMAC-SHA512 over the NFKD-normalized phrase with the
//! salt `"mnemonic" || NFKD(passphrase)`.
//!
//! # Prefix Expansion
//!
//! Every word of the English list is uniquely identified by its first four
//! characters, so [`expand`] accepts abbreviated phrases such as
//! `"aban aban ... abou"`.

use bip39::Language;
use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, Zeroizing};

use crate::entropy::{check_entropy_bits, EntropySource};
use crate::error::{Error, Result};
use crate::hash::sha256;
use crate::types::Seed;

/// Number of PBKDF2 rounds for seed derivation.
const PBKDF2_ROUNDS: u32 = 2048;

/// Bits encoded by one word.
const BITS_PER_WORD: usize = 11;

/// Minimum prefix length required for unambiguous word expansion.
const MIN_PREFIX_LEN: usize = 4;

/// BIP-39 mnemonic phrase.
#[derive(Clone)]
pub struct Mnemonic {
    /// The entropy bytes (16-32 bytes depending on word count)
    entropy: Vec<u8>,
    /// Word list the phrase is rendered with
    language: Language,
}

impl Zeroize for Mnemonic {
    fn zeroize(&mut self) {
        self.entropy.zeroize();
    }
}

impl Drop for Mnemonic {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Mnemonic {
    /// Generate a new English mnemonic from `entropy_bits` of fresh entropy.
    ///
    /// `entropy_bits` must be 128, 160, 192, 224 or 256; anything else fails
    /// with [`Error::InvalidEntropySize`] before the source is consulted.
    pub fn generate<S: EntropySource + ?Sized>(source: &mut S, entropy_bits: usize) -> Result<Self> {
        Self::generate_in(Language::English, source, entropy_bits)
    }

    /// Generate a new mnemonic rendered with `language`.
    pub fn generate_in<S: EntropySource + ?Sized>(
        language: Language,
        source: &mut S,
        entropy_bits: usize,
    ) -> Result<Self> {
        check_entropy_bits(entropy_bits)?;

        let mut entropy = Zeroizing::new(vec![0u8; entropy_bits / 8]);
        source.fill_entropy(&mut entropy)?;

        let mnemonic = Self::from_entropy_in(language, &entropy)?;
        tracing::debug!(words = mnemonic.word_count(), "generated mnemonic");
        Ok(mnemonic)
    }

    /// Creates a mnemonic from raw entropy bytes (English).
    ///
    /// Entropy length must be 16, 20, 24, 28, or 32 bytes.
    pub fn from_entropy(entropy: &[u8]) -> Result<Self> {
        Self::from_entropy_in(Language::English, entropy)
    }

    /// Create from existing entropy bytes with a specific language.
    pub fn from_entropy_in(language: Language, entropy: &[u8]) -> Result<Self> {
        check_entropy_bits(entropy.len() * 8)?;
        Ok(Self {
            entropy: entropy.to_vec(),
            language,
        })
    }

    /// Parse a phrase, trying every enabled word list in turn.
    ///
    /// The error reported is the one from the English attempt, which is the
    /// most useful for the common case.
    pub fn parse(phrase: &str) -> Result<Self> {
        let mut first_err = None;
        for language in Language::ALL {
            match Self::parse_in(*language, phrase) {
                Ok(mnemonic) => return Ok(mnemonic),
                Err(err) => {
                    first_err.get_or_insert(err);
                }
            }
        }
        Err(first_err.unwrap_or(Error::InvalidWordCount(0)))
    }

    /// Parse a phrase against a specific word list.
    ///
    /// Checks the word count, that every word is in the list, and that the
    /// embedded checksum matches the recovered entropy.
    pub fn parse_in(language: Language, phrase: &str) -> Result<Self> {
        let normalized = Zeroizing::new(phrase.nfkd().collect::<String>());
        let words: Vec<&str> = normalized.split_whitespace().collect();

        let total_bits = words.len() * BITS_PER_WORD;
        // ENT + ENT/32 = total, so ENT = total * 32 / 33.
        let entropy_bits = total_bits * 32 / 33;
        if entropy_bits + entropy_bits / 32 != total_bits || check_entropy_bits(entropy_bits).is_err()
        {
            return Err(Error::InvalidWordCount(words.len()));
        }

        let word_list = language.word_list();
        let mut bits = Zeroizing::new(Vec::with_capacity(total_bits));
        for (position, word) in words.iter().enumerate() {
            let index = word_list
                .iter()
                .position(|w| w == word)
                .ok_or(Error::UnknownWord(position))?;
            for shift in (0..BITS_PER_WORD).rev() {
                bits.push((index >> shift) & 1 == 1);
            }
        }

        let mut entropy = vec![0u8; entropy_bits / 8];
        for (i, _) in bits[..entropy_bits].iter().enumerate().filter(|(_, bit)| **bit) {
            entropy[i / 8] |= 1 << (7 - i % 8);
        }

        let mnemonic = Self { entropy, language };
        let expected = mnemonic.checksum_bits();
        if bits[entropy_bits..] != expected[..] {
            return Err(Error::InvalidChecksum);
        }

        Ok(mnemonic)
    }

    /// Whether `phrase` is a valid mnemonic in any enabled word list.
    pub fn validate(phrase: &str) -> bool {
        Self::parse(phrase).is_ok()
    }

    /// Whether `phrase` is a valid mnemonic in `language`.
    pub fn validate_in(language: Language, phrase: &str) -> bool {
        Self::parse_in(language, phrase).is_ok()
    }

    /// Render the phrase, words separated by single spaces.
    pub fn phrase(&self) -> Zeroizing<String> {
        let word_list = self.language.word_list();

        let mut bits = Zeroizing::new(Vec::with_capacity(self.total_bits()));
        for byte in &self.entropy {
            for shift in (0..8).rev() {
                bits.push((byte >> shift) & 1 == 1);
            }
        }
        bits.extend(self.checksum_bits());

        let words: Vec<&str> = bits
            .chunks(BITS_PER_WORD)
            .map(|chunk| {
                let index = chunk
                    .iter()
                    .fold(0usize, |acc, &bit| (acc << 1) | usize::from(bit));
                word_list[index]
            })
            .collect();

        Zeroizing::new(words.join(" "))
    }

    /// Stretch the phrase and `passphrase` into a 64-byte seed.
    ///
    /// Deterministic: the same mnemonic and passphrase always give the same seed.
    pub fn to_seed(&self, passphrase: &str) -> Seed {
        let phrase = self.phrase();
        let password = Zeroizing::new(phrase.nfkd().collect::<String>());
        let salt = Zeroizing::new(format!("mnemonic{}", passphrase.nfkd().collect::<String>()));

        let mut seed = Seed::default();
        pbkdf2_hmac::<Sha512>(
            password.as_bytes(),
            salt.as_bytes(),
            PBKDF2_ROUNDS,
            seed.as_bytes_mut(),
        );
        seed
    }

    /// Get the entropy bytes.
    pub fn entropy(&self) -> &[u8] {
        &self.entropy
    }

    /// Get the language of this mnemonic.
    pub fn language(&self) -> Language {
        self.language
    }

    /// Get the word count.
    pub fn word_count(&self) -> usize {
        self.total_bits() / BITS_PER_WORD
    }

    fn total_bits(&self) -> usize {
        self.entropy.len() * 8 + self.entropy.len() / 4
    }

    /// The leading `ENT / 32` bits of SHA-256(entropy).
    fn checksum_bits(&self) -> Vec<bool> {
        let hash = sha256(&self.entropy);
        (0..self.entropy.len() / 4)
            .map(|i| (hash[i / 8] >> (7 - i % 8)) & 1 == 1)
            .collect()
    }
}

impl core::fmt::Debug for Mnemonic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Mnemonic({} words)", self.word_count())
    }
}

impl core::str::FromStr for Mnemonic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Validate `phrase` and stretch it into a seed.
///
/// Unlike [`Mnemonic::to_seed`] on an already parsed value, this rejects
/// phrases with unknown words or a bad checksum.
pub fn seed_from_phrase(phrase: &str, passphrase: &str) -> Result<Seed> {
    Ok(Mnemonic::parse(phrase)?.to_seed(passphrase))
}

/// Expand abbreviated words in a mnemonic phrase to their full BIP-39 form.
///
/// Each whitespace-separated token is matched against the English list:
/// exact words are kept, and a prefix of at least four characters that names
/// a single word is expanded to it.
pub fn expand(phrase: &str) -> Result<String> {
    expand_in(Language::English, phrase)
}

/// Expand abbreviated words using the specified language word list.
///
/// See [`expand`] for details.
pub fn expand_in(language: Language, phrase: &str) -> Result<String> {
    let word_list = language.word_list();
    let words = phrase
        .split_whitespace()
        .map(|token| resolve_token(word_list, token))
        .collect::<Result<Vec<_>>>()?;
    Ok(words.join(" "))
}

/// Resolve a single token to the full word it names.
fn resolve_token(word_list: &'static [&'static str; 2048], token: &str) -> Result<&'static str> {
    if let Some(word) = word_list.iter().copied().find(|w| *w == token) {
        return Ok(word);
    }

    if token.chars().count() < MIN_PREFIX_LEN {
        return Err(Error::PrefixTooShort {
            prefix: token.to_string(),
            min_len: MIN_PREFIX_LEN,
        });
    }

    let matches: Vec<&'static str> = word_list
        .iter()
        .copied()
        .filter(|w| w.starts_with(token))
        .collect();

    match matches.as_slice() {
        [] => Err(Error::UnknownPrefix(token.to_string())),
        [word] => Ok(*word),
        _ => Err(Error::AmbiguousPrefix {
            prefix: token.to_string(),
            candidates: matches.iter().map(|w| (*w).to_string()).collect(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ZERO_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn test_mnemonic_from_zero_entropy() {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 16]).unwrap();
        assert_eq!(mnemonic.phrase().as_str(), ZERO_PHRASE);
        assert_eq!(mnemonic.word_count(), 12);
    }

    #[test]
    fn test_bip39_vectors() {
        let cases = [
            (
                &hex_literal::hex!("7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f7f")[..],
                "legal winner thank year wave sausage worth useful legal winner thank yellow",
            ),
            (
                &hex_literal::hex!("80808080808080808080808080808080")[..],
                "letter advice cage absurd amount doctor acoustic avoid letter advice cage above",
            ),
            (
                &hex_literal::hex!("ffffffffffffffffffffffffffffffff")[..],
                "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong",
            ),
            (
                &[0u8; 32][..],
                "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art",
            ),
        ];

        for (entropy, phrase) in cases {
            let mnemonic = Mnemonic::from_entropy(entropy).unwrap();
            assert_eq!(mnemonic.phrase().as_str(), phrase);

            let parsed = Mnemonic::parse(phrase).unwrap();
            assert_eq!(parsed.entropy(), entropy);
        }
    }

    #[test]
    fn test_mnemonic_to_seed() {
        let mnemonic = Mnemonic::parse(ZERO_PHRASE).unwrap();

        let seed = mnemonic.to_seed("");
        assert_eq!(
            seed.as_bytes(),
            &hex_literal::hex!(
                "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc19a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
            )
        );

        let seed = mnemonic.to_seed("TREZOR");
        assert_eq!(
            seed.as_bytes(),
            &hex_literal::hex!(
                "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
            )
        );
    }

    #[test]
    fn test_invalid_entropy_sizes() {
        assert_eq!(
            Mnemonic::from_entropy(&[0u8; 15]).unwrap_err(),
            Error::InvalidEntropySize(120)
        );
        assert_eq!(
            Mnemonic::from_entropy(&[0u8; 33]).unwrap_err(),
            Error::InvalidEntropySize(264)
        );
    }

    #[test]
    fn test_generate_rejects_127_bits_without_drawing() {
        struct CountingSource(usize);

        impl EntropySource for CountingSource {
            fn fill_entropy(&mut self, _dest: &mut [u8]) -> Result<()> {
                self.0 += 1;
                Ok(())
            }
        }

        let mut source = CountingSource(0);
        let err = Mnemonic::generate(&mut source, 127).unwrap_err();
        assert_eq!(err, Error::InvalidEntropySize(127));
        assert_eq!(source.0, 0);
    }

    #[test]
    fn test_generate_word_counts() {
        let mut rng = crate::OsEntropy::default();
        for (bits, words) in [(128, 12), (160, 15), (192, 18), (224, 21), (256, 24)] {
            let mnemonic = Mnemonic::generate(&mut rng, bits).unwrap();
            assert_eq!(mnemonic.word_count(), words);
            assert_eq!(mnemonic.phrase().split_whitespace().count(), words);
            assert!(Mnemonic::validate(&mnemonic.phrase()));
        }
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Mnemonic::parse_in(Language::English, "abandon abandon abandon").unwrap_err(),
            Error::InvalidWordCount(3)
        );

        let unknown = ZERO_PHRASE.replacen("abandon", "bitcoin", 1);
        assert_eq!(
            Mnemonic::parse_in(Language::English, &unknown).unwrap_err(),
            Error::UnknownWord(0)
        );

        let bad_checksum = ZERO_PHRASE.replace("about", "abandon");
        assert_eq!(
            Mnemonic::parse_in(Language::English, &bad_checksum).unwrap_err(),
            Error::InvalidChecksum
        );
        assert!(!Mnemonic::validate(&bad_checksum));
    }

    #[test]
    fn test_parse_tolerates_extra_whitespace() {
        let spaced = format!("  {}  ", ZERO_PHRASE.replace(' ', "   "));
        let mnemonic = Mnemonic::parse(&spaced).unwrap();
        assert_eq!(mnemonic.entropy(), &[0u8; 16]);
    }

    #[test]
    fn test_parse_detects_word_list() {
        let mnemonic = Mnemonic::parse(ZERO_PHRASE).unwrap();
        assert_eq!(mnemonic.language(), Language::English);
        assert_eq!(
            Mnemonic::parse("abandon abandon abandon").unwrap_err(),
            Error::InvalidWordCount(3)
        );
    }

    #[cfg(feature = "all-languages")]
    #[test]
    fn test_parse_detects_spanish() {
        let phrase = "ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco abierto";
        let mnemonic = Mnemonic::parse(phrase).unwrap();
        assert_eq!(mnemonic.language(), Language::Spanish);
        assert_eq!(mnemonic.entropy(), &[0u8; 16]);
    }

    #[test]
    fn test_seed_from_phrase_checks_validity() {
        assert!(seed_from_phrase(ZERO_PHRASE, "").is_ok());
        assert_eq!(
            seed_from_phrase(&ZERO_PHRASE.replace("about", "abandon"), "").unwrap_err(),
            Error::InvalidChecksum
        );
    }

    #[test]
    fn test_passphrase_is_normalized() {
        let mnemonic = Mnemonic::parse(ZERO_PHRASE).unwrap();
        // U+00E9 and "e" + U+0301 are the same text after NFKD.
        let composed = mnemonic.to_seed("caf\u{e9}");
        let decomposed = mnemonic.to_seed("cafe\u{301}");
        assert_eq!(composed, decomposed);
    }

    #[test]
    fn test_debug_hides_words() {
        let mnemonic = Mnemonic::from_entropy(&[0u8; 16]).unwrap();
        assert_eq!(format!("{mnemonic:?}"), "Mnemonic(12 words)");
    }

    mod expand_tests {
        use super::*;

        #[test]
        fn four_letter_prefix_expansion() {
            let abbreviated = "aban aban aban aban aban aban aban aban aban aban aban abou";
            assert_eq!(expand(abbreviated).unwrap(), ZERO_PHRASE);
        }

        #[test]
        fn different_words_expand_correctly() {
            let result = expand("abil acti addr admi wall wris").unwrap();
            assert_eq!(result, "ability action address admit wall wrist");
        }

        #[test]
        fn exact_short_words_accepted() {
            assert_eq!(expand("zoo art ice").unwrap(), "zoo art ice");
        }

        #[test]
        fn prefix_too_short_rejected() {
            assert!(matches!(
                expand("aba aba"),
                Err(Error::PrefixTooShort { min_len: 4, .. })
            ));
        }

        #[test]
        fn unknown_prefix_rejected() {
            assert_eq!(
                expand("aban zzzz").unwrap_err(),
                Error::UnknownPrefix("zzzz".to_string())
            );
        }
    }
}
