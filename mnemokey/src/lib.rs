//! # mnemokey - BIP-39 mnemonics and BIP-32 key trees
//!
//! Deterministic key derivation from a mnemonic phrase down to a single
//! secp256k1 key pair:
//!
//! ```text
//! entropy -> mnemonic -> seed -> master key -> m/44'/60'/0'/0/1 -> key pair
//! ```
//!
//! Every step is a pure function of its inputs. Failures are returned as
//! [`Error`] values and never retried, since recomputing with the same inputs
//! reproduces the same outcome.
//!
//! ## Example
//!
//! ```
//! use mnemokey::{DerivationPath, ExtendedKey, KeyPair, Mnemonic, Network};
//!
//! let mnemonic = Mnemonic::from_entropy(&[0u8; 16])?;
//! let seed = mnemonic.to_seed("");
//! let master = ExtendedKey::new_master(seed.as_bytes(), Network::Mainnet)?;
//!
//! let path: DerivationPath = "m/44'/60'/0'/0/1".parse()?;
//! let leaf = master.derive_path(&path)?;
//! let key_pair = KeyPair::from_extended_key(&leaf)?;
//! assert_eq!(key_pair.public_key_uncompressed().len(), 65);
//! # Ok::<(), mnemokey::Error>(())
//! ```

#![warn(
    missing_docs,
    rust_2018_idioms,
    clippy::all,
    clippy::pedantic,
    clippy::nursery
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::doc_markdown,
    clippy::missing_const_for_fn,
    clippy::use_self,
    clippy::uninlined_format_args,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation,
    clippy::similar_names,
    clippy::unreadable_literal
)]
#![forbid(unsafe_code)]

pub mod entropy;
pub mod error;
pub mod extended_key;
pub mod hash;
pub mod hdpath;
pub mod keypair;
pub mod mnemonic;
pub mod types;
pub mod wallet;

pub use entropy::{EntropySource, OsEntropy};
pub use error::{Error, Result};
pub use extended_key::{ExtendedKey, KeyMaterial, Network, ParseNetworkError};
pub use hdpath::{ChildIndex, DerivationPath};
pub use keypair::KeyPair;
pub use mnemonic::{seed_from_phrase, Mnemonic};
pub use types::{SecretBytes, Seed};
pub use wallet::Wallet;

pub use bip39::Language;
pub use k256::{PublicKey, SecretKey};
