//! Ethereum addresses derived from BIP-39 mnemonics.
//!
//! Builds on [`mnemokey`] for the mnemonic and key tree, and adds the last
//! pipeline stage: secp256k1 public key to Ethereum address.
//!
//! # Usage
//!
//! ```
//! use mnemokey::Wallet;
//! use mnemokey_eth::{Deriver, DerivationStyle};
//!
//! let wallet = Wallet::from_mnemonic(
//!     "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about",
//!     None
//! )?;
//!
//! let deriver = Deriver::new(&wallet);
//! let addr = deriver.derive(0, false, 0)?;
//! assert_eq!(addr.address.to_checksum_string(), "0x9858EfFD232B4033E47d90003D41EC34EcaEda94");
//!
//! // Ledger Live puts the index at the account level.
//! let addr = deriver.derive_with_style(DerivationStyle::LedgerLive, 1)?;
//! assert_eq!(addr.path.to_string(), "m/44'/60'/1'/0/0");
//! # Ok::<(), mnemokey::Error>(())
//! ```

#![warn(missing_docs, rust_2018_idioms, clippy::all, clippy::pedantic)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc
)]
#![forbid(unsafe_code)]

mod address;
mod derivation_style;
mod deriver;

pub use address::Address;
pub use derivation_style::{DerivationStyle, ParseDerivationStyleError};
pub use deriver::{derive_address, generate_account, DerivedAddress, Deriver, DEFAULT_PATH};
