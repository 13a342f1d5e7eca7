//! Derivation path layouts used by common Ethereum wallets.
//!
//! All of them sit under the BIP-44 Ethereum branch `m/44'/60'`; they differ
//! in which level the running index occupies.

use core::fmt;
use core::str::FromStr;

use mnemokey::{ChildIndex, DerivationPath, Result};

/// Ethereum derivation path styles.
///
/// - **Standard** (MetaMask/Trezor): `m/44'/60'/0'/0/{index}`
/// - **Ledger Live**: `m/44'/60'/{index}'/0/0`
/// - **Ledger Legacy** (MEW/MyCrypto): `m/44'/60'/0'/{index}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum DerivationStyle {
    /// `m/44'/60'/0'/0/{index}`: one account, index at the address level.
    #[default]
    Standard,

    /// `m/44'/60'/{index}'/0/0`: every index is its own hardened account.
    LedgerLive,

    /// `m/44'/60'/0'/{index}`: four levels, index in place of the change level.
    LedgerLegacy,
}

impl DerivationStyle {
    /// The derivation path for `index` under this style.
    ///
    /// Fails with [`Error::InvalidChildIndex`](mnemokey::Error::InvalidChildIndex)
    /// if `index` is 2^31 or above.
    pub fn path(self, index: u32) -> Result<DerivationPath> {
        match self {
            Self::Standard => DerivationPath::bip44_ethereum(0, 0, index),
            Self::LedgerLive => DerivationPath::bip44_ethereum(index, 0, 0),
            Self::LedgerLegacy => Ok(DerivationPath::new(vec![
                ChildIndex::hardened(44)?,
                ChildIndex::hardened(60)?,
                ChildIndex::hardened(0)?,
                ChildIndex::normal(index)?,
            ])),
        }
    }

    /// Get the human-readable name of this derivation style.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Standard => "Standard (MetaMask/Trezor)",
            Self::LedgerLive => "Ledger Live",
            Self::LedgerLegacy => "Ledger Legacy (MEW/MyCrypto)",
        }
    }

    /// Get a short identifier for CLI usage.
    pub const fn id(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::LedgerLive => "ledger-live",
            Self::LedgerLegacy => "ledger-legacy",
        }
    }

    /// Get all available derivation styles.
    pub const fn all() -> &'static [Self] {
        &[Self::Standard, Self::LedgerLive, Self::LedgerLegacy]
    }
}

impl fmt::Display for DerivationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for DerivationStyle {
    type Err = ParseDerivationStyleError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "standard" | "metamask" | "trezor" | "bip44" => Ok(Self::Standard),
            "ledger-live" | "ledgerlive" | "live" => Ok(Self::LedgerLive),
            "ledger-legacy" | "ledgerlegacy" | "legacy" | "mew" | "mycrypto" => {
                Ok(Self::LedgerLegacy)
            }
            _ => Err(ParseDerivationStyleError(s.into())),
        }
    }
}

/// Error returned when parsing an invalid derivation style string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid derivation style '{0}', expected one of: standard, ledger-live, ledger-legacy")]
pub struct ParseDerivationStyleError(pub(crate) String);
