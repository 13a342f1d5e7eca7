//! BIP-32 derivation paths.
//!
//! Paths are written `m/44'/60'/0'/0/1`: a leading `m`, then `/`-separated
//! decimal indices below 2^31, each optionally suffixed with `'` to mark a
//! hardened step.

use core::fmt;

use crate::error::{Error, Result};

/// A child index in a derivation path.
///
/// Hardened indices are stored without the hardened bit and gain it in
/// [`ChildIndex::to_u32`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChildIndex {
    /// Normal (non-hardened) index: 0 to 2^31 - 1
    Normal(u32),
    /// Hardened index: displayed as n', derived as n + 2^31
    Hardened(u32),
}

impl ChildIndex {
    /// The offset for hardened indices (2^31).
    pub const HARDENED_OFFSET: u32 = 0x8000_0000;

    /// Create a normal (non-hardened) child index.
    pub const fn normal(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            Err(Error::InvalidChildIndex(index))
        } else {
            Ok(Self::Normal(index))
        }
    }

    /// Create a hardened child index.
    pub const fn hardened(index: u32) -> Result<Self> {
        if index >= Self::HARDENED_OFFSET {
            Err(Error::InvalidChildIndex(index))
        } else {
            Ok(Self::Hardened(index))
        }
    }

    /// Check if this is a hardened index.
    pub const fn is_hardened(&self) -> bool {
        matches!(self, Self::Hardened(_))
    }

    /// Get the index value without the hardened bit.
    pub const fn index(&self) -> u32 {
        match self {
            Self::Normal(i) | Self::Hardened(i) => *i,
        }
    }

    /// Convert to the raw u32 value used in BIP-32 derivation.
    pub const fn to_u32(&self) -> u32 {
        match self {
            Self::Normal(i) => *i,
            Self::Hardened(i) => *i | Self::HARDENED_OFFSET,
        }
    }
}

impl From<u32> for ChildIndex {
    fn from(value: u32) -> Self {
        if value >= Self::HARDENED_OFFSET {
            Self::Hardened(value & !Self::HARDENED_OFFSET)
        } else {
            Self::Normal(value)
        }
    }
}

impl From<ChildIndex> for u32 {
    fn from(index: ChildIndex) -> Self {
        index.to_u32()
    }
}

impl fmt::Display for ChildIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(i) => write!(f, "{}", i),
            Self::Hardened(i) => write!(f, "{}'", i),
        }
    }
}

/// A BIP-32 derivation path: child indices applied left to right from the
/// master key.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DerivationPath {
    indices: Vec<ChildIndex>,
}

impl DerivationPath {
    /// The empty path, naming the master key itself.
    pub fn master() -> Self {
        Self::default()
    }

    /// Create a derivation path from a vector of child indices.
    pub fn new(indices: Vec<ChildIndex>) -> Self {
        Self { indices }
    }

    /// Parse a derivation path such as `m/44'/60'/0'/0/1`.
    ///
    /// Surrounding whitespace is ignored. Anything else that deviates from
    /// the grammar fails with [`Error::MalformedPath`]: a missing `m`, empty
    /// segments, signs, non-decimal digits, other hardening markers, or
    /// indices of 2^31 and above.
    pub fn parse(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        let malformed = || Error::MalformedPath(path.to_string());

        let rest = trimmed.strip_prefix('m').ok_or_else(malformed)?;
        if rest.is_empty() {
            return Ok(Self::master());
        }

        let rest = rest.strip_prefix('/').ok_or_else(malformed)?;
        let indices = rest
            .split('/')
            .map(|segment| parse_segment(segment).ok_or_else(malformed))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { indices })
    }

    /// BIP-44 path: `m/44'/coin_type'/account'/change/address_index`.
    pub fn bip44(coin_type: u32, account: u32, change: u32, address_index: u32) -> Result<Self> {
        Ok(Self {
            indices: vec![
                ChildIndex::hardened(44)?,
                ChildIndex::hardened(coin_type)?,
                ChildIndex::hardened(account)?,
                ChildIndex::normal(change)?,
                ChildIndex::normal(address_index)?,
            ],
        })
    }

    /// BIP-44 Ethereum path: `m/44'/60'/account'/change/address_index`.
    pub fn bip44_ethereum(account: u32, change: u32, address_index: u32) -> Result<Self> {
        Self::bip44(60, account, change, address_index)
    }

    /// Get the child indices in this path.
    pub fn indices(&self) -> &[ChildIndex] {
        &self.indices
    }

    /// Get the number of levels in this path.
    pub fn depth(&self) -> usize {
        self.indices.len()
    }

    /// Check if this path is empty (master key).
    pub fn is_master(&self) -> bool {
        self.indices.is_empty()
    }

    /// Check if any index in the path is hardened.
    pub fn has_hardened(&self) -> bool {
        self.indices.iter().any(ChildIndex::is_hardened)
    }

    /// Append a child index to the path.
    pub fn child(&self, index: ChildIndex) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        Self { indices }
    }

    /// Get the parent path, if any.
    pub fn parent(&self) -> Option<Self> {
        let (_, parent) = self.indices.split_last()?;
        Some(Self {
            indices: parent.to_vec(),
        })
    }
}

/// Parse one `/`-separated segment: decimal digits with an optional `'`.
fn parse_segment(segment: &str) -> Option<ChildIndex> {
    let (digits, hardened) = match segment.strip_suffix('\'') {
        Some(digits) => (digits, true),
        None => (segment, false),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let index: u32 = digits.parse().ok()?;
    if hardened {
        ChildIndex::hardened(index).ok()
    } else {
        ChildIndex::normal(index).ok()
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indices {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}

impl core::str::FromStr for DerivationPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Vec<ChildIndex>> for DerivationPath {
    fn from(indices: Vec<ChildIndex>) -> Self {
        Self::new(indices)
    }
}

impl<'a> IntoIterator for &'a DerivationPath {
    type Item = &'a ChildIndex;
    type IntoIter = core::slice::Iter<'a, ChildIndex>;

    fn into_iter(self) -> Self::IntoIter {
        self.indices.iter()
    }
}
