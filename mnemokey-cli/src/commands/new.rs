//! `mnemokey new`: fresh mnemonic from OS entropy.

use clap::Args;
use mnemokey::{Error, OsEntropy, Wallet};

use super::DeriveArgs;
use crate::output::print_wallet;

/// Generate a new mnemonic and derive its addresses.
#[derive(Args)]
pub struct NewCommand {
    /// Number of mnemonic words (12, 15, 18, 21, or 24).
    #[arg(short, long, default_value = "12")]
    words: usize,

    #[command(flatten)]
    derive: DeriveArgs,
}

impl NewCommand {
    /// Execute the command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let entropy_bits = entropy_bits_for(self.words)?;
        tracing::debug!(words = self.words, entropy_bits, "generating mnemonic");
        let wallet = Wallet::generate(
            &mut OsEntropy::default(),
            entropy_bits,
            self.derive.passphrase.as_deref(),
        )?
        .with_network(self.derive.network.into());

        let addresses = self.derive.derive(&wallet)?;
        print_wallet(&wallet, &addresses, &self.derive)?;
        Ok(())
    }

    #[cfg(test)]
    pub(super) fn derive_args(&self) -> &DeriveArgs {
        &self.derive
    }
}

/// 12 words carry 128 bits of entropy; every 3 more words add 32.
fn entropy_bits_for(words: usize) -> Result<usize, Error> {
    match words {
        12 | 15 | 18 | 21 | 24 => Ok(words / 3 * 32),
        _ => Err(Error::InvalidWordCount(words)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_counts_map_to_entropy_sizes() {
        let sizes: Vec<usize> = [12, 15, 18, 21, 24]
            .into_iter()
            .map(|words| entropy_bits_for(words).unwrap())
            .collect();
        assert_eq!(sizes, mnemokey::entropy::ENTROPY_BITS);
        assert_eq!(entropy_bits_for(13), Err(Error::InvalidWordCount(13)));
    }
}
