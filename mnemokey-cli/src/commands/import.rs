//! `mnemokey import`: derive from an existing phrase.

use clap::Args;
use mnemokey::Wallet;

use super::{read_mnemonic, DeriveArgs};
use crate::output::print_wallet;

/// Derive addresses from an existing mnemonic.
#[derive(Args)]
pub struct ImportCommand {
    /// BIP39 mnemonic phrase. Words may be shortened to their first four letters.
    #[arg(short, long, env = "MNEMOKEY_MNEMONIC", hide_env_values = true)]
    mnemonic: String,

    #[command(flatten)]
    derive: DeriveArgs,
}

impl ImportCommand {
    /// Execute the command.
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let mnemonic = read_mnemonic(&self.mnemonic)?;
        tracing::debug!(words = mnemonic.word_count(), "importing mnemonic");
        let wallet = Wallet::from_parsed(mnemonic, self.derive.passphrase.as_deref())
            .with_network(self.derive.network.into());

        let addresses = self.derive.derive(&wallet)?;
        print_wallet(&wallet, &addresses, &self.derive)?;
        Ok(())
    }
}
