//! `mnemokey validate`: word list and checksum check only.

use clap::Args;
use colored::Colorize;

use super::read_mnemonic;

/// Check a mnemonic's words and checksum.
#[derive(Args)]
pub struct ValidateCommand {
    /// BIP39 mnemonic phrase. Words may be shortened to their first four letters.
    #[arg(short, long, env = "MNEMOKEY_MNEMONIC", hide_env_values = true)]
    mnemonic: String,
}

impl ValidateCommand {
    /// Execute the command. An invalid phrase is reported and returned as an error.
    #[rustfmt::skip]
    pub fn execute(self) -> Result<(), Box<dyn std::error::Error>> {
        let parsed = read_mnemonic(&self.mnemonic);

        println!();
        match parsed {
            Ok(valid) => {
                println!("      {}       {}", "Status".cyan().bold(), "valid".green());
                println!("      {}        {} words", "Words".cyan().bold(), valid.word_count());
                println!("      {}     {:?}", "Language".cyan().bold(), valid.language());
                println!();
                Ok(())
            }
            Err(e) => {
                println!("      {}       {}", "Status".cyan().bold(), "invalid".red());
                println!();
                Err(e.into())
            }
        }
    }
}
