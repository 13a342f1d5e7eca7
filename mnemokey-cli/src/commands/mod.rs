//! CLI command definitions and handlers.

mod import;
mod new;
mod validate;

use clap::{Args, Parser, Subcommand, ValueEnum};
use mnemokey::{mnemonic, DerivationPath, Mnemonic, Network, Wallet};
use mnemokey_eth::{DerivationStyle, DerivedAddress, Deriver};

pub use import::ImportCommand;
pub use new::NewCommand;
pub use validate::ValidateCommand;

/// mnemokey - derive Ethereum addresses from BIP-39 mnemonics.
#[derive(Parser)]
#[command(name = "mnemokey")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log pipeline stages to stderr (-v debug, -vv trace). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a new mnemonic and derive its addresses.
    New(NewCommand),

    /// Derive addresses from an existing mnemonic.
    Import(ImportCommand),

    /// Check a mnemonic's words and checksum.
    Validate(ValidateCommand),
}

/// CLI-compatible derivation style enum.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CliDerivationStyle {
    /// Standard BIP-44 path (MetaMask/Trezor): m/44'/60'/0'/0/{index}
    #[default]
    Standard,
    /// Ledger Live path: m/44'/60'/{index}'/0/0
    #[value(name = "ledger-live")]
    LedgerLive,
    /// Ledger Legacy path (MEW/MyCrypto): m/44'/60'/0'/{index}
    #[value(name = "ledger-legacy")]
    LedgerLegacy,
}

impl From<CliDerivationStyle> for DerivationStyle {
    fn from(style: CliDerivationStyle) -> Self {
        match style {
            CliDerivationStyle::Standard => DerivationStyle::Standard,
            CliDerivationStyle::LedgerLive => DerivationStyle::LedgerLive,
            CliDerivationStyle::LedgerLegacy => DerivationStyle::LedgerLegacy,
        }
    }
}

/// Network used when printing extended keys.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum CliNetwork {
    /// xprv / xpub
    #[default]
    Mainnet,
    /// tprv / tpub
    Testnet,
}

impl From<CliNetwork> for Network {
    fn from(network: CliNetwork) -> Self {
        match network {
            CliNetwork::Mainnet => Network::Mainnet,
            CliNetwork::Testnet => Network::Testnet,
        }
    }
}

/// Options shared by every command that derives addresses.
#[derive(Args)]
pub struct DeriveArgs {
    /// BIP39 passphrase (optional extra security).
    #[arg(short, long, env = "MNEMOKEY_PASSPHRASE", hide_env_values = true)]
    pub passphrase: Option<String>,

    /// Explicit derivation path, e.g. "m/44'/60'/0'/0/1". Overrides --style.
    #[arg(long, conflicts_with_all = ["style", "index", "count"])]
    pub path: Option<DerivationPath>,

    /// Derivation path style for hardware wallet compatibility.
    #[arg(short, long, default_value = "standard")]
    pub style: CliDerivationStyle,

    /// First address index to derive.
    #[arg(short, long, default_value = "1")]
    pub index: u32,

    /// Number of addresses to derive (at least 1).
    #[arg(short, long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub count: u32,

    /// Network for extended key output.
    #[arg(short, long, default_value = "mainnet")]
    pub network: CliNetwork,

    /// Print addresses with the EIP-55 mixed-case checksum.
    #[arg(long)]
    pub checksum: bool,

    /// Also print private and public keys.
    #[arg(long)]
    pub show_keys: bool,
}

impl DeriveArgs {
    /// Derive the requested addresses from `wallet`.
    pub fn derive(&self, wallet: &Wallet) -> mnemokey::Result<Vec<DerivedAddress>> {
        let deriver = Deriver::new(wallet);
        match &self.path {
            Some(path) => Ok(vec![deriver.derive_at_path(path)?]),
            None => deriver.derive_many_with(self.style.into(), self.index, self.count),
        }
    }

    /// Describe where the addresses came from.
    pub fn source_label(&self) -> String {
        match &self.path {
            Some(_) => "custom path".to_string(),
            None => DerivationStyle::from(self.style).name().to_string(),
        }
    }
}

/// Parse a phrase given on the command line.
///
/// Full words are tried against every enabled word list first. Otherwise the
/// input is treated as English with words shortened to unique prefixes.
pub(crate) fn read_mnemonic(input: &str) -> mnemokey::Result<Mnemonic> {
    Mnemonic::parse(input).or_else(|_| mnemonic::expand(input).and_then(|phrase| Mnemonic::parse(&phrase)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn default_derivation_is_second_standard_address() {
        let cli = Cli::try_parse_from(["mnemokey", "new"]).unwrap();
        let Commands::New(cmd) = cli.command else {
            panic!("expected the new command");
        };
        let wallet = Wallet::from_entropy(&[0u8; 16], None).unwrap();
        let addresses = cmd.derive_args().derive(&wallet).unwrap();
        assert_eq!(addresses.len(), 1);
        assert_eq!(addresses[0].path.to_string(), mnemokey_eth::DEFAULT_PATH);
    }

    #[test]
    fn explicit_path_conflicts_with_style() {
        assert!(Cli::try_parse_from([
            "mnemokey", "import", "-m", "x", "--path", "m/0", "--style", "ledger-live"
        ])
        .is_err());

        let cli = Cli::try_parse_from(["mnemokey", "import", "-m", "x", "--path", "m/44'/60'/0'/0/7"])
            .unwrap();
        assert!(matches!(cli.command, Commands::Import(_)));
    }

    const ZERO_PHRASE: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";

    #[test]
    fn read_mnemonic_accepts_full_and_shortened_words() {
        let full = read_mnemonic(ZERO_PHRASE).unwrap();
        let short = read_mnemonic("aban aban aban aban aban aban aban aban aban aban aban abou").unwrap();
        assert_eq!(full.phrase().as_str(), ZERO_PHRASE);
        assert_eq!(short.phrase().as_str(), ZERO_PHRASE);
    }

    #[test]
    fn read_mnemonic_reports_expansion_errors() {
        assert_eq!(
            read_mnemonic("ab abandon").unwrap_err(),
            mnemokey::Error::PrefixTooShort {
                prefix: "ab".into(),
                min_len: 4,
            }
        );
    }

    #[cfg(feature = "all-languages")]
    #[test]
    fn read_mnemonic_skips_english_expansion_for_other_word_lists() {
        let phrase = "ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco ábaco abierto";
        let parsed = read_mnemonic(phrase).unwrap();
        assert_eq!(parsed.language(), mnemokey::Language::Spanish);
        assert_eq!(parsed.entropy(), &[0u8; 16]);
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(Cli::try_parse_from(["mnemokey", "new", "--count", "0"]).is_err());
        assert!(Cli::try_parse_from(["mnemokey", "import", "-m", "x", "-c", "0"]).is_err());

        let cli = Cli::try_parse_from(["mnemokey", "new", "--count", "3"]).unwrap();
        let Commands::New(cmd) = cli.command else {
            panic!("expected the new command");
        };
        let wallet = Wallet::from_entropy(&[0u8; 16], None).unwrap();
        assert_eq!(cmd.derive_args().derive(&wallet).unwrap().len(), 3);
    }

    #[test]
    fn malformed_path_is_rejected_at_parse_time() {
        assert!(Cli::try_parse_from(["mnemokey", "new", "--path", "44'/60'"]).is_err());
    }
}
