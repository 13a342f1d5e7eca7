//! mnemokey - derive Ethereum addresses from BIP-39 mnemonics.
//!
//! Generates or imports a mnemonic, walks a BIP-32 derivation path and
//! prints the resulting account address.

mod commands;
mod output;

use clap::Parser;
use commands::{Cli, Commands};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for the wallet output.
///
/// `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "mnemokey=debug,mnemokey_eth=debug,warn",
        _ => "mnemokey=trace,mnemokey_eth=trace,debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::New(cmd) => cmd.execute()?,
        Commands::Import(cmd) => cmd.execute()?,
        Commands::Validate(cmd) => cmd.execute()?,
    }
    Ok(())
}
