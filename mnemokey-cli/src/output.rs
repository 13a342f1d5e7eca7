//! Terminal rendering.

use colored::Colorize;
use mnemokey::Wallet;
use mnemokey_eth::DerivedAddress;

use crate::commands::DeriveArgs;

#[rustfmt::skip]
pub fn print_wallet(
    wallet: &Wallet,
    addresses: &[DerivedAddress],
    args: &DeriveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let master = wallet.master_key()?;

    println!();
    println!("      {}     {}", "Mnemonic".cyan().bold(), wallet.phrase().as_str());
    if wallet.has_passphrase() {
        println!("      {}   {}", "Passphrase".cyan().bold(), "(set)".dimmed());
    }
    println!("      {}        {}", "Style".cyan().bold(), args.source_label().dimmed());
    println!("      {}  {}", "Fingerprint".cyan().bold(), hex::encode(master.fingerprint()).dimmed());
    if args.show_keys {
        println!("      {}     {}", "Root Key".cyan().bold(), master.to_base58().as_str());
    }
    println!();

    for (i, addr) in addresses.iter().enumerate() {
        let address = if args.checksum {
            addr.address.to_checksum_string()
        } else {
            addr.address.to_string()
        };

        if addresses.len() > 1 {
            println!("      {}        {}", "Index".cyan().bold(), format!("[{i}]").dimmed());
        }
        println!("      {}         {}", "Path".cyan().bold(), addr.path);
        println!("      {}      {}", "Address".cyan().bold(), address.green());
        if args.show_keys {
            println!("      {}  0x{}", "Private Key".cyan().bold(), addr.private_key_hex.as_str());
            println!("      {}   0x{}", "Public Key".cyan().bold(), addr.public_key_hex.dimmed());
        }
        if i + 1 < addresses.len() {
            println!();
        }
    }
    println!();

    Ok(())
}
