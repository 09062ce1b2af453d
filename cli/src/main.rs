// Copyright (c) 2026 Catapult SDK Contributors. MIT License.
// See LICENSE for details.

//! # catapult-tx
//!
//! Entry point for the `catapult-tx` binary. Parses CLI arguments,
//! initializes logging and runs one subcommand:
//!
//! - `mosaic-id`: derive a mosaic id from owner and nonce
//! - `namespace-id`: derive namespace ids for a dotted path
//! - `transfer`: build and sign a transfer
//! - `decode`: describe a hex payload as JSON
//! - `keygen`: generate a key pair and address
//! - `version`: print build version information

mod cli;
mod commands;
mod config;
mod logging;

use anyhow::Result;
use clap::Parser;

use cli::{CatapultCli, Commands};

fn main() -> Result<()> {
    let cli = CatapultCli::parse();
    logging::init_logging(logging::default_directives(cli.verbose), cli.log_format);

    let output = match &cli.command {
        Commands::MosaicId(args) => commands::mosaic_id(args)?,
        Commands::NamespaceId(args) => commands::namespace_id(args)?,
        Commands::Transfer(args) => commands::transfer(args)?,
        Commands::Decode(args) => commands::decode(args)?,
        Commands::Keygen(args) => commands::keygen(args)?,
        Commands::Version => {
            print_version();
            return Ok(());
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_version() {
    println!("catapult-tx  {}", env!("CARGO_PKG_VERSION"));
    println!("rustc        {}", option_env!("RUSTC_VERSION").unwrap_or("unknown"));
}
