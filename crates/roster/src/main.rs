//! `roster` - interactive student record manager
//!
//! Loads the roster, runs the menu on standard input/output, and exits when
//! the operator selects `0`.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use roster::cli::Cli;
use roster::{init_logging, Config, Menu, Store};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone())
        .context("could not load configuration")?
        .with_data_file(cli.data_file.clone());
    config.validate()?;

    let store = Store::from_config(&config.store);
    debug!("Using student file {}", store.path().display());

    let stdin = io::stdin();
    let mut menu = Menu::open(store, stdin.lock(), io::stdout())?;
    menu.run()?;
    Ok(())
}
