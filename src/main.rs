//! ATM Simulator CLI
//!
//! Runs one interactive ATM session on stdin/stdout.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --accounts roster.csv --withdrawal-limit 500
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `info` to control logging verbosity (stderr)

use atm_simulator::{AccountStore, CliArgs, LineConsole, Result, Session};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse();
    let config = args.to_config();
    config.validate()?;

    let store = match &args.accounts {
        Some(path) => {
            let file = File::open(path)?;
            AccountStore::from_csv(BufReader::new(file), config.history_capacity)?
        }
        None => AccountStore::with_seed_accounts(config.history_capacity),
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let console = LineConsole::new(stdin.lock(), stdout.lock());

    let mut session = Session::new(store, console, config);
    let outcome = session.run()?;
    info!("Exiting after {:?}", outcome);

    Ok(())
}
