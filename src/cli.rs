//! Command-line arguments.

use crate::config::AtmConfig;
use crate::money::Money;
use clap::Parser;
use std::path::PathBuf;

/// Simulate an ATM session in the terminal
#[derive(Parser, Debug)]
#[command(name = "atm-simulator")]
#[command(about = "Simulate an ATM session in the terminal", long_about = None)]
pub struct CliArgs {
    /// CSV roster (`pin,name,balance`) replacing the built-in sample accounts
    #[arg(long = "accounts", value_name = "CSV")]
    pub accounts: Option<PathBuf>,

    /// Largest amount a single withdrawal may request
    #[arg(long = "withdrawal-limit", value_name = "AMOUNT")]
    pub withdrawal_limit: Option<Money>,

    /// Wrong PIN entries tolerated before the session ends
    #[arg(long = "max-pin-attempts", value_name = "N")]
    pub max_pin_attempts: Option<u32>,

    /// Keep at most N history entries per account (0 keeps all)
    #[arg(long = "history-capacity", value_name = "N")]
    pub history_capacity: Option<usize>,
}

impl CliArgs {
    /// Builds the session settings, falling back to defaults for unset flags.
    pub fn to_config(&self) -> AtmConfig {
        let default = AtmConfig::default();
        AtmConfig {
            max_pin_attempts: self.max_pin_attempts.unwrap_or(default.max_pin_attempts),
            withdrawal_limit: self.withdrawal_limit.unwrap_or(default.withdrawal_limit),
            history_capacity: self.history_capacity.filter(|&n| n > 0),
        }
    }
}
