//! Error types for the ATM simulator.
//!
//! Bad user input is never an error here; it is reported on the console and
//! the session re-prompts. These variants cover failures of the terminal or
//! of the startup configuration.

use thiserror::Error;

/// Result type alias for ATM operations
pub type Result<T> = std::result::Result<T, AtmError>;

/// Errors that can occur while setting up or driving a session.
#[derive(Error, Debug)]
pub enum AtmError {
    /// Failed to read from or write to the console or roster file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in the account roster
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Roster row that cannot become an account
    #[error("Invalid account at row {row}: {message}")]
    InvalidRoster { row: usize, message: String },

    /// Rejected command-line setting
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}
