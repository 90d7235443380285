//! # ATM Simulator
//!
//! A single-session, in-memory simulation of an automated teller machine:
//! PIN authentication with bounded retries, followed by a menu for viewing
//! the balance, withdrawing, depositing, changing the PIN, reviewing the
//! transaction history and registering new accounts.
//!
//! ## Design Principles
//!
//! - **Exact money**: Amounts use `rust_decimal`, never binary floats
//! - **No ambient state**: The [`AccountStore`] is owned by the [`Session`]
//! - **Testable I/O**: All terminal access goes through the [`Console`] trait
//! - **Forgiving input**: Bad input is reported and re-prompted, never fatal
//!
//! ## Example
//!
//! ```
//! use atm_simulator::{AccountStore, AtmConfig, LineConsole, Session, SessionOutcome};
//! use std::io::Cursor;
//!
//! let input = Cursor::new("1234\n1\n7\n");
//! let console = LineConsole::new(input, Vec::new());
//! let store = AccountStore::with_seed_accounts(None);
//!
//! let mut session = Session::new(store, console, AtmConfig::default());
//! assert_eq!(session.run().unwrap(), SessionOutcome::Exited);
//!
//! let store = session.into_store();
//! assert!(store.resolve("1234").is_some());
//! ```

pub mod account;
pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod money;
pub mod session;
pub mod store;

pub use account::{Account, EntryKind, TransactionEntry, TransactionLog};
pub use cli::CliArgs;
pub use config::AtmConfig;
pub use console::{Console, LineConsole, Reply};
pub use error::{AtmError, Result};
pub use money::Money;
pub use session::{MenuOption, Session, SessionOutcome};
pub use store::{AccountId, AccountStore};
