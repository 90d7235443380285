//! Account storage and PIN lookup.
//!
//! Accounts live in an arena and are addressed by [`AccountId`]. The PIN
//! index maps each PIN to the account most recently registered under it, so
//! re-registering a PIN makes the previous account unreachable by lookup
//! while anyone already holding its id keeps working with it.
//!
//! The index is keyed by the PIN an account was registered with. A later
//! [`Account::change_pin`] does not move the key: the account stays
//! reachable by its old PIN and not by the new one.

use crate::account::Account;
use crate::error::{AtmError, Result};
use crate::money::Money;
use csv::{ReaderBuilder, Trim};
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;

/// Accounts every session starts with: `(pin, name, balance in dollars)`.
pub const SEED_ACCOUNTS: [(&str, &str, i64); 7] = [
    ("1234", "Abul Kalam", 1000),
    ("5678", "Fatema Begum", 2000),
    ("4321", "Rafiq Ahmed", 1500),
    ("8765", "Shahina Akter", 1800),
    ("1122", "Kamal Hossain", 2500),
    ("2211", "Jahanara Khatun", 1200),
    ("3344", "Tariq Mahmood", 3000),
];

/// Handle to an account inside an [`AccountStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(usize);

/// Raw row of an account roster CSV (`pin,name,balance`).
#[derive(Debug, Deserialize)]
struct RosterRecord {
    pin: String,
    name: String,
    balance: Money,
}

/// In-memory account store.
#[derive(Debug, Default)]
pub struct AccountStore {
    /// Every account ever created, including ones shadowed by re-registration.
    accounts: Vec<Account>,

    /// PIN to account index.
    by_pin: HashMap<String, AccountId>,

    /// History capacity applied to accounts created by registration.
    history_capacity: Option<usize>,
}

impl AccountStore {
    /// Creates an empty store.
    pub fn new(history_capacity: Option<usize>) -> Self {
        AccountStore {
            accounts: Vec::new(),
            by_pin: HashMap::new(),
            history_capacity,
        }
    }

    /// Creates a store holding the seven built-in sample accounts.
    pub fn with_seed_accounts(history_capacity: Option<usize>) -> Self {
        let mut store = Self::new(history_capacity);
        for (pin, name, dollars) in SEED_ACCOUNTS {
            store.register_new(name, pin, Money::from_dollars(dollars));
        }
        store
    }

    /// Loads an account roster from CSV with a `pin,name,balance` header.
    ///
    /// Any malformed row or negative balance aborts loading. A PIN that
    /// appears twice keeps the later row.
    pub fn from_csv<R: Read>(reader: R, history_capacity: Option<usize>) -> Result<Self> {
        let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);
        let mut store = Self::new(history_capacity);

        for (row_idx, result) in csv_reader.deserialize::<RosterRecord>().enumerate() {
            let row = row_idx + 2; // 1-indexed, accounting for header row

            let record = result.map_err(|e| AtmError::InvalidRoster {
                row,
                message: e.to_string(),
            })?;

            if record.balance.is_negative() {
                return Err(AtmError::InvalidRoster {
                    row,
                    message: format!("negative balance {}", record.balance),
                });
            }

            if store.by_pin.contains_key(&record.pin) {
                warn!("Row {}: PIN already present in roster, later row wins", row);
            }
            store.register_new(record.name, record.pin, record.balance);
        }

        info!("Loaded {} accounts from roster", store.len());
        Ok(store)
    }

    /// Looks up the account currently registered under `pin`.
    pub fn resolve(&self, pin: &str) -> Option<AccountId> {
        self.by_pin.get(pin).copied()
    }

    pub fn get(&self, id: AccountId) -> Option<&Account> {
        self.accounts.get(id.0)
    }

    pub fn get_mut(&mut self, id: AccountId) -> Option<&mut Account> {
        self.accounts.get_mut(id.0)
    }

    /// Inserts `account` under its PIN, replacing whatever the PIN pointed to.
    pub fn register(&mut self, account: Account) -> AccountId {
        let id = AccountId(self.accounts.len());
        let pin = account.pin().to_string();
        self.accounts.push(account);

        if self.by_pin.insert(pin, id).is_some() {
            debug!("Registration replaced an existing account in the PIN index");
        }
        id
    }

    /// Creates and registers a new account with the store's history settings.
    pub fn register_new(
        &mut self,
        name: impl Into<String>,
        pin: impl Into<String>,
        initial_deposit: Money,
    ) -> AccountId {
        let account =
            Account::with_history_capacity(name, pin, initial_deposit, self.history_capacity);
        self.register(account)
    }

    /// Number of PINs that resolve to an account.
    pub fn len(&self) -> usize {
        self.by_pin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_pin.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn balance_of(store: &AccountStore, pin: &str) -> Money {
        let id = store.resolve(pin).unwrap();
        store.get(id).unwrap().balance()
    }

    #[test]
    fn test_seed_accounts() {
        let store = AccountStore::with_seed_accounts(None);
        assert_eq!(store.len(), 7);

        assert_eq!(balance_of(&store, "1234"), money("1000"));
        assert_eq!(balance_of(&store, "3344"), money("3000"));

        let id = store.resolve("2211").unwrap();
        assert_eq!(store.get(id).unwrap().name(), "Jahanara Khatun");
    }

    #[test]
    fn test_resolve_unknown_pin() {
        let store = AccountStore::with_seed_accounts(None);
        assert!(store.resolve("0000").is_none());
        assert!(store.resolve("").is_none());
        assert!(store.resolve("1234 ").is_none());
    }

    #[test]
    fn test_register_new_account() {
        let mut store = AccountStore::with_seed_accounts(None);
        let id = store.register_new("Test", "9999", money("25"));

        assert_eq!(store.resolve("9999"), Some(id));
        assert_eq!(store.len(), 8);
        assert_eq!(store.get(id).unwrap().name(), "Test");
    }

    #[test]
    fn test_duplicate_pin_overwrites_lookup() {
        let mut store = AccountStore::with_seed_accounts(None);
        let old = store.resolve("1234").unwrap();
        let new = store.register_new("Impostor", "1234", money("5"));

        assert_ne!(old, new);
        assert_eq!(store.resolve("1234"), Some(new));
        assert_eq!(store.len(), 7);
        // The shadowed account still exists for holders of its id.
        assert_eq!(store.get(old).unwrap().name(), "Abul Kalam");
    }

    #[test]
    fn test_pin_change_does_not_reindex() {
        let mut store = AccountStore::with_seed_accounts(None);
        let id = store.resolve("1234").unwrap();
        store.get_mut(id).unwrap().change_pin("0000");

        assert_eq!(store.resolve("1234"), Some(id));
        assert!(store.resolve("0000").is_none());
    }

    #[test]
    fn test_registration_uses_history_capacity() {
        let mut store = AccountStore::new(Some(1));
        let id = store.register_new("A", "1", money("10"));
        let acc = store.get_mut(id).unwrap();
        acc.deposit(money("1"));
        acc.deposit(money("2"));
        assert_eq!(acc.history().len(), 1);
    }

    #[test]
    fn test_from_csv_loads_roster() {
        let csv = "pin, name, balance\n1111, Ada Lovelace, 10.5\n2222,Alan Turing,0\n";
        let store = AccountStore::from_csv(Cursor::new(csv), None).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(balance_of(&store, "1111"), money("10.5"));
        let id = store.resolve("2222").unwrap();
        assert_eq!(store.get(id).unwrap().name(), "Alan Turing");
    }

    #[test]
    fn test_from_csv_duplicate_pin_keeps_later_row() {
        let csv = "pin,name,balance\n1111,First,1\n1111,Second,2\n";
        let store = AccountStore::from_csv(Cursor::new(csv), None).unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(balance_of(&store, "1111"), money("2"));
    }

    #[test]
    fn test_from_csv_rejects_negative_balance() {
        let csv = "pin,name,balance\n1111,Ok,1\n2222,Bad,-1\n";
        let err = AccountStore::from_csv(Cursor::new(csv), None).unwrap_err();

        match err {
            AtmError::InvalidRoster { row, .. } => assert_eq!(row, 3),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_from_csv_rejects_bad_amount() {
        let csv = "pin,name,balance\n1111,Bad,lots\n";
        let err = AccountStore::from_csv(Cursor::new(csv), None).unwrap_err();
        assert!(err.to_string().contains("row 2"));
    }
}
