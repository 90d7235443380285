//! Account model and operations.
//!
//! The balance never goes negative through a withdrawal, and every
//! balance-affecting operation appends exactly one timestamped entry to the
//! account's history.

use crate::money::Money;
use chrono::{Local, NaiveDateTime};
use log::debug;
use std::collections::VecDeque;
use std::fmt;

/// Timestamp layout used in history entries.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Width of the star border framing console output blocks.
pub const BORDER_WIDTH: usize = 60;

/// Returns the star border line.
pub fn star_border() -> String {
    "*".repeat(BORDER_WIDTH)
}

/// The kind of a balance-affecting operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    Withdrawal,
    Deposit,
}

/// A single history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    pub kind: EntryKind,
    pub amount: Money,
    pub timestamp: NaiveDateTime,
}

impl fmt::Display for TransactionEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self.kind {
            EntryKind::Withdrawal => "Withdrew",
            EntryKind::Deposit => "Deposited",
        };
        write!(
            f,
            "{}: ${} on {}",
            verb,
            self.amount,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Ordered, append-only transaction history.
///
/// Unbounded unless created with a capacity, in which case the oldest
/// entry is evicted once the log is full.
#[derive(Debug, Clone, Default)]
pub struct TransactionLog {
    entries: VecDeque<TransactionEntry>,
    capacity: Option<usize>,
}

impl TransactionLog {
    /// Creates a log. A capacity of `Some(0)` is treated as unbounded.
    pub fn new(capacity: Option<usize>) -> Self {
        TransactionLog {
            entries: VecDeque::new(),
            capacity: capacity.filter(|&c| c > 0),
        }
    }

    fn push(&mut self, entry: TransactionEntry) {
        if let Some(capacity) = self.capacity {
            while self.entries.len() >= capacity {
                self.entries.pop_front();
            }
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TransactionEntry> {
        self.entries.iter()
    }
}

/// A bank account held by the ATM.
#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    pin: String,
    balance: Money,
    history: TransactionLog,
}

impl Account {
    /// Creates an account with an unbounded history.
    pub fn new(name: impl Into<String>, pin: impl Into<String>, balance: Money) -> Self {
        Self::with_history_capacity(name, pin, balance, None)
    }

    /// Creates an account whose history keeps at most `capacity` entries.
    pub fn with_history_capacity(
        name: impl Into<String>,
        pin: impl Into<String>,
        balance: Money,
        capacity: Option<usize>,
    ) -> Self {
        Account {
            name: name.into(),
            pin: pin.into(),
            balance,
            history: TransactionLog::new(capacity),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn history(&self) -> &TransactionLog {
        &self.history
    }

    /// Withdraws funds, stamping the entry with the current local time.
    ///
    /// Returns `false` without touching the account if `amount` is not
    /// positive or exceeds the balance.
    pub fn withdraw(&mut self, amount: Money) -> bool {
        self.withdraw_at(amount, Local::now().naive_local())
    }

    /// Withdraws funds, stamping the entry with `timestamp`.
    pub fn withdraw_at(&mut self, amount: Money, timestamp: NaiveDateTime) -> bool {
        if !amount.is_positive() || amount > self.balance {
            debug!(
                "Withdrawal of {} rejected for {} (balance {})",
                amount, self.name, self.balance
            );
            return false;
        }

        self.balance -= amount;
        self.history.push(TransactionEntry {
            kind: EntryKind::Withdrawal,
            amount,
            timestamp,
        });
        true
    }

    /// Deposits funds, stamping the entry with the current local time.
    ///
    /// Returns `false` without touching the account if `amount` is not
    /// positive or the new balance would be out of range.
    pub fn deposit(&mut self, amount: Money) -> bool {
        self.deposit_at(amount, Local::now().naive_local())
    }

    /// Deposits funds, stamping the entry with `timestamp`.
    pub fn deposit_at(&mut self, amount: Money, timestamp: NaiveDateTime) -> bool {
        if !amount.is_positive() {
            debug!("Ignoring non-positive deposit of {} for {}", amount, self.name);
            return false;
        }

        let Some(balance) = self.balance.checked_add(amount) else {
            debug!("Deposit of {} for {} would overflow the balance", amount, self.name);
            return false;
        };

        self.balance = balance;
        self.history.push(TransactionEntry {
            kind: EntryKind::Deposit,
            amount,
            timestamp,
        });
        true
    }

    /// Overwrites the PIN. No validation of any kind is applied.
    pub fn change_pin(&mut self, new_pin: impl Into<String>) {
        self.pin = new_pin.into();
    }

    /// Renders the history as a framed block, one line per entry.
    pub fn view_transaction_history(&self) -> String {
        let border = star_border();
        let mut lines = vec![border.clone(), "* Transaction History:".to_string()];

        if self.history.is_empty() {
            lines.push("* No transactions found.".to_string());
        } else {
            lines.extend(self.history.iter().map(|entry| format!("* {}", entry)));
        }

        lines.push(border);
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn account(balance: &str) -> Account {
        Account::new("Abul Kalam", "1234", money(balance))
    }

    #[test]
    fn test_new_account_has_empty_history() {
        let acc = account("1000");
        assert_eq!(acc.name(), "Abul Kalam");
        assert_eq!(acc.pin(), "1234");
        assert_eq!(acc.balance(), money("1000"));
        assert!(acc.history().is_empty());
    }

    #[test]
    fn test_withdraw_deducts_and_logs() {
        let mut acc = account("1000");
        assert!(acc.withdraw_at(money("200"), at(9, 30, 0)));

        assert_eq!(acc.balance().to_string(), "800.0");
        let entries: Vec<String> = acc.history().iter().map(|e| e.to_string()).collect();
        assert_eq!(entries, vec!["Withdrew: $200.0 on 2024-03-15 09:30:00"]);
    }

    #[test]
    fn test_withdraw_rejects_overdraft_and_non_positive() {
        let mut acc = account("1000");

        assert!(!acc.withdraw_at(money("1500"), at(9, 0, 0)));
        assert!(!acc.withdraw_at(Money::ZERO, at(9, 0, 0)));
        assert!(!acc.withdraw_at(money("-10"), at(9, 0, 0)));

        assert_eq!(acc.balance(), money("1000"));
        assert!(acc.history().is_empty());
    }

    #[test]
    fn test_withdraw_entire_balance() {
        let mut acc = account("1000");
        assert!(acc.withdraw_at(money("1000"), at(9, 0, 0)));
        assert_eq!(acc.balance(), Money::ZERO);
        assert!(!acc.withdraw_at(money("0.01"), at(9, 0, 1)));
    }

    #[test]
    fn test_deposit_adds_and_logs() {
        let mut acc = account("800");
        assert!(acc.deposit_at(money("50"), at(10, 0, 0)));

        assert_eq!(acc.balance().to_string(), "850.0");
        assert_eq!(acc.history().len(), 1);
        assert_eq!(
            acc.history().iter().next().unwrap().to_string(),
            "Deposited: $50.0 on 2024-03-15 10:00:00"
        );
    }

    #[test]
    fn test_deposit_ignores_non_positive() {
        let mut acc = account("800");
        assert!(!acc.deposit_at(Money::ZERO, at(10, 0, 0)));
        assert!(!acc.deposit_at(money("-5"), at(10, 0, 0)));

        assert_eq!(acc.balance(), money("800"));
        assert!(acc.history().is_empty());
    }

    #[test]
    fn test_deposit_rejects_overflowing_amount() {
        let mut acc = account("1000");
        assert!(!acc.deposit_at(money("79228162514264337593543950335"), at(10, 0, 0)));

        assert_eq!(acc.balance(), money("1000"));
        assert!(acc.history().is_empty());
    }

    #[test]
    fn test_history_preserves_call_order() {
        let mut acc = account("1000");
        acc.deposit_at(money("10"), at(8, 0, 0));
        assert!(acc.withdraw_at(money("20"), at(8, 0, 1)));
        assert!(!acc.withdraw_at(money("5000"), at(8, 0, 2)));
        acc.deposit_at(money("30"), at(8, 0, 3));

        let kinds: Vec<EntryKind> = acc.history().iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![EntryKind::Deposit, EntryKind::Withdrawal, EntryKind::Deposit]
        );
        assert_eq!(acc.balance(), money("1020"));
    }

    #[test]
    fn test_bounded_history_evicts_oldest() {
        let mut acc = Account::with_history_capacity("A", "1", money("100"), Some(2));
        acc.deposit_at(money("1"), at(8, 0, 0));
        acc.deposit_at(money("2"), at(8, 0, 1));
        acc.deposit_at(money("3"), at(8, 0, 2));

        let amounts: Vec<Money> = acc.history().iter().map(|e| e.amount).collect();
        assert_eq!(amounts, vec![money("2"), money("3")]);
        assert_eq!(acc.balance(), money("106"));
    }

    #[test]
    fn test_zero_capacity_means_unbounded() {
        let mut acc = Account::with_history_capacity("A", "1", money("100"), Some(0));
        for i in 0..5 {
            acc.deposit_at(money("1"), at(8, 0, i));
        }
        assert_eq!(acc.history().len(), 5);
    }

    #[test]
    fn test_change_pin_overwrites_unconditionally() {
        let mut acc = account("1000");
        acc.change_pin("");
        assert_eq!(acc.pin(), "");
        acc.change_pin("not-a-number");
        assert_eq!(acc.pin(), "not-a-number");
    }

    #[test]
    fn test_view_empty_history() {
        let acc = account("1000");
        let rendered = acc.view_transaction_history();
        let lines: Vec<&str> = rendered.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], star_border());
        assert_eq!(lines[1], "* Transaction History:");
        assert_eq!(lines[2], "* No transactions found.");
        assert_eq!(lines[3], star_border());
    }

    #[test]
    fn test_view_history_lists_entries() {
        let mut acc = account("1000");
        assert!(acc.withdraw_at(money("200"), at(9, 30, 0)));
        acc.deposit_at(money("50"), at(9, 31, 0));

        let rendered = acc.view_transaction_history();
        assert!(rendered.contains(
            "* Withdrew: $200.0 on 2024-03-15 09:30:00\n\
             * Deposited: $50.0 on 2024-03-15 09:31:00"
        ));
        assert!(!rendered.contains("No transactions found"));
    }
}
