//! Interactive ATM session.
//!
//! A session starts unauthenticated and becomes authenticated once a PIN
//! resolves to an account. It terminates on Exit, after too many wrong PINs
//! or at end of input. Invalid input never ends a session; it is reported and
//! the user is prompted again.

use crate::account::{star_border, Account};
use crate::config::AtmConfig;
use crate::console::{Console, Reply};
use crate::error::Result;
use crate::money::Money;
use crate::store::{AccountId, AccountStore};
use log::{debug, info, warn};

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The user selected Exit from the menu.
    Exited,
    /// Too many consecutive wrong PINs.
    LockedOut,
    /// Input ended before the session finished.
    InputClosed,
}

/// Entries of the main menu, numbered as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    ViewBalance,
    Withdraw,
    Deposit,
    ChangePin,
    ViewHistory,
    RegisterUser,
    Exit,
}

impl TryFrom<i64> for MenuOption {
    type Error = i64;

    fn try_from(choice: i64) -> std::result::Result<Self, Self::Error> {
        match choice {
            1 => Ok(MenuOption::ViewBalance),
            2 => Ok(MenuOption::Withdraw),
            3 => Ok(MenuOption::Deposit),
            4 => Ok(MenuOption::ChangePin),
            5 => Ok(MenuOption::ViewHistory),
            6 => Ok(MenuOption::RegisterUser),
            7 => Ok(MenuOption::Exit),
            other => Err(other),
        }
    }
}

const MENU: [&str; 8] = [
    "* ATM Menu:",
    "* 1. View Balance",
    "* 2. Withdraw Funds",
    "* 3. Deposit Funds",
    "* 4. Change PIN",
    "* 5. View Transaction History",
    "* 6. Register New User",
    "* 7. Exit",
];

/// Result of a single menu action.
enum Step {
    Continue,
    Finish(SessionOutcome),
}

/// Result of the login phase.
enum Login {
    Granted(AccountId),
    Finished(SessionOutcome),
}

/// One user's run at the ATM.
pub struct Session<C> {
    store: AccountStore,
    console: C,
    config: AtmConfig,
}

impl<C: Console> Session<C> {
    pub fn new(store: AccountStore, console: C, config: AtmConfig) -> Self {
        Session {
            store,
            console,
            config,
        }
    }

    /// Runs the session to completion.
    pub fn run(&mut self) -> Result<SessionOutcome> {
        self.welcome()?;

        let id = match self.authenticate()? {
            Login::Granted(id) => id,
            Login::Finished(outcome) => return Ok(outcome),
        };

        let outcome = self.menu_loop(id)?;
        info!("Session finished: {:?}", outcome);
        Ok(outcome)
    }

    /// Returns the account store, including any changes made during the run.
    pub fn into_store(self) -> AccountStore {
        self.store
    }

    /// Splits the session into its store and console.
    pub fn into_parts(self) -> (AccountStore, C) {
        (self.store, self.console)
    }

    fn welcome(&mut self) -> Result<()> {
        let border = star_border();
        self.console.write_line(&border)?;
        self.console.write_line("* Welcome to the ATM System")?;
        self.console.write_line("* Your Secure Banking Experience")?;
        self.console.write_line(&border)
    }

    fn authenticate(&mut self) -> Result<Login> {
        let mut attempts = 0;

        loop {
            self.console.write_line(&star_border())?;
            self.console.write_line("* Welcome to the ATM")?;

            let pin = match self.console.read_text("* Enter your PIN: ")? {
                Reply::Value(pin) => pin,
                Reply::Malformed(_) | Reply::Closed => {
                    info!("Input closed during login");
                    return Ok(Login::Finished(SessionOutcome::InputClosed));
                }
            };

            if let Some(id) = self.store.resolve(&pin) {
                let name = self.account(id).name().to_string();
                info!("Login succeeded for {} after {} failed attempts", name, attempts);
                self.console.write_line("* Login successful!")?;
                self.console.write_line(&format!("* Welcome, {}!", name))?;
                return Ok(Login::Granted(id));
            }

            self.console.write_line("* Invalid PIN. Please try again.")?;
            attempts += 1;
            debug!("Failed PIN attempt {} of {}", attempts, self.config.max_pin_attempts);

            if attempts >= self.config.max_pin_attempts {
                warn!("Too many incorrect PIN attempts, ending session");
                self.console
                    .write_line("* Too many incorrect attempts. Account locked.")?;
                return Ok(Login::Finished(SessionOutcome::LockedOut));
            }
        }
    }

    fn menu_loop(&mut self, id: AccountId) -> Result<SessionOutcome> {
        loop {
            self.console.write_line(&star_border())?;
            for line in MENU {
                self.console.write_line(line)?;
            }

            let choice = match self.console.read_number::<i64>("* Select an option: ")? {
                Reply::Value(choice) => choice,
                Reply::Malformed(_) => {
                    self.console
                        .write_line("* Invalid input. Please enter a number.")?;
                    continue;
                }
                Reply::Closed => return Ok(SessionOutcome::InputClosed),
            };

            let option = match MenuOption::try_from(choice) {
                Ok(option) => option,
                Err(other) => {
                    debug!("Unknown menu option {}", other);
                    self.console.write_line("* Invalid option. Please try again.")?;
                    continue;
                }
            };

            if let Step::Finish(outcome) = self.dispatch(id, option)? {
                return Ok(outcome);
            }
        }
    }

    fn dispatch(&mut self, id: AccountId, option: MenuOption) -> Result<Step> {
        match option {
            MenuOption::ViewBalance => {
                let balance = self.account(id).balance();
                self.console
                    .write_line(&format!("* Current Balance: ${}", balance))?;
                Ok(Step::Continue)
            }
            MenuOption::Withdraw => self.handle_withdrawal(id),
            MenuOption::Deposit => self.handle_deposit(id),
            MenuOption::ChangePin => self.handle_change_pin(id),
            MenuOption::ViewHistory => {
                let history = self.account(id).view_transaction_history();
                self.console.write_line(&history)?;
                Ok(Step::Continue)
            }
            MenuOption::RegisterUser => self.handle_registration(),
            MenuOption::Exit => {
                self.console
                    .write_line("* Thank you for using the ATM. Goodbye!")?;
                Ok(Step::Finish(SessionOutcome::Exited))
            }
        }
    }

    fn handle_withdrawal(&mut self, id: AccountId) -> Result<Step> {
        let amount = match self.console.read_number::<Money>("* Enter amount to withdraw: $")? {
            Reply::Value(amount) => amount,
            Reply::Malformed(_) => {
                self.console
                    .write_line("* Invalid input. Please enter a valid amount.")?;
                return Ok(Step::Continue);
            }
            Reply::Closed => return Ok(Step::Finish(SessionOutcome::InputClosed)),
        };

        let limit = self.config.withdrawal_limit;
        if !amount.is_positive() || amount > limit {
            debug!("Withdrawal of {} outside (0, {}]", amount, limit);
            self.console.write_line(&format!(
                "* Invalid amount or exceeds daily limit (${}).",
                limit
            ))?;
            return Ok(Step::Continue);
        }

        let account = self.account_mut(id);
        let message = if account.withdraw(amount) {
            format!("* Withdrawal successful. New Balance: ${}", account.balance())
        } else {
            "* Insufficient balance.".to_string()
        };
        self.console.write_line(&message)?;
        Ok(Step::Continue)
    }

    fn handle_deposit(&mut self, id: AccountId) -> Result<Step> {
        let amount = match self.console.read_number::<Money>("* Enter amount to deposit: $")? {
            Reply::Value(amount) => amount,
            Reply::Malformed(_) => {
                self.console
                    .write_line("* Invalid input. Please enter a valid amount.")?;
                return Ok(Step::Continue);
            }
            Reply::Closed => return Ok(Step::Finish(SessionOutcome::InputClosed)),
        };

        if !amount.is_positive() {
            self.console.write_line("* Invalid amount.")?;
            return Ok(Step::Continue);
        }

        let account = self.account_mut(id);
        let message = if account.deposit(amount) {
            format!("* Deposit successful. New Balance: ${}", account.balance())
        } else {
            "* Deposit rejected. Amount too large.".to_string()
        };
        self.console.write_line(&message)?;
        Ok(Step::Continue)
    }

    fn handle_change_pin(&mut self, id: AccountId) -> Result<Step> {
        let new_pin = match self.console.read_text("* Enter new PIN: ")? {
            Reply::Value(pin) => pin,
            Reply::Malformed(_) | Reply::Closed => {
                return Ok(Step::Finish(SessionOutcome::InputClosed))
            }
        };

        let account = self.account_mut(id);
        account.change_pin(new_pin);
        debug!(
            "PIN changed for {}; lookup still uses the PIN it was registered with",
            account.name()
        );
        self.console.write_line("* PIN changed successfully.")?;
        Ok(Step::Continue)
    }

    fn handle_registration(&mut self) -> Result<Step> {
        let name = match self.console.read_text("* Enter new user name: ")? {
            Reply::Value(name) => name,
            Reply::Malformed(_) | Reply::Closed => {
                return Ok(Step::Finish(SessionOutcome::InputClosed))
            }
        };
        let pin = match self.console.read_text("* Enter new PIN: ")? {
            Reply::Value(pin) => pin,
            Reply::Malformed(_) | Reply::Closed => {
                return Ok(Step::Finish(SessionOutcome::InputClosed))
            }
        };

        let deposit = match self.console.read_number::<Money>("* Enter initial deposit: $")? {
            Reply::Value(deposit) => deposit,
            Reply::Malformed(_) => {
                self.console.write_line("* Invalid input. Please try again.")?;
                return Ok(Step::Continue);
            }
            Reply::Closed => return Ok(Step::Finish(SessionOutcome::InputClosed)),
        };

        if deposit.is_negative() {
            self.console
                .write_line("* Initial deposit must be non-negative.")?;
            return Ok(Step::Continue);
        }

        self.store.register_new(name.clone(), pin, deposit);
        info!("Registered new account for {}", name);
        self.console.write_line("* User registered successfully!")?;
        Ok(Step::Continue)
    }

    fn account(&self, id: AccountId) -> &Account {
        // Safety: ids are only handed out by this session's store, which never removes accounts
        self.store.get(id).expect("account exists")
    }

    fn account_mut(&mut self, id: AccountId) -> &mut Account {
        // Safety: ids are only handed out by this session's store, which never removes accounts
        self.store.get_mut(id).expect("account exists")
    }
}
