//! Session limits and settings.

use crate::error::{AtmError, Result};
use crate::money::Money;

/// Settings governing a single ATM session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AtmConfig {
    /// Consecutive wrong PINs tolerated before the session ends.
    pub max_pin_attempts: u32,

    /// Largest amount accepted by a single withdrawal request.
    pub withdrawal_limit: Money,

    /// Maximum number of history entries kept per account; `None` keeps all.
    pub history_capacity: Option<usize>,
}

impl AtmConfig {
    /// Default number of PIN attempts.
    pub const MAX_PIN_ATTEMPTS: u32 = 3;

    /// Default per-request withdrawal limit in dollars.
    pub const DAILY_WITHDRAWAL_LIMIT: i64 = 1000;

    /// Checks that the settings describe a usable session.
    pub fn validate(&self) -> Result<()> {
        if self.max_pin_attempts == 0 {
            return Err(AtmError::InvalidConfig(
                "max PIN attempts must be at least 1".to_string(),
            ));
        }
        if !self.withdrawal_limit.is_positive() {
            return Err(AtmError::InvalidConfig(format!(
                "withdrawal limit must be positive, got {}",
                self.withdrawal_limit
            )));
        }
        Ok(())
    }
}

impl Default for AtmConfig {
    fn default() -> Self {
        AtmConfig {
            max_pin_attempts: Self::MAX_PIN_ATTEMPTS,
            withdrawal_limit: Money::from_dollars(Self::DAILY_WITHDRAWAL_LIMIT),
            history_capacity: None,
        }
    }
}
