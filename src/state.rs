use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{ProjectionError, Result};

/// running balances of a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionState {
    // starting capital
    pub principal: Money,

    // value still invested (includes simple interest and reinvested gains)
    pub balance: Money,

    // gain tracking
    pub total_interest: Money,
    pub withdrawn_profit: Money,

    // contribution tracking, amounts actually applied
    pub total_deposits: Money,
    pub total_withdrawals: Money,
}

impl ProjectionState {
    pub fn new(principal: Money) -> Self {
        Self {
            principal,
            balance: principal,
            total_interest: Money::ZERO,
            withdrawn_profit: Money::ZERO,
            total_deposits: Money::ZERO,
            total_withdrawals: Money::ZERO,
        }
    }

    /// deposits minus withdrawals
    pub fn net_contributions(&self) -> Money {
        self.total_deposits - self.total_withdrawals
    }

    /// invested balance plus profit taken out along the way
    pub fn total_value(&self) -> Money {
        self.balance + self.withdrawn_profit
    }

    /// capital still invested, withdrawals beyond it come out of gains
    pub fn principal_component(&self) -> Money {
        (self.principal + self.net_contributions()).floor_zero()
    }

    /// book one day's gain, reinvesting `reinvested` of it
    pub fn record_gain(&mut self, gain: Money, reinvested: Money, day: u32) -> Result<()> {
        let overflow = || ProjectionError::Overflow { day };

        self.balance = self.balance.checked_add(reinvested).ok_or_else(overflow)?;
        self.withdrawn_profit = self
            .withdrawn_profit
            .checked_add(gain - reinvested)
            .ok_or_else(overflow)?;
        self.total_interest = self.total_interest.checked_add(gain).ok_or_else(overflow)?;
        // total_value() must stay representable
        self.balance.checked_add(self.withdrawn_profit).ok_or_else(overflow)?;
        Ok(())
    }

    pub fn deposit(&mut self, amount: Money, day: u32) -> Result<()> {
        let overflow = || ProjectionError::Overflow { day };

        self.balance = self.balance.checked_add(amount).ok_or_else(overflow)?;
        self.total_deposits = self.total_deposits.checked_add(amount).ok_or_else(overflow)?;
        Ok(())
    }

    /// take out up to `amount`, returns what was actually withdrawn
    pub fn withdraw(&mut self, amount: Money) -> Money {
        let applied = amount.min(self.balance).floor_zero();
        self.balance -= applied;
        self.total_withdrawals += applied;
        applied
    }
}
