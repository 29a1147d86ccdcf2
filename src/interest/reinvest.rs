use crate::calendar::CalendarDay;
use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::interest::AccrualModel;
use crate::state::ProjectionState;
use crate::types::ContributionPlan;

/// daily gain on the current balance with partial reinvestment
///
/// Each trading day earns `balance x daily_rate`. The `reinvest_rate` share
/// is added to the balance, the remainder is taken out as profit. Deposits
/// and withdrawals land after the day's gain, on every n-th trading day.
pub struct ReinvestingAccrual {
    daily_rate: Rate,
    reinvest_rate: Rate,
    contribution: ContributionPlan,
    profit_label: bool,
    state: ProjectionState,
}

impl ReinvestingAccrual {
    /// daily interest plan
    pub fn daily(principal: Money, daily_rate: Rate, reinvest_rate: Rate, contribution: ContributionPlan) -> Self {
        Self::new(principal, daily_rate, reinvest_rate, contribution, false)
    }

    /// forex profit plan, same mechanics as `daily`
    pub fn forex(principal: Money, daily_rate: Rate, reinvest_rate: Rate, contribution: ContributionPlan) -> Self {
        Self::new(principal, daily_rate, reinvest_rate, contribution, true)
    }

    fn new(
        principal: Money,
        daily_rate: Rate,
        reinvest_rate: Rate,
        contribution: ContributionPlan,
        profit_label: bool,
    ) -> Self {
        Self {
            daily_rate,
            reinvest_rate: reinvest_rate.clamp_unit(),
            contribution,
            profit_label,
            state: ProjectionState::new(principal),
        }
    }

    fn apply_contribution(&mut self, day: &CalendarDay) -> Result<()> {
        let schedule = match self.contribution.schedule() {
            Some(schedule) => *schedule,
            None => return Ok(()),
        };
        if day.trading_ordinal % schedule.frequency.trading_day_step() != 0 {
            return Ok(());
        }

        match self.contribution {
            ContributionPlan::Deposit(_) => self.state.deposit(schedule.amount, day.day)?,
            ContributionPlan::Withdrawal(_) => {
                self.state.withdraw(schedule.amount);
            }
            ContributionPlan::None => {}
        }
        Ok(())
    }
}

impl AccrualModel for ReinvestingAccrual {
    fn accrue_day(&mut self, day: &CalendarDay) -> Result<()> {
        if !day.is_trading {
            return Ok(());
        }

        let overflow = ProjectionError::Overflow { day: day.day };
        let gain = self.state.balance.checked_apply_rate(self.daily_rate).ok_or(overflow)?;
        let reinvested = gain.apply_rate(self.reinvest_rate);
        self.state.record_gain(gain, reinvested, day.day)?;

        self.apply_contribution(day)
    }

    fn settle(&mut self) -> Result<&ProjectionState> {
        Ok(&self.state)
    }

    fn calculation_method(&self) -> &'static str {
        if self.profit_label {
            "forex daily profit"
        } else {
            "daily compounding with reinvestment"
        }
    }
}
