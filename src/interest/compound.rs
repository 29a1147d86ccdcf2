use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

use crate::calendar::CalendarDay;
use crate::config::DAYS_PER_YEAR;
use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::interest::AccrualModel;
use crate::state::ProjectionState;
use crate::types::ContributionPlan;

/// compounding frequency
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CompoundingFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    /// get number of compounding periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::SemiAnnually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

/// engine for periodic compound interest, A = P(1 + r/n)^(nt)
pub struct CompoundingEngine {
    pub frequency: CompoundingFrequency,
}

impl CompoundingEngine {
    pub fn new(frequency: CompoundingFrequency) -> Self {
        Self { frequency }
    }

    /// number of compounding periods (nt) elapsed after `days` calendar days
    pub fn periods_for_days(&self, days: u32) -> Decimal {
        let n = self.frequency.periods_per_year() as u64;
        Decimal::from(n * days as u64) / Decimal::from(DAYS_PER_YEAR)
    }

    /// (1 + r/n)^(nt), None when not representable
    pub fn growth_factor(&self, annual_rate: Rate, days: u32) -> Option<Decimal> {
        let period_rate = annual_rate.per_period(self.frequency.periods_per_year());
        let base = Decimal::ONE + period_rate.as_decimal();
        base.checked_powd(self.periods_for_days(days))
    }

    /// future value of one unit paid at the end of every period,
    /// ((1 + r/n)^(nt) - 1) / (r/n), or nt when the rate is zero
    pub fn annuity_factor(&self, annual_rate: Rate, days: u32) -> Option<Decimal> {
        let period_rate = annual_rate.per_period(self.frequency.periods_per_year()).as_decimal();
        if period_rate.is_zero() {
            return Some(self.periods_for_days(days));
        }
        let growth = self.growth_factor(annual_rate, days)?;
        (growth - Decimal::ONE).checked_div(period_rate)
    }

    /// principal grown over `days`
    pub fn future_value(&self, principal: Money, annual_rate: Rate, days: u32) -> Option<Money> {
        principal.checked_mul(self.growth_factor(annual_rate, days)?)
    }

    /// contribution spread over compounding periods
    pub fn contribution_per_period(&self, plan: &ContributionPlan) -> Money {
        match plan.schedule() {
            Some(schedule) => {
                let per_year = Decimal::from(schedule.frequency.occurrences_per_year());
                let periods = Decimal::from(self.frequency.periods_per_year());
                Money::from_decimal(schedule.amount.as_decimal() * per_year / periods)
            }
            None => Money::ZERO,
        }
    }

    /// effective annual rate implied by the nominal rate, (1 + r/n)^n - 1
    pub fn effective_annual_rate(&self, annual_rate: Rate) -> Option<Rate> {
        let growth = self.growth_factor(annual_rate, DAYS_PER_YEAR)?;
        Some(Rate::from_decimal(growth - Decimal::ONE))
    }
}

/// closed-form compounding over calendar time
///
/// Accrual follows calendar days, the trading-day policy is not applied.
pub struct CompoundAccrual {
    engine: CompoundingEngine,
    annual_rate: Rate,
    contribution: ContributionPlan,
    per_period: Money,
    elapsed_days: u32,
    settled_days: u32,
    state: ProjectionState,
}

impl CompoundAccrual {
    pub fn new(
        principal: Money,
        annual_rate: Rate,
        frequency: CompoundingFrequency,
        contribution: ContributionPlan,
    ) -> Self {
        let engine = CompoundingEngine::new(frequency);
        let per_period = engine.contribution_per_period(&contribution);

        Self {
            engine,
            annual_rate,
            contribution,
            per_period,
            elapsed_days: 0,
            settled_days: 0,
            state: ProjectionState::new(principal),
        }
    }

    fn value_at(&self, days: u32) -> Option<ProjectionState> {
        let principal = self.state.principal;
        let grown = self.engine.future_value(principal, self.annual_rate, days)?;

        let (annuity, contributed) = match self.contribution {
            ContributionPlan::None => (Money::ZERO, Money::ZERO),
            _ => {
                let annuity = self
                    .per_period
                    .checked_mul(self.engine.annuity_factor(self.annual_rate, days)?)?;
                let contributed = self.per_period.checked_mul(self.engine.periods_for_days(days))?;
                (annuity, contributed)
            }
        };

        let (final_value, deposits, withdrawals) = match self.contribution {
            ContributionPlan::Withdrawal(_) => {
                let remaining = grown.checked_sub(annuity)?;
                if remaining.is_negative() {
                    return self.drawdown(days);
                }
                (remaining, Money::ZERO, contributed)
            }
            _ => (grown.checked_add(annuity)?, contributed, Money::ZERO),
        };

        let mut state = ProjectionState::new(principal);
        state.balance = final_value;
        state.total_deposits = deposits;
        state.total_withdrawals = withdrawals;
        state.total_interest = final_value - principal - state.net_contributions();
        Some(state)
    }

    /// period-by-period run of a withdrawal plan that empties the account
    ///
    /// Each withdrawal takes at most what is left, so the recorded
    /// withdrawals equal the principal plus the interest earned until the
    /// balance ran out.
    fn drawdown(&self, days: u32) -> Option<ProjectionState> {
        let period_rate = self
            .annual_rate
            .per_period(self.engine.frequency.periods_per_year());
        let periods = self.engine.periods_for_days(days).ceil().to_u32()?;

        let mut state = ProjectionState::new(self.state.principal);
        for _ in 0..periods {
            if state.balance.is_zero() {
                break;
            }
            let gain = state.balance.checked_apply_rate(period_rate)?;
            state.balance = state.balance.checked_add(gain)?;
            state.total_interest = state.total_interest.checked_add(gain)?;
            state.withdraw(self.per_period);
        }

        // the closed form runs dry partway through the last period
        let rest = state.balance;
        state.withdraw(rest);
        Some(state)
    }
}

impl AccrualModel for CompoundAccrual {
    fn accrue_day(&mut self, _day: &CalendarDay) -> Result<()> {
        self.elapsed_days += 1;
        Ok(())
    }

    fn settle(&mut self) -> Result<&ProjectionState> {
        if self.settled_days != self.elapsed_days {
            self.state = self
                .value_at(self.elapsed_days)
                .ok_or(ProjectionError::Overflow { day: self.elapsed_days })?;
            self.settled_days = self.elapsed_days;
        }
        Ok(&self.state)
    }

    fn calculation_method(&self) -> &'static str {
        match self.engine.frequency {
            CompoundingFrequency::Annually => "annual compounding",
            CompoundingFrequency::SemiAnnually => "semi-annual compounding",
            CompoundingFrequency::Quarterly => "quarterly compounding",
            CompoundingFrequency::Monthly => "monthly compounding",
            CompoundingFrequency::Daily => "daily compounding",
        }
    }
}
