use crate::calendar::CalendarDay;
use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::interest::AccrualModel;
use crate::state::ProjectionState;

/// simple interest: principal x daily rate x trading days
pub fn simple_interest(principal: Money, daily_rate: Rate, trading_days: u32) -> Money {
    principal.apply_rate(daily_rate) * rust_decimal::Decimal::from(trading_days)
}

/// non-compounding daily interest on the original principal
///
/// Contributions are not applied in this mode.
pub struct SimpleAccrual {
    daily_interest: Money,
    state: ProjectionState,
}

impl SimpleAccrual {
    pub fn new(principal: Money, daily_rate: Rate) -> Result<Self> {
        let daily_interest = principal
            .checked_apply_rate(daily_rate)
            .ok_or(ProjectionError::Overflow { day: 0 })?;

        Ok(Self {
            daily_interest,
            state: ProjectionState::new(principal),
        })
    }

    pub fn daily_interest(&self) -> Money {
        self.daily_interest
    }
}

impl AccrualModel for SimpleAccrual {
    fn accrue_day(&mut self, day: &CalendarDay) -> Result<()> {
        if !day.is_trading {
            return Ok(());
        }
        // everything earned stays in the balance, none of it compounds
        self.state.record_gain(self.daily_interest, self.daily_interest, day.day)
    }

    fn settle(&mut self) -> Result<&ProjectionState> {
        Ok(&self.state)
    }

    fn calculation_method(&self) -> &'static str {
        "simple daily interest"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{TradingCalendar, TradingDayPolicy, WeekdaySet};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn run(accrual: &mut SimpleAccrual, policy: TradingDayPolicy, days: u32) -> ProjectionState {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        for day in TradingCalendar::new(policy, start, days) {
            accrual.accrue_day(&day).unwrap();
        }
        *accrual.settle().unwrap()
    }

    #[test]
    fn test_simple_interest_formula() {
        let principal = Money::from_major(10_000);
        let rate = Rate::from_percentage(dec!(0.5));

        assert_eq!(simple_interest(principal, rate, 30), Money::from_major(1_500));
        assert_eq!(simple_interest(principal, rate, 0), Money::ZERO);
    }

    #[test]
    fn test_interest_never_compounds() {
        let mut accrual = SimpleAccrual::new(Money::from_major(1_000), Rate::from_percentage(dec!(1))).unwrap();

        let state = run(&mut accrual, TradingDayPolicy::AllDays, 100);

        assert_eq!(state.total_interest, Money::from_major(1_000));
        assert_eq!(state.balance, Money::from_major(2_000));
        assert_eq!(state.withdrawn_profit, Money::ZERO);
        assert_eq!(state.total_interest, simple_interest(Money::from_major(1_000), Rate::from_percentage(dec!(1)), 100));
    }

    #[test]
    fn test_only_trading_days_accrue() {
        let mut accrual = SimpleAccrual::new(Money::from_major(1_000), Rate::from_percentage(dec!(1))).unwrap();
        let policy = TradingDayPolicy::Weekdays(WeekdaySet::monday_to_friday());

        // 2024-01-01 is a monday, 14 days hold 10 weekdays
        let state = run(&mut accrual, policy, 14);

        assert_eq!(state.total_interest, Money::from_major(100));
    }
}
