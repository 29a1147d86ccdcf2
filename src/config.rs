use chrono::NaiveDate;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::calendar::{TradingDayPolicy, WeekdaySet};
use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::interest::CompoundingFrequency;
use crate::types::ContributionPlan;

/// calendar days in a projection year
pub const DAYS_PER_YEAR: u32 = 365;

/// calendar days in a projection month
pub const DAYS_PER_MONTH: u32 = 30;

/// target number of evenly spaced series points (day 0 comes on top)
pub const SERIES_SAMPLES: u32 = 20;

/// longest supported span, 100 projection years
pub const MAX_PROJECTION_DAYS: u32 = 100 * DAYS_PER_YEAR;

/// decimal places kept on money amounts
pub const MONEY_DP: u32 = 8;

/// projection length as entered on the calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Span {
    pub years: u32,
    pub months: u32,
    pub days: u32,
}

impl Span {
    pub fn new(years: u32, months: u32, days: u32) -> Self {
        Self { years, months, days }
    }

    pub fn days(days: u32) -> Self {
        Self::new(0, 0, days)
    }

    pub fn months(months: u32) -> Self {
        Self::new(0, months, 0)
    }

    pub fn years(years: u32) -> Self {
        Self::new(years, 0, 0)
    }

    /// years x 365 + months x 30 + days, without overflow
    pub fn total_days_unbounded(&self) -> u64 {
        self.years as u64 * DAYS_PER_YEAR as u64
            + self.months as u64 * DAYS_PER_MONTH as u64
            + self.days as u64
    }

    /// total calendar days, capped at `MAX_PROJECTION_DAYS`
    pub fn total_days(&self) -> u32 {
        let total = self.total_days_unbounded();
        if total > MAX_PROJECTION_DAYS as u64 {
            warn!("projection span of {} days truncated to {}", total, MAX_PROJECTION_DAYS);
            return MAX_PROJECTION_DAYS;
        }
        total as u32
    }
}

/// calculation mode with the parameters that only make sense for it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculationMode {
    /// non-compounding interest on the original principal
    Simple { daily_rate: Rate },
    /// periodic compounding of a nominal annual rate
    Compound {
        annual_rate: Rate,
        frequency: CompoundingFrequency,
    },
    /// daily interest with partial reinvestment
    Daily { daily_rate: Rate, reinvest_rate: Rate },
    /// daily trading profit, same mechanics as `Daily`
    Forex { daily_rate: Rate, reinvest_rate: Rate },
}

impl CalculationMode {
    /// the quoted rate, daily or annual depending on the mode
    pub fn rate(&self) -> Rate {
        match self {
            CalculationMode::Simple { daily_rate }
            | CalculationMode::Daily { daily_rate, .. }
            | CalculationMode::Forex { daily_rate, .. } => *daily_rate,
            CalculationMode::Compound { annual_rate, .. } => *annual_rate,
        }
    }

    pub fn reinvest_rate(&self) -> Option<Rate> {
        match self {
            CalculationMode::Daily { reinvest_rate, .. }
            | CalculationMode::Forex { reinvest_rate, .. } => Some(*reinvest_rate),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CalculationMode::Simple { .. } => "simple",
            CalculationMode::Compound { .. } => "compound",
            CalculationMode::Daily { .. } => "daily",
            CalculationMode::Forex { .. } => "forex",
        }
    }

    /// forex plans talk about profit, the others about interest
    pub fn gain_label(&self) -> &'static str {
        match self {
            CalculationMode::Forex { .. } => "profit",
            _ => "interest",
        }
    }

    /// negative rates become zero, reinvest rate limited to [0, 100]%
    pub fn normalized(self) -> Self {
        match self {
            CalculationMode::Simple { daily_rate } => CalculationMode::Simple {
                daily_rate: daily_rate.floor_zero(),
            },
            CalculationMode::Compound { annual_rate, frequency } => CalculationMode::Compound {
                annual_rate: annual_rate.floor_zero(),
                frequency,
            },
            CalculationMode::Daily { daily_rate, reinvest_rate } => CalculationMode::Daily {
                daily_rate: daily_rate.floor_zero(),
                reinvest_rate: reinvest_rate.clamp_unit(),
            },
            CalculationMode::Forex { daily_rate, reinvest_rate } => CalculationMode::Forex {
                daily_rate: daily_rate.floor_zero(),
                reinvest_rate: reinvest_rate.clamp_unit(),
            },
        }
    }
}

/// everything a projection run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInput {
    pub principal: Money,
    pub mode: CalculationMode,
    pub span: Span,
    pub start_date: NaiveDate,
    pub trading_days: TradingDayPolicy,
    pub contribution: ContributionPlan,
}

impl ProjectionInput {
    /// forex plan trading monday to friday
    pub fn forex_weekdays(
        principal: Money,
        daily_rate: Rate,
        reinvest_rate: Rate,
        span: Span,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            principal,
            mode: CalculationMode::Forex { daily_rate, reinvest_rate },
            span,
            start_date,
            trading_days: TradingDayPolicy::Weekdays(WeekdaySet::monday_to_friday()),
            contribution: ContributionPlan::None,
        }
    }

    /// savings-style plan compounding monthly over calendar days
    pub fn savings(
        principal: Money,
        annual_rate: Rate,
        span: Span,
        start_date: NaiveDate,
        contribution: ContributionPlan,
    ) -> Self {
        Self {
            principal,
            mode: CalculationMode::Compound {
                annual_rate,
                frequency: CompoundingFrequency::Monthly,
            },
            span,
            start_date,
            trading_days: TradingDayPolicy::AllDays,
            contribution,
        }
    }

    /// total calendar days of the run
    pub fn total_days(&self) -> u32 {
        self.span.total_days()
    }

    /// strict checks for programmatic callers
    pub fn validate(&self) -> Result<()> {
        if self.principal.is_negative() {
            return Err(ProjectionError::InvalidAmount {
                field: "principal",
                amount: self.principal,
            });
        }

        let rate = self.mode.rate();
        if rate.is_negative() {
            return Err(ProjectionError::InvalidInterestRate { rate });
        }

        if let Some(reinvest_rate) = self.mode.reinvest_rate() {
            if reinvest_rate != reinvest_rate.clamp_unit() {
                return Err(ProjectionError::InvalidReinvestRate { rate: reinvest_rate });
            }
        }

        if let Some(schedule) = self.contribution.schedule() {
            if schedule.amount.is_negative() {
                return Err(ProjectionError::InvalidAmount {
                    field: "contribution",
                    amount: schedule.amount,
                });
            }
        }

        let days = self.span.total_days_unbounded();
        if days > MAX_PROJECTION_DAYS as u64 {
            return Err(ProjectionError::SpanTooLong {
                days,
                max_days: MAX_PROJECTION_DAYS,
            });
        }

        Ok(())
    }

    /// copy with every value coerced into range, never fails
    pub fn normalized(&self) -> Self {
        let contribution = match self.contribution {
            ContributionPlan::Deposit(mut schedule) => {
                schedule.amount = schedule.amount.floor_zero();
                ContributionPlan::Deposit(schedule)
            }
            ContributionPlan::Withdrawal(mut schedule) => {
                schedule.amount = schedule.amount.floor_zero();
                ContributionPlan::Withdrawal(schedule)
            }
            ContributionPlan::None => ContributionPlan::None,
        };

        Self {
            principal: self.principal.floor_zero(),
            mode: self.mode.normalized(),
            span: self.span,
            start_date: self.start_date,
            trading_days: self.trading_days,
            contribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ContributionFrequency;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_span_total_days() {
        assert_eq!(Span::new(1, 2, 3).total_days(), 365 + 60 + 3);
        assert_eq!(Span::days(60).total_days(), 60);
        assert_eq!(Span::default().total_days(), 0);
    }

    #[test]
    fn test_span_is_capped() {
        let span = Span::years(250);

        assert_eq!(span.total_days_unbounded(), 250 * 365);
        assert_eq!(span.total_days(), MAX_PROJECTION_DAYS);
        assert_eq!(Span::new(u32::MAX, u32::MAX, u32::MAX).total_days(), MAX_PROJECTION_DAYS);
    }

    #[test]
    fn test_forex_preset() {
        let input = ProjectionInput::forex_weekdays(
            Money::from_major(3_000),
            Rate::from_percentage(dec!(1.3)),
            Rate::ONE,
            Span::days(60),
            start(),
        );

        assert_eq!(input.mode.gain_label(), "profit");
        assert_eq!(input.mode.name(), "forex");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut input = ProjectionInput::savings(
            Money::from_major(-1),
            Rate::from_percentage(dec!(5)),
            Span::years(1),
            start(),
            ContributionPlan::None,
        );
        assert!(matches!(input.validate(), Err(ProjectionError::InvalidAmount { field: "principal", .. })));

        input.principal = Money::from_major(1_000);
        input.mode = CalculationMode::Daily {
            daily_rate: Rate::from_percentage(dec!(1)),
            reinvest_rate: Rate::from_percentage(dec!(120)),
        };
        assert!(matches!(input.validate(), Err(ProjectionError::InvalidReinvestRate { .. })));

        input.mode = CalculationMode::Simple {
            daily_rate: Rate::from_percentage(dec!(-1)),
        };
        assert!(matches!(input.validate(), Err(ProjectionError::InvalidInterestRate { .. })));

        input.mode = CalculationMode::Simple { daily_rate: Rate::ZERO };
        input.contribution = ContributionPlan::deposit(Money::from_major(-5), ContributionFrequency::Daily);
        assert!(matches!(input.validate(), Err(ProjectionError::InvalidAmount { field: "contribution", .. })));

        input.contribution = ContributionPlan::None;
        input.span = Span::years(101);
        assert!(matches!(input.validate(), Err(ProjectionError::SpanTooLong { .. })));
    }

    #[test]
    fn test_normalized_coerces() {
        let input = ProjectionInput {
            principal: Money::from_major(-10),
            mode: CalculationMode::Forex {
                daily_rate: Rate::from_percentage(dec!(-2)),
                reinvest_rate: Rate::from_percentage(dec!(140)),
            },
            span: Span::days(10),
            start_date: start(),
            trading_days: TradingDayPolicy::AllDays,
            contribution: ContributionPlan::withdrawal(Money::from_major(-3), ContributionFrequency::Weekly),
        };

        let normalized = input.normalized();

        assert_eq!(normalized.principal, Money::ZERO);
        assert_eq!(normalized.mode.rate(), Rate::ZERO);
        assert_eq!(normalized.mode.reinvest_rate(), Some(Rate::ONE));
        assert_eq!(normalized.contribution.schedule().unwrap().amount, Money::ZERO);
        assert!(normalized.validate().is_ok());
    }
}
