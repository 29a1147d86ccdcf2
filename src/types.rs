use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// how often a contribution is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContributionFrequency {
    Daily,
    Weekly,
    Monthly,
}

impl ContributionFrequency {
    /// applied on every n-th trading day
    pub fn trading_day_step(&self) -> u32 {
        match self {
            ContributionFrequency::Daily => 1,
            ContributionFrequency::Weekly => 5,
            ContributionFrequency::Monthly => 22,
        }
    }

    /// calendar occurrences per year, used to spread contributions over
    /// compounding periods
    pub fn occurrences_per_year(&self) -> u32 {
        match self {
            ContributionFrequency::Daily => 365,
            ContributionFrequency::Weekly => 52,
            ContributionFrequency::Monthly => 12,
        }
    }
}

/// recurring contribution amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSchedule {
    pub amount: Money,
    pub frequency: ContributionFrequency,
}

/// contribution plan attached to a projection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ContributionPlan {
    #[default]
    None,
    /// money added to the balance
    Deposit(ContributionSchedule),
    /// money taken out of the balance, never below zero
    Withdrawal(ContributionSchedule),
}

impl ContributionPlan {
    pub fn deposit(amount: Money, frequency: ContributionFrequency) -> Self {
        ContributionPlan::Deposit(ContributionSchedule { amount, frequency })
    }

    pub fn withdrawal(amount: Money, frequency: ContributionFrequency) -> Self {
        ContributionPlan::Withdrawal(ContributionSchedule { amount, frequency })
    }

    pub fn schedule(&self) -> Option<&ContributionSchedule> {
        match self {
            ContributionPlan::None => None,
            ContributionPlan::Deposit(schedule) | ContributionPlan::Withdrawal(schedule) => {
                Some(schedule)
            }
        }
    }

    /// +1 for deposits, -1 for withdrawals, 0 otherwise
    pub fn sign(&self) -> i64 {
        match self {
            ContributionPlan::None => 0,
            ContributionPlan::Deposit(_) => 1,
            ContributionPlan::Withdrawal(_) => -1,
        }
    }
}

/// sampled point of the balance trajectory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    /// calendar days elapsed since the start date
    pub day: u32,
    pub date: NaiveDate,
    pub balance: Money,
    /// principal plus net contributions so far
    pub principal_component: Money,
    /// accumulated interest or profit so far
    pub interest_component: Money,
}

/// outcome of a projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub principal: Money,
    pub final_value: Money,
    pub total_interest: Money,
    /// net contributions (deposits minus withdrawals)
    pub total_contributions: Money,
    pub total_deposits: Money,
    pub total_withdrawals: Money,
    /// gains that were not reinvested
    pub withdrawn_profit: Money,
    /// percent
    pub percentage_profit: rust_decimal::Decimal,
    /// percent
    pub effective_annual_yield: rust_decimal::Decimal,
    pub trading_days_count: u32,
    pub total_calendar_days: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub series: Vec<SeriesPoint>,
}

impl ProjectionResult {
    /// single-point result where nothing accrues
    pub fn degenerate(principal: Money, start_date: NaiveDate) -> Self {
        Self {
            principal,
            final_value: principal,
            total_interest: Money::ZERO,
            total_contributions: Money::ZERO,
            total_deposits: Money::ZERO,
            total_withdrawals: Money::ZERO,
            withdrawn_profit: Money::ZERO,
            percentage_profit: rust_decimal::Decimal::ZERO,
            effective_annual_yield: rust_decimal::Decimal::ZERO,
            trading_days_count: 0,
            total_calendar_days: 0,
            start_date,
            end_date: start_date,
            series: vec![SeriesPoint {
                day: 0,
                date: start_date,
                balance: principal,
                principal_component: principal,
                interest_component: Money::ZERO,
            }],
        }
    }

    pub fn last_point(&self) -> Option<&SeriesPoint> {
        self.series.last()
    }
}
