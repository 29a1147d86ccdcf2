use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;

use crate::calendar::{TradingDayPolicy, WeekdaySet};
use crate::config::{CalculationMode, ProjectionInput, Span};
use crate::decimal::{Money, Rate};
use crate::errors::{ProjectionError, Result};
use crate::interest::CompoundingFrequency;
use crate::types::ContributionPlan;

/// builder for projection inputs
pub struct ProjectionBuilder {
    principal: Option<Money>,
    mode: Option<CalculationMode>,
    span: Span,
    start_date: Option<NaiveDate>,
    trading_days: TradingDayPolicy,
    contribution: ContributionPlan,
}

impl ProjectionBuilder {
    pub fn new() -> Self {
        Self {
            principal: None,
            mode: None,
            span: Span::default(),
            start_date: None,
            trading_days: TradingDayPolicy::AllDays,
            contribution: ContributionPlan::None,
        }
    }

    pub fn principal(mut self, principal: Money) -> Self {
        self.principal = Some(principal);
        self
    }

    pub fn mode(mut self, mode: CalculationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn simple(self, daily_rate: Rate) -> Self {
        self.mode(CalculationMode::Simple { daily_rate })
    }

    pub fn compound(self, annual_rate: Rate, frequency: CompoundingFrequency) -> Self {
        self.mode(CalculationMode::Compound { annual_rate, frequency })
    }

    pub fn daily(self, daily_rate: Rate, reinvest_rate: Rate) -> Self {
        self.mode(CalculationMode::Daily { daily_rate, reinvest_rate })
    }

    pub fn forex(self, daily_rate: Rate, reinvest_rate: Rate) -> Self {
        self.mode(CalculationMode::Forex { daily_rate, reinvest_rate })
    }

    pub fn span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    pub fn days(self, days: u32) -> Self {
        self.span(Span::days(days))
    }

    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    pub fn trading_days(mut self, policy: TradingDayPolicy) -> Self {
        self.trading_days = policy;
        self
    }

    pub fn weekdays(self, weekdays: WeekdaySet) -> Self {
        self.trading_days(TradingDayPolicy::Weekdays(weekdays))
    }

    pub fn contribution(mut self, plan: ContributionPlan) -> Self {
        self.contribution = plan;
        self
    }

    /// Build with system time for a missing start date
    pub fn build(self) -> Result<ProjectionInput> {
        let time = SafeTimeProvider::new(hourglass_rs::TimeSource::System);
        self.build_with_time(&time)
    }

    /// Build with explicit time provider
    pub fn build_with_time(self, time_provider: &SafeTimeProvider) -> Result<ProjectionInput> {
        let principal = self
            .principal
            .ok_or(ProjectionError::MissingField { field: "principal" })?;
        let mode = self.mode.ok_or(ProjectionError::MissingField { field: "mode" })?;

        let input = ProjectionInput {
            principal,
            mode,
            span: self.span,
            start_date: self
                .start_date
                .unwrap_or_else(|| time_provider.now().date_naive()),
            trading_days: self.trading_days,
            contribution: self.contribution,
        };

        input.validate()?;
        Ok(input)
    }
}

impl Default for ProjectionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
