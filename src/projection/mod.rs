pub mod builder;
pub mod metrics;
pub mod sampling;

use chrono::{Days, NaiveDate};
use log::{debug, warn};

use crate::calendar::TradingCalendar;
use crate::config::{CalculationMode, ProjectionInput, SERIES_SAMPLES};
use crate::errors::{ProjectionError, Result};
use crate::interest::{AccrualModel, CompoundAccrual, ReinvestingAccrual, SimpleAccrual};
use crate::state::ProjectionState;
use crate::types::{ProjectionResult, SeriesPoint};

pub use builder::ProjectionBuilder;
pub use metrics::{effective_annual_yield, percentage_profit, ProjectionMetrics};
pub use sampling::SeriesSampler;

/// run a projection, never fails
///
/// Out-of-range inputs are coerced. If the balance leaves the decimal range
/// the result degrades to the principal alone.
pub fn project(input: &ProjectionInput) -> ProjectionResult {
    match try_project(input) {
        Ok(result) => result,
        Err(err) => {
            warn!("projection fell back to principal only: {}", err);
            ProjectionResult::degenerate(input.principal.floor_zero(), input.start_date)
        }
    }
}

/// run a projection, reporting arithmetic overflow
pub fn try_project(input: &ProjectionInput) -> Result<ProjectionResult> {
    let input = input.normalized();
    let total_days = input.total_days();

    if total_days == 0 {
        debug!("zero-day projection, returning principal");
        return Ok(ProjectionResult::degenerate(input.principal, input.start_date));
    }

    let end_date = input
        .start_date
        .checked_add_days(Days::new(total_days as u64))
        .ok_or_else(|| ProjectionError::InvalidDate {
            message: format!("{} + {} days is out of range", input.start_date, total_days),
        })?;

    let principal = input.principal;
    match input.mode {
        CalculationMode::Simple { daily_rate } => {
            walk(SimpleAccrual::new(principal, daily_rate)?, &input, total_days, end_date)
        }
        CalculationMode::Compound { annual_rate, frequency } => walk(
            CompoundAccrual::new(principal, annual_rate, frequency, input.contribution),
            &input,
            total_days,
            end_date,
        ),
        CalculationMode::Daily { daily_rate, reinvest_rate } => walk(
            ReinvestingAccrual::daily(principal, daily_rate, reinvest_rate, input.contribution),
            &input,
            total_days,
            end_date,
        ),
        CalculationMode::Forex { daily_rate, reinvest_rate } => walk(
            ReinvestingAccrual::forex(principal, daily_rate, reinvest_rate, input.contribution),
            &input,
            total_days,
            end_date,
        ),
    }
}

/// drive a balance model over every calendar day of the span
fn walk<M: AccrualModel>(
    mut model: M,
    input: &ProjectionInput,
    total_days: u32,
    end_date: NaiveDate,
) -> Result<ProjectionResult> {
    debug!(
        "projecting {} over {} days from {} using {}",
        input.principal,
        total_days,
        input.start_date,
        model.calculation_method()
    );

    let sampler = SeriesSampler::new(total_days, SERIES_SAMPLES);
    let mut series = Vec::with_capacity(sampler.capacity());
    series.push(series_point(0, input.start_date, model.settle()?));

    let mut trading_days_count = 0;
    for day in TradingCalendar::new(input.trading_days, input.start_date, total_days) {
        if day.is_trading {
            trading_days_count += 1;
        }
        model.accrue_day(&day)?;

        if sampler.includes(day.day) {
            // points are taken at the end of the day
            let date = day.date.succ_opt().unwrap_or(end_date);
            series.push(series_point(day.day, date, model.settle()?));
        }
    }

    debug_assert_eq!(
        trading_days_count,
        input.trading_days.count_trading_days(input.start_date, total_days)
    );

    let state = *model.settle()?;
    let final_value = state.total_value();
    let total_contributions = state.net_contributions();
    let metrics = ProjectionMetrics::calculate(final_value, state.principal, total_contributions, total_days);

    debug!(
        "projection finished: final value {}, {} {} over {} trading days",
        final_value,
        state.total_interest,
        input.mode.gain_label(),
        trading_days_count
    );

    Ok(ProjectionResult {
        principal: state.principal,
        final_value,
        total_interest: state.total_interest,
        total_contributions,
        total_deposits: state.total_deposits,
        total_withdrawals: state.total_withdrawals,
        withdrawn_profit: state.withdrawn_profit,
        percentage_profit: metrics.percentage_profit,
        effective_annual_yield: metrics.effective_annual_yield,
        trading_days_count,
        total_calendar_days: total_days,
        start_date: input.start_date,
        end_date,
        series,
    })
}

fn series_point(day: u32, date: NaiveDate, state: &ProjectionState) -> SeriesPoint {
    let balance = state.total_value();
    let principal_component = state.principal_component();
    SeriesPoint {
        day,
        date,
        balance,
        principal_component,
        interest_component: balance - principal_component,
    }
}
