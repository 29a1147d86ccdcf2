// serialization support for projection results
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::config::{CalculationMode, ProjectionInput};
use crate::decimal::Money;
use crate::interest::CompoundingEngine;
use crate::types::ProjectionResult;

/// display-ready summary of a projection
#[derive(Debug, Serialize)]
pub struct ProjectionView {
    pub mode: String,
    /// "interest" or "profit"
    pub gain_label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub summary: SummaryView,
    pub rates: RateView,
    pub series: Vec<PointView>,
}

#[derive(Debug, Serialize)]
pub struct SummaryView {
    pub principal: Money,
    pub final_value: Money,
    pub total_gain: Money,
    pub total_contributions: Money,
    pub withdrawn_profit: Money,
    pub percentage_profit: Decimal,
    pub effective_annual_yield: Decimal,
    pub trading_days: u32,
    pub calendar_days: u32,
}

#[derive(Debug, Serialize)]
pub struct RateView {
    /// quoted rate, percent
    pub quoted_rate: Decimal,
    /// "daily" or "annual"
    pub quoted_basis: String,
    /// reinvested share of each gain, percent
    pub reinvest_rate: Option<Decimal>,
    /// annual equivalent of a compound nominal rate, percent
    pub nominal_effective_rate: Option<Decimal>,
}

#[derive(Debug, Serialize)]
pub struct PointView {
    pub day: u32,
    pub date: NaiveDate,
    pub balance: Money,
    pub principal: Money,
    pub gain: Money,
}

impl ProjectionView {
    pub fn from_result(input: &ProjectionInput, result: &ProjectionResult) -> Self {
        let mode = input.mode.normalized();
        let (quoted_basis, nominal_effective_rate) = match mode {
            CalculationMode::Compound { annual_rate, frequency } => (
                "annual",
                CompoundingEngine::new(frequency)
                    .effective_annual_rate(annual_rate)
                    .map(|rate| rate.as_percentage().round_dp(2)),
            ),
            _ => ("daily", None),
        };

        ProjectionView {
            mode: mode.name().to_string(),
            gain_label: mode.gain_label().to_string(),
            start_date: result.start_date,
            end_date: result.end_date,
            summary: SummaryView {
                principal: result.principal.round_dp(2),
                final_value: result.final_value.round_dp(2),
                total_gain: result.total_interest.round_dp(2),
                total_contributions: result.total_contributions.round_dp(2),
                withdrawn_profit: result.withdrawn_profit.round_dp(2),
                percentage_profit: result.percentage_profit.round_dp(2),
                effective_annual_yield: result.effective_annual_yield.round_dp(2),
                trading_days: result.trading_days_count,
                calendar_days: result.total_calendar_days,
            },
            rates: RateView {
                quoted_rate: mode.rate().as_percentage().round_dp(4),
                quoted_basis: quoted_basis.to_string(),
                reinvest_rate: mode.reinvest_rate().map(|rate| rate.as_percentage().round_dp(2)),
                nominal_effective_rate,
            },
            series: result
                .series
                .iter()
                .map(|point| PointView {
                    day: point.day,
                    date: point.date,
                    balance: point.balance.round_dp(2),
                    principal: point.principal_component.round_dp(2),
                    gain: point.interest_component.round_dp(2),
                })
                .collect(),
        }
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::TradingDayPolicy;
    use crate::config::Span;
    use crate::decimal::Rate;
    use crate::projection::project;
    use crate::types::ContributionPlan;
    use rust_decimal_macros::dec;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn test_forex_view_uses_profit_label() {
        let input = ProjectionInput::forex_weekdays(
            Money::from_major(3_000),
            Rate::from_percentage(dec!(1.3)),
            Rate::from_percentage(dec!(50)),
            Span::days(30),
            start(),
        );
        let result = project(&input);

        let view = ProjectionView::from_result(&input, &result);

        assert_eq!(view.mode, "forex");
        assert_eq!(view.gain_label, "profit");
        assert_eq!(view.rates.quoted_basis, "daily");
        assert_eq!(view.rates.reinvest_rate, Some(dec!(50)));
        assert_eq!(view.series.len(), result.series.len());
        assert_eq!(view.summary.final_value, result.final_value.round_dp(2));
    }

    #[test]
    fn test_compound_view_reports_effective_rate() {
        let input = ProjectionInput::savings(
            Money::from_major(10_000),
            Rate::from_percentage(dec!(12)),
            Span::years(1),
            start(),
            ContributionPlan::None,
        );
        let result = project(&input);

        let view = ProjectionView::from_result(&input, &result);

        assert_eq!(view.gain_label, "interest");
        assert_eq!(view.rates.quoted_basis, "annual");
        assert_eq!(view.rates.nominal_effective_rate, Some(dec!(12.68)));
        assert_eq!(view.summary.final_value, Money::from_str_exact("11268.25").unwrap());
    }

    #[test]
    fn test_json_output() {
        let input = ProjectionInput {
            principal: Money::from_major(1_000),
            mode: CalculationMode::Simple {
                daily_rate: Rate::from_percentage(dec!(1)),
            },
            span: Span::days(10),
            start_date: start(),
            trading_days: TradingDayPolicy::AllDays,
            contribution: ContributionPlan::None,
        };
        let result = project(&input);
        let view = ProjectionView::from_result(&input, &result);

        let json = view.to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["mode"], "simple");
        assert_eq!(value["start_date"], "2024-01-01");
        assert_eq!(value["end_date"], "2024-01-11");
        assert_eq!(value["summary"]["trading_days"], 10);
        assert_eq!(value["series"].as_array().unwrap().len(), 11);
    }
}
