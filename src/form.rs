//! Lenient mapping from the web calculator form to a `ProjectionInput`.
//!
//! Form values arrive as JSON strings or numbers. Nothing in here rejects a
//! value: anything unparseable or negative becomes zero and the reinvest rate
//! is clamped. Only malformed JSON is an error.

use std::str::FromStr;

use chrono::NaiveDate;
use hourglass_rs::SafeTimeProvider;
use log::warn;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::{TradingDayPolicy, WeekdaySet};
use crate::config::{CalculationMode, ProjectionInput, Span};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::interest::CompoundingFrequency;
use crate::types::{ContributionFrequency, ContributionPlan};

/// a form value as posted, text or number
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Number(serde_json::Number),
    Text(String),
    Flag(bool),
}

impl FormValue {
    fn text(&self) -> String {
        match self {
            FormValue::Number(n) => n.to_string(),
            FormValue::Text(s) => s.trim().to_string(),
            FormValue::Flag(b) => b.to_string(),
        }
    }

    fn as_decimal(&self) -> Option<Decimal> {
        let text = self.text();
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .ok()
    }

    fn as_flag(&self) -> bool {
        match self {
            FormValue::Flag(b) => *b,
            FormValue::Number(n) => n.as_f64().map(|v| v != 0.0).unwrap_or(false),
            FormValue::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "yes" | "1"
            ),
        }
    }
}

/// calculator form exactly as the members area posts it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionForm {
    pub principal: Option<FormValue>,
    /// simple, compound, daily or forex
    pub mode: Option<String>,
    /// daily % for simple/daily/forex, annual % for compound
    pub rate: Option<FormValue>,
    pub compounding_frequency: Option<String>,
    pub years: Option<FormValue>,
    pub months: Option<FormValue>,
    pub days: Option<FormValue>,
    /// YYYY-MM-DD
    pub start_date: Option<String>,
    pub all_days: Option<FormValue>,
    /// monday first
    pub trading_days: Vec<FormValue>,
    /// percent, defaults to 100
    pub reinvest_rate: Option<FormValue>,
    /// none, deposit or withdrawal
    pub contribution_type: Option<String>,
    pub contribution_amount: Option<FormValue>,
    pub contribution_frequency: Option<String>,
}

impl ProjectionForm {
    /// parse a posted json body
    pub fn from_json(body: &str) -> Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    /// coerce every field, missing start date taken from `time_provider`
    pub fn into_input(self, time_provider: &SafeTimeProvider) -> ProjectionInput {
        let rate = Rate::from_percentage(non_negative("rate", self.rate.as_ref()));
        let reinvest_rate = reinvest_percentage(self.reinvest_rate.as_ref());

        let mode = match normalized(self.mode.as_deref()).as_str() {
            "simple" => CalculationMode::Simple { daily_rate: rate },
            "compound" => CalculationMode::Compound {
                annual_rate: rate,
                frequency: compounding_frequency(self.compounding_frequency.as_deref()),
            },
            "forex" => CalculationMode::Forex {
                daily_rate: rate,
                reinvest_rate,
            },
            other => {
                if !other.is_empty() && other != "daily" {
                    warn!("unknown calculation mode {:?}, using daily", other);
                }
                CalculationMode::Daily {
                    daily_rate: rate,
                    reinvest_rate,
                }
            }
        };

        let span = Span::new(
            whole_number("years", self.years.as_ref()),
            whole_number("months", self.months.as_ref()),
            whole_number("days", self.days.as_ref()),
        );

        let all_days = self.all_days.as_ref().map(FormValue::as_flag).unwrap_or(false);
        let trading_days = if all_days || self.trading_days.is_empty() {
            TradingDayPolicy::AllDays
        } else {
            let mut flags = [false; 7];
            for (flag, value) in flags.iter_mut().zip(self.trading_days.iter()) {
                *flag = value.as_flag();
            }
            TradingDayPolicy::Weekdays(WeekdaySet::from_flags(flags))
        };

        let amount = Money::from_decimal(non_negative("contribution_amount", self.contribution_amount.as_ref()));
        let frequency = contribution_frequency(self.contribution_frequency.as_deref());
        let contribution = match normalized(self.contribution_type.as_deref()).as_str() {
            "deposit" => ContributionPlan::deposit(amount, frequency),
            "withdrawal" => ContributionPlan::withdrawal(amount, frequency),
            _ => ContributionPlan::None,
        };

        ProjectionInput {
            principal: Money::from_decimal(non_negative("principal", self.principal.as_ref())),
            mode,
            span,
            start_date: start_date(self.start_date.as_deref(), time_provider),
            trading_days,
            contribution,
        }
    }
}

fn normalized(value: Option<&str>) -> String {
    value
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
        .replace(['-', ' '], "_")
}

/// parsed value, zero when missing, garbage or negative
fn non_negative(field: &str, value: Option<&FormValue>) -> Decimal {
    let Some(value) = value else {
        return Decimal::ZERO;
    };
    match value.as_decimal() {
        Some(d) if d >= Decimal::ZERO => d,
        Some(d) => {
            warn!("negative {} {} coerced to 0", field, d);
            Decimal::ZERO
        }
        None => {
            warn!("unparseable {} {:?} coerced to 0", field, value.text());
            Decimal::ZERO
        }
    }
}

fn whole_number(field: &str, value: Option<&FormValue>) -> u32 {
    non_negative(field, value).trunc().to_u32().unwrap_or(u32::MAX)
}

fn reinvest_percentage(value: Option<&FormValue>) -> Rate {
    match value {
        None => Rate::ONE,
        Some(_) => Rate::from_percentage(non_negative("reinvest_rate", value)).clamp_unit(),
    }
}

fn compounding_frequency(value: Option<&str>) -> CompoundingFrequency {
    match normalized(value).as_str() {
        "annually" | "annual" | "yearly" => CompoundingFrequency::Annually,
        "semi_annually" | "semiannually" | "semi_annual" => CompoundingFrequency::SemiAnnually,
        "quarterly" => CompoundingFrequency::Quarterly,
        "daily" => CompoundingFrequency::Daily,
        _ => CompoundingFrequency::Monthly,
    }
}

fn contribution_frequency(value: Option<&str>) -> ContributionFrequency {
    match normalized(value).as_str() {
        "daily" => ContributionFrequency::Daily,
        "weekly" => ContributionFrequency::Weekly,
        _ => ContributionFrequency::Monthly,
    }
}

fn start_date(value: Option<&str>, time_provider: &SafeTimeProvider) -> NaiveDate {
    let today = || time_provider.now().date_naive();
    match value.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => NaiveDate::parse_from_str(text, "%Y-%m-%d").unwrap_or_else(|_| {
            warn!("invalid start date {:?}, using today", text);
            today()
        }),
        None => today(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project;
    use chrono::{TimeZone, Utc};
    use hourglass_rs::TimeSource;
    use rust_decimal_macros::dec;

    fn test_time() -> SafeTimeProvider {
        SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 5, 6, 12, 0, 0).unwrap()
        ))
    }

    #[test]
    fn test_full_form() {
        let form = ProjectionForm::from_json(
            r#"{
                "principal": "3000",
                "mode": "FOREX",
                "rate": 1.3,
                "days": "60",
                "start_date": "2024-01-01",
                "trading_days": [true, true, true, true, true, false, false],
                "reinvest_rate": "80",
                "contribution_type": "deposit",
                "contribution_amount": 25,
                "contribution_frequency": "weekly"
            }"#,
        )
        .unwrap();

        let input = form.into_input(&test_time());

        assert_eq!(input.principal, Money::from_major(3_000));
        assert_eq!(
            input.mode,
            CalculationMode::Forex {
                daily_rate: Rate::from_percentage(dec!(1.3)),
                reinvest_rate: Rate::from_percentage(dec!(80)),
            }
        );
        assert_eq!(input.total_days(), 60);
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(input.trading_days, TradingDayPolicy::Weekdays(WeekdaySet::monday_to_friday()));
        assert_eq!(
            input.contribution,
            ContributionPlan::deposit(Money::from_major(25), ContributionFrequency::Weekly)
        );
    }

    #[test]
    fn test_garbage_and_negatives_become_zero() {
        let form = ProjectionForm::from_json(
            r#"{"principal": "abc", "rate": "-4", "years": "-2", "months": "x", "days": "10.9", "mode": "simple"}"#,
        )
        .unwrap();

        let input = form.into_input(&test_time());

        assert_eq!(input.principal, Money::ZERO);
        assert_eq!(input.mode.rate(), Rate::ZERO);
        assert_eq!(input.span, Span::new(0, 0, 10));
    }

    #[test]
    fn test_reinvest_rate_defaults_and_clamps() {
        let time = test_time();

        let input = ProjectionForm::from_json(r#"{"mode": "daily"}"#).unwrap().into_input(&time);
        assert_eq!(input.mode.reinvest_rate(), Some(Rate::ONE));

        let input = ProjectionForm::from_json(r#"{"mode": "daily", "reinvest_rate": 250}"#)
            .unwrap()
            .into_input(&time);
        assert_eq!(input.mode.reinvest_rate(), Some(Rate::ONE));

        let input = ProjectionForm::from_json(r#"{"mode": "daily", "reinvest_rate": "-10"}"#)
            .unwrap()
            .into_input(&time);
        assert_eq!(input.mode.reinvest_rate(), Some(Rate::ZERO));
    }

    #[test]
    fn test_defaults() {
        let input = ProjectionForm::default().into_input(&test_time());

        assert!(matches!(input.mode, CalculationMode::Daily { .. }));
        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
        assert_eq!(input.trading_days, TradingDayPolicy::AllDays);
        assert_eq!(input.contribution, ContributionPlan::None);

        // an empty form still projects
        let result = project(&input);
        assert_eq!(result.final_value, Money::ZERO);
        assert_eq!(result.series.len(), 1);
    }

    #[test]
    fn test_invalid_start_date_uses_clock() {
        let input = ProjectionForm::from_json(r#"{"start_date": "31/12/2024"}"#)
            .unwrap()
            .into_input(&test_time());

        assert_eq!(input.start_date, NaiveDate::from_ymd_opt(2024, 5, 6).unwrap());
    }

    #[test]
    fn test_compound_frequency_strings() {
        let time = test_time();
        let parse = |freq: &str| {
            let body = format!(r#"{{"mode": "compound", "rate": "6", "compounding_frequency": "{}"}}"#, freq);
            match ProjectionForm::from_json(&body).unwrap().into_input(&time).mode {
                CalculationMode::Compound { frequency, .. } => frequency,
                other => panic!("unexpected mode {:?}", other),
            }
        };

        assert_eq!(parse("SEMI_ANNUALLY"), CompoundingFrequency::SemiAnnually);
        assert_eq!(parse("semi-annually"), CompoundingFrequency::SemiAnnually);
        assert_eq!(parse("quarterly"), CompoundingFrequency::Quarterly);
        assert_eq!(parse("ANNUALLY"), CompoundingFrequency::Annually);
        assert_eq!(parse("daily"), CompoundingFrequency::Daily);
        assert_eq!(parse("fortnightly"), CompoundingFrequency::Monthly);
    }

    #[test]
    fn test_all_days_flag_overrides_weekdays() {
        let input = ProjectionForm::from_json(
            r#"{"all_days": "on", "trading_days": ["1", "0", "0", "0", "0", "0", "0"]}"#,
        )
        .unwrap()
        .into_input(&test_time());

        assert_eq!(input.trading_days, TradingDayPolicy::AllDays);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(ProjectionForm::from_json("{not json").is_err());
    }

    #[test]
    fn test_scientific_notation() {
        let input = ProjectionForm::from_json(r#"{"principal": "1e3"}"#)
            .unwrap()
            .into_input(&test_time());

        assert_eq!(input.principal, Money::from_major(1_000));
    }
}
