use log::warn;
use rust_decimal::{Decimal, MathematicalOps};

use crate::config::{DAYS_PER_YEAR, MONEY_DP};
use crate::decimal::Money;

/// summary ratios derived from a finished projection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectionMetrics {
    /// gain over principal, percent
    pub percentage_profit: Decimal,
    /// annualized realized growth, percent
    pub effective_annual_yield: Decimal,
}

impl ProjectionMetrics {
    pub fn calculate(final_value: Money, principal: Money, contributions: Money, days: u32) -> Self {
        Self {
            percentage_profit: percentage_profit(final_value, principal, contributions),
            effective_annual_yield: effective_annual_yield(final_value, principal, contributions, days),
        }
    }
}

/// (final - principal - contributions) / principal x 100, zero without principal
pub fn percentage_profit(final_value: Money, principal: Money, contributions: Money) -> Decimal {
    if principal.is_zero() || principal.is_negative() {
        return Decimal::ZERO;
    }
    let gain = (final_value - principal - contributions).as_decimal();
    gain.checked_div(principal.as_decimal())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .map(|pct| pct.round_dp(MONEY_DP))
        .unwrap_or(Decimal::ZERO)
}

/// ((final / (principal + contributions))^(365 / days) - 1) x 100
///
/// Zero when the span is empty, nothing was invested, or the power does not
/// fit in a decimal.
pub fn effective_annual_yield(final_value: Money, principal: Money, contributions: Money, days: u32) -> Decimal {
    let invested = (principal + contributions).as_decimal();
    if days == 0 || invested <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let ratio = match final_value.as_decimal().checked_div(invested) {
        Some(ratio) => ratio,
        None => return Decimal::ZERO,
    };
    if ratio <= Decimal::ZERO {
        // everything lost
        return -Decimal::ONE_HUNDRED;
    }

    let exponent = Decimal::from(DAYS_PER_YEAR) / Decimal::from(days);
    match ratio
        .checked_powd(exponent)
        .and_then(|growth| (growth - Decimal::ONE).checked_mul(Decimal::ONE_HUNDRED))
    {
        Some(yield_pct) => yield_pct.round_dp(MONEY_DP),
        None => {
            warn!(
                "effective annual yield not representable for growth {} over {} days",
                ratio, days
            );
            Decimal::ZERO
        }
    }
}
