use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::config::MONEY_DP;

/// Money type with 8 decimal places precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);
    pub const ONE: Money = Money(Decimal::ONE);

    /// create from decimal
    pub fn from_decimal(d: Decimal) -> Self {
        Money(d.round_dp(MONEY_DP))
    }

    /// create from string with exact parsing
    pub fn from_str_exact(s: &str) -> Result<Self, rust_decimal::Error> {
        Ok(Money(Decimal::from_str(s)?.round_dp(MONEY_DP)))
    }

    /// create from integer amount (dollars, euros, etc)
    pub fn from_major(amount: i64) -> Self {
        Money(Decimal::from(amount))
    }

    /// get underlying decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// round to specified decimal places
    pub fn round_dp(&self, dp: u32) -> Self {
        Money(self.0.round_dp(dp))
    }

    /// check if zero
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// minimum of two values
    pub fn min(self, other: Self) -> Self {
        Money(self.0.min(other.0))
    }

    /// maximum of two values
    pub fn max(self, other: Self) -> Self {
        Money(self.0.max(other.0))
    }

    /// negative amounts become zero
    pub fn floor_zero(self) -> Self {
        self.max(Money::ZERO)
    }

    /// apply a rate (e.g. a daily rate of 0.013 to a balance)
    pub fn apply_rate(&self, rate: Rate) -> Self {
        Money((self.0 * rate.as_decimal()).round_dp(MONEY_DP))
    }

    /// addition that reports overflow instead of panicking
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(|d| Money(d.round_dp(MONEY_DP)))
    }

    /// subtraction that reports overflow instead of panicking
    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(|d| Money(d.round_dp(MONEY_DP)))
    }

    /// multiplication that reports overflow instead of panicking
    pub fn checked_mul(self, factor: Decimal) -> Option<Money> {
        self.0.checked_mul(factor).map(|d| Money(d.round_dp(MONEY_DP)))
    }

    /// rate application that reports overflow instead of panicking
    pub fn checked_apply_rate(self, rate: Rate) -> Option<Money> {
        self.checked_mul(rate.as_decimal())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Money {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Money::from_str_exact(s)
    }
}

impl From<Decimal> for Money {
    fn from(d: Decimal) -> Self {
        Money::from_decimal(d)
    }
}

impl From<i32> for Money {
    fn from(i: i32) -> Self {
        Money::from_major(i as i64)
    }
}

impl From<u32> for Money {
    fn from(i: u32) -> Self {
        Money::from_major(i as i64)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money((self.0 + other.0).round_dp(MONEY_DP))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        self.0 = (self.0 + other.0).round_dp(MONEY_DP);
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money((self.0 - other.0).round_dp(MONEY_DP))
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, other: Money) {
        self.0 = (self.0 - other.0).round_dp(MONEY_DP);
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl Mul<Decimal> for Money {
    type Output = Money;

    fn mul(self, other: Decimal) -> Money {
        Money((self.0 * other).round_dp(MONEY_DP))
    }
}

impl Div<Decimal> for Money {
    type Output = Money;

    fn div(self, other: Decimal) -> Money {
        Money((self.0 / other).round_dp(MONEY_DP))
    }
}

/// rate type for interest rates, percentages, and ratios
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Rate(Decimal);

impl Rate {
    pub const ZERO: Rate = Rate(Decimal::ZERO);
    pub const ONE: Rate = Rate(Decimal::ONE);

    /// create from decimal (e.g., 0.013 for 1.3%)
    pub fn from_decimal(d: Decimal) -> Self {
        Rate(d)
    }

    /// create from percentage (e.g., 1.3 for 1.3%)
    pub fn from_percentage(p: Decimal) -> Self {
        Rate(p / Decimal::ONE_HUNDRED)
    }

    /// get as decimal
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// get as percentage
    pub fn as_percentage(&self) -> Decimal {
        self.0 * Decimal::ONE_HUNDRED
    }

    /// check if negative
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// restrict to [0, 1]
    pub fn clamp_unit(self) -> Rate {
        Rate(self.0.max(Decimal::ZERO).min(Decimal::ONE))
    }

    /// negative rates become zero
    pub fn floor_zero(self) -> Rate {
        Rate(self.0.max(Decimal::ZERO))
    }

    /// rate for one of `periods` equal periods (annual 12% over 12 -> 1%)
    pub fn per_period(&self, periods: u32) -> Rate {
        Rate(self.0 / Decimal::from(periods.max(1)))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percentage())
    }
}

impl From<Decimal> for Rate {
    fn from(d: Decimal) -> Self {
        Rate::from_decimal(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_money_precision() {
        let m = Money::from_str_exact("100.123456789").unwrap();
        assert_eq!(m.to_string(), "100.12345679"); // rounded to 8 places
    }

    #[test]
    fn test_apply_daily_rate() {
        let balance = Money::from_major(3_000);
        let rate = Rate::from_percentage(dec!(1.3));

        assert_eq!(balance.apply_rate(rate), Money::from_major(39));
    }

    #[test]
    fn test_checked_ops_report_overflow() {
        let huge = Money::from_decimal(Decimal::MAX);

        assert!(huge.checked_add(Money::ONE).is_none());
        assert!(huge.checked_mul(dec!(2)).is_none());
        assert_eq!(Money::ONE.checked_add(Money::ONE), Some(Money::from_major(2)));
    }

    #[test]
    fn test_floor_zero() {
        assert_eq!(Money::from_major(-5).floor_zero(), Money::ZERO);
        assert_eq!(Money::from_major(5).floor_zero(), Money::from_major(5));
        assert!(!Money::ZERO.is_negative());
    }

    #[test]
    fn test_rate_conversions() {
        let rate = Rate::from_percentage(dec!(12));

        assert_eq!(rate.as_decimal(), dec!(0.12));
        assert_eq!(rate.per_period(12).as_decimal(), dec!(0.01));
        assert_eq!(rate.as_percentage(), dec!(12));
    }

    #[test]
    fn test_rate_clamp() {
        assert_eq!(Rate::from_percentage(dec!(150)).clamp_unit(), Rate::ONE);
        assert_eq!(Rate::from_percentage(dec!(-5)).clamp_unit(), Rate::ZERO);
        assert_eq!(Rate::from_percentage(dec!(-5)).floor_zero(), Rate::ZERO);
    }
}
