use std::{
    fmt::Display,
    iter::Sum,
    ops::{Add, Neg, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};
use sqlx::Type;
use thiserror::Error;

//--------------------------------------       Money         ---------------------------------------------------------
/// A monetary amount in integer cents. All arithmetic in the engine is done in cents so that commission and revenue
/// sums are exact.
#[derive(Debug, Clone, Copy, Default, Type, Ord, PartialOrd, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct Money(i64);

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

#[derive(Debug, Clone, Error)]
#[error("Value cannot be represented as a monetary amount: {0}")]
pub struct MoneyConversionError(String);

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Self(cents)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for Money {}

impl TryFrom<f64> for Money {
    type Error = MoneyConversionError;

    /// Converts an amount in major currency units (e.g. `199.95`) into cents, rounding to the nearest cent.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() {
            return Err(MoneyConversionError(format!("{value} is not a finite number")));
        }
        let cents = (value * 100.0).round();
        if cents.abs() >= i64::MAX as f64 {
            return Err(MoneyConversionError(format!("{value} is too large to represent in cents")));
        }
        #[allow(clippy::cast_possible_truncation)]
        let cents = cents as i64;
        Ok(Self(cents))
    }
}

impl Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{sign}{}.{:02}", (self.0 / 100).abs(), (self.0 % 100).abs())
    }
}

impl Money {
    pub fn value(&self) -> i64 {
        self.0
    }

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// The amount in major currency units, for outward-facing reports.
    pub fn to_major_units(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// The commission owed on this amount at the given rate, rounded to the nearest cent.
    pub fn commission(&self, rate: CommissionRate) -> Money {
        #[allow(clippy::cast_possible_truncation)]
        let cents = (self.0 as f64 * rate.as_fraction()).round() as i64;
        Self(cents)
    }
}

//--------------------------------------   CommissionRate    ---------------------------------------------------------
/// The fraction of an order subtotal owed to the crediting affiliate, e.g. `0.1` for 10%.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct CommissionRate(f64);

#[derive(Debug, Clone, Error)]
#[error("Value is not a valid commission rate: {0}")]
pub struct RateConversionError(String);

impl TryFrom<f64> for CommissionRate {
    type Error = RateConversionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !value.is_finite() || !(0.0..=1.0).contains(&value) {
            return Err(RateConversionError(format!("{value} is not a fraction between 0 and 1")));
        }
        Ok(Self(value))
    }
}

impl Display for CommissionRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}%", self.0 * 100.0)
    }
}

impl CommissionRate {
    /// A whole-percentage rate, usable in const contexts. `from_percentage(10)` is a 10% rate.
    pub const fn from_percentage(percent: u8) -> Self {
        Self(percent as f64 / 100.0)
    }

    pub fn as_fraction(&self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn money_from_major_units() {
        assert_eq!(Money::try_from(199.95).unwrap(), Money::from_cents(19_995));
        assert_eq!(Money::try_from(0.0).unwrap(), Money::from_cents(0));
        assert!(Money::try_from(f64::NAN).is_err());
        assert!(Money::try_from(f64::INFINITY).is_err());
    }

    #[test]
    fn commission_is_exact_for_round_rates() {
        let subtotal = Money::from_cents(20_000);
        let rate = CommissionRate::from_percentage(10);
        assert_eq!(subtotal.commission(rate), Money::from_cents(2_000));
    }

    #[test]
    fn commission_rounds_to_nearest_cent() {
        let subtotal = Money::from_cents(999);
        let rate = CommissionRate::from_percentage(10);
        // 99.9 cents rounds up
        assert_eq!(subtotal.commission(rate), Money::from_cents(100));
    }

    #[test]
    fn rate_bounds() {
        assert!(CommissionRate::try_from(0.1).is_ok());
        assert!(CommissionRate::try_from(1.0).is_ok());
        assert!(CommissionRate::try_from(-0.1).is_err());
        assert!(CommissionRate::try_from(1.5).is_err());
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_cents(19_995).to_string(), "199.95");
        assert_eq!(Money::from_cents(5).to_string(), "0.05");
        assert_eq!(Money::from_cents(-250).to_string(), "-2.50");
    }

    #[test]
    fn money_sums() {
        let total: Money = vec![Money::from_cents(10_000), Money::from_cents(5_000)].into_iter().sum();
        assert_eq!(total, Money::from_cents(15_000));
    }
}
