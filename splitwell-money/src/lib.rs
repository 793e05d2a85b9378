//! Fixed-point money for the settlement engine.
//!
//! Every monetary value is an `i64` scaled by [`SCALE`] (four implied decimal
//! digits). Exchange rates use the same scale. Display rounds to two decimals.

#![warn(clippy::uninlined_format_args)]

mod split;

pub use split::{split_by_percentage, split_equal};

use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};
use thiserror::Error;

/// Scale factor of every scaled integer.
pub const SCALE: i64 = 10_000;
/// Number of implied decimal digits carried by [`SCALE`].
pub const SCALE_DIGITS: u32 = 4;

const DISPLAY_DIGITS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoneyError {
    #[error("value must be a finite number")]
    InvalidNumber,
    #[error("negative value is not allowed")]
    NegativeNotAllowed,
    #[error("division by zero")]
    DivisionByZero,
    #[error("share count must be positive")]
    ZeroShares,
    #[error("percentage at position {index} must be within 0..=100")]
    PercentageOutOfRange { index: usize },
    #[error("percentages sum to more than 100")]
    PercentageSumExceeds100,
    #[error("scaled value does not fit in 64 bits")]
    Overflow,
}

/// A monetary amount in scaled units (`1.0000` == `Money::from_scaled(10_000)`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Self = Self(0);

    pub const fn from_scaled(value: i64) -> Self {
        Self(value)
    }

    pub const fn scaled(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Exact decimal value of this amount.
    pub fn as_decimal(self) -> Decimal {
        Decimal::new(self.0, SCALE_DIGITS)
    }

    /// Rounds `value` to four decimals, half away from zero.
    pub fn from_decimal(value: Decimal) -> Result<Self, MoneyError> {
        scale_decimal(value).map(Self)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .as_decimal()
            .round_dp_with_strategy(DISPLAY_DIGITS, RoundingStrategy::MidpointAwayFromZero);
        // -0.0001 rounds to a signed zero
        let rounded = if rounded.is_zero() {
            Decimal::ZERO
        } else {
            rounded
        };
        write!(f, "{rounded:.2}")
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
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
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Exchange rate to the main currency, scaled like [`Money`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rate(i64);

impl Rate {
    pub const IDENTITY: Self = Self(SCALE);

    pub const fn from_scaled(value: i64) -> Self {
        Self(value)
    }

    pub const fn scaled(self) -> i64 {
        self.0
    }

    pub fn from_f64(value: f64) -> Result<Self, MoneyError> {
        to_scaled(value).map(|money| Self(money.0))
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Decimal::new(self.0, SCALE_DIGITS))
    }
}

/// Converts a non-negative decimal into scaled units, rounding to the nearest unit.
pub fn to_scaled(value: f64) -> Result<Money, MoneyError> {
    if !value.is_finite() {
        return Err(MoneyError::InvalidNumber);
    }
    if value < 0.0 {
        return Err(MoneyError::NegativeNotAllowed);
    }
    let decimal = Decimal::from_f64(value).ok_or(MoneyError::Overflow)?;
    Money::from_decimal(decimal)
}

/// Applies `rate` to `value`: `value * rate / SCALE`, truncated toward zero.
///
/// The product is formed in 128 bits, so only a result outside `i64` fails.
pub fn multiply_rate(value: Money, rate: Rate) -> Result<Money, MoneyError> {
    let product = i128::from(value.0) * i128::from(rate.0);
    let scaled = product / i128::from(SCALE);
    i64::try_from(scaled)
        .map(Money)
        .map_err(|_| MoneyError::Overflow)
}

/// Truncating division by a plain integer.
pub fn divide(value: Money, divisor: i64) -> Result<Money, MoneyError> {
    if divisor == 0 {
        return Err(MoneyError::DivisionByZero);
    }
    value
        .0
        .checked_div(divisor)
        .map(Money)
        .ok_or(MoneyError::Overflow)
}

fn scale_decimal(value: Decimal) -> Result<i64, MoneyError> {
    value
        .checked_mul(Decimal::from(SCALE))
        .ok_or(MoneyError::Overflow)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(MoneyError::Overflow)
}
