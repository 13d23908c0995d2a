//! Monetary amounts for the storefront core.
//!
//! All currency arithmetic happens in integer minor units (cents) to avoid
//! floating-point drift. Decimal conversion is confined to the parse and
//! display boundary, where amounts are rounded to two decimal places using
//! round-half-up.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use std::str::FromStr;

/// A monetary amount in minor units (e.g., cents).
///
/// Serialized as a bare integer so stored orders never depend on a
/// locale-sensitive decimal representation.
#[derive(
	Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize, Hash,
)]
#[serde(transparent)]
pub struct Money(i64);

/// Errors that can occur when parsing a monetary amount.
#[derive(Debug, thiserror::Error)]
pub enum MoneyError {
	/// The input is not a valid decimal number.
	#[error("Invalid amount: {0}")]
	InvalidAmount(String),
}

impl Money {
	/// A zero amount.
	pub const ZERO: Money = Money(0);

	/// Creates an amount from minor units.
	pub const fn from_minor(minor: i64) -> Self {
		Money(minor)
	}

	/// Returns the amount in minor units.
	pub const fn minor(&self) -> i64 {
		self.0
	}

	/// Returns true if the amount is exactly zero.
	pub const fn is_zero(&self) -> bool {
		self.0 == 0
	}

	/// Returns true if the amount is below zero.
	pub const fn is_negative(&self) -> bool {
		self.0 < 0
	}

	/// Converts a decimal major-unit amount to minor units.
	///
	/// Rounds to two decimal places with round-half-up before scaling, so
	/// `2.505` becomes 251 minor units.
	pub fn from_decimal(amount: Decimal) -> Self {
		let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
		let minor = (rounded * Decimal::ONE_HUNDRED)
			.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
		Money(minor.try_into().unwrap_or(i64::MAX))
	}

	/// Returns the amount as a decimal in major units.
	pub fn to_decimal(&self) -> Decimal {
		Decimal::new(self.0, 2)
	}
}

impl Add for Money {
	type Output = Money;

	fn add(self, rhs: Money) -> Money {
		Money(self.0 + rhs.0)
	}
}

impl AddAssign for Money {
	fn add_assign(&mut self, rhs: Money) {
		self.0 += rhs.0;
	}
}

impl Sub for Money {
	type Output = Money;

	fn sub(self, rhs: Money) -> Money {
		Money(self.0 - rhs.0)
	}
}

impl Mul<u32> for Money {
	type Output = Money;

	fn mul(self, rhs: u32) -> Money {
		Money(self.0 * rhs as i64)
	}
}

impl Sum for Money {
	fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
		iter.fold(Money::ZERO, Add::add)
	}
}

impl fmt::Display for Money {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:.2}", self.to_decimal())
	}
}

impl FromStr for Money {
	type Err = MoneyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let amount =
			Decimal::from_str(s).map_err(|_| MoneyError::InvalidAmount(s.to_string()))?;
		Ok(Money::from_decimal(amount))
	}
}
