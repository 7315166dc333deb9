//! Type-safe price representation using decimal arithmetic.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A price with currency information.
///
/// Amounts are stored in the currency's standard unit. The catalog and all
/// order math run in Vietnamese dong, so `VND` is the default currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit.
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in Vietnamese dong.
    #[must_use]
    pub fn vnd(amount: impl Into<Decimal>) -> Self {
        Self::new(amount.into(), CurrencyCode::VND)
    }

    /// Multiply the unit price by a quantity, keeping the currency.
    #[must_use]
    pub fn times(&self, quantity: u32) -> Self {
        Self::new(self.amount * Decimal::from(quantity), self.currency_code)
    }

    /// Whether the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

impl std::ops::Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        // Single-currency system; mixing currencies is a programming error.
        debug_assert_eq!(self.currency_code, rhs.currency_code);
        Self::new(self.amount + rhs.amount, self.currency_code)
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code.code())
    }
}

/// ISO 4217 currency codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    VND,
    USD,
}

impl CurrencyCode {
    /// The ISO 4217 code as a string.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::VND => "VND",
            Self::USD => "USD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vnd_constructor() {
        let price = Price::vnd(45_000_i64);
        assert_eq!(price.currency_code, CurrencyCode::VND);
        assert_eq!(price.amount, Decimal::from(45_000_i64));
        assert!(price.is_positive());
    }

    #[test]
    fn test_times_and_add() {
        let a = Price::vnd(45_000_i64).times(2);
        let b = Price::vnd(15_000_i64).times(1);
        let subtotal = a + b;
        assert_eq!(subtotal.amount, Decimal::from(105_000_i64));
    }

    #[test]
    fn test_zero_is_not_positive() {
        assert!(!Price::vnd(0_i64).is_positive());
    }

    #[test]
    fn test_display() {
        assert_eq!(Price::vnd(15_000_i64).to_string(), "15000 VND");
    }
}
