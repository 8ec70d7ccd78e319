//! Price type for representing monetary values.
//!
//! Uses a cents-based integer representation so cart totals are exact,
//! while the wire format stays a plain JSON number (`"price": 5.5`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

/// Display symbol. The storefront is single-currency.
pub const CURRENCY_SYMBOL: &str = "$";

const CENTS_PER_UNIT: i64 = 100;

/// Largest price, in cents, that survives the trip through a JSON number.
///
/// Decoding computes `(cents / 100) * 100` in f64. Below 2^50 the rounding
/// error of that trip stays under a quarter cent, so every price decodes to
/// the exact cents it was saved with.
pub const MAX_CENTS: i64 = 1 << 50;

/// A non-negative price of at most [`MAX_CENTS`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "f64", into = "f64")]
pub struct Price {
    cents: i64,
}

/// Error returned when a decimal amount cannot be a price.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PriceError {
    /// Amount is negative.
    #[error("price cannot be negative: {0}")]
    Negative(f64),

    /// Amount is NaN, infinite, or above [`MAX_CENTS`].
    #[error("price is not representable: {0}")]
    NotRepresentable(f64),
}

impl Price {
    /// A zero price.
    pub const ZERO: Price = Price { cents: 0 };

    /// Create a price from cents.
    ///
    /// Returns `None` for negative amounts and amounts above [`MAX_CENTS`].
    pub const fn from_cents(cents: i64) -> Option<Self> {
        if cents < 0 || cents > MAX_CENTS {
            None
        } else {
            Some(Self { cents })
        }
    }

    /// Create a price from a decimal amount, rounding to the nearest cent.
    ///
    /// ```
    /// use storefront_cart::money::Price;
    /// let price = Price::from_decimal(49.99).unwrap();
    /// assert_eq!(price.cents(), 4999);
    /// ```
    pub fn from_decimal(amount: f64) -> Result<Self, PriceError> {
        if !amount.is_finite() {
            return Err(PriceError::NotRepresentable(amount));
        }
        if amount < 0.0 {
            return Err(PriceError::Negative(amount));
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents > MAX_CENTS as f64 {
            return Err(PriceError::NotRepresentable(amount));
        }
        Ok(Self {
            cents: cents as i64,
        })
    }

    /// Amount in cents.
    pub const fn cents(&self) -> i64 {
        self.cents
    }

    /// Check if this is zero.
    pub const fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / CENTS_PER_UNIT as f64
    }

    /// Add, returning `None` above [`MAX_CENTS`].
    pub fn checked_add(self, other: Price) -> Option<Price> {
        self.cents
            .checked_add(other.cents)
            .and_then(Price::from_cents)
    }

    /// Add, clamping at [`MAX_CENTS`].
    pub fn saturating_add(self, other: Price) -> Price {
        Price {
            cents: (self.cents + other.cents).min(MAX_CENTS),
        }
    }

    /// Format without symbol (e.g., "49.99").
    pub fn display_amount(&self) -> String {
        format!(
            "{}.{:02}",
            self.cents / CENTS_PER_UNIT,
            self.cents % CENTS_PER_UNIT
        )
    }
}

impl TryFrom<f64> for Price {
    type Error = PriceError;

    fn try_from(amount: f64) -> Result<Self, Self::Error> {
        Price::from_decimal(amount)
    }
}

impl From<Price> for f64 {
    fn from(price: Price) -> f64 {
        price.to_decimal()
    }
}

impl Add for Price {
    type Output = Price;

    fn add(self, other: Price) -> Price {
        self.saturating_add(other)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Price::saturating_add)
    }
}

impl<'a> Sum<&'a Price> for Price {
    fn sum<I: Iterator<Item = &'a Price>>(iter: I) -> Price {
        iter.copied().sum()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", CURRENCY_SYMBOL, self.display_amount())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_from_cents() {
        assert_eq!(Price::from_cents(4999).unwrap().cents(), 4999);
        assert!(Price::from_cents(-1).is_none());
    }

    #[test]
    fn test_price_from_decimal() {
        assert_eq!(Price::from_decimal(49.99).unwrap().cents(), 4999);
        assert_eq!(Price::from_decimal(5.5).unwrap().cents(), 550);
        assert_eq!(Price::from_decimal(0.0).unwrap(), Price::ZERO);
    }

    #[test]
    fn test_price_rejects_negative() {
        assert_eq!(Price::from_decimal(-0.5), Err(PriceError::Negative(-0.5)));
    }

    #[test]
    fn test_price_rejects_non_finite() {
        assert!(matches!(
            Price::from_decimal(f64::NAN),
            Err(PriceError::NotRepresentable(_))
        ));
        assert!(Price::from_decimal(f64::INFINITY).is_err());
        assert!(Price::from_decimal(1e300).is_err());
    }

    #[test]
    fn test_price_display() {
        assert_eq!(Price::from_decimal(15.5).unwrap().to_string(), "$15.50");
        assert_eq!(Price::from_cents(7).unwrap().to_string(), "$0.07");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_price_sum_is_exact() {
        let prices = [
            Price::from_decimal(0.1).unwrap(),
            Price::from_decimal(0.2).unwrap(),
        ];
        let total: Price = prices.iter().sum();
        assert_eq!(total.cents(), 30);
        assert_eq!(total.to_decimal(), 0.3);
    }

    #[test]
    fn test_price_saturates() {
        let max = Price::from_cents(MAX_CENTS).unwrap();
        assert_eq!(max + Price::from_cents(1).unwrap(), max);
        assert!(max.checked_add(Price::from_cents(1).unwrap()).is_none());
    }

    #[test]
    fn test_price_upper_bound() {
        assert!(Price::from_cents(MAX_CENTS).is_some());
        assert!(Price::from_cents(MAX_CENTS + 1).is_none());
        assert!(Price::from_cents(i64::MAX).is_none());

        let max_decimal = MAX_CENTS as f64 / 100.0;
        assert_eq!(Price::from_decimal(max_decimal).unwrap().cents(), MAX_CENTS);
        assert!(matches!(
            Price::from_decimal(max_decimal * 2.0),
            Err(PriceError::NotRepresentable(_))
        ));
    }

    #[test]
    fn test_price_json_roundtrip_near_bound() {
        for cents in [
            MAX_CENTS,
            MAX_CENTS - 1,
            MAX_CENTS - 99,
            MAX_CENTS / 3,
            (1 << 40) + 7,
            4999,
        ] {
            let price = Price::from_cents(cents).unwrap();
            let json = serde_json::to_string(&price).unwrap();
            let back: Price = serde_json::from_str(&json).unwrap();
            assert_eq!(back, price, "cents {} via {}", cents, json);
        }
    }

    #[test]
    fn test_price_json_is_plain_number() {
        let price = Price::from_decimal(10.0).unwrap();
        assert_eq!(serde_json::to_string(&price).unwrap(), "10.0");

        let parsed: Price = serde_json::from_str("5.5").unwrap();
        assert_eq!(parsed.cents(), 550);

        let parsed: Price = serde_json::from_str("120").unwrap();
        assert_eq!(parsed.cents(), 12000);
    }

    #[test]
    fn test_price_json_rejects_negative() {
        assert!(serde_json::from_str::<Price>("-3").is_err());
    }
}
