//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    1.19 + 1.89 = 3.0799999999999996  ❌ WRONG!                          │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    119 + 189 = 308 cents = €3.08                                       │
//! │                                                                         │
//! │  Decimal text ("3.50") is parsed straight into cents, never via f64.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use grocery_core::money::Money;
//!
//! let price = Money::from_cents(119); // €1.19
//! let parsed: Money = "1.19".parse().unwrap();
//! assert_eq!(price, parsed);
//!
//! // Line total for 3 pieces
//! assert_eq!(price.checked_mul(3), Some(Money::from_cents(357)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: negative values are representable so validation can
///   reject them explicitly instead of silently wrapping
/// - **Single field tuple struct**: Zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use grocery_core::money::Money;
    ///
    /// let price = Money::from_cents(249); // Represents €2.49
    /// assert_eq!(price.cents(), 249);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (euros) portion.
    #[inline]
    pub const fn euros(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies by a piece count, `None` on overflow.
    #[inline]
    pub const fn checked_mul(self, amount: i64) -> Option<Self> {
        match self.0.checked_mul(amount) {
            Some(cents) => Some(Money(cents)),
            None => None,
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount as `€1.19`.
///
/// ## Note
/// This is for logs and the CLI. Localized front ends format from
/// [`Money::cents`] themselves.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}€{}.{:02}", sign, self.euros().abs(), self.cents_part())
    }
}

/// Parses decimal text such as `3.50`, `3,5`, `3` or `-1.00`.
///
/// At most two decimals are accepted; the value is never routed
/// through floating point.
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: reason.to_string(),
        };

        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (major, minor) = digits
            .split_once(|c: char| c == '.' || c == ',')
            .unwrap_or((digits, ""));

        if major.is_empty() && minor.is_empty() {
            return Err(invalid("expected a decimal amount such as 3.50"));
        }
        if !major.chars().all(|c| c.is_ascii_digit()) || !minor.chars().all(|c| c.is_ascii_digit())
        {
            return Err(invalid("expected a decimal amount such as 3.50"));
        }
        if minor.len() > 2 {
            return Err(invalid("at most two decimals are allowed"));
        }

        let too_large = || invalid("amount is too large");
        let major: i64 = if major.is_empty() {
            0
        } else {
            major.parse().map_err(|_| too_large())?
        };
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().map_err(|_| too_large())? * 10,
            _ => minor.parse().map_err(|_| too_large())?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(too_large)?;

        Ok(Money(if negative { -cents } else { cents }))
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.euros(), 10);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_cents(119).to_string(), "€1.19");
        assert_eq!(Money::from_cents(500).to_string(), "€5.00");
        assert_eq!(Money::from_cents(-550).to_string(), "-€5.50");
        assert_eq!(Money::zero().to_string(), "€0.00");
    }

    #[test]
    fn test_parse_decimal_text() {
        assert_eq!("3.50".parse::<Money>().unwrap().cents(), 350);
        assert_eq!("3,5".parse::<Money>().unwrap().cents(), 350);
        assert_eq!("3".parse::<Money>().unwrap().cents(), 300);
        assert_eq!(".99".parse::<Money>().unwrap().cents(), 99);
        assert_eq!(" 1.19 ".parse::<Money>().unwrap().cents(), 119);
        assert_eq!("-1.00".parse::<Money>().unwrap().cents(), -100);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!("".parse::<Money>().is_err());
        assert!("-".parse::<Money>().is_err());
        assert!("abc".parse::<Money>().is_err());
        assert!("1.999".parse::<Money>().is_err());
        assert!("1.2.3".parse::<Money>().is_err());
        assert!("99999999999999999999".parse::<Money>().is_err());

        let err = "1.999".parse::<Money>().unwrap_err();
        assert_eq!(err.code(), "INVALID_FORMAT");
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn test_checked_mul() {
        let melk = Money::from_cents(119);
        assert_eq!(melk.checked_mul(3), Some(Money::from_cents(357)));
        assert_eq!(melk.checked_mul(0), Some(Money::zero()));
        assert_eq!(melk.checked_mul(i64::MAX), None);
    }

    #[test]
    fn test_negative_check() {
        assert!(Money::from_cents(-1).is_negative());
        assert!(!Money::zero().is_negative());
        assert!(!Money::from_cents(1).is_negative());
    }
}
