//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    345 × 0.12 = 41.4 ... but 0.1 + 0.2 = 0.30000000000000004           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer centavos                                         │
//! │    34500 centavos × 1200 bps / 10000 = 4140 centavos (₱41.40)          │
//! │    Screen, print and CSV all read the same integers                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vendure_core::money::Money;
//!
//! let price = Money::from_cents(15000); // ₱150.00
//! let line = price * 2;                 // ₱300.00
//! assert_eq!(line.format_with("₱"), "₱300.00");
//!
//! // User input is parsed, never converted from floats
//! let cash = Money::parse("cash", "400").unwrap();
//! assert_eq!(cash.cents(), 40000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (centavos).
///
/// ## Design Decisions
/// - **i64 (signed)**: change can be negative while the cashier is still
///   typing the tendered amount
/// - **Single field tuple struct**: zero-cost abstraction over i64
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from centavos.
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Returns the value in centavos.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit portion (truncated toward zero).
    #[inline]
    pub const fn whole(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Calculates tax on this amount, rounding half up to the centavo.
    ///
    /// ## Implementation
    /// Integer math: `(amount × bps + 5000) / 10000`. The +5000 is the 0.5
    /// rounding term, so for non-negative amounts this equals
    /// `round(amount × rate, 2)`.
    ///
    /// ## Example
    /// ```rust
    /// use vendure_core::money::Money;
    /// use vendure_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(34500); // ₱345.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1200));
    /// assert_eq!(tax.cents(), 4140); // ₱41.40
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large ledgers from overflowing the intermediate product
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents.clamp(i64::MIN as i128, i64::MAX as i128) as i64)
    }

    /// Multiplies money by a quantity, saturating at the i64 bounds.
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a currency symbol and two decimals.
    ///
    /// ```rust
    /// use vendure_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1360).format_with("₱"), "₱13.60");
    /// assert_eq!(Money::from_cents(-8640).format_with("₱"), "-₱86.40");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.whole().abs(),
            self.cents_part()
        )
    }

    /// Parses a user-typed decimal amount into Money.
    ///
    /// ## Accepted Input
    /// ```text
    /// "400"     → 40000     "13.6"  → 1360     ".5" → 50
    /// "13.60"   → 1360      "5."    → 500
    ///
    /// Rejected: "", "-5", "+5", "1e3", "12.345", "abc", "."
    /// ```
    ///
    /// `field` names the input in the returned error.
    pub fn parse(field: &str, input: &str) -> Result<Money, ValidationError> {
        let input = input.trim();

        if input.is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }

        let (whole, frac) = input.split_once('.').unwrap_or((input, ""));

        if whole.is_empty() && frac.is_empty() {
            return Err(ValidationError::invalid_format(field, "not a number"));
        }

        if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::invalid_format(field, "not a number"));
        }

        if frac.len() > 2 {
            return Err(ValidationError::invalid_format(
                field,
                "at most two decimal places",
            ));
        }

        let whole_value: i64 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| ValidationError::invalid_format(field, "amount too large"))?
        };

        let frac_value: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().unwrap_or(0) * 10,
            _ => frac.parse::<i64>().unwrap_or(0),
        };

        whole_value
            .checked_mul(100)
            .and_then(|cents| cents.checked_add(frac_value))
            .map(Money)
            .ok_or_else(|| ValidationError::invalid_format(field, "amount too large"))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Plain two-decimal rendering without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with(""))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Operators saturate at the i64 bounds instead of wrapping or panicking.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
