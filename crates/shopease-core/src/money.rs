//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A browser cart summing float prices:                                   │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    $55.00 × 10% tax = 5500 × 1000 / 10000 = 550 cents exactly           │
//! │    Anything below a cent is rounded once, at the point it appears       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use shopease_core::money::Money;
//!
//! let price = Money::from_cents(2999); // $29.99
//! let line = price * 2;                // $59.98
//! assert_eq!(line.to_string(), "$59.98");
//!
//! // Prices read back from the storefront's display text
//! assert_eq!(Money::parse("$12.50"), Some(Money::from_cents(1250)));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in cents.
///
/// ## Design Decisions
/// - **i64 (signed)**: Grand totals can dip below zero if a fixed discount
///   outlives the items it was computed from
/// - **Serialized as a bare integer**: persisted JSON stores cents
///
/// ## Where Money Flows
/// ```text
/// LineItem.unit_price ──► line total ──► Cart subtotal ──┬──► tax (10%)
///                                                         ├──► shipping
///                                                         └──► discount
///                                                                │
///                               grand total ◄─────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use shopease_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    ///
    /// Catalog prices are whole-dollar amounts, so this is the usual way to
    /// build them.
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Calculates tax, rounding half a cent up.
    ///
    /// ## Implementation
    /// Integer math: `(amount * rate + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use shopease_core::money::Money;
    /// use shopease_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(5500); // $55.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(1000)); // 10%
    /// assert_eq!(tax.cents(), 550);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        self.percentage(rate.bps())
    }

    /// Returns `bps` basis points of this amount (1000 bps = 10%).
    ///
    /// Used for percentage coupons: `SAVE20` is `subtotal.percentage(2000)`.
    pub fn percentage(&self, bps: u32) -> Money {
        // i128 so a huge cart cannot overflow the intermediate product
        let portion = (self.0 as i128 * bps as i128 + 5000) / 10000;
        Money::from_cents(portion as i64)
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use shopease_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299); // $2.99
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 897);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Parses a displayed price such as `"$12.99"`, `"12.5"` or `"1,299"`.
    ///
    /// ## Rules
    /// - Leading/trailing whitespace and a leading `$` are ignored
    /// - Thousands separators (`,`) are ignored
    /// - At most two fractional digits
    /// - Negative amounts are not prices and return `None`
    pub fn parse(text: &str) -> Option<Money> {
        let cleaned: String = text
            .trim()
            .trim_start_matches('$')
            .chars()
            .filter(|c| *c != ',')
            .collect();

        let (major, minor) = match cleaned.split_once('.') {
            Some((major, minor)) => (major, minor),
            None => (cleaned.as_str(), ""),
        };

        let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
        if major.is_empty() || !all_digits(major) || !all_digits(minor) || minor.len() > 2 {
            return None;
        }

        let major: i64 = major.parse().ok()?;
        let minor: i64 = match minor.len() {
            0 => 0,
            1 => minor.parse::<i64>().ok()? * 10,
            _ => minor.parse().ok()?,
        };

        major.checked_mul(100)?.checked_add(minor).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-style display (`$10.99`). Shopper-facing formatting with thousands
/// separators lives in the storefront config.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_cents_and_dollars() {
        let money = Money::from_cents(1099);
        assert_eq!(money.cents(), 1099);
        assert_eq!(money.dollars(), 10);
        assert_eq!(money.cents_part(), 99);

        assert_eq!(Money::from_dollars(30).cents(), 3000);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let total: Money = vec![a, b, b].into_iter().sum();
        assert_eq!(total.cents(), 2000);
    }

    #[test]
    fn test_ten_percent_tax() {
        let rate = TaxRate::from_bps(1000);
        assert_eq!(Money::from_dollars(30).calculate_tax(rate).cents(), 300);
        assert_eq!(Money::from_dollars(55).calculate_tax(rate).cents(), 550);
        // $10.99 × 10% = 109.9 cents → 110
        assert_eq!(Money::from_cents(1099).calculate_tax(rate).cents(), 110);
    }

    #[test]
    fn test_percentage() {
        let subtotal = Money::from_cents(10000);
        assert_eq!(subtotal.percentage(1000).cents(), 1000);
        assert_eq!(subtotal.percentage(2000).cents(), 2000);
        assert_eq!(Money::zero().percentage(2000), Money::zero());
    }

    #[test]
    fn test_parse_display_prices() {
        assert_eq!(Money::parse("$12.99"), Some(Money::from_cents(1299)));
        assert_eq!(Money::parse(" 9.5 "), Some(Money::from_cents(950)));
        assert_eq!(Money::parse("$1,299"), Some(Money::from_cents(129_900)));
        assert_eq!(Money::parse("15"), Some(Money::from_dollars(15)));

        assert_eq!(Money::parse("Free"), None);
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("$"), None);
        assert_eq!(Money::parse("1.999"), None);
        assert_eq!(Money::parse("-5.00"), None);
    }
}
