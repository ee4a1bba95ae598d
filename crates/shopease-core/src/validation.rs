//! # Validation Module
//!
//! Field rules used by the checkout wizard and the catalog filters.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Host (browser form)                                          │
//! │  ├── Marks required fields, trims input                                │
//! │  └── Formats card number / expiry while typing                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Email / phone shape                                               │
//! │  ├── Card number length + Luhn checksum                                │
//! │  ├── Expiry (month range, not in the past)                             │
//! │  └── CVV, cardholder name, filter bounds                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Wizard step validators (checkout::wizard)                    │
//! │  └── Run every rule and collect all failures                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use shopease_core::validation::{validate_card_number, validate_expiry};
//!
//! assert!(validate_card_number("4532 0151 1283 0366").is_ok());
//!
//! let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
//! assert!(validate_expiry("01/20", today).is_err());
//! ```

use chrono::{Datelike, NaiveDate};

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MIN_PHONE_DIGITS: usize = 10;
const CARD_DIGITS_MIN: usize = 13;
const CARD_DIGITS_MAX: usize = 19;
const MIN_CARDHOLDER_NAME: usize = 3;

// =============================================================================
// Contact Validators
// =============================================================================

/// Validates an email address shape: `local@domain.tld`.
///
/// ## Rules
/// - No whitespace anywhere
/// - Exactly one `@`, with something before it
/// - The domain contains a `.` that is neither its first nor its last char
///
/// ## Example
/// ```rust
/// use shopease_core::validation::validate_email;
///
/// assert!(validate_email("jane@example.com").is_ok());
/// assert!(validate_email("jane@example").is_err());
/// assert!(validate_email("jane doe@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let (local, domain) = email.split_once('@').ok_or(ValidationError::InvalidEmail)?;
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    // Some dot with at least one char on each side
    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    if has_inner_dot {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validates a phone number: digits with common separators.
///
/// ## Rules
/// - Only digits, spaces, `+`, `-`, `(`, `)`
/// - At least 10 digits
///
/// ## Example
/// ```rust
/// use shopease_core::validation::validate_phone;
///
/// assert!(validate_phone("+1 (555) 123-4567").is_ok());
/// assert!(validate_phone("555-1234").is_err());
/// ```
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let allowed = |c: char| c.is_ascii_digit() || matches!(c, ' ' | '+' | '-' | '(' | ')');
    if !phone.chars().all(allowed) {
        return Err(ValidationError::InvalidPhone);
    }

    let digits = phone.chars().filter(char::is_ascii_digit).count();
    if digits < MIN_PHONE_DIGITS {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

// =============================================================================
// Payment Card Validators
// =============================================================================

/// Strips the spaces and dashes a shopper (or the input formatter) adds.
pub fn normalize_card_number(card_number: &str) -> String {
    card_number
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-')
        .collect()
}

/// Luhn checksum over a string of ASCII digits.
///
/// ## Algorithm
/// ```text
/// 4 5 3 2 0 1 5 1 1 2 8 3 0 3 6 6     (rightmost digit first)
///                               ▲ keep
///                             ▲ double: 6×2 = 12 → 12−9 = 3
///                           ▲ keep
///                         ... alternate ...
/// sum % 10 == 0  →  valid
/// ```
///
/// Returns `false` for an empty string or any non-digit.
pub fn luhn_checksum(digits: &str) -> bool {
    if digits.is_empty() {
        return false;
    }

    let mut sum = 0u32;
    for (position, c) in digits.chars().rev().enumerate() {
        let Some(mut digit) = c.to_digit(10) else {
            return false;
        };
        if position % 2 == 1 {
            digit *= 2;
            if digit > 9 {
                digit -= 9;
            }
        }
        sum += digit;
    }

    sum % 10 == 0
}

/// Validates a payment card number.
///
/// ## Rules
/// - Spaces and dashes are ignored
/// - 13 to 19 digits
/// - Passes the Luhn checksum
///
/// ## Example
/// ```rust
/// use shopease_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4532015112830366").is_ok());
/// assert!(validate_card_number("4532015112830367").is_err());
/// ```
pub fn validate_card_number(card_number: &str) -> ValidationResult<()> {
    let cleaned = normalize_card_number(card_number);

    let length_ok = (CARD_DIGITS_MIN..=CARD_DIGITS_MAX).contains(&cleaned.len());
    if !length_ok || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCardNumber);
    }

    if luhn_checksum(&cleaned) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCardNumber)
    }
}

/// Parses `MM/YY` into `(month, year)` without range checks.
fn parse_expiry(expiry: &str) -> Option<(u32, u32)> {
    let (month, year) = expiry.split_once('/')?;
    let (month, year) = (month.trim(), year.trim());

    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if !numeric(month) || !numeric(year) {
        return None;
    }

    Some((month.parse().ok()?, year.parse().ok()?))
}

/// Validates a card expiry date written as `MM/YY`.
///
/// ## Rules
/// - Month is 1-12, year is non-zero
/// - Not before the current month, comparing the two-digit year
///
/// ## User Workflow
/// ```text
/// today = 2024-06-15  →  current = (06, 24)
///
///   "01/20"  year 20 < 24                 → Invalid expiry date
///   "05/24"  same year, month 5 < 6       → Invalid expiry date
///   "06/24"  same month                   → OK (card still valid)
///   "12/99"  far future                   → OK
///   "13/25"  month out of range           → Invalid expiry date
/// ```
pub fn validate_expiry(expiry: &str, today: NaiveDate) -> ValidationResult<()> {
    let (month, year) = parse_expiry(expiry).ok_or(ValidationError::InvalidExpiry)?;

    if !(1..=12).contains(&month) || year == 0 {
        return Err(ValidationError::InvalidExpiry);
    }

    let current_year = (today.year() % 100) as u32;
    let current_month = today.month();

    if year < current_year || (year == current_year && month < current_month) {
        return Err(ValidationError::InvalidExpiry);
    }

    Ok(())
}

/// Validates a card security code: 3 or 4 digits.
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    let length_ok = matches!(cvv.len(), 3 | 4);
    if length_ok && cvv.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCvv)
    }
}

/// Validates the name printed on the card: at least 3 characters, trimmed.
pub fn validate_cardholder_name(name: &str) -> ValidationResult<()> {
    if name.trim().chars().count() >= MIN_CARDHOLDER_NAME {
        Ok(())
    } else {
        Err(ValidationError::InvalidCardholderName)
    }
}

// =============================================================================
// Catalog Filter Validators
// =============================================================================

/// Validates a price filter: both bounds non-negative and `min <= max`.
pub fn validate_price_range(min: Money, max: Money) -> ValidationResult<()> {
    if min.cents() < 0 || max.cents() < 0 || min > max {
        return Err(ValidationError::InvalidPriceRange { min, max });
    }
    Ok(())
}

/// Validates a minimum star rating filter (0-5).
pub fn validate_min_rating(rating: u8) -> ValidationResult<()> {
    if rating > 5 {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn june_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("jane@example.com").is_ok());
        assert!(validate_email("a.b+tag@mail.example.co").is_ok());

        assert!(validate_email("").is_err());
        assert!(validate_email("jane.example.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("jane@.com").is_err());
        assert!(validate_email("jane@example.").is_err());
        assert!(validate_email("jane@@example.com").is_err());
        assert!(validate_email("ja ne@example.com").is_err());
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("5551234567").is_ok());
        assert!(validate_phone("+1 (555) 123-4567").is_ok());

        assert!(validate_phone("555-123-456").is_err()); // 9 digits
        assert!(validate_phone("555.123.4567").is_err()); // dots not allowed
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_luhn_vectors() {
        assert!(luhn_checksum("4532015112830366"));
        assert!(!luhn_checksum("4532015112830367"));
        assert!(luhn_checksum("79927398713"));
        assert!(!luhn_checksum(""));
        assert!(!luhn_checksum("4532a15112830366"));
    }

    #[test]
    fn test_validate_card_number() {
        assert!(validate_card_number("4532015112830366").is_ok());
        assert!(validate_card_number("4532 0151 1283 0366").is_ok());
        assert!(validate_card_number("4532-0151-1283-0366").is_ok());

        assert_eq!(
            validate_card_number("4532015112830367"),
            Err(ValidationError::InvalidCardNumber)
        );
        // Luhn-valid but too short / too long
        assert!(validate_card_number("79927398713").is_err());
        assert!(validate_card_number(&"0".repeat(20)).is_err());
        assert!(validate_card_number("").is_err());
    }

    #[test]
    fn test_validate_expiry() {
        let today = june_2024();
        assert!(validate_expiry("01/20", today).is_err());
        assert!(validate_expiry("05/24", today).is_err());
        assert!(validate_expiry("06/24", today).is_ok());
        assert!(validate_expiry("12/99", today).is_ok());
        assert!(validate_expiry("13/25", today).is_err());
        assert!(validate_expiry("00/25", today).is_err());
        assert!(validate_expiry("1225", today).is_err());
        assert!(validate_expiry("ab/cd", today).is_err());
        assert!(validate_expiry("", today).is_err());
    }

    #[test]
    fn test_validate_cvv() {
        assert!(validate_cvv("123").is_ok());
        assert!(validate_cvv("1234").is_ok());
        assert!(validate_cvv("12").is_err());
        assert!(validate_cvv("12345").is_err());
        assert!(validate_cvv("12a").is_err());
    }

    #[test]
    fn test_validate_cardholder_name() {
        assert!(validate_cardholder_name("Jane Doe").is_ok());
        assert!(validate_cardholder_name("  Al ").is_err());
        assert!(validate_cardholder_name("").is_err());
    }

    #[test]
    fn test_validate_price_range() {
        assert!(validate_price_range(Money::zero(), Money::from_dollars(5000)).is_ok());
        assert!(validate_price_range(Money::from_dollars(10), Money::from_dollars(10)).is_ok());
        assert!(validate_price_range(Money::from_dollars(20), Money::from_dollars(10)).is_err());
        assert!(validate_price_range(Money::from_cents(-1), Money::from_dollars(10)).is_err());
    }

    #[test]
    fn test_validate_min_rating() {
        assert!(validate_min_rating(0).is_ok());
        assert!(validate_min_rating(5).is_ok());
        assert!(validate_min_rating(6).is_err());
    }
}
