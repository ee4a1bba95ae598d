//! Checkout form inputs and the records kept once a step passes.
//!
//! ```text
//! Input (host selection)          Recorded (after the step validates)
//! ──────────────────────          ───────────────────────────────────
//! ShippingForm (raw)       ──►    ShippingForm (trimmed)
//! DeliveryOption (text)    ──►    Delivery { method, price: Money }
//! PaymentSelection + card  ──►    Payment { method, card_details: CardSummary }
//! ```
//!
//! The recorded payment never holds the full card number or the CVV.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::PaymentMethod;
use crate::validation::normalize_card_number;

// =============================================================================
// Shipping
// =============================================================================

/// Fields of the shipping form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum ShippingField {
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Apartment,
    City,
    State,
    ZipCode,
    Country,
}

impl ShippingField {
    /// Every field, in form order.
    pub const ALL: [ShippingField; 10] = [
        ShippingField::FirstName,
        ShippingField::LastName,
        ShippingField::Email,
        ShippingField::Phone,
        ShippingField::Address,
        ShippingField::Apartment,
        ShippingField::City,
        ShippingField::State,
        ShippingField::ZipCode,
        ShippingField::Country,
    ];

    /// Label printed next to the input, used in "<Label> is required".
    pub fn label(&self) -> &'static str {
        match self {
            ShippingField::FirstName => "First Name",
            ShippingField::LastName => "Last Name",
            ShippingField::Email => "Email",
            ShippingField::Phone => "Phone",
            ShippingField::Address => "Address",
            ShippingField::Apartment => "Apartment",
            ShippingField::City => "City",
            ShippingField::State => "State",
            ShippingField::ZipCode => "ZIP Code",
            ShippingField::Country => "Country",
        }
    }

    /// Fields the stock form marks as required: everything but the apartment.
    pub fn default_required() -> Vec<ShippingField> {
        ShippingField::ALL
            .into_iter()
            .filter(|field| *field != ShippingField::Apartment)
            .collect()
    }
}

/// Shipping address and contact details.
///
/// Used both for the raw input and, trimmed, for the recorded step data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    #[serde(default)]
    pub apartment: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingForm {
    pub fn get(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::Apartment => &self.apartment,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
            ShippingField::Country => &self.country,
        }
    }

    /// Copy with every field trimmed.
    pub fn trimmed(&self) -> ShippingForm {
        let trim = |s: &String| s.trim().to_string();
        ShippingForm {
            first_name: trim(&self.first_name),
            last_name: trim(&self.last_name),
            email: trim(&self.email),
            phone: trim(&self.phone),
            address: trim(&self.address),
            apartment: trim(&self.apartment),
            city: trim(&self.city),
            state: trim(&self.state),
            zip_code: trim(&self.zip_code),
            country: trim(&self.country),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

// =============================================================================
// Delivery
// =============================================================================

/// A delivery option as displayed: title plus price text (`"Free"`, `"$9.99"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryOption {
    pub title: String,
    pub price_label: String,
}

impl DeliveryOption {
    pub fn new(title: impl Into<String>, price_label: impl Into<String>) -> Self {
        DeliveryOption {
            title: title.into(),
            price_label: price_label.into(),
        }
    }

    /// Reads the displayed price. `"Free"` is zero.
    pub fn price(&self) -> Result<Money, ValidationError> {
        let label = self.price_label.trim();
        if label.eq_ignore_ascii_case("free") {
            return Ok(Money::zero());
        }

        Money::parse(label).ok_or_else(|| ValidationError::InvalidPrice {
            field: "Delivery price".to_string(),
            value: label.to_string(),
        })
    }
}

/// The recorded delivery choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub method: String,
    pub price: Money,
}

// =============================================================================
// Payment
// =============================================================================

/// Card fields as typed by the shopper.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardInput {
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
    pub cardholder_name: String,
}

/// The selected payment option, with card fields for card methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSelection {
    pub method: PaymentMethod,
    #[serde(default)]
    pub card: Option<CardInput>,
}

impl PaymentSelection {
    pub fn new(method: PaymentMethod) -> Self {
        PaymentSelection { method, card: None }
    }

    pub fn with_card(method: PaymentMethod, card: CardInput) -> Self {
        PaymentSelection {
            method,
            card: Some(card),
        }
    }
}

/// Redacted card details kept on the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardSummary {
    pub last_four: String,
    pub card_name: String,
    pub expiry_date: String,
}

impl CardSummary {
    /// Keeps the last four digits of the cleaned number only.
    pub fn from_input(card: &CardInput) -> Self {
        let digits: Vec<char> = normalize_card_number(&card.number).chars().collect();
        let split = digits.len().saturating_sub(4);
        CardSummary {
            last_four: digits[split..].iter().collect(),
            card_name: card.cardholder_name.trim().to_string(),
            expiry_date: card.expiry.trim().to_string(),
        }
    }
}

/// The recorded payment choice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub method: PaymentMethod,
    pub card_details: Option<CardSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_required_skips_apartment() {
        let required = ShippingField::default_required();
        assert_eq!(required.len(), 9);
        assert!(!required.contains(&ShippingField::Apartment));
    }

    #[test]
    fn test_delivery_price_labels() {
        assert_eq!(DeliveryOption::new("Standard", "Free").price(), Ok(Money::zero()));
        assert_eq!(
            DeliveryOption::new("Express", "$9.99").price(),
            Ok(Money::from_cents(999))
        );
        assert!(DeliveryOption::new("Express", "soon").price().is_err());
    }

    #[test]
    fn test_card_summary_redacts() {
        let card = CardInput {
            number: "4532 0151 1283 0366".to_string(),
            expiry: "12/30".to_string(),
            cvv: "123".to_string(),
            cardholder_name: " Jane Doe ".to_string(),
        };
        let summary = CardSummary::from_input(&card);
        assert_eq!(summary.last_four, "0366");
        assert_eq!(summary.card_name, "Jane Doe");

        let json = serde_json::to_string(&summary).unwrap();
        assert!(!json.contains("4532"));
        assert!(!json.contains("123\""));
    }
}
