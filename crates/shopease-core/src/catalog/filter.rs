//! Catalog filter state and the changes the host can apply to it.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::money::Money;
use crate::types::Product;
use crate::validation::{validate_min_rating, validate_price_range};
use crate::DEFAULT_MAX_PRICE;

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub fn contains(&self, price: Money) -> bool {
        price >= self.min && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        PriceRange {
            min: Money::zero(),
            max: DEFAULT_MAX_PRICE,
        }
    }
}

// =============================================================================
// Filter State
// =============================================================================

/// Active catalog filters. An empty set means "no restriction" for that
/// field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub categories: BTreeSet<String>,
    pub brands: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub price_range: PriceRange,
    /// 0 disables the rating filter.
    pub min_rating: u8,
    pub in_stock_only: bool,
}

impl FilterState {
    /// Conjunction of every active predicate.
    pub fn matches(&self, product: &Product) -> bool {
        let in_set = |set: &BTreeSet<String>, value: &String| set.is_empty() || set.contains(value);

        in_set(&self.categories, &product.category)
            && self.price_range.contains(product.price)
            && in_set(&self.brands, &product.brand)
            && product.rating >= self.min_rating
            && in_set(&self.colors, &product.color)
            && (!self.in_stock_only || product.in_stock)
    }

    /// Applies a change. Rejected changes leave the state untouched.
    pub fn apply(&mut self, change: FilterChange) -> CoreResult<()> {
        match change {
            FilterChange::Category { value, checked } => toggle(&mut self.categories, value, checked),
            FilterChange::Brand { value, checked } => toggle(&mut self.brands, value, checked),
            FilterChange::Color { value, checked } => toggle(&mut self.colors, value, checked),
            FilterChange::Categories { values } => self.categories = values,
            FilterChange::Brands { values } => self.brands = values,
            FilterChange::Colors { values } => self.colors = values,
            FilterChange::PriceRange { min, max } => {
                validate_price_range(min, max)?;
                self.price_range = PriceRange { min, max };
            }
            FilterChange::MinRating { rating } => {
                validate_min_rating(rating)?;
                self.min_rating = rating;
            }
            FilterChange::InStockOnly { enabled } => self.in_stock_only = enabled,
        }
        Ok(())
    }
}

fn toggle(set: &mut BTreeSet<String>, value: String, checked: bool) {
    if checked {
        set.insert(value);
    } else {
        set.remove(&value);
    }
}

// =============================================================================
// Filter Change
// =============================================================================

/// One filter control changing.
///
/// Checkbox groups either toggle one value or replace the whole set;
/// everything else is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FilterChange {
    Category { value: String, checked: bool },
    Brand { value: String, checked: bool },
    Color { value: String, checked: bool },
    Categories { values: BTreeSet<String> },
    Brands { values: BTreeSet<String> },
    Colors { values: BTreeSet<String> },
    PriceRange { min: Money, max: Money },
    MinRating { rating: u8 },
    InStockOnly { enabled: bool },
}
