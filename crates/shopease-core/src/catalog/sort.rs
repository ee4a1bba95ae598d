//! Sort orders offered by the catalog's sort dropdown.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::Product;

/// Sort key. Serialized the way the dropdown values are written
/// (`"price-low"`, `"newest"`, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Featured products first, otherwise the current order.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// Highest rating first.
    Rating,
    /// Reverse lexicographic id.
    Newest,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    /// Sorts in place. Every order is stable: ties keep their current order.
    pub fn sort(&self, products: &mut [Product]) {
        match self {
            SortKey::Featured => products.sort_by_key(|p| !p.featured),
            SortKey::PriceLow => products.sort_by_key(|p| p.price),
            SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Rating => products.sort_by(|a, b| b.rating.cmp(&a.rating)),
            SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown dropdown values fall back to featured, as the dropdown's
/// default branch does.
impl FromStr for SortKey {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "rating" => SortKey::Rating,
            "newest" => SortKey::Newest,
            _ => SortKey::Featured,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn product(id: &str, dollars: i64, rating: u8, featured: bool) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_string(),
            category: "Home".to_string(),
            brand: "Apple".to_string(),
            price: Money::from_dollars(dollars),
            old_price: None,
            rating,
            reviews: 1,
            color: "Red".to_string(),
            in_stock: true,
            image: "default.jpg".to_string(),
            featured,
        }
    }

    fn ids(products: &[Product]) -> Vec<&str> {
        products.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn test_featured_is_stable_partition() {
        let mut products = vec![
            product("a", 1, 1, false),
            product("b", 1, 1, true),
            product("c", 1, 1, false),
            product("d", 1, 1, true),
        ];
        SortKey::Featured.sort(&mut products);
        assert_eq!(ids(&products), vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn test_rating_ties_keep_order() {
        let mut products = vec![
            product("a", 1, 3, false),
            product("b", 1, 5, false),
            product("c", 1, 3, false),
        ];
        SortKey::Rating.sort(&mut products);
        assert_eq!(ids(&products), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_newest_is_reverse_lexicographic() {
        let mut products = vec![
            product("prod-2", 1, 1, false),
            product("prod-10", 1, 1, false),
            product("prod-9", 1, 1, false),
        ];
        SortKey::Newest.sort(&mut products);
        assert_eq!(ids(&products), vec!["prod-9", "prod-2", "prod-10"]);
    }

    #[test]
    fn test_parse_and_serialize() {
        assert_eq!("price-high".parse::<SortKey>(), Ok(SortKey::PriceHigh));
        assert_eq!("whatever".parse::<SortKey>(), Ok(SortKey::Featured));
        assert_eq!(serde_json::to_value(SortKey::PriceLow).unwrap(), "price-low");
    }
}
