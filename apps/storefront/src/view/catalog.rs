//! Product grid render model.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Showing 13-24 of 50 results                  Sort: [Featured ▾]  │
//! │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐                  │
//! │  │ ProductCard × page size                     │                  │
//! │  │ ★★★★☆ (120)   $99.99  ~~$129.99~~           │                  │
//! │  └─────────┘ └─────────┘ └─────────┘ └─────────┘                  │
//! │              ‹  1  [2]  3  …  5  ›                                │
//! └───────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use shopease_core::catalog::{CatalogEngine, PageLink, SortKey};
use shopease_core::Product;
use ts_rs::TS;

use crate::state::StorefrontConfig;

/// Number of star slots in a rating.
pub const STAR_SLOTS: u8 = 5;

/// One star slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// Star slots for a rating: full up to the rating, a half star when the
/// rating ends in .5, empty after.
pub fn stars(rating: f32) -> Vec<Star> {
    (1..=STAR_SLOTS)
        .map(|slot| {
            let slot = f32::from(slot);
            if slot <= rating {
                Star::Full
            } else if slot - 0.5 == rating {
                Star::Half
            } else {
                Star::Empty
            }
        })
        .collect()
}

/// One product tile.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: String,
    pub name: String,
    pub category: String,
    pub image: String,
    pub price: String,
    pub old_price: Option<String>,
    pub stars: Vec<Star>,
    pub reviews: u32,
    pub featured: bool,
    pub in_stock: bool,
    /// "In Stock" / "Out of Stock"
    pub stock_label: String,
}

impl ProductCard {
    pub fn build(product: &Product, config: &StorefrontConfig) -> Self {
        ProductCard {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            image: product.image.clone(),
            price: config.format_currency(product.price),
            old_price: product.old_price.map(|p| config.format_currency(p)),
            stars: stars(f32::from(product.rating)),
            reviews: product.reviews,
            featured: product.featured,
            in_stock: product.in_stock,
            stock_label: if product.in_stock { "In Stock" } else { "Out of Stock" }.to_string(),
        }
    }
}

/// The products page.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub products: Vec<ProductCard>,
    pub page: usize,
    pub total_pages: usize,
    /// "Showing 1-12 of 50 results"
    pub result_range_label: String,
    pub page_links: Vec<PageLink>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
    pub sort: SortKey,
    /// No products on this page: show the "No products found" state.
    pub is_empty: bool,
}

impl CatalogView {
    pub fn build(engine: &CatalogEngine, config: &StorefrontConfig) -> Self {
        let pagination = engine.pagination();
        let products: Vec<ProductCard> = engine
            .page()
            .iter()
            .map(|p| ProductCard::build(p, config))
            .collect();

        CatalogView {
            is_empty: products.is_empty(),
            products,
            page: pagination.page,
            total_pages: pagination.total_pages,
            result_range_label: pagination.range_label(),
            page_links: pagination.page_links(),
            prev_enabled: pagination.has_prev,
            next_enabled: pagination.has_next,
            sort: engine.sort_key(),
        }
    }
}
