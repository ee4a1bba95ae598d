//! # Catalog Engine
//!
//! Holds the full product set and derives the visible page from the current
//! filters, sort key and page index.
//!
//! ## Derivation
//! ```text
//! products ──filter──► filtered ──sort──► filtered (ordered) ──slice──► page
//!            (set_filter,               (set_sort)               (change_page)
//!             clear_filters)
//!
//! products ──search──► filtered          (filters bypassed, no sort)
//! ```
//!
//! ## Preserved Behaviors
//! - Changing a filter does not reset the page index
//! - `change_page` does not clamp; page 0 or past the end shows nothing
//! - The initial result set is the product list in load order

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::filter::{FilterChange, FilterState};
use crate::catalog::pagination::Pagination;
use crate::catalog::sort::SortKey;
use crate::error::CoreResult;
use crate::types::Product;
use crate::PRODUCTS_PER_PAGE;

/// Distinct filter values present in the product set, with product counts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Facets {
    pub categories: BTreeMap<String, usize>,
    pub brands: BTreeMap<String, usize>,
    pub colors: BTreeMap<String, usize>,
}

/// Filter/sort/paginate over a fixed product set.
#[derive(Debug, Clone)]
pub struct CatalogEngine {
    products: Vec<Product>,
    filtered: Vec<Product>,
    filters: FilterState,
    sort: SortKey,
    page: usize,
    per_page: usize,
}

impl CatalogEngine {
    pub fn new(products: Vec<Product>) -> Self {
        CatalogEngine {
            filtered: products.clone(),
            products,
            filters: FilterState::default(),
            sort: SortKey::default(),
            page: 1,
            per_page: PRODUCTS_PER_PAGE,
        }
    }

    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The current result set, in display order.
    pub fn filtered(&self) -> &[Product] {
        &self.filtered
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort
    }

    pub fn page_index(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.per_page
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Applies a filter change, then refilters and re-sorts.
    ///
    /// A rejected change leaves filters and results untouched.
    pub fn set_filter(&mut self, change: FilterChange) -> CoreResult<()> {
        self.filters.apply(change)?;
        self.refilter();
        Ok(())
    }

    /// Re-sorts the current result set.
    pub fn set_sort(&mut self, key: SortKey) {
        self.sort = key;
        self.sort.sort(&mut self.filtered);
    }

    /// Products whose name, category or brand contains `query`, ignoring
    /// case. Structured filters are bypassed and the result is not sorted.
    pub fn search(&mut self, query: &str) {
        let needle = query.to_lowercase();
        self.filtered = self
            .products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.category.to_lowercase().contains(&needle)
                    || p.brand.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
    }

    /// Resets every filter to its default and recomputes.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
        self.refilter();
    }

    pub fn change_page(&mut self, page: usize) {
        self.page = page;
    }

    /// Products on the current page. Empty for out-of-range pages.
    pub fn page(&self) -> &[Product] {
        if self.page == 0 {
            return &[];
        }
        let start = self.pagination().offset();
        if start >= self.filtered.len() {
            return &[];
        }
        let end = (start + self.per_page).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn total_pages(&self) -> usize {
        self.pagination().total_pages
    }

    pub fn pagination(&self) -> Pagination {
        Pagination::new(self.page, self.per_page, self.filtered.len())
    }

    /// Counts over the full product set, for building the filter sidebar.
    pub fn facets(&self) -> Facets {
        let mut facets = Facets::default();
        for product in &self.products {
            *facets.categories.entry(product.category.clone()).or_default() += 1;
            *facets.brands.entry(product.brand.clone()).or_default() += 1;
            *facets.colors.entry(product.color.clone()).or_default() += 1;
        }
        facets
    }

    fn refilter(&mut self) {
        let filters = &self.filters;
        self.filtered = self
            .products
            .iter()
            .filter(|p| filters.matches(p))
            .cloned()
            .collect();
        self.sort.sort(&mut self.filtered);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
