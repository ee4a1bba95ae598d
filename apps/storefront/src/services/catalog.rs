//! # Catalog Service
//!
//! The products page's service: one [`CatalogEngine`] behind a mutex, plus
//! the render model for the grid.

use std::sync::{Arc, Mutex};

use shopease_core::catalog::{CatalogEngine, Facets, FilterChange, SortKey};
use shopease_core::Product;
use tracing::debug;

use crate::error::ApiError;
use crate::host::{Host, Notification};
use crate::state::StorefrontConfig;
use crate::view::CatalogView;

/// Product listing state for one products page.
pub struct CatalogService {
    engine: Mutex<CatalogEngine>,
    host: Arc<dyn Host>,
}

impl CatalogService {
    /// Starts with every product shown in load order, page 1.
    pub fn new(products: Vec<Product>, host: Arc<dyn Host>) -> Self {
        debug!(products = products.len(), "Catalog loaded");
        CatalogService {
            engine: Mutex::new(CatalogEngine::new(products)),
            host,
        }
    }

    /// Executes a function with read access to the engine.
    pub fn with_engine<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CatalogEngine) -> R,
    {
        let engine = self.engine.lock().expect("Catalog mutex poisoned");
        f(&engine)
    }

    fn with_engine_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CatalogEngine) -> R,
    {
        let mut engine = self.engine.lock().expect("Catalog mutex poisoned");
        f(&mut engine)
    }

    /// Applies one filter control change. A rejected change is shown to the
    /// shopper and leaves the results as they were.
    pub fn set_filter(&self, change: FilterChange) -> Result<usize, ApiError> {
        debug!(?change, "Filter change");
        self.with_engine_mut(|engine| {
            engine
                .set_filter(change)
                .map(|()| engine.filtered().len())
        })
        .map_err(|err| {
            let err = ApiError::from(err);
            self.host.notify(Notification::error(err.message.clone()));
            err
        })
    }

    pub fn set_sort(&self, key: SortKey) {
        debug!(sort = %key, "Sort change");
        self.with_engine_mut(|engine| engine.set_sort(key));
    }

    /// Free-text search over name, category and brand. Returns the hit count.
    pub fn search(&self, query: &str) -> usize {
        let hits = self.with_engine_mut(|engine| {
            engine.search(query);
            engine.filtered().len()
        });
        debug!(query = %query, hits, "Search");
        hits
    }

    pub fn clear_filters(&self) {
        self.with_engine_mut(CatalogEngine::clear_filters);
    }

    /// Jumps to a page. Out-of-range pages are allowed and show nothing.
    pub fn change_page(&self, page: usize) {
        self.with_engine_mut(|engine| engine.change_page(page));
    }

    /// Products on the current page.
    pub fn page(&self) -> Vec<Product> {
        self.with_engine(|engine| engine.page().to_vec())
    }

    pub fn total_pages(&self) -> usize {
        self.with_engine(CatalogEngine::total_pages)
    }

    /// Filter sidebar values with counts.
    pub fn facets(&self) -> Facets {
        self.with_engine(CatalogEngine::facets)
    }

    /// Render model for the product grid.
    pub fn view(&self, config: &StorefrontConfig) -> CatalogView {
        self.with_engine(|engine| CatalogView::build(engine, config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::host::RecordingHost;
    use shopease_core::Money;

    fn product(id: usize, category: &str, price: i64) -> Product {
        Product {
            id: format!("p{id:02}"),
            name: format!("Product {id}"),
            category: category.to_string(),
            brand: "Acme".to_string(),
            price: Money::from_dollars(price),
            old_price: None,
            rating: 4,
            reviews: 10,
            color: "black".to_string(),
            in_stock: true,
            image: "default.jpg".to_string(),
            featured: false,
        }
    }

    fn service() -> (CatalogService, Arc<RecordingHost>) {
        let products = (1..=30)
            .map(|i| product(i, if i % 2 == 0 { "audio" } else { "video" }, i as i64))
            .collect();
        let host = Arc::new(RecordingHost::new());
        (CatalogService::new(products, host.clone()), host)
    }

    #[test]
    fn test_filter_then_page() {
        let (catalog, _) = service();

        let hits = catalog
            .set_filter(FilterChange::Category {
                value: "audio".to_string(),
                checked: true,
            })
            .unwrap();
        assert_eq!(hits, 15);
        assert_eq!(catalog.total_pages(), 2);

        catalog.change_page(2);
        assert_eq!(catalog.page().len(), 3);

        catalog.change_page(9);
        assert!(catalog.page().is_empty());
    }

    #[test]
    fn test_invalid_price_range_is_reported() {
        let (catalog, host) = service();

        let err = catalog
            .set_filter(FilterChange::PriceRange {
                min: Money::from_dollars(100),
                max: Money::from_dollars(10),
            })
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(host.last_notification().is_some());
        assert_eq!(catalog.with_engine(|e| e.filtered().len()), 30);
    }

    #[test]
    fn test_search_and_clear() {
        let (catalog, _) = service();

        assert_eq!(catalog.search("product 1"), 11);
        catalog.clear_filters();
        assert_eq!(catalog.with_engine(|e| e.filtered().len()), 30);
    }

    #[test]
    fn test_sort_price_high() {
        let (catalog, _) = service();
        catalog.set_sort(SortKey::PriceHigh);
        assert_eq!(catalog.page()[0].id, "p30");
    }
}
