//! # Catalog
//!
//! Product filtering, sorting and pagination.
//!
//! - [`filter`] - `FilterState` and `FilterChange`
//! - [`sort`] - `SortKey`
//! - [`pagination`] - page arithmetic, result range label, page links
//! - [`engine`] - `CatalogEngine`, tying the three together

pub mod engine;
pub mod filter;
pub mod pagination;
pub mod sort;

pub use engine::{CatalogEngine, Facets};
pub use filter::{FilterChange, FilterState, PriceRange};
pub use pagination::{PageLink, Pagination};
pub use sort::SortKey;
