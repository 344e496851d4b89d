#![warn(missing_docs)]
//! # storefront-catalog
//!
//! Catalog glue over the commerce REST API.
//!
//! [`CatalogClient`] fetches product and category listings and memoizes
//! them in an injected [`TtlCache`](storefront_cache::TtlCache), so
//! repeated page renders within the TTL window cost no upstream calls.
//! Writes to the catalog go through the backend; this crate only
//! invalidates (`invalidate_products`) when told to.

pub mod client;
pub mod error;

pub use client::{CatalogClient, Category, Product, ProductQuery};
pub use error::CatalogError;
