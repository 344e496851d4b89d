//! Cached catalog fetchers.

use serde::{Deserialize, Serialize};
use storefront_cache::TtlCache;
use tracing::debug;

use crate::error::CatalogError;

/// A product listing entry, trimmed to what listing pages render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Price as the API formats it (string, shop currency).
    pub price: String,
    /// Whether the product is currently discounted.
    #[serde(default)]
    pub on_sale: bool,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Category identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// URL slug.
    pub slug: String,
    /// Number of products in the category.
    #[serde(default)]
    pub count: u64,
}

/// Query parameters for a product listing.
///
/// Serializes into the API's query string; `cache_key` embeds every field
/// so distinct queries never collide in the cache.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductQuery {
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Restrict to one category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<u64>,
    /// Free-text search term.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for ProductQuery {
    fn default() -> Self {
        ProductQuery {
            page: 1,
            per_page: 12,
            category: None,
            search: None,
        }
    }
}

impl ProductQuery {
    /// Cache key for this query. All product keys share the `products:`
    /// prefix so `invalidate_products` can match them by substring.
    pub fn cache_key(&self) -> String {
        let mut key = format!("products:page={}:per_page={}", self.page, self.per_page);
        if let Some(category) = self.category {
            key.push_str(&format!(":category={category}"));
        }
        if let Some(search) = &self.search {
            key.push_str(&format!(":search={search}"));
        }
        key
    }
}

const CATEGORIES_KEY: &str = "categories";

/// Catalog fetcher memoizing responses in an injected [`TtlCache`].
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    cache: TtlCache,
}

impl CatalogClient {
    /// Creates a client with a default HTTP client.
    pub fn new(base_url: impl Into<String>, cache: TtlCache) -> Self {
        Self::with_client(reqwest::Client::new(), base_url, cache)
    }

    /// Creates a client reusing an existing HTTP client.
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, cache: TtlCache) -> Self {
        CatalogClient {
            http,
            base_url: base_url.into(),
            cache,
        }
    }

    /// Fetches a product listing, served from cache when possible.
    pub async fn products(&self, query: &ProductQuery) -> Result<Vec<Product>, CatalogError> {
        let key = query.cache_key();
        if let Some(products) = self.cache.get::<Vec<Product>>(&key) {
            debug!(key, "product listing served from cache");
            return Ok(products);
        }

        let url = format!("{}/products", self.base_url);
        let response = self.http.get(&url).query(query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        let products: Vec<Product> = response.json().await?;

        self.cache.set_default(&key, &products);
        Ok(products)
    }

    /// Fetches the category tree, served from cache when possible.
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        if let Some(categories) = self.cache.get::<Vec<Category>>(CATEGORIES_KEY) {
            debug!("categories served from cache");
            return Ok(categories);
        }

        let url = format!("{}/products/categories", self.base_url);
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status.as_u16()));
        }
        let categories: Vec<Category> = response.json().await?;

        self.cache.set_default(CATEGORIES_KEY, &categories);
        Ok(categories)
    }

    /// Drops every cached product listing. Returns the number of entries
    /// removed.
    pub fn invalidate_products(&self) -> usize {
        self.cache.delete_by_pattern("products")
    }

    /// Drops the cached category tree.
    pub fn invalidate_categories(&self) -> usize {
        self.cache.delete(CATEGORIES_KEY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_embeds_every_field() {
        let mut query = ProductQuery::default();
        assert_eq!(query.cache_key(), "products:page=1:per_page=12");
        query.category = Some(9);
        query.search = Some("mug".into());
        assert_eq!(
            query.cache_key(),
            "products:page=1:per_page=12:category=9:search=mug"
        );
    }

    #[test]
    fn test_distinct_queries_have_distinct_keys() {
        let first = ProductQuery::default();
        let second = ProductQuery {
            page: 2,
            ..ProductQuery::default()
        };
        assert_ne!(first.cache_key(), second.cache_key());
    }
}
