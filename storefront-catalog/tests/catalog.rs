//! Integration tests for cached catalog fetches, using wiremock.

use storefront_cache::{CacheConfig, TtlCache};
use storefront_catalog::{CatalogClient, ProductQuery};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn products_body() -> serde_json::Value {
    serde_json::json!([
        {"id": 1, "name": "Mug", "price": "9.90", "on_sale": false},
        {"id": 2, "name": "Poster", "price": "14.00", "on_sale": true},
    ])
}

/// Two identical fetches hit the upstream once; the second is served from
/// cache.
#[tokio::test]
async fn test_repeated_fetch_served_from_cache() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(1)
        .mount(&server)
        .await;

    let cache = TtlCache::new(CacheConfig::default());
    let client = CatalogClient::new(server.uri(), cache.clone());
    let query = ProductQuery::default();

    let first = client.products(&query).await.unwrap();
    let second = client.products(&query).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(cache.stats().hit_count, 1);
}

/// Invalidation forces the next fetch back to the upstream.
#[tokio::test]
async fn test_invalidation_forces_refetch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TtlCache::new(CacheConfig::default());
    let client = CatalogClient::new(server.uri(), cache);
    let query = ProductQuery::default();

    client.products(&query).await.unwrap();
    assert_eq!(client.invalidate_products(), 1);
    client.products(&query).await.unwrap();
}

/// Distinct queries are cached under distinct keys.
#[tokio::test]
async fn test_pages_cached_independently() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(products_body()))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TtlCache::new(CacheConfig::default());
    let client = CatalogClient::new(server.uri(), cache);

    client.products(&ProductQuery::default()).await.unwrap();
    let page_two = ProductQuery {
        page: 2,
        ..ProductQuery::default()
    };
    client.products(&page_two).await.unwrap();
}

/// Upstream failures are reported and nothing is cached.
#[tokio::test]
async fn test_error_response_is_not_cached() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(500))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TtlCache::new(CacheConfig::default());
    let client = CatalogClient::new(server.uri(), cache.clone());

    assert!(client.categories().await.is_err());
    assert!(client.categories().await.is_err());
    assert_eq!(cache.stats().entry_count, 0);
}

/// Categories come from cache on the second read and can be invalidated.
#[tokio::test]
async fn test_categories_cached_and_invalidated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"id": 3, "name": "Prints", "slug": "prints", "count": 12},
        ])))
        .expect(2)
        .mount(&server)
        .await;

    let cache = TtlCache::new(CacheConfig::default());
    let client = CatalogClient::new(server.uri(), cache);

    let first = client.categories().await.unwrap();
    assert_eq!(first[0].slug, "prints");
    client.categories().await.unwrap();

    assert_eq!(client.invalidate_categories(), 1);
    client.categories().await.unwrap();
}
