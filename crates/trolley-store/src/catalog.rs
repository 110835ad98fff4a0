//! # Product Catalog & Stock Oracle
//!
//! The remote lookup seams and their HTTP implementation.
//!
//! ## Lookup Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Remote Lookups                                       │
//! │                                                                         │
//! │  CartStore::add_product(42)                                            │
//! │       │                                                                 │
//! │       ├──► ProductCatalog::get(42) ──► GET {base}/products/42          │
//! │       │                                                                 │
//! │       └──► StockOracle::get(42) ─────► GET {base}/stock/42             │
//! │                                                                         │
//! │  Both are snapshots at call time. Nothing is cached: stock moves       │
//! │  externally between checks, so caching would only hide staleness.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The traits are dyn-safe (via `async_trait`) so CartStore can hold
//! `Arc<dyn ProductCatalog>` and tests can substitute in-memory fakes.

use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::debug;

use trolley_core::{Product, StockInfo};

// =============================================================================
// Catalog Error
// =============================================================================

/// Remote lookup errors.
///
/// Everything here is non-fatal to the cart: CartStore translates these
/// into a user-facing "failed to ..." notification and changes nothing.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The API has no record for this product id.
    #[error("{entity} not found for product {product_id}")]
    NotFound {
        entity: &'static str,
        product_id: i64,
    },

    /// Network failure, non-success status, or undecodable body.
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Lookup Traits
// =============================================================================

/// Fetches product metadata by id.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Returns the product record, or fails if the id is unknown.
    async fn get(&self, product_id: i64) -> CatalogResult<Product>;
}

/// Fetches available stock by id.
///
/// Returns a snapshot at call time; implementations must not cache.
#[async_trait]
pub trait StockOracle: Send + Sync {
    /// Returns the stock record, or fails if the id is unknown.
    async fn get(&self, product_id: i64) -> CatalogResult<StockInfo>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// HTTP client for the storefront's catalog/stock JSON API.
///
/// ## API Shape
/// - `GET {base}/products/{id}` → `Product` JSON
/// - `GET {base}/stock/{id}` → `StockInfo` JSON
///
/// A 404 maps to [`CatalogError::NotFound`]; any other non-success status
/// or transport failure maps to [`CatalogError::Request`].
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCatalog {
    /// Creates a catalog client against the given base URL.
    ///
    /// Trailing slashes on the base URL are tolerated.
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        HttpCatalog { client, base_url }
    }

    async fn fetch<T>(&self, path: &str, entity: &'static str, product_id: i64) -> CatalogResult<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}/{}/{}", self.base_url, path, product_id);
        debug!(url = %url, "Catalog lookup");

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound { entity, product_id });
        }

        let value = response.error_for_status()?.json::<T>().await?;
        Ok(value)
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn get(&self, product_id: i64) -> CatalogResult<Product> {
        self.fetch("products", "Product", product_id).await
    }
}

#[async_trait]
impl StockOracle for HttpCatalog {
    async fn get(&self, product_id: i64) -> CatalogResult<StockInfo> {
        self.fetch("stock", "Stock", product_id).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(server: &mockito::ServerGuard) -> HttpCatalog {
        HttpCatalog::new(reqwest::Client::new(), server.url())
    }

    #[tokio::test]
    async fn test_fetches_product() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"title":"Sneaker","price_cents":17990,"image_url":null}"#)
            .create_async()
            .await;

        let product = ProductCatalog::get(&catalog(&server), 1).await.unwrap();

        assert_eq!(product.id, 1);
        assert_eq!(product.title, "Sneaker");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetches_stock() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/1")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"amount":5}"#)
            .create_async()
            .await;

        let stock = StockOracle::get(&catalog(&server), 1).await.unwrap();

        assert_eq!(stock, StockInfo { id: 1, amount: 5 });
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/99")
            .with_status(404)
            .create_async()
            .await;

        let err = ProductCatalog::get(&catalog(&server), 99).await.unwrap_err();

        assert!(matches!(
            err,
            CatalogError::NotFound {
                entity: "Product",
                product_id: 99,
            }
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_request_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/stock/1")
            .with_status(500)
            .create_async()
            .await;

        let err = StockOracle::get(&catalog(&server), 1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Request(_)));
    }

    #[tokio::test]
    async fn test_garbage_body_is_request_failure() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/products/1")
            .with_status(200)
            .with_body("<html>definitely not json</html>")
            .create_async()
            .await;

        let err = ProductCatalog::get(&catalog(&server), 1).await.unwrap_err();
        assert!(matches!(err, CatalogError::Request(_)));
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        let catalog = HttpCatalog::new(reqwest::Client::new(), "http://localhost:3333/");
        assert_eq!(catalog.base_url, "http://localhost:3333");
    }
}
