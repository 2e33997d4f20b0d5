//! HTTP implementation of the store API.
//!
//! Plain JSON over `reqwest` 0.13: one route per operation under the
//! configured base URL, optional bearer auth, per-request timeout from
//! config.

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use reqwest::{Response, StatusCode};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::instrument;
use url::Url;

use kirana_core::{CartLine, Product, ProductCategory, ProductId, StoreInfo};

use crate::config::StorefrontConfig;
use super::{StoreApi, StoreApiError};

/// Client for the store backend's JSON API.
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpStoreApi {
    /// Create a new store API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the bearer token is not a valid header value or
    /// the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, StoreApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.store_api_token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value)
                .map_err(|e| StoreApiError::InvalidConfig(format!("invalid API token: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.store_api_url.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, StoreApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                StoreApiError::InvalidConfig("store API URL cannot be a base".to_string())
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, StoreApiError> {
        let url = self.endpoint(segments)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }
}

/// Connection and timeout failures are "backend not there", which read
/// paths tolerate; everything else stays a hard transport error.
fn map_transport_error(e: reqwest::Error) -> StoreApiError {
    if e.is_connect() || e.is_timeout() {
        StoreApiError::Unavailable(e.to_string())
    } else {
        StoreApiError::Http(e)
    }
}

/// Turn a non-success response into [`StoreApiError::Api`].
async fn check_status(response: Response) -> Result<Response, StoreApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(StoreApiError::Api {
        status: status.as_u16(),
        message,
    })
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[instrument(skip(self))]
    async fn all_products(&self) -> Result<Vec<Product>, StoreApiError> {
        self.get_json(&["products"]).await
    }

    #[instrument(skip(self), fields(category = %category))]
    async fn products_by_category(
        &self,
        category: ProductCategory,
    ) -> Result<Vec<Product>, StoreApiError> {
        self.get_json(&["products", "category", category.as_str()])
            .await
    }

    #[instrument(skip(self, term))]
    async fn search_products(&self, term: &str) -> Result<Vec<Product>, StoreApiError> {
        let mut url = self.endpoint(&["products", "search"])?;
        url.query_pairs_mut().append_pair("q", term);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        let response = check_status(response).await?;
        Ok(response.json().await?)
    }

    #[instrument(skip(self))]
    async fn cart(&self) -> Result<Vec<CartLine>, StoreApiError> {
        self.get_json(&["cart"]).await
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<(), StoreApiError> {
        let url = self.endpoint(&["cart", "items"])?;
        let body = CartLine::new(product_id, quantity);
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn remove_from_cart(&self, product_id: ProductId) -> Result<(), StoreApiError> {
        let url = self.endpoint(&["cart", "items", &product_id.to_string()])?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn clear_cart(&self) -> Result<(), StoreApiError> {
        let url = self.endpoint(&["cart"])?;
        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn store_info(&self) -> Result<StoreInfo, StoreApiError> {
        self.get_json(&["store-info"]).await
    }

    #[instrument(skip(self))]
    async fn initialize_products(&self) -> Result<(), StoreApiError> {
        let url = self.endpoint(&["products", "initialize"])?;
        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        // The backend answers 409 once the catalog is populated, which is
        // the normal case on every run but the first.
        if response.status() == StatusCode::CONFLICT {
            return Err(StoreApiError::AlreadySeeded);
        }
        check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use std::time::Duration;

    fn test_config(base: &str) -> StorefrontConfig {
        StorefrontConfig {
            store_api_url: base.parse().unwrap(),
            store_api_token: None,
            http_timeout: Duration::from_secs(5),
            cache: CacheConfig::default(),
        }
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = HttpStoreApi::new(&test_config("http://localhost:8080")).unwrap();
        let url = api.endpoint(&["products", "category", "dairy"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/products/category/dairy");
    }

    #[test]
    fn test_endpoint_respects_base_path() {
        let api = HttpStoreApi::new(&test_config("http://localhost:8080/api/v1/")).unwrap();
        let url = api.endpoint(&["cart"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/v1/cart");
    }
}
