use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::models::{Product, Stock};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("catalog answered {status}: {body}")]
    Status { status: u16, body: String },
}

/// Remote stock and product lookups the cart depends on.
///
/// `Ok(None)` means the catalog has no record for the id.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn stock(&self, product_id: i64) -> Result<Option<Stock>, ApiError>;
    async fn product(&self, product_id: i64) -> Result<Option<Product>, ApiError>;
}

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let res = self.http.get(&url).send().await?;

        if res.status() == StatusCode::NOT_FOUND {
            tracing::debug!("catalog has no record at {}", url);
            return Ok(None);
        }

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(ApiError::Status { status, body });
        }

        Ok(Some(res.json::<T>().await?))
    }
}

#[async_trait]
impl CatalogApi for ApiClient {
    async fn stock(&self, product_id: i64) -> Result<Option<Stock>, ApiError> {
        self.get_json(&format!("/stock/{product_id}")).await
    }

    async fn product(&self, product_id: i64) -> Result<Option<Product>, ApiError> {
        self.get_json(&format!("/products/{product_id}")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_dropped_from_base_url() {
        let c = ApiClient::new("http://localhost:3333/");
        assert_eq!(c.base_url(), "http://localhost:3333");
    }
}
