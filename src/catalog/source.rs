//! Product API client

use super::models::{decode_products, Product};
use async_trait::async_trait;
use mockall::automock;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Default endpoint returning the full product collection.
pub const DEFAULT_PRODUCTS_URL: &str = "https://admin.refabry.com/api/all/product/get";

/// Errors raised while fetching the product collection.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The request could not be sent or the body could not be read.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The product API answered with a non-2xx status.
    #[error("product API responded with status {0}")]
    Status(u16),

    /// The response body was not valid JSON.
    #[error("undecodable product API response: {0}")]
    Decode(String),
}

/// Where the catalog gets its products from.
#[automock]
#[async_trait]
pub trait ProductSource: Send + Sync {
    /// Fetches the full product collection.
    ///
    /// An empty list means the API answered but had no usable products.
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError>;
}

/// [`ProductSource`] backed by the remote product API.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    url: String,
    http: Client,
}

impl HttpProductSource {
    /// Creates a client for `url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            url: url.into(),
            http,
        })
    }
}

#[async_trait]
impl ProductSource for HttpProductSource {
    async fn fetch_all(&self) -> Result<Vec<Product>, SourceError> {
        let response = self.http.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }

        let bytes = response.bytes().await?;
        let body: Value =
            serde_json::from_slice(&bytes).map_err(|e| SourceError::Decode(e.to_string()))?;

        Ok(decode_products(&body))
    }
}
