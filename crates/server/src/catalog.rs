//! HTTP client for the upstream product catalog.
//!
//! One GET per lookup, no retry, no cache. The response body is classified
//! into the three outcomes the page handler branches on: a decoded product,
//! an empty/`null` body (the upstream's "no such product" shape), or a
//! failure (transport error or undecodable body).

use std::time::Duration;

use reqwest::Client;
use shopfront_core::Product;
use thiserror::Error;

#[derive(Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("catalog returned an undecodable body: {0}")]
    Decode(#[source] serde_json::Error),
}

impl CatalogClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url: base_url.trim_end_matches('/').to_string() })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Look up one product by route id.
    ///
    /// HTTP status is deliberately ignored: the upstream answers missing ids
    /// with 200 and an empty body, so classification happens on the body
    /// alone. `Ok(None)` is the not-found signal; `Err` covers transport
    /// failures and bodies that do not decode into a complete product.
    pub async fn fetch_product(&self, id: &str) -> Result<Option<Product>, CatalogError> {
        let url = format!("{}/products/{}", self.base_url, encode_path_segment(id));
        let body = self.client.get(&url).send().await?.text().await?;

        let trimmed = body.trim();
        if trimmed.is_empty() || trimmed == "null" {
            return Ok(None);
        }

        serde_json::from_str::<Product>(trimmed).map(Some).map_err(CatalogError::Decode)
    }

    /// One request against the catalog origin, used by the health endpoint.
    pub async fn probe(&self) -> Result<(), CatalogError> {
        self.client.get(&self.base_url).send().await?;
        Ok(())
    }
}

/// Percent-encode a route id as a single URL path segment. RFC 3986
/// unreserved characters pass through; everything else is encoded so the id
/// cannot splice extra path segments or query parameters into the URL.
fn encode_path_segment(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            other => {
                encoded.push_str(&format!("%{other:02X}"));
            }
        }
    }
    encoded
}
