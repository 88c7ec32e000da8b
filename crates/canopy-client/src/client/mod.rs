//! HTTP client for the storefront REST backend.
//!
//! Wraps `reqwest` with typed request bodies and responses for the product,
//! menu-settings, pricing, and bundle endpoints. Any non-2xx response becomes
//! [`ClientError::Api`] carrying the best-effort message from the body.
//! Requests are never retried; callers surface the failure and let the user
//! try again.

mod bundles;
mod pricing;
mod products;
mod settings;

use std::time::Duration;

use canopy_core::AppConfig;
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{extract_error_message, ClientError};

/// Client for the storefront REST API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct CanopyClient {
    client: Client,
    base_url: Url,
}

impl CanopyClient {
    /// Creates a client rooted at `base_url` (for example the wiremock server
    /// URI in tests, or the storefront origin in production).
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ClientError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative joins append to any path
        // prefix instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { client, base_url })
    }

    /// Creates a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// See [`CanopyClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            &config.api_base_url,
            config.http_timeout_secs,
            &config.user_agent,
        )
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an API path such as `"api/products/4"` against the base URL
    /// and appends `query` pairs.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url =
            self.base_url
                .join(path.trim_start_matches('/'))
                .map_err(|e| ClientError::InvalidBaseUrl {
                    url: self.base_url.to_string(),
                    reason: e.to_string(),
                })?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in query {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET and decodes the JSON body into `T`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ClientError> {
        tracing::debug!(method = "GET", %url, "canopy api request");
        let response = self.client.get(url.clone()).send().await?;
        let response = Self::check_status(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
            context: format!("GET {}", url.path()),
            source: e,
        })
    }

    /// Sends a mutating request with an optional JSON body. The response
    /// body is ignored; collections are refetched after every mutation.
    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<(), ClientError> {
        tracing::debug!(%method, %url, has_body = body.is_some(), "canopy api request");
        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            // `.json` also sets `Content-Type: application/json`.
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Converts a non-2xx response into [`ClientError::Api`].
    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);
        tracing::debug!(status = status.as_u16(), %message, "canopy api error response");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CanopyClient {
        CanopyClient::new(base_url, 30, "canopy-test")
            .expect("client construction should not fail")
    }

    #[test]
    fn endpoint_joins_onto_root() {
        let client = test_client("http://localhost:3000");
        let url = client.endpoint("api/products", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/products");
    }

    #[test]
    fn endpoint_keeps_path_prefix() {
        let client = test_client("https://shop.example.com/store/");
        let url = client.endpoint("/api/bundles/4", &[]).unwrap();
        assert_eq!(url.as_str(), "https://shop.example.com/store/api/bundles/4");
    }

    #[test]
    fn endpoint_appends_query_pairs() {
        let client = test_client("http://localhost:3000");
        let url = client
            .endpoint("api/pricing/7", &[("type", "base_pricing")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:3000/api/pricing/7?type=base_pricing"
        );
    }

    #[test]
    fn new_rejects_garbage_base_url() {
        let err = CanopyClient::new("not a url", 30, "canopy-test").unwrap_err();
        assert!(matches!(err, ClientError::InvalidBaseUrl { .. }));
    }
}
