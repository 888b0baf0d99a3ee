//! HTTP plumbing shared by every resource family.
//!
//! Each call is a single attempt: a non-success status or a transport error is
//! returned to the caller as-is, with no retry and no backoff.

use anyhow::Context;
use reqwest::{header, Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

use crate::auth::Operation;
use crate::config::ApiConfig;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    client: Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid API base URL: {}", config.base_url))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base URL cannot have paths appended: {}", config.base_url);
        }

        let mut builder =
            Client::builder().user_agent(concat!("staybook/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/api/v1/<segments...>`, with each segment percent-encoded.
    pub fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v1"]).extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> RequestBuilder {
        let mut builder = self.client.request(method, self.endpoint(segments));
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    async fn execute(&self, operation: Operation, builder: RequestBuilder) -> Result<Response> {
        debug!(%operation, "Sending request");
        let response = builder
            .send()
            .await
            .map_err(|source| Error::Transport { operation, source })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%operation, %status, "Remote operation failed");
            return Err(Error::RemoteOperationFailed {
                operation,
                status,
                body,
            });
        }

        debug!(%operation, %status, "Request succeeded");
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|source| Error::Transport { operation, source })?;
        serde_json::from_slice(&bytes).map_err(|e| Error::MalformedResponse {
            operation,
            reason: e.to_string(),
        })
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        operation: Operation,
        segments: &[&str],
        token: Option<&str>,
    ) -> Result<T> {
        let response = self
            .execute(operation, self.request(Method::GET, segments, token))
            .await?;
        Self::decode(operation, response).await
    }

    pub(crate) async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        operation: Operation,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        body: &B,
    ) -> Result<T> {
        let builder = self.request(method, segments, token).json(body);
        let response = self.execute(operation, builder).await?;
        Self::decode(operation, response).await
    }

    /// Send a request whose response body is not needed.
    pub(crate) async fn send<B: Serialize>(
        &self,
        operation: Operation,
        method: Method,
        segments: &[&str],
        token: Option<&str>,
        body: Option<&B>,
    ) -> Result<()> {
        let mut builder = self.request(method, segments, token);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(operation, builder).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base_url: &str) -> ApiClient {
        ApiClient::new(&ApiConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let api = client("http://localhost:5000");
        assert_eq!(
            api.endpoint(&["hotels", "h1", "bookings"]).as_str(),
            "http://localhost:5000/api/v1/hotels/h1/bookings"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let api = client("https://example.com/backend/");
        assert_eq!(
            api.endpoint(&["auth", "me"]).as_str(),
            "https://example.com/backend/api/v1/auth/me"
        );
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let api = client("http://localhost:5000");
        assert_eq!(
            api.endpoint(&["bookings", "a/b c"]).as_str(),
            "http://localhost:5000/api/v1/bookings/a%2Fb%20c"
        );
    }

    #[test]
    fn test_rejects_invalid_base_url() {
        let result = ApiClient::new(&ApiConfig {
            base_url: "not a url".to_string(),
            request_timeout_secs: Some(5),
        });
        assert!(result.is_err());

        let result = ApiClient::new(&ApiConfig {
            base_url: "mailto:ops@example.com".to_string(),
            request_timeout_secs: None,
        });
        assert!(result.is_err());
    }
}
