//! HTTP transport abstraction for testability.

use std::future::Future;

use tracing::{debug, trace, warn};

use super::config::ApiConfig;
use super::error::ApiError;

/// Status and body of an HTTP response.
///
/// Non-2xx responses are returned as values, not errors, so the API layer
/// can decide how to report them.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for asynchronous HTTP client operations.
///
/// This abstraction allows mock transports in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs an async HTTP GET request.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to request
    ///
    /// # Returns
    ///
    /// The response, whatever its status, or [`ApiError::Network`] if no
    /// response was received.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, ApiError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with the timeout and user agent from `config`.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .pool_idle_timeout(std::time::Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ApiError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        trace!(url = url, "HTTP GET request starting");

        let response = match self.client.get(url).send().await {
            Ok(resp) => {
                debug!(
                    url = url,
                    status = resp.status().as_u16(),
                    "HTTP response received"
                );
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(ApiError::Network(format!("Request failed: {}", e)));
            }
        };

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Network(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Mock HTTP client that returns a fixed response and records URLs.
    pub struct MockHttpClient {
        pub response: Result<HttpResponse, ApiError>,
        pub requests: Mutex<Vec<String>>,
    }

    impl MockHttpClient {
        pub fn new(response: Result<HttpResponse, ApiError>) -> Self {
            Self {
                response,
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn ok(body: &str) -> Self {
            Self::new(Ok(HttpResponse::new(200, body)))
        }

        pub fn requested_urls(&self) -> Vec<String> {
            self.requests.lock().clone()
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
            self.requests.lock().push(url.to_string());
            self.response.clone()
        }
    }

    #[test]
    fn test_response_success_range() {
        assert!(HttpResponse::new(200, "x").is_success());
        assert!(HttpResponse::new(204, "").is_success());
        assert!(!HttpResponse::new(301, "").is_success());
        assert!(!HttpResponse::new(500, "").is_success());
    }

    #[tokio::test]
    async fn test_mock_client_records_urls() {
        let mock = MockHttpClient::ok("[]");
        let response = mock.get("http://example.com/a").await.unwrap();
        assert_eq!(response.body, b"[]");
        assert_eq!(mock.requested_urls(), vec!["http://example.com/a"]);
    }

    #[test]
    fn test_reqwest_client_builds() {
        assert!(ReqwestClient::new(&ApiConfig::default()).is_ok());
    }
}
