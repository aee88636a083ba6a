//! Falling Fruit API client.
//!
//! [`FruitApi`] is the seam the fetch coordinator depends on. It takes a kind
//! and a viewport request and yields a decoded payload, with no retries.
//! [`FallingFruitApi`] implements it over any [`AsyncHttpClient`].

use std::future::Future;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::config::ApiConfig;
use super::error::ApiError;
use super::http::{AsyncHttpClient, HttpResponse};
use super::urls::{location_details_url, map_url, types_url};
use crate::model::{FetchKind, FruitCluster, FruitLocation, FruitType, LocationDetails, Payload};
use crate::region::ViewportRequest;

/// Fetch-and-decode collaborator for map data.
pub trait FruitApi: Send + Sync + 'static {
    /// Fetches locations or clusters for a request.
    ///
    /// # Arguments
    ///
    /// * `kind` - Which endpoint to call
    /// * `request` - Zoom and bounding box to fetch
    fn fetch(
        &self,
        kind: FetchKind,
        request: &ViewportRequest,
    ) -> impl Future<Output = Result<Payload, ApiError>> + Send;
}

/// Client for the Falling Fruit REST API.
///
/// # Example
///
/// ```ignore
/// use fruitwalk::api::{ApiConfig, FallingFruitApi, ReqwestClient};
///
/// let config = ApiConfig::default();
/// let api = FallingFruitApi::new(ReqwestClient::new(&config)?, config);
/// let types = api.fruit_types().await?;
/// ```
pub struct FallingFruitApi<C: AsyncHttpClient> {
    http_client: C,
    config: ApiConfig,
}

impl<C: AsyncHttpClient> FallingFruitApi<C> {
    pub fn new(http_client: C, config: ApiConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Fetches the full record for one location.
    pub async fn location_details(&self, id: u64) -> Result<LocationDetails, ApiError> {
        let url = location_details_url(&self.config, id)?;
        self.get_json(url.as_str()).await
    }

    /// Fetches every fruit type the server knows.
    pub async fn fruit_types(&self) -> Result<Vec<FruitType>, ApiError> {
        let url = types_url(&self.config)?;
        self.get_json(url.as_str()).await
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let response = self.http_client.get(url).await?;
        let body = check_response(url, response)?;
        serde_json::from_slice(&body).map_err(|e| {
            warn!(url = url, error = %e, "Failed to decode response");
            ApiError::from(e)
        })
    }
}

impl<C: AsyncHttpClient + 'static> FruitApi for FallingFruitApi<C> {
    async fn fetch(&self, kind: FetchKind, request: &ViewportRequest) -> Result<Payload, ApiError> {
        let url = map_url(&self.config, kind, request)?;
        debug!(kind = %kind, zoom = request.zoom, bounds = %request.bounds, "Fetching map data");

        let payload = match kind {
            FetchKind::Locations => {
                Payload::from(self.get_json::<Vec<FruitLocation>>(url.as_str()).await?)
            }
            FetchKind::Clusters => {
                Payload::from(self.get_json::<Vec<FruitCluster>>(url.as_str()).await?)
            }
        };

        debug!(kind = %kind, count = payload.len(), "Map data received");
        Ok(payload)
    }
}

/// Maps non-2xx statuses and empty bodies to errors.
fn check_response(url: &str, response: HttpResponse) -> Result<Vec<u8>, ApiError> {
    if !response.is_success() {
        warn!(url = url, status = response.status, "HTTP error status");
        let body = (!response.body.is_empty())
            .then(|| String::from_utf8_lossy(&response.body).into_owned());
        return Err(ApiError::RequestFailed {
            status: response.status,
            body,
        });
    }
    if response.body.is_empty() {
        return Err(ApiError::NoData);
    }
    Ok(response.body)
}
