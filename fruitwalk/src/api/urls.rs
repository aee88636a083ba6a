//! Request URL construction.
//!
//! # Endpoints
//!
//! | Request          | Path                         | Extra query            |
//! |------------------|------------------------------|------------------------|
//! | Locations        | `api/0.3/locations`          | muni, limit, bounds, zoom |
//! | Clusters         | `api/0.3/clusters`           | muni, bounds, zoom     |
//! | Location details | `api/0.3/locations/{id}`     |                        |
//! | Types            | `api/0.3/types`              |                        |
//!
//! Every request carries `api_key` and `locale`.

use reqwest::Url;

use super::config::ApiConfig;
use super::error::ApiError;
use crate::model::FetchKind;
use crate::region::ViewportRequest;

const API_PATH: &str = "api/0.3";
const LOCATIONS_PATH: &str = "locations";
const CLUSTERS_PATH: &str = "clusters";
const TYPES_PATH: &str = "types";

/// Builds URLs from a base, path components, and query parameters.
///
/// Query parameters keep insertion order. Setting a key twice replaces the
/// earlier value.
#[derive(Debug, Clone)]
pub struct UrlBuilder {
    base: String,
    path: Vec<String>,
    query: Vec<(String, String)>,
}

impl UrlBuilder {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
            path: Vec::new(),
            query: Vec::new(),
        }
    }

    /// Appends one or more `/`-separated path segments.
    pub fn path(mut self, component: &str) -> Self {
        self.path.extend(
            component
                .split('/')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
        self
    }

    pub fn query(mut self, key: &str, value: impl ToString) -> Self {
        let value = value.to_string();
        match self.query.iter_mut().find(|(k, _)| k == key) {
            Some(existing) => existing.1 = value,
            None => self.query.push((key.to_string(), value)),
        }
        self
    }

    /// Adds the parameters every API call carries.
    pub fn defaults(self, config: &ApiConfig) -> Self {
        self.query("api_key", &config.api_key)
            .query("locale", &config.locale)
    }

    /// Produces the final URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] if the base is not an absolute
    /// hierarchical URL.
    pub fn build(&self) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", self.base, e)))?;

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| ApiError::InvalidUrl(format!("{}: cannot be a base", self.base)))?;
            segments.pop_if_empty().extend(&self.path);
        }

        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&self.query);
        }

        Ok(url)
    }
}

/// URL for a map request of the given kind.
pub fn map_url(
    config: &ApiConfig,
    kind: FetchKind,
    request: &ViewportRequest,
) -> Result<Url, ApiError> {
    let builder = UrlBuilder::new(&config.base_url).path(API_PATH);
    let builder = match kind {
        FetchKind::Locations => builder
            .path(LOCATIONS_PATH)
            .defaults(config)
            .query("muni", config.include_muni)
            .query("limit", config.location_limit),
        FetchKind::Clusters => builder
            .path(CLUSTERS_PATH)
            .defaults(config)
            .query("muni", config.include_muni),
    };
    builder
        .query("bounds", request.bounds.to_query_value())
        .query("zoom", request.zoom)
        .build()
}

/// URL for a single location's details.
pub fn location_details_url(config: &ApiConfig, id: u64) -> Result<Url, ApiError> {
    UrlBuilder::new(&config.base_url)
        .path(API_PATH)
        .path(LOCATIONS_PATH)
        .path(&id.to_string())
        .defaults(config)
        .build()
}

/// URL for the full type catalogue.
pub fn types_url(config: &ApiConfig) -> Result<Url, ApiError> {
    UrlBuilder::new(&config.base_url)
        .path(API_PATH)
        .path(TYPES_PATH)
        .defaults(config)
        .build()
}
