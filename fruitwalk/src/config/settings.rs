//! Typed settings loaded from `config.ini`.

use std::path::PathBuf;
use std::time::Duration;

use crate::api::{
    ApiConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_LOCALE, DEFAULT_LOCATION_LIMIT,
    DEFAULT_TIMEOUT_SECS,
};
use crate::cache::StaleEntryPolicy;
use crate::fetch::{
    FetchConfig, DEFAULT_CLUSTER_PREFETCH_MULTIPLIER, DEFAULT_LOCATION_PREFETCH_MULTIPLIER,
    DEFAULT_LOCATION_ZOOM_THRESHOLD,
};

use super::file::config_directory;

/// Default log file name.
pub const DEFAULT_LOG_FILE: &str = "fruitwalk.log";

/// Complete user configuration.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigFile {
    pub api: ApiSettings,
    pub map: MapSettings,
    pub logging: LoggingSettings,
}

/// `[api]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub locale: String,
    pub location_limit: u32,
    pub include_muni: bool,
    /// Request timeout in seconds
    pub timeout: u64,
}

/// `[map]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub location_zoom_threshold: u8,
    pub location_prefetch_multiplier: f64,
    pub cluster_prefetch_multiplier: f64,
    pub stale_entry_policy: StaleEntryPolicy,
}

/// `[logging]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    pub directory: PathBuf,
    pub file: String,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            location_limit: DEFAULT_LOCATION_LIMIT,
            include_muni: true,
            timeout: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            location_zoom_threshold: DEFAULT_LOCATION_ZOOM_THRESHOLD,
            location_prefetch_multiplier: DEFAULT_LOCATION_PREFETCH_MULTIPLIER,
            cluster_prefetch_multiplier: DEFAULT_CLUSTER_PREFETCH_MULTIPLIER,
            stale_entry_policy: StaleEntryPolicy::default(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: config_directory().join("logs"),
            file: DEFAULT_LOG_FILE.to_string(),
        }
    }
}

impl ConfigFile {
    /// API client settings.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig::default()
            .with_base_url(self.api.base_url.trim_end_matches('/'))
            .with_api_key(self.api.api_key.as_str())
            .with_locale(self.api.locale.as_str())
            .with_location_limit(self.api.location_limit)
            .with_include_muni(self.api.include_muni)
            .with_timeout(Duration::from_secs(self.api.timeout))
    }

    /// Fetch coordinator settings.
    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig::default()
            .with_location_zoom_threshold(self.map.location_zoom_threshold)
            .with_location_prefetch_multiplier(self.map.location_prefetch_multiplier)
            .with_cluster_prefetch_multiplier(self.map.cluster_prefetch_multiplier)
            .with_stale_entry_policy(self.map.stale_entry_policy)
    }
}
