//! API client configuration.

use std::time::Duration;

/// Default Falling Fruit server.
pub const DEFAULT_BASE_URL: &str = "https://beta.fallingfruit.org";

/// Public key shipped with the mobile clients.
pub const DEFAULT_API_KEY: &str = "AKDJGHSD";

/// Default response locale.
pub const DEFAULT_LOCALE: &str = "en";

/// Default cap on locations returned per request.
pub const DEFAULT_LOCATION_LIMIT: u32 = 300;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// User agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!("FruitWalk/", env!("CARGO_PKG_VERSION"));

/// Connection and query settings for the Falling Fruit API.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    /// Server root, without a trailing slash
    pub base_url: String,
    pub api_key: String,
    pub locale: String,
    /// Maximum number of locations per request
    pub location_limit: u32,
    /// Include municipal tree inventories
    pub include_muni: bool,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            location_limit: DEFAULT_LOCATION_LIMIT,
            include_muni: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_location_limit(mut self, limit: u32) -> Self {
        self.location_limit = limit;
        self
    }

    pub fn with_include_muni(mut self, include: bool) -> Self {
        self.include_muni = include;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, "https://beta.fallingfruit.org");
        assert_eq!(config.location_limit, 300);
        assert!(config.include_muni);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("FruitWalk/"));
    }

    #[test]
    fn test_builders() {
        let config = ApiConfig::default()
            .with_base_url("http://localhost:3000")
            .with_location_limit(50)
            .with_include_muni(false)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.location_limit, 50);
        assert!(!config.include_muni);
        assert_eq!(config.timeout, Duration::from_secs(5));
    }
}
