//! CLI runner for common setup and operations.
//!
//! Encapsulates config loading, logging initialization, and API client
//! creation so command handlers stay small.

use std::sync::Arc;

use fruitwalk::api::{FallingFruitApi, ReqwestClient};
use fruitwalk::config::ConfigFile;
use fruitwalk::fetch::FetchCoordinator;
use fruitwalk::logging::{init_logging, LoggingGuard};
use tracing::info;

use crate::error::CliError;

/// Falling Fruit client over the production transport.
pub type Api = FallingFruitApi<ReqwestClient>;

/// Runner that manages CLI lifecycle and common operations.
pub struct CliRunner {
    /// Logging guard - keeps logging active while runner exists
    logging_guard: LoggingGuard,
    /// Loaded configuration file
    config: ConfigFile,
}

impl CliRunner {
    /// Create a new CLI runner, loading config and initializing logging.
    ///
    /// # Arguments
    ///
    /// * `verbose` - Mirror log output to stderr
    pub fn new(verbose: bool) -> Result<Self, CliError> {
        // Load config file (or use defaults if not present)
        let config = ConfigFile::load()?;

        let logging_guard = init_logging(
            &config.logging.directory,
            &config.logging.file,
            verbose,
        )
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

        Ok(Self {
            logging_guard,
            config,
        })
    }

    /// Log startup information for a command.
    pub fn log_startup(&self, command: &str) {
        info!("FruitWalk v{}", fruitwalk::VERSION);
        info!(log_file = %self.logging_guard.path().display(), "FruitWalk CLI: {} command", command);
    }

    /// Create an API client from the `[api]` settings.
    pub fn create_api(&self) -> Result<Api, CliError> {
        let api_config = self.config.api_config();
        let http_client = ReqwestClient::new(&api_config)?;
        info!(base_url = %api_config.base_url, "API client created");
        Ok(FallingFruitApi::new(http_client, api_config))
    }

    /// Create a fetch coordinator from the `[api]` and `[map]` settings.
    pub fn create_coordinator(&self) -> Result<Arc<FetchCoordinator<Api>>, CliError> {
        let api = self.create_api()?;
        Ok(Arc::new(FetchCoordinator::new(
            api,
            self.config.fetch_config(),
        )))
    }
}
