//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent formatting
//! and appropriate exit codes.

use std::fmt;
use std::process;

use fruitwalk::api::ApiError;
use fruitwalk::config::ConfigFileError;
use fruitwalk::geo::GeoError;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be read or written
    Config(ConfigFileError),
    /// Invalid camera or view arguments
    Viewport(GeoError),
    /// Falling Fruit API request failed
    Api(ApiError),
    /// Background fetch task did not complete
    Task(String),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Check {} or delete it to restore the defaults.",
                    fruitwalk::config::config_file_path().display()
                );
            }
            CliError::Api(ApiError::Network(_)) => {
                eprintln!();
                eprintln!("Check your network connection and the [api] base_url setting.");
            }
            CliError::Api(ApiError::RequestFailed { status: 401 | 403, .. }) => {
                eprintln!();
                eprintln!("The server rejected the API key. Check the [api] api_key setting.");
            }
            _ => {}
        }

        process::exit(1)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Viewport(e) => write!(f, "Invalid viewport: {}", e),
            CliError::Api(e) => write!(f, "{}: {}", e.title(), e),
            CliError::Task(msg) => write!(f, "Fetch task failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Viewport(e) => Some(e),
            CliError::Api(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigFileError> for CliError {
    fn from(e: ConfigFileError) -> Self {
        CliError::Config(e)
    }
}

impl From<GeoError> for CliError {
    fn from(e: GeoError) -> Self {
        CliError::Viewport(e)
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Api(e)
    }
}
