//! User configuration.
//!
//! Settings are read from `~/.fruitwalk/config.ini`:
//!
//! ```ini
//! [api]
//! base_url = https://beta.fallingfruit.org
//! timeout = 30
//!
//! [map]
//! location_zoom_threshold = 14
//! stale_entry_policy = retain
//! ```
//!
//! Missing keys fall back to defaults. Invalid values are rejected with
//! [`ConfigFileError::InvalidValue`].

mod file;
mod parser;
mod settings;
mod writer;

pub use file::{config_directory, config_file_path, ConfigFileError};
pub use settings::{ApiSettings, ConfigFile, LoggingSettings, MapSettings, DEFAULT_LOG_FILE};
