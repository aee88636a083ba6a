//! Configuration CLI commands.
//!
//! Provides `config init`, `config path` and `config show`.

use clap::Subcommand;
use fruitwalk::config::{config_file_path, ConfigFile};

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Write a commented config file with the defaults, if none exists
    Init,

    /// Show the configuration file path
    Path,

    /// Show the effective configuration
    Show,
}

/// Run a config subcommand.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init => run_init(),
        ConfigCommands::Path => run_path(),
        ConfigCommands::Show => run_show(),
    }
}

fn run_init() -> Result<(), CliError> {
    let existed = config_file_path().exists();
    let path = ConfigFile::ensure_exists()?;
    if existed {
        println!("Config file already exists: {}", path.display());
    } else {
        println!("Created config file: {}", path.display());
    }
    Ok(())
}

fn run_path() -> Result<(), CliError> {
    println!("{}", config_file_path().display());
    Ok(())
}

fn run_show() -> Result<(), CliError> {
    let path = config_file_path();
    let config = ConfigFile::load()?;

    if path.exists() {
        println!("; {}", path.display());
    } else {
        println!("; {} (not found, showing defaults)", path.display());
    }
    println!();

    println!("[api]");
    println!("  base_url = {}", config.api.base_url);
    println!("  api_key = {}", config.api.api_key);
    println!("  locale = {}", config.api.locale);
    println!("  location_limit = {}", config.api.location_limit);
    println!("  include_muni = {}", config.api.include_muni);
    println!("  timeout = {}", config.api.timeout);
    println!();
    println!("[map]");
    println!(
        "  location_zoom_threshold = {}",
        config.map.location_zoom_threshold
    );
    println!(
        "  location_prefetch_multiplier = {}",
        config.map.location_prefetch_multiplier
    );
    println!(
        "  cluster_prefetch_multiplier = {}",
        config.map.cluster_prefetch_multiplier
    );
    println!("  stale_entry_policy = {}", config.map.stale_entry_policy);
    println!();
    println!("[logging]");
    println!("  directory = {}", config.logging.directory.display());
    println!("  file = {}", config.logging.file);

    Ok(())
}
