//! CLI command implementations.
//!
//! # Command Modules
//!
//! - [`view`] - Load the map for one described viewport
//! - [`details`] - Show one location
//! - [`types`] - List fruit types
//! - [`config`] - Configuration management (init, path, show)

pub mod config;
pub mod details;
pub mod types;
pub mod view;
