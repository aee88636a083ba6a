//! FruitWalk - viewport-driven foraging map data
//!
//! This library turns map camera changes into Falling Fruit API requests,
//! caches what it fetched per zoom level, and publishes the resulting map
//! state to subscribers.
//!
//! # Modules
//!
//! - [`geo`]: viewport math and bounding boxes
//! - [`region`]: camera regions and the requests derived from them
//! - [`cache`]: per-zoom region cache
//! - [`fetch`]: the fetch coordinator and observable load state
//! - [`api`]: HTTP client, URL builder, and response decoding
//! - [`model`]: location, cluster, type, and details records
//! - [`filter`]: type filtering of fetched locations
//! - [`config`]: `config.ini` handling
//! - [`logging`]: tracing setup

pub mod api;
pub mod cache;
pub mod config;
pub mod fetch;
pub mod filter;
pub mod geo;
pub mod logging;
pub mod model;
pub mod region;

/// Crate version, as reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
