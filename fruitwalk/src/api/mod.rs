//! Falling Fruit API access.
//!
//! - [`http`]: transport trait and the reqwest implementation
//! - [`urls`]: request URL construction
//! - [`client`]: the [`FruitApi`] seam and the decoding client

pub mod client;
mod config;
mod error;
pub mod http;
pub mod urls;

pub use client::{FallingFruitApi, FruitApi};
pub use config::{
    ApiConfig, DEFAULT_API_KEY, DEFAULT_BASE_URL, DEFAULT_LOCALE, DEFAULT_LOCATION_LIMIT,
    DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
pub use error::ApiError;
pub use http::{AsyncHttpClient, HttpResponse, ReqwestClient};
