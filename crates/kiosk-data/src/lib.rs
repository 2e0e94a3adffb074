//! HTTP plumbing for the Kiosk storefront widget.
//!
//! Provides a small builder API over reqwest, the endpoint configuration, and
//! the [`StorefrontApi`] seam the session controller talks through.
//!
//! # Example
//!
//! ```rust,ignore
//! use kiosk_data::{FetchClient, HttpStorefrontApi, StorefrontApi, StorefrontConfig};
//!
//! let config = StorefrontConfig::from_toml_str(include_str!("Storefront.toml"))?;
//! let client = FetchClient::new().with_base_url("https://shop.example.com");
//! let api = HttpStorefrontApi::new(client, config.api);
//!
//! let products = api.products().await?;
//! let zone = api.zone().await?;
//! ```

mod api;
mod client;
mod config;
mod error;
mod request;
mod response;

pub use api::{HttpStorefrontApi, StorefrontApi};
pub use client::{ClientRequestBuilder, FetchClient};
pub use config::{ApiConfig, ConfigError, LoggingConfig, StorefrontConfig};
pub use error::FetchError;
pub use request::{Method, RequestBuilder};
pub use response::Response;
