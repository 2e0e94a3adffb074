//! Storefront configuration.
//!
//! Loaded from TOML. Every field has a default, so an empty document yields
//! the stock endpoint layout.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The document is not valid TOML or has the wrong shape.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field parsed but holds an unusable value.
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Top-level storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    /// Service endpoints.
    #[serde(default)]
    pub api: ApiConfig,

    /// Console logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.api.validate()?;
        self.logging.validate()
    }
}

/// Endpoint layout of the storefront services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin the paths are resolved against. Defaults to the page origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Catalog endpoint (GET, JSON array).
    #[serde(default = "default_products_path")]
    pub products_path: String,

    /// Purchase endpoint (POST, JSON).
    #[serde(default = "default_purchase_path")]
    pub purchase_path: String,

    /// Zone label endpoint (GET, plain text).
    #[serde(default = "default_zone_path")]
    pub zone_path: String,

    /// Prefix for product images; the image key is appended.
    #[serde(default = "default_images_path")]
    pub images_path: String,
}

fn default_products_path() -> String {
    "/api/products".to_string()
}

fn default_purchase_path() -> String {
    "/api/purchase".to_string()
}

fn default_zone_path() -> String {
    "/az.txt".to_string()
}

fn default_images_path() -> String {
    "/images/".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            products_path: default_products_path(),
            purchase_path: default_purchase_path(),
            zone_path: default_zone_path(),
            images_path: default_images_path(),
        }
    }
}

impl ApiConfig {
    /// URL of a product image.
    pub fn image_url(&self, image_key: &str) -> String {
        format!("{}{}", self.images_path, image_key)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.base_url {
            if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
                return Err(ConfigError::Invalid {
                    field: "api.base_url",
                    reason: format!("expected an http(s) URL, got {base_url:?}"),
                });
            }
        }

        let paths = [
            ("api.products_path", &self.products_path),
            ("api.purchase_path", &self.purchase_path),
            ("api.zone_path", &self.zone_path),
            ("api.images_path", &self.images_path),
        ];
        for (field, path) in paths {
            if !path.starts_with('/') {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("path must start with '/', got {path:?}"),
                });
            }
        }
        Ok(())
    }
}

/// Console logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level: trace, debug, info, warn or error.
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

impl LoggingConfig {
    /// The configured level as a `tracing` level.
    pub fn tracing_level(&self) -> Result<tracing::Level, ConfigError> {
        self.level.parse().map_err(|_| ConfigError::Invalid {
            field: "logging.level",
            reason: format!("unknown level {:?}", self.level),
        })
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.tracing_level().map(|_| ())
    }
}
