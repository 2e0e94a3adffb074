//! Kiosk storefront widget
//!
//! Client-side rendered Leptos app over the `kiosk-session` controller:
//! - Catalog cards with quantity selectors
//! - A single cart panel with per-line controls
//! - In-page checkout form
//! - Zone badge

mod app;
mod browser;
mod logging;

use kiosk_data::{ConfigError, StorefrontConfig};
use wasm_bindgen::prelude::wasm_bindgen;

const CONFIG: &str = include_str!("../Storefront.toml");

#[wasm_bindgen(start)]
pub fn start() {
    use app::App;
    console_error_panic_hook::set_once();

    let (config, config_error) = load_config(CONFIG);
    logging::init(
        config
            .logging
            .tracing_level()
            .unwrap_or(tracing::Level::INFO),
    );
    if let Some(e) = config_error {
        tracing::warn!(error = %e, "invalid Storefront.toml, using defaults");
    }

    leptos::mount::mount_to_body(move || leptos::view! { <App config=config.clone()/> });
}

/// Parse the embedded config, falling back to defaults on error.
fn load_config(content: &str) -> (StorefrontConfig, Option<ConfigError>) {
    match StorefrontConfig::from_toml_str(content) {
        Ok(config) => (config, None),
        Err(e) => (StorefrontConfig::default(), Some(e)),
    }
}
