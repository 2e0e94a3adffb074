//! Storefront service bindings.

use async_trait::async_trait;
use kiosk_commerce::catalog::Product;
use kiosk_commerce::checkout::{PurchaseRequest, PurchaseResponse};

use crate::client::FetchClient;
use crate::config::ApiConfig;
use crate::FetchError;

/// The three remote services the widget talks to.
///
/// Futures are not `Send`: in the browser everything runs on the page's
/// event loop.
#[async_trait(?Send)]
pub trait StorefrontApi {
    /// Fetch the product catalog.
    async fn products(&self) -> Result<Vec<Product>, FetchError>;

    /// Submit a purchase.
    ///
    /// A well-formed `{success: false}` body is `Ok`; only transport and
    /// decoding failures are errors.
    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, FetchError>;

    /// Fetch the raw zone label.
    async fn zone(&self) -> Result<String, FetchError>;
}

/// [`StorefrontApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStorefrontApi {
    client: FetchClient,
    endpoints: ApiConfig,
}

impl HttpStorefrontApi {
    /// Bind a client to an endpoint layout.
    ///
    /// If the config names a base URL it replaces whatever the client had.
    pub fn new(client: FetchClient, endpoints: ApiConfig) -> Self {
        let client = match &endpoints.base_url {
            Some(base_url) => client.with_base_url(base_url.clone()),
            None => client,
        };
        Self { client, endpoints }
    }

    /// Endpoint layout in use.
    pub fn endpoints(&self) -> &ApiConfig {
        &self.endpoints
    }
}

#[async_trait(?Send)]
impl StorefrontApi for HttpStorefrontApi {
    async fn products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self
            .client
            .get(&self.endpoints.products_path)
            .accept("application/json")
            .send()
            .await?
            .error_for_status()?;
        response.json()
    }

    async fn purchase(&self, request: &PurchaseRequest) -> Result<PurchaseResponse, FetchError> {
        let response = self
            .client
            .post(&self.endpoints.purchase_path)
            .accept("application/json")
            .json(request)?
            .send()
            .await?;

        // Rejections may arrive with a 4xx status and a JSON reason; decode
        // the body whatever the status and only fail if it is not ours.
        if !response.is_success() {
            tracing::debug!(status = response.status, "purchase endpoint returned non-2xx");
        }
        response.json()
    }

    async fn zone(&self) -> Result<String, FetchError> {
        let response = self
            .client
            .get(&self.endpoints.zone_path)
            .accept("text/plain")
            .send()
            .await?
            .error_for_status()?;
        response.text()
    }
}
