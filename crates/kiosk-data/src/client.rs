//! Fetch client over reqwest.
//!
//! reqwest uses the browser's `fetch` on `wasm32` and hyper elsewhere, so the
//! same client serves the widget and native tooling. Browser fetches still
//! need absolute URLs, hence the base URL.

use crate::request::{Method, RequestBuilder};
use crate::response::Response;
use crate::FetchError;

/// HTTP client for the storefront services.
#[derive(Debug, Clone, Default)]
pub struct FetchClient {
    http: reqwest::Client,
    base_url: Option<String>,
}

impl FetchClient {
    /// Create a new HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend `base_url` to every relative request path.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Base URL, if any.
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    /// Create a GET request.
    pub fn get(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Get, url)
    }

    /// Create a POST request.
    pub fn post(&self, url: impl Into<String>) -> ClientRequestBuilder {
        self.request(Method::Post, url)
    }

    /// Create a request with an explicit method.
    pub fn request(&self, method: Method, url: impl Into<String>) -> ClientRequestBuilder {
        ClientRequestBuilder {
            http: self.http.clone(),
            builder: RequestBuilder::new(method, self.resolve(url.into())),
        }
    }

    fn resolve(&self, url: String) -> String {
        match &self.base_url {
            Some(base) if !is_absolute(&url) => {
                format!("{}{}", base.trim_end_matches('/'), url)
            }
            _ => url,
        }
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// A request builder bound to a client.
#[derive(Debug)]
pub struct ClientRequestBuilder {
    http: reqwest::Client,
    builder: RequestBuilder,
}

impl ClientRequestBuilder {
    /// Set the request body as JSON.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, FetchError> {
        self.builder = self.builder.json(value)?;
        Ok(self)
    }

    /// Set the Accept header.
    pub fn accept(mut self, content_type: impl Into<String>) -> Self {
        self.builder = self.builder.accept(content_type);
        self
    }

    /// The request as built so far.
    pub fn as_request(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Send the request and read the whole response.
    ///
    /// Non-2xx statuses are not errors here; see [`Response::error_for_status`].
    pub async fn send(self) -> Result<Response, FetchError> {
        let RequestBuilder {
            method,
            url,
            headers,
            body,
        } = self.builder;

        let mut request = self.http.request(method.into(), url.as_str());
        for (key, value) in &headers {
            request = request.header(key.as_str(), value.as_str());
        }
        if let Some(body) = body {
            request = request.body(body);
        }

        tracing::debug!(method = method.as_str(), url = %url, "sending request");
        let response = request.send().await?;
        Response::read(response).await
    }
}
