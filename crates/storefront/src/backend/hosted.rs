//! REST client for the hosted backend project.
//!
//! Speaks the service's auto-generated row API: password grant against
//! `/auth/v1/token`, row operations against `/rest/v1/products`. Product
//! reads are cached with `moka` (30-second TTL) and every write invalidates
//! the cache, so the admin screen sees its own edits immediately.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use moka::future::Cache;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use mango_stand_core::{Product, ProductId};

use super::{Backend, BackendError, NewProduct, ProductPatch};
use crate::config::BackendConfig;

const PRODUCTS_CACHE_KEY: &str = "products";
const CACHE_TTL: Duration = Duration::from_secs(30);

/// Token response from the password-grant endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the hosted backend's REST surface.
///
/// Cheap to clone; all state lives behind an `Arc`.
#[derive(Clone)]
pub struct HostedBackend {
    inner: Arc<HostedBackendInner>,
}

struct HostedBackendInner {
    client: reqwest::Client,
    token_endpoint: String,
    products_endpoint: String,
    api_key: SecretString,
    /// Access token from the startup sign-in. Writes require it.
    session: RwLock<Option<SecretString>>,
    cache: Cache<String, Vec<Product>>,
}

impl HostedBackend {
    /// Create a new client. No network traffic happens until the first call.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let base = config.url.as_str().trim_end_matches('/').to_string();

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(HostedBackendInner {
                client: reqwest::Client::new(),
                token_endpoint: format!("{base}/auth/v1/token?grant_type=password"),
                products_endpoint: format!("{base}/rest/v1/products"),
                api_key: config.service_key.clone(),
                session: RwLock::new(None),
                cache,
            }),
        }
    }

    /// Whether the startup sign-in has produced a session.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.inner
            .session
            .read()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    fn bearer_token(&self) -> Result<String, BackendError> {
        let guard = self
            .inner
            .session
            .read()
            .map_err(|_| BackendError::AuthRequired)?;
        guard
            .as_ref()
            .map(|token| token.expose_secret().to_string())
            .ok_or(BackendError::AuthRequired)
    }

    /// A request builder with the project API key attached, authorized by
    /// the session token when one exists and the key otherwise.
    fn request(&self, method: reqwest::Method, url: &str) -> reqwest::RequestBuilder {
        let bearer = self
            .bearer_token()
            .unwrap_or_else(|_| self.inner.api_key.expose_secret().to_string());
        self.inner
            .client
            .request(method, url)
            .header("apikey", self.inner.api_key.expose_secret())
            .header("Authorization", format!("Bearer {bearer}"))
    }

    async fn write_response(response: reqwest::Response) -> Result<Vec<Product>, BackendError> {
        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(BackendError::AuthRequired);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Write(format!("{status}: {body}")));
        }
        response
            .json::<Vec<Product>>()
            .await
            .map_err(|err| BackendError::Write(err.to_string()))
    }

    async fn invalidate_products(&self) {
        self.inner.cache.invalidate(PRODUCTS_CACHE_KEY).await;
    }
}

impl Backend for HostedBackend {
    #[instrument(skip_all)]
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .post(&self.inner.token_endpoint)
            .header("apikey", self.inner.api_key.expose_secret())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|err| BackendError::Fetch(err.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::AuthRequired);
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|err| BackendError::Fetch(err.to_string()))?;

        if let Ok(mut guard) = self.inner.session.write() {
            *guard = Some(SecretString::from(token.access_token));
        }
        debug!("backend session established");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        if let Some(products) = self.inner.cache.get(PRODUCTS_CACHE_KEY).await {
            debug!(count = products.len(), "product list served from cache");
            return Ok(products);
        }

        let url = format!("{}?select=*&order=id.asc", self.inner.products_endpoint);
        let response = self
            .request(reqwest::Method::GET, &url)
            .send()
            .await
            .map_err(|err| BackendError::Fetch(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(BackendError::Fetch(status.to_string()));
        }

        let products: Vec<Product> = response
            .json()
            .await
            .map_err(|err| BackendError::Fetch(err.to_string()))?;

        self.inner
            .cache
            .insert(PRODUCTS_CACHE_KEY.to_string(), products.clone())
            .await;
        debug!(count = products.len(), "product list fetched");
        Ok(products)
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn create_product(&self, product: NewProduct) -> Result<Product, BackendError> {
        // Inserts are rejected before any bytes go out when there is no
        // signed-in session.
        let _ = self.bearer_token()?;

        let response = self
            .request(reqwest::Method::POST, &self.inner.products_endpoint)
            .header("Prefer", "return=representation")
            .json(&product)
            .send()
            .await
            .map_err(|err| BackendError::Write(err.to_string()))?;

        let mut rows = Self::write_response(response).await?;
        self.invalidate_products().await;
        rows.pop()
            .ok_or_else(|| BackendError::Write("insert returned no row".to_string()))
    }

    #[instrument(skip(self, patch))]
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, BackendError> {
        let url = format!("{}?id=eq.{id}", self.inner.products_endpoint);
        let response = self
            .request(reqwest::Method::PATCH, &url)
            .header("Prefer", "return=representation")
            .json(&patch)
            .send()
            .await
            .map_err(|err| BackendError::Write(err.to_string()))?;

        let mut rows = Self::write_response(response).await?;
        self.invalidate_products().await;
        rows.pop()
            .ok_or_else(|| BackendError::NotFound(format!("product {id}")))
    }

    #[instrument(skip(self))]
    async fn delete_product(&self, id: ProductId) -> Result<(), BackendError> {
        let url = format!("{}?id=eq.{id}", self.inner.products_endpoint);
        let response = self
            .request(reqwest::Method::DELETE, &url)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|err| BackendError::Write(err.to_string()))?;

        let rows = Self::write_response(response).await?;
        self.invalidate_products().await;
        if rows.is_empty() {
            return Err(BackendError::NotFound(format!("product {id}")));
        }
        Ok(())
    }
}
