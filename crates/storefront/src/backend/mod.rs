//! The hosted backend - the one external collaborator.
//!
//! Product rows and the service credential live in a managed
//! backend-as-a-service project; this module is the narrow contract the rest
//! of the app consumes from it. The [`Backend`] trait exists so tests can
//! swap in an in-memory double; production uses [`HostedBackend`], a REST
//! client over the service's auto-generated row API.
//!
//! This authentication layer is independent of the simulated user login in
//! `mango_stand_core::auth`: the service credential gates data access, the
//! identity set gates screens.

mod hosted;

pub use hosted::HostedBackend;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use mango_stand_core::{Product, ProductId};

/// Errors from the hosted backend boundary.
///
/// Deliberately coarse: the UI renders everything except `NotFound` as one
/// generic "try again later" banner, so there is nothing to gain from a finer
/// taxonomy here.
#[derive(Debug, Error)]
pub enum BackendError {
    /// A read failed (transport or storage).
    #[error("failed to fetch from the backend: {0}")]
    Fetch(String),

    /// A write was rejected or failed in transit.
    #[error("backend write failed: {0}")]
    Write(String),

    /// A write was attempted without a valid external session.
    #[error("backend session required")]
    AuthRequired,

    /// The row does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Fields for a product that does not have an id yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image: String,
    pub stock: u32,
}

/// Partial update for an existing product. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
}

impl ProductPatch {
    /// True when the patch would change nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.image.is_none()
            && self.stock.is_none()
    }
}

/// The narrow contract the storefront consumes from the hosted backend.
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// Establish the external session with the fixed service credential.
    /// Called once at process start.
    async fn sign_in(&self, email: &str, password: &str) -> Result<(), BackendError>;

    /// Fetch every product row.
    async fn list_products(&self) -> Result<Vec<Product>, BackendError>;

    /// Fetch one product. The default implementation scans the full list,
    /// which is fine at demo-catalog scale.
    async fn get_product(&self, id: ProductId) -> Result<Product, BackendError> {
        self.list_products()
            .await?
            .into_iter()
            .find(|product| product.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("product {id}")))
    }

    /// Insert a product. Requires a live external session.
    async fn create_product(&self, product: NewProduct) -> Result<Product, BackendError>;

    /// Apply a partial update to a product.
    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, BackendError>;

    /// Delete a product.
    async fn delete_product(&self, id: ProductId) -> Result<(), BackendError>;
}
