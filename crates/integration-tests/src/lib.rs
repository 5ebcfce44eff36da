//! Integration tests for Mango Stand.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mango-stand-integration-tests
//! ```
//!
//! The scenario tests drive the domain layer and the catalog service against
//! [`FakeBackend`], an in-memory stand-in for the hosted backend. Nothing
//! here needs a server or network access.
//!
//! # Test Categories
//!
//! - `checkout_journeys` - Per-identity shopping journeys, login to receipt
//! - `admin_products` - Catalog CRUD through the backend contract

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Mutex, PoisonError};

use rust_decimal::Decimal;

use mango_stand_core::{Product, ProductId};
use mango_stand_storefront::backend::{Backend, BackendError, NewProduct, ProductPatch};

/// In-memory double for the hosted backend.
///
/// Mirrors the production client's observable rules: writes are rejected
/// until [`Backend::sign_in`] has been called, updates and deletes of missing
/// rows report `NotFound`, and ids are assigned in insertion order.
#[derive(Debug, Default)]
pub struct FakeBackend {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    products: Vec<Product>,
    next_id: i64,
    signed_in: bool,
}

impl FakeBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend pre-loaded with rows and an established session, for tests
    /// that are not about the write gate itself.
    #[must_use]
    pub fn seeded(rows: Vec<NewProduct>) -> Self {
        let backend = Self::new();
        {
            let mut inner = backend.lock();
            inner.signed_in = true;
            for row in rows {
                inner.insert(row);
            }
        }
        backend
    }

    pub fn is_signed_in(&self) -> bool {
        self.lock().signed_in
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Inner {
    fn insert(&mut self, row: NewProduct) -> Product {
        self.next_id += 1;
        let product = Product {
            id: ProductId::from(self.next_id),
            name: row.name,
            description: row.description,
            price: row.price,
            image: row.image,
            stock: row.stock,
        };
        self.products.push(product.clone());
        product
    }

    fn position(&self, id: ProductId) -> Result<usize, BackendError> {
        self.products
            .iter()
            .position(|product| product.id == id)
            .ok_or_else(|| BackendError::NotFound(format!("product {id}")))
    }
}

impl Backend for FakeBackend {
    async fn sign_in(&self, _email: &str, _password: &str) -> Result<(), BackendError> {
        self.lock().signed_in = true;
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>, BackendError> {
        Ok(self.lock().products.clone())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, BackendError> {
        let mut inner = self.lock();
        if !inner.signed_in {
            return Err(BackendError::AuthRequired);
        }
        Ok(inner.insert(product))
    }

    async fn update_product(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, BackendError> {
        let mut inner = self.lock();
        if !inner.signed_in {
            return Err(BackendError::AuthRequired);
        }
        let index = inner.position(id)?;
        let row = inner
            .products
            .get_mut(index)
            .ok_or_else(|| BackendError::NotFound(format!("product {id}")))?;
        if let Some(name) = patch.name {
            row.name = name;
        }
        if let Some(description) = patch.description {
            row.description = description;
        }
        if let Some(price) = patch.price {
            row.price = price;
        }
        if let Some(image) = patch.image {
            row.image = image;
        }
        if let Some(stock) = patch.stock {
            row.stock = stock;
        }
        Ok(row.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), BackendError> {
        let mut inner = self.lock();
        if !inner.signed_in {
            return Err(BackendError::AuthRequired);
        }
        let index = inner.position(id)?;
        inner.products.remove(index);
        Ok(())
    }
}

/// A small catalog with distinct prices, handy for sort assertions.
#[must_use]
pub fn sample_rows() -> Vec<NewProduct> {
    let row = |name: &str, price: Decimal, stock: u32| NewProduct {
        name: name.to_string(),
        description: format!("{name} description"),
        price,
        image: format!("/images/{}.jpg", name.to_lowercase().replace(' ', "-")),
        stock,
    };

    vec![
        row("Canvas Tote", Decimal::new(1299, 2), 12),
        row("Enamel Mug", Decimal::new(899, 2), 30),
        row("Field Notebook", Decimal::new(549, 2), 45),
        row("Wool Beanie", Decimal::new(1650, 2), 8),
    ]
}
