//! Admin CRUD handlers.
//!
//! Straight pass-throughs to the hosted backend's product table. No profile
//! decoration here - the admin screen works on the raw rows.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use tracing::instrument;

use mango_stand_core::{Product, ProductId};

use crate::backend::{Backend, NewProduct, ProductPatch};
use crate::error::{AppError, Result};
use crate::middleware::CurrentSession;
use crate::state::AppState;

/// `GET /admin/products` - every product row, unsorted and undecorated.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Json<Vec<Product>>> {
    Ok(Json(state.backend().list_products().await?))
}

/// `POST /admin/products` - insert a product.
#[instrument(skip_all, fields(name = %product.name))]
pub async fn create(
    State(state): State<AppState>,
    _session: CurrentSession,
    Json(product): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>)> {
    let created = state.backend().create_product(product).await?;
    tracing::info!(id = %created.id, "product created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /admin/products/{id}` - patch a product. Empty patches are rejected
/// rather than bounced off the backend.
#[instrument(skip(state, _session, patch))]
pub async fn update(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(id): Path<i64>,
    Json(patch): Json<ProductPatch>,
) -> Result<Json<Product>> {
    if patch.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }
    let updated = state
        .backend()
        .update_product(ProductId::new(id), patch)
        .await?;
    Ok(Json(updated))
}

/// `DELETE /admin/products/{id}` - remove a product row.
#[instrument(skip(state, _session))]
pub async fn destroy(
    State(state): State<AppState>,
    _session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.backend().delete_product(ProductId::new(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}
