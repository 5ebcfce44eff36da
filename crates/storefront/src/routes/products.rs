//! Product grid and detail handlers.
//!
//! The performance-glitch profile pays its fixed delay here, before the
//! backend read, so the whole screen stalls rather than one widget.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;
use tracing::instrument;

use mango_stand_core::{Product, ProductId};

use crate::backend::Backend;
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::services::catalog::{self, SortKey};
use crate::state::AppState;

/// Query parameters for the product grid.
#[derive(Debug, Default, Deserialize)]
pub struct GridQuery {
    pub sort: Option<SortKey>,
}

/// `GET /products` - the grid, sorted and profile-decorated.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: CurrentSession,
    Query(query): Query<GridQuery>,
) -> Result<Json<Vec<Product>>> {
    let profile = session.0.profile();
    let latency = profile.latency();
    if !latency.is_zero() {
        tokio::time::sleep(latency).await;
    }

    let products =
        catalog::list(state.backend(), &profile, query.sort.unwrap_or_default()).await?;
    Ok(Json(products))
}

/// `GET /products/{id}` - one product, with the profile's image decoration.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<Product>> {
    let mut product = state.backend().get_product(ProductId::new(id)).await?;
    if let Some(placeholder) = session.0.profile().image_override() {
        product.image = placeholder.to_string();
    }
    Ok(Json(product))
}
