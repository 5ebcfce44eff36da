//! Inspect and prune catalog rows.

use tracing::info;

use mango_stand_core::ProductId;
use mango_stand_storefront::backend::Backend;

/// Print every catalog row.
///
/// # Errors
///
/// Returns an error if sign-in or the backend read fails.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let backend = super::connect().await?;

    let products = backend.list_products().await?;

    info!("Catalog ({} rows)", products.len());
    for product in products {
        info!(
            "  [{}] {} - {} (stock: {})",
            product.id, product.name, product.price, product.stock
        );
    }

    Ok(())
}

/// Delete one catalog row by id.
///
/// # Errors
///
/// Returns an error if sign-in fails or the row does not exist.
pub async fn delete(id: i64) -> Result<(), Box<dyn std::error::Error>> {
    let backend = super::connect().await?;

    let id = ProductId::from(id);
    backend.delete_product(id).await?;
    info!(%id, "Deleted catalog row");

    Ok(())
}
