//! Seed the hosted backend with the demo catalog.
//!
//! The storefront exists to be driven by UI-automation suites, so the
//! catalog is a small fixed set of rows with stable names and prices that
//! test assertions can rely on.

use rust_decimal::Decimal;
use tracing::info;

use mango_stand_storefront::backend::{Backend, NewProduct};

/// The demo catalog inserted by `ms-cli seed products`.
fn demo_catalog() -> Vec<NewProduct> {
    let item = |name: &str, description: &str, price: Decimal, image: &str, stock: u32| NewProduct {
        name: name.to_string(),
        description: description.to_string(),
        price,
        image: image.to_string(),
        stock,
    };

    vec![
        item(
            "Canvas Tote",
            "Heavy cotton tote with reinforced straps. Fits a laptop and a week of groceries.",
            Decimal::new(1299, 2),
            "/images/canvas-tote.jpg",
            12,
        ),
        item(
            "Enamel Mug",
            "Speckled enamel camping mug. Holds 350ml and survives being dropped.",
            Decimal::new(899, 2),
            "/images/enamel-mug.jpg",
            30,
        ),
        item(
            "Field Notebook",
            "Pocket notebook with dot grid pages and a waterproof cover.",
            Decimal::new(549, 2),
            "/images/field-notebook.jpg",
            45,
        ),
        item(
            "Wool Beanie",
            "Merino wool beanie in mango orange. One size.",
            Decimal::new(1650, 2),
            "/images/wool-beanie.jpg",
            8,
        ),
        item(
            "Desk Planter",
            "Ceramic planter with a drainage tray. Plant not included.",
            Decimal::new(2200, 2),
            "/images/desk-planter.jpg",
            5,
        ),
        item(
            "Sticker Pack",
            "Six die-cut vinyl stickers. Dishwasher safe, allegedly.",
            Decimal::new(399, 2),
            "/images/sticker-pack.jpg",
            100,
        ),
    ]
}

/// Insert the demo catalog.
///
/// With `replace`, existing rows are deleted first so the backend ends up
/// holding exactly the demo set.
///
/// # Errors
///
/// Returns an error if sign-in fails or any backend write fails.
pub async fn products(replace: bool) -> Result<(), Box<dyn std::error::Error>> {
    let backend = super::connect().await?;

    if replace {
        let existing = backend.list_products().await?;
        info!(count = existing.len(), "Deleting existing catalog rows");
        for product in existing {
            backend.delete_product(product.id).await?;
        }
    }

    let catalog = demo_catalog();
    info!(count = catalog.len(), "Inserting demo catalog");

    for new_product in catalog {
        let product = backend.create_product(new_product).await?;
        info!(id = %product.id, name = %product.name, "Inserted");
    }

    info!("Seeding complete");
    Ok(())
}
