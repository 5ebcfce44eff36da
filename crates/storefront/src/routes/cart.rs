//! Cart route handlers.
//!
//! Mutations go through the deferred-commit path so the performance-glitch
//! delay cannot land a stale write after a logout or reset. The
//! problem-profile silent drop applies to add only; remove and quantity
//! updates always take effect.

use axum::{
    Json,
    extract::{Path, State},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mango_stand_core::{CartLedger, CartLine, FaultSource, ProductId};

use crate::backend::Backend;
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::state::AppState;

/// Cart line display data for clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: i64,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub image: String,
}

/// Cart display data for clients.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total_items: u32,
    pub total_price: String,
}

/// Format a decimal amount as a shop price string.
fn format_price(amount: Decimal) -> String {
    format!("\u{a3}{amount:.2}")
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            product_id: line.product.id.as_i64(),
            name: line.product.name.clone(),
            quantity: line.quantity,
            unit_price: format_price(line.product.price),
            line_price: format_price(line.line_total()),
            image: line.product.image.clone(),
        }
    }
}

impl From<&CartLedger> for CartView {
    fn from(ledger: &CartLedger) -> Self {
        Self {
            items: ledger.lines().iter().map(CartItemView::from).collect(),
            total_items: ledger.total_item_count(),
            total_price: format_price(ledger.total_price()),
        }
    }
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddItemForm {
    pub product_id: i64,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

/// Quantity update form data.
///
/// Takes any integer on the wire: zero and negative requests collapse to the
/// ledger's minimum of 1, and values past `u32::MAX` saturate.
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub quantity: i64,
}

impl QuantityForm {
    fn requested(&self) -> u32 {
        u32::try_from(self.quantity.max(0)).unwrap_or(u32::MAX)
    }
}

/// `GET /cart` - the current ledger.
pub async fn show(State(state): State<AppState>, _session: CurrentSession) -> Json<CartView> {
    Json(CartView::from(&state.store().cart))
}

/// `POST /cart/items` - add a product to the cart.
///
/// The requested count is clamped against the product's stock here, at the
/// point of choosing - the ledger itself never looks at stock. Under the
/// problem profile the whole request may silently do nothing; the response
/// is shaped exactly like a success and the unchanged cart is the signal.
#[instrument(skip(state, session), fields(product_id = form.product_id))]
pub async fn add(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(form): Json<AddItemForm>,
) -> Result<Json<CartView>> {
    let profile = session.0.profile();
    let product = state
        .backend()
        .get_product(ProductId::new(form.product_id))
        .await?;

    let count = form.quantity.min(product.stock);

    let (epoch, dropped) = {
        let mut store = state.store();
        let dropped = !store.faults.attempt(profile.cart_action_success_rate());
        (store.epoch(), dropped)
    };

    if dropped {
        tracing::debug!("add-to-cart silently dropped");
        return Ok(Json(CartView::from(&state.store().cart)));
    }
    if count == 0 {
        // Out of stock: nothing to add, also not an error.
        return Ok(Json(CartView::from(&state.store().cart)));
    }

    state
        .commit_after(profile.latency(), epoch, move |store| {
            store.cart.add_line(product, count);
        })
        .await;

    Ok(Json(CartView::from(&state.store().cart)))
}

/// `PUT /cart/items/{id}` - set a line quantity, clamped to a minimum of 1.
#[instrument(skip(state, session))]
pub async fn update_quantity(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
    Json(form): Json<QuantityForm>,
) -> Result<Json<CartView>> {
    let profile = session.0.profile();
    let epoch = state.store().epoch();
    let quantity = form.requested();

    state
        .commit_after(profile.latency(), epoch, move |store| {
            store.cart.set_quantity(ProductId::new(id), quantity);
        })
        .await;

    Ok(Json(CartView::from(&state.store().cart)))
}

/// `DELETE /cart/items/{id}` - remove a line. No-op when absent.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: CurrentSession,
    Path(id): Path<i64>,
) -> Result<Json<CartView>> {
    let profile = session.0.profile();
    let epoch = state.store().epoch();

    state
        .commit_after(profile.latency(), epoch, move |store| {
            store.cart.remove_line(ProductId::new(id));
        })
        .await;

    Ok(Json(CartView::from(&state.store().cart)))
}
