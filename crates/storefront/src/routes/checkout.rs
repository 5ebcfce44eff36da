//! Checkout route handlers.
//!
//! Thin wrappers over the `CheckoutFlow` state machine. The one wrinkle is
//! the error profile's postal-code lock: the field is read-only on the
//! screen, so whatever a client submits for it is discarded before
//! validation. The required-field rule still applies, which leaves that
//! profile unable to finish checkout. That dead end is the documented
//! behavior, not a bug to patch over.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mango_stand_core::{CheckoutError, CheckoutStage, ShippingInfo};

use crate::error::{AppError, Result};
use crate::middleware::CurrentSession;
use crate::routes::cart::CartItemView;
use crate::state::AppState;

/// Checkout stage display data.
#[derive(Debug, Serialize)]
pub struct StageView {
    pub stage: CheckoutStage,
}

/// Shipping form data.
#[derive(Debug, Deserialize)]
pub struct InformationForm {
    pub first_name: String,
    pub last_name: String,
    pub postal_code: String,
}

/// Overview display data: shipping plus order summary.
#[derive(Debug, Serialize)]
pub struct OverviewView {
    pub shipping: ShippingInfo,
    pub items: Vec<CartItemView>,
    pub total_items: u32,
    pub total_price: String,
}

/// Confirmation outcome. `completed` is false when the problem profile
/// silently swallowed the press; the client's only move is to press again.
#[derive(Debug, Serialize)]
pub struct ConfirmView {
    pub completed: bool,
    pub stage: CheckoutStage,
}

/// `POST /checkout` - begin a cycle. Rejected while the cart is empty.
#[instrument(skip_all)]
pub async fn begin(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Json<StageView>> {
    let mut guard = state.store();
    let store = &mut *guard;
    store.checkout.begin(&store.cart)?;
    Ok(Json(StageView {
        stage: store.checkout.stage(),
    }))
}

/// `POST /checkout/information` - validate and capture shipping info.
#[instrument(skip_all)]
pub async fn information(
    State(state): State<AppState>,
    session: CurrentSession,
    Json(form): Json<InformationForm>,
) -> Result<Json<StageView>> {
    let profile = session.0.profile();
    // Read-only field: the submitted value never reaches validation.
    let postal_code = if profile.postal_code_locked() {
        ""
    } else {
        form.postal_code.as_str()
    };

    let mut store = state.store();
    store
        .checkout
        .submit_information(&form.first_name, &form.last_name, postal_code)?;
    Ok(Json(StageView {
        stage: store.checkout.stage(),
    }))
}

/// `GET /checkout/overview` - shipping details and the order summary.
#[instrument(skip_all)]
pub async fn overview(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Json<OverviewView>> {
    let store = state.store();
    if store.checkout.stage() != CheckoutStage::Overview {
        return Err(AppError::Checkout(CheckoutError::OutOfSequence {
            expected: CheckoutStage::Overview,
            actual: store.checkout.stage(),
        }));
    }
    let shipping = store
        .checkout
        .shipping()
        .cloned()
        .ok_or_else(|| AppError::Internal("overview stage without shipping info".to_string()))?;

    let cart_view = super::cart::CartView::from(&store.cart);
    Ok(Json(OverviewView {
        shipping,
        items: cart_view.items,
        total_items: cart_view.total_items,
        total_price: cart_view.total_price,
    }))
}

/// `POST /checkout/confirm` - complete the order.
///
/// Goes through the deferred-commit path: the glitch profile's delay applies,
/// and a logout racing the delay turns the confirmation into a no-op.
#[instrument(skip_all)]
pub async fn confirm(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ConfirmView>> {
    let profile = session.0.profile();
    let epoch = state.store().epoch();

    let outcome = state
        .commit_after(profile.latency(), epoch, |store| {
            store
                .checkout
                .confirm(&mut store.cart, &profile, &mut store.faults)
        })
        .await;

    match outcome {
        // Stale completion after a logout/reset: nothing was applied.
        None => Ok(Json(ConfirmView {
            completed: false,
            stage: state.store().checkout.stage(),
        })),
        Some(result) => {
            let completed = result?;
            Ok(Json(ConfirmView {
                completed,
                stage: state.store().checkout.stage(),
            }))
        }
    }
}

/// `GET /checkout/complete` - confirmation screen data.
#[instrument(skip_all)]
pub async fn complete(
    State(state): State<AppState>,
    _session: CurrentSession,
) -> Result<Json<serde_json::Value>> {
    let store = state.store();
    if store.checkout.stage() != CheckoutStage::Complete {
        return Err(AppError::Checkout(CheckoutError::OutOfSequence {
            expected: CheckoutStage::Complete,
            actual: store.checkout.stage(),
        }));
    }
    Ok(Json(serde_json::json!({
        "message": "Thank you! Your order has been placed successfully.",
    })))
}

/// `POST /checkout/cancel` - abandon the cycle, keep the cart.
#[instrument(skip_all)]
pub async fn cancel(State(state): State<AppState>, _session: CurrentSession) -> StatusCode {
    let mut store = state.store();
    store.checkout.cancel();
    store.bump_epoch();
    StatusCode::NO_CONTENT
}
