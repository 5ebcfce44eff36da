//! HTTP route handlers for the storefront.
//!
//! Everything returns JSON view models; the markup lives with whatever
//! front-end drives this surface.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Session (simulated login)
//! POST /login                  - Log in with a recognized identity
//! POST /logout                 - Destroy the session and reset the store
//! GET  /session                - Current session state
//! POST /reset                  - Reset the store context (automation hook)
//!
//! # Products (requires session)
//! GET  /products               - Product grid (`?sort=az|za|lohi|hilo`)
//! GET  /products/{id}          - Product detail
//!
//! # Cart (requires session)
//! GET    /cart                 - Current cart view
//! POST   /cart/items           - Add a product (merge-on-add)
//! PUT    /cart/items/{id}      - Set a line quantity (clamped to 1)
//! DELETE /cart/items/{id}      - Remove a line
//!
//! # Checkout (requires session)
//! POST /checkout               - Begin (requires a non-empty cart)
//! POST /checkout/information   - Submit shipping info
//! GET  /checkout/overview      - Shipping + order summary
//! POST /checkout/confirm       - Complete the order (flaky for problem)
//! GET  /checkout/complete      - Confirmation screen data
//! POST /checkout/cancel        - Abandon the cycle
//!
//! # Admin (requires session)
//! GET    /admin/products       - Raw product rows
//! POST   /admin/products       - Create a product
//! PUT    /admin/products/{id}  - Patch a product
//! DELETE /admin/products/{id}  - Delete a product
//! ```

pub mod admin;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the session routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
        .route("/reset", post(auth::reset))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/items", post(cart::add))
        .route(
            "/items/{id}",
            put(cart::update_quantity).delete(cart::remove),
        )
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::begin))
        .route("/information", post(checkout::information))
        .route("/overview", get(checkout::overview))
        .route("/confirm", post(checkout::confirm))
        .route("/complete", get(checkout::complete))
        .route("/cancel", post(checkout::cancel))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(admin::index).post(admin::create))
        .route("/products/{id}", put(admin::update).delete(admin::destroy))
}

/// Assemble the full application router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/admin", admin_routes())
}
