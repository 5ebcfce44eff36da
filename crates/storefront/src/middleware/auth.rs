//! Authentication extractor for the simulated login.
//!
//! Every gated handler takes [`CurrentSession`], which re-reads the live
//! session slot on each request. Nothing caches "authenticated" across a
//! logout - after the slot is emptied the very next request is rejected.

use axum::{extract::FromRequestParts, http::request::Parts};

use mango_stand_core::Session;

use crate::error::AppError;
use crate::state::AppState;

/// Extractor that requires a live simulated session.
///
/// # Example
///
/// ```rust,ignore
/// async fn gated_handler(
///     CurrentSession(session): CurrentSession,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", session.identity())
/// }
/// ```
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        state
            .store()
            .auth
            .session()
            .map(Self)
            .ok_or_else(|| AppError::Unauthorized("Not logged in".to_string()))
    }
}
