//! Session route handlers for the simulated login.
//!
//! The login screen's inline error strings come straight out of
//! `AuthError`'s `Display` impls via the unified error type.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use mango_stand_core::{ProfileKind, Session};

use crate::error::Result;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Session display data.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<ProfileKind>,
}

impl SessionView {
    fn from_session(session: Option<Session>) -> Self {
        session.map_or(
            Self {
                authenticated: false,
                username: None,
                profile: None,
            },
            |session| Self {
                authenticated: true,
                username: Some(session.identity().to_string()),
                profile: Some(session.profile().kind()),
            },
        )
    }
}

/// `POST /login` - validate the credentials and open the session.
///
/// Logging in over a live session replaces it and bumps the epoch, so a
/// deferred mutation still in flight for the previous session lands as a
/// no-op instead of in the new user's cart. A failed attempt changes
/// nothing.
#[instrument(skip_all, fields(username = %form.username))]
pub async fn login(
    State(state): State<AppState>,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionView>> {
    let mut store = state.store();
    let replacing = store.auth.is_authenticated();
    let session = store.auth.login(&form.username, &form.password)?;
    if replacing {
        store.bump_epoch();
    }
    tracing::info!(profile = ?session.profile().kind(), "login succeeded");
    Ok(Json(SessionView::from_session(Some(session))))
}

/// `POST /logout` - destroy the session and tear the store down.
///
/// Logout resets the whole context (cart included) and invalidates any
/// pending deferred mutation. Idempotent.
#[instrument(skip_all)]
pub async fn logout(State(state): State<AppState>) -> StatusCode {
    state.store().reset();
    StatusCode::NO_CONTENT
}

/// `GET /session` - the live session state, re-read on every call.
pub async fn session(State(state): State<AppState>) -> Json<SessionView> {
    Json(SessionView::from_session(state.store().auth.session()))
}

/// `POST /reset` - automation hook: same teardown as logout, usable from
/// any state.
#[instrument(skip_all)]
pub async fn reset(State(state): State<AppState>) -> StatusCode {
    state.store().reset();
    StatusCode::NO_CONTENT
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rust_decimal::Decimal;

    use mango_stand_core::{Product, ProductId, SHARED_SECRET};

    use crate::backend::HostedBackend;
    use crate::config::{BackendConfig, StorefrontConfig};

    fn test_state() -> AppState {
        let config = StorefrontConfig {
            host: std::net::IpAddr::from([127, 0, 0, 1]),
            port: 0,
            backend: BackendConfig {
                url: url::Url::parse("https://demo.backend.example").expect("url"),
                service_key: secrecy::SecretString::from("key".to_string()),
                service_email: "svc@example.com".to_string(),
                service_password: secrecy::SecretString::from("pw".to_string()),
            },
            fault_seed: Some(1),
            sentry_dsn: None,
            sentry_environment: None,
        };
        let backend = HostedBackend::new(&config.backend);
        AppState::new(config, backend)
    }

    fn sample_product() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Canvas Tote".to_string(),
            description: String::new(),
            price: Decimal::new(999, 2),
            image: String::new(),
            stock: 5,
        }
    }

    async fn login_as(state: &AppState, username: &str) {
        login(
            State(state.clone()),
            Json(LoginForm {
                username: username.to_string(),
                password: SHARED_SECRET.to_string(),
            }),
        )
        .await
        .expect("login");
    }

    #[tokio::test]
    async fn test_relogin_invalidates_pending_deferred_mutations() {
        let state = test_state();
        login_as(&state, "performance_glitch_user").await;

        // A cart mutation goes deferred under the glitch delay and captures
        // the epoch of the session it started in.
        let epoch = state.store().epoch();

        // A different user logs in over the live session, without a logout.
        login_as(&state, "standard_user").await;

        let committed = state
            .commit_after(Duration::ZERO, epoch, |store| {
                store.cart.add_line(sample_product(), 1);
            })
            .await;
        assert!(committed.is_none());
        assert!(state.store().cart.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_leaves_epoch_alone() {
        let state = test_state();
        login_as(&state, "standard_user").await;
        let epoch = state.store().epoch();

        let result = login(
            State(state.clone()),
            Json(LoginForm {
                username: "standard_user".to_string(),
                password: "nope".to_string(),
            }),
        )
        .await;
        assert!(result.is_err());
        assert_eq!(state.store().epoch(), epoch);
    }

    #[tokio::test]
    async fn test_first_login_does_not_bump_epoch() {
        let state = test_state();
        let epoch = state.store().epoch();
        login_as(&state, "standard_user").await;
        assert_eq!(state.store().epoch(), epoch);
    }
}
