//! Application state shared across handlers.
//!
//! The demo is a single-user, single-tab simulation, so the whole mutable
//! world - session slot, cart ledger, checkout flow, fault RNG - lives in one
//! [`StoreContext`] behind a mutex. The context has a defined lifecycle:
//! created at process start, reset on logout or a store reset.
//!
//! Profile latency makes some mutations deferred. A deferred mutation
//! captures the context's *epoch* up front, sleeps without holding the lock,
//! and only commits if the epoch is unchanged - so navigating away (logout,
//! reset) turns a late completion into a harmless no-op instead of a stale
//! write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use mango_stand_core::{AuthState, CartLedger, CheckoutFlow, SeededFaults};

use crate::backend::HostedBackend;
use crate::config::StorefrontConfig;

/// The one mutable store: session, cart, checkout, fault source.
#[derive(Debug)]
pub struct StoreContext {
    pub auth: AuthState,
    pub cart: CartLedger,
    pub checkout: CheckoutFlow,
    pub faults: SeededFaults,
    epoch: u64,
}

impl StoreContext {
    #[must_use]
    pub fn new(fault_seed: Option<u64>) -> Self {
        Self {
            auth: AuthState::new(),
            cart: CartLedger::new(),
            checkout: CheckoutFlow::new(),
            faults: fault_seed.map_or_else(SeededFaults::from_entropy, SeededFaults::from_seed),
            epoch: 0,
        }
    }

    /// Current epoch. Deferred mutations compare against this before
    /// committing.
    #[must_use]
    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Invalidate every pending deferred mutation.
    pub const fn bump_epoch(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
    }

    /// Tear the store down to its logged-out state. The fault RNG keeps its
    /// stream so a seeded run stays reproducible across resets.
    pub fn reset(&mut self) {
        self.auth.logout();
        self.cart.clear();
        self.checkout.cancel();
        self.bump_epoch();
    }
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like the backend client and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    backend: HostedBackend,
    store: Mutex<StoreContext>,
}

impl AppState {
    /// Create a new application state with a fresh store context.
    #[must_use]
    pub fn new(config: StorefrontConfig, backend: HostedBackend) -> Self {
        let store = Mutex::new(StoreContext::new(config.fault_seed));
        Self {
            inner: Arc::new(AppStateInner {
                config,
                backend,
                store,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the hosted backend client.
    #[must_use]
    pub fn backend(&self) -> &HostedBackend {
        &self.inner.backend
    }

    /// Lock the store context. Poisoning is recovered: the store holds no
    /// invariants a panicked handler could half-apply across the lock.
    pub fn store(&self) -> MutexGuard<'_, StoreContext> {
        self.inner
            .store
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a mutation after a profile delay, unless the store moved on.
    ///
    /// Sleeps without holding the lock, then commits `apply` only if the
    /// epoch still matches `epoch`. Returns `None` when the completion was
    /// stale and nothing was applied.
    pub async fn commit_after<T>(
        &self,
        latency: Duration,
        epoch: u64,
        apply: impl FnOnce(&mut StoreContext) -> T,
    ) -> Option<T> {
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        let mut store = self.store();
        if store.epoch() != epoch {
            tracing::debug!(epoch, current = store.epoch(), "stale deferred mutation dropped");
            return None;
        }
        Some(apply(&mut store))
    }
}
