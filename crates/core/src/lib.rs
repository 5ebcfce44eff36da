//! Mango Stand Core - Domain model for the UI-automation storefront demo.
//!
//! This crate holds the pieces of the demo that have actual rules attached:
//! - [`auth`] - The login gate over the fixed identity set and shared secret
//! - [`cart`] - The in-memory cart ledger (merge, clamp, derived totals)
//! - [`checkout`] - The three-stage checkout sequencer
//! - [`profile`] - Per-identity behavior perturbations (latency, flaky
//!   actions, image substitution)
//! - [`fault`] - Seedable randomness seam behind the deliberate flakiness
//!
//! # Architecture
//!
//! The core crate contains only types and rules - no I/O, no HTTP, no
//! persistence. Product records live in the hosted backend; the core only
//! ever sees read-through snapshots. This keeps it lightweight and allows it
//! to be used anywhere, including deterministic tests.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod fault;
pub mod identity;
pub mod profile;
pub mod types;

pub use auth::{AuthError, AuthState, SHARED_SECRET, Session, authenticate};
pub use cart::{CartLedger, CartLine};
pub use checkout::{CheckoutError, CheckoutFlow, CheckoutStage, ShippingInfo, ValidationError};
pub use fault::{AlwaysFail, AlwaysSucceed, FaultSource, SeededFaults};
pub use identity::{Identity, ProfileKind};
pub use profile::BehaviorProfile;
pub use types::*;
