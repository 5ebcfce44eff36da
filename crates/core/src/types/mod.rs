//! Core types for Mango Stand.
//!
//! Type-safe wrappers for the product catalog shared between the storefront,
//! the CLI seeder, and the hosted backend client.

pub mod id;
pub mod product;

pub use id::*;
pub use product::Product;
