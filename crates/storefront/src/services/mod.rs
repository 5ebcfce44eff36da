//! Application services between the routes and the domain.

pub mod catalog;
