//! Domain logic for workshop management.
//!
//! Everything in this crate is pure: no database, no HTTP. The `db` crate
//! persists what is defined here and the `api` crate exposes it.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod policy;
pub mod schema;
pub mod types;
pub mod validation;
pub mod workshop;
