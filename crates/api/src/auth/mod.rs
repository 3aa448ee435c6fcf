//! Authentication primitives.
//!
//! - [`jwt`] -- access-token validation (and generation, for trusted issuers and tests).

pub mod jwt;
