//! Request extractors.
//!
//! - [`auth::AuthUser`] -- the caller behind a JWT Bearer token, as a policy [`Actor`].
//!
//! [`Actor`]: taller_core::policy::Actor

pub mod auth;
