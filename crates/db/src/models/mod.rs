//! Domain model structs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row. Write payloads are validated in `taller_core` before
//! they reach a repository.

pub mod schema;
pub mod workshop;
