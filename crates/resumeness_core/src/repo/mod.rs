//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the version store contract consumed by the session layer.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - The version log is append-only; repositories expose no delete or
//!   rewrite operation.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.

pub mod version_repo;
