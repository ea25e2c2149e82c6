//! Session-level use-case services.
//!
//! # Responsibility
//! - Orchestrate parser, renderer, mutation engine and version store into
//!   the editing-session API consumed by UI/agent layers.
//! - Keep outer layers decoupled from storage and scanning details.

pub mod session;
