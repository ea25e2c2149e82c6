//! LaTeX document model: parsing, preview rendering, anchored mutation.
//!
//! # Responsibility
//! - Recognize the structurally significant subset of resume LaTeX
//!   (title, contact line, named sections).
//! - Produce display-ready preview text from raw section bodies.
//! - Rewrite exactly one located span of the raw document text.
//!
//! # Invariants
//! - Parsing and rendering are total; a half-written document degrades to
//!   empty defaults instead of failing.
//! - Mutation never touches the outline; it operates on the raw string and
//!   preserves every byte outside the replaced span.

pub mod mutate;
pub mod parser;
pub mod render;
