//! Core document model for the Resumeness resume editor.
//! This crate is the single source of truth for document-model invariants.

pub mod db;
pub mod latex;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use latex::mutate::{apply_mutation, replace_section_body, MutateError, MutationRequest};
pub use latex::parser::parse;
pub use latex::render::{render, render_body, RenderedDocument, RenderedSection};
pub use logging::{default_log_level, init_logging};
pub use model::outline::{ContactKind, DocumentOutline, Section};
pub use model::version::{VersionEntry, VersionId};
pub use repo::version_repo::{
    RepoError, RepoResult, SqliteVersionRepository, VersionRepository,
};
pub use service::session::{
    DocumentSession, MutationSource, SessionError, SessionService, TexExport, EXPORT_FILE_NAME,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
