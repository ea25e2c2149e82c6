//! Editing session context and version orchestration.
//!
//! # Responsibility
//! - Own the current document text as an explicit session context object.
//! - Express edits as pure transitions returning a new session.
//! - Orchestrate version save/restore and verbatim export.
//!
//! # Invariants
//! - Exactly one current document per session; replacement is atomic.
//! - A failed mutation or restore leaves the caller's session unchanged.
//! - Restore never deletes history; a later save appends a new entry.

use crate::latex::mutate::{apply_mutation, replace_section_body, MutateError, MutationRequest};
use crate::latex::parser::parse;
use crate::latex::render::{render, RenderedDocument};
use crate::model::outline::DocumentOutline;
use crate::model::version::{VersionEntry, VersionId};
use crate::repo::version_repo::{RepoError, VersionRepository};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Fixed file name used by the export boundary.
pub const EXPORT_FILE_NAME: &str = "resume.tex";

/// Resume template a fresh session opens with.
const STARTER_DOCUMENT: &str = r"\documentclass[letterpaper,11pt]{article}
\usepackage{fontawesome5}
\usepackage[margin=1in]{geometry}
\begin{document}

\begin{center}
{\LARGE \textbf{Jane Doe}}\\
\faEnvelope\ jane.doe@example.com \hfill \faPhone\ +1-555-0100
\end{center}

\section*{Summary}
Experienced software engineer with 5+ years of expertise building web applications.

\section*{Experience}
\textbf{Senior Software Engineer} \hfill 2021--Present\\
\begin{itemize}[leftmargin=*]
  \item Led migration of a monolith to services, cutting deploy time by 40\%
  \item Built observability tooling adopted by 12 teams
\end{itemize}

\section*{Skills}
\begin{itemize}[leftmargin=*]
  \item Rust, TypeScript, SQL
  \item Distributed systems, performance profiling
\end{itemize}

\end{document}
";

/// Verbatim export artifact for the download boundary.
///
/// No transformation is applied at export time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TexExport {
    pub file_name: &'static str,
    pub contents: String,
}

/// The contract an external mutation producer (the conversational agent)
/// must satisfy.
///
/// Given the current document and a user instruction it may propose at
/// most one [`MutationRequest`]. Returning `None` (for example after a
/// cancelled call) produces no edit and leaves the document unchanged.
pub trait MutationSource {
    fn propose(&mut self, document: &str, instruction: &str) -> Option<MutationRequest>;
}

/// Explicit session context owning the single current document.
///
/// Transitions are pure: every edit returns a new session and the old one
/// stays valid, which keeps the document model testable without any UI
/// state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentSession {
    document: String,
}

impl DocumentSession {
    /// Opens a session over the provided raw document text.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
        }
    }

    /// Opens a session over the starter resume template.
    pub fn starter() -> Self {
        Self::new(STARTER_DOCUMENT)
    }

    /// Returns the current raw document text.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Full-text replacement, the direct-edit path of the editing surface.
    pub fn with_document(&self, document: impl Into<String>) -> Self {
        Self::new(document)
    }

    /// Parses the current document into a structural outline.
    pub fn outline(&self) -> DocumentOutline {
        parse(&self.document)
    }

    /// Renders the current document for display. Always derived from the
    /// raw text, never from a previous render.
    pub fn preview(&self) -> RenderedDocument {
        render(&self.outline())
    }

    /// Applies one anchored mutation, returning the edited session.
    pub fn apply(&self, request: &MutationRequest) -> Result<Self, MutateError> {
        apply_mutation(&self.document, request).map(Self::new)
    }

    /// Replaces the body of the uniquely titled section.
    pub fn rewrite_section(&self, title: &str, new_body: &str) -> Result<Self, MutateError> {
        replace_section_body(&self.document, title, new_body).map(Self::new)
    }

    /// Exports the current document verbatim under the fixed file name.
    pub fn export(&self) -> TexExport {
        TexExport {
            file_name: EXPORT_FILE_NAME,
            contents: self.document.clone(),
        }
    }
}

/// Service error for session use-cases.
#[derive(Debug)]
pub enum SessionError {
    /// Mutation engine rejected the edit; the session is unchanged.
    Mutate(MutateError),
    /// Requested snapshot id is absent from the version log.
    VersionNotFound(VersionId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mutate(err) => write!(f, "{err}"),
            Self::VersionNotFound(id) => write!(f, "version not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mutate(err) => Some(err),
            Self::VersionNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<MutateError> for SessionError {
    fn from(value: MutateError) -> Self {
        Self::Mutate(value)
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::VersionNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Version orchestration facade over a repository implementation.
pub struct SessionService<R: VersionRepository> {
    repo: R,
}

impl<R: VersionRepository> SessionService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Snapshots the session's current document under the given label.
    pub fn save_version(
        &self,
        session: &DocumentSession,
        label: &str,
    ) -> Result<VersionEntry, SessionError> {
        Ok(self.repo.save_version(session.document(), label)?)
    }

    /// Lists all saved versions oldest-first.
    pub fn list_versions(&self) -> Result<Vec<VersionEntry>, SessionError> {
        Ok(self.repo.list_versions()?)
    }

    /// Moves the session forward to a past snapshot's text.
    ///
    /// Non-destructive: no entry is deleted, so the audit trail keeps its
    /// undo points and a later save simply appends.
    pub fn restore_version(
        &self,
        session: &DocumentSession,
        id: VersionId,
    ) -> Result<DocumentSession, SessionError> {
        match self.repo.get_version(id)? {
            Some(entry) => Ok(session.with_document(entry.snapshot)),
            None => Err(SessionError::VersionNotFound(id)),
        }
    }

    /// Requests one mutation from the external producer and applies it.
    ///
    /// A declined proposal (cancelled agent call) returns the session
    /// unchanged.
    pub fn apply_proposal<S: MutationSource>(
        &self,
        session: &DocumentSession,
        source: &mut S,
        instruction: &str,
    ) -> Result<DocumentSession, SessionError> {
        match source.propose(session.document(), instruction) {
            Some(request) => Ok(session.apply(&request)?),
            None => Ok(session.clone()),
        }
    }
}
