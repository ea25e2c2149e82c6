//! Display-oriented preview renderer.
//!
//! # Responsibility
//! - Mirror a parsed outline into display-ready text with inline markup
//!   commands resolved to plain emphasis markers and bullets.
//!
//! # Invariants
//! - Substitutions run in a fixed order; later rules assume earlier ones
//!   already normalized their targets (line breaks resolve only after list
//!   markers are stripped).
//! - Output is for display only and is never written back as the document.
//! - Callers must render from raw markup; rendering rendered text is
//!   unspecified.

use crate::model::outline::{ContactKind, DocumentOutline};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static BOLD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\textbf\{([^}]+)\}").expect("valid bold regex"));
static ITALIC_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\textit\{([^}]+)\}").expect("valid italic regex"));
static ITEM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\item\s*").expect("valid item regex"));
static ITEMIZE_OPEN_RE: Lazy<Regex> = Lazy::new(|| {
    // Only the wrapper's own tokens: the command, its optional `[...]`
    // argument and horizontal whitespace up to one newline. List content
    // sharing the line must survive.
    Regex::new(r"\\begin\{itemize\}(\[[^\]\n]*\])?[^\S\n]*\n?").expect("valid itemize open regex")
});
static ITEMIZE_CLOSE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\end\{itemize\}").expect("valid itemize close regex"));
static OPTIONAL_ARG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\n\]]*\]").expect("valid optional argument regex"));
static HFILL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\hfill").expect("valid hfill regex"));
static LINE_BREAK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\\\").expect("valid line break regex"));
static ESCAPED_PERCENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\%").expect("valid escaped percent regex"));

/// One section of the rendered preview.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSection {
    /// Section title, carried over verbatim.
    pub title: String,
    /// Display text with markup commands resolved.
    pub body: String,
}

/// Display tree mirroring [`DocumentOutline`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedDocument {
    pub title: String,
    pub contacts: BTreeMap<ContactKind, String>,
    pub sections: Vec<RenderedSection>,
}

/// Renders a parsed outline into its display form.
pub fn render(outline: &DocumentOutline) -> RenderedDocument {
    RenderedDocument {
        title: outline.title.clone(),
        contacts: outline.contacts.clone(),
        sections: outline
            .sections
            .iter()
            .map(|section| RenderedSection {
                title: section.title.clone(),
                body: render_body(&section.raw_body),
            })
            .collect(),
    }
}

/// Applies the cosmetic substitution pipeline to one raw section body.
///
/// Rules, in order: bold and italic to emphasis markers, `\item` to a
/// bullet glyph, itemize wrappers removed, bracketed optional arguments
/// removed, `\hfill` to a column separator, `\\` to a newline, `\%` to a
/// literal percent, then trim.
pub fn render_body(raw_body: &str) -> String {
    let pass = BOLD_RE.replace_all(raw_body, "**${1}**");
    let pass = ITALIC_RE.replace_all(&pass, "_${1}_");
    let pass = ITEM_RE.replace_all(&pass, "\u{2022} ");
    let pass = ITEMIZE_OPEN_RE.replace_all(&pass, "");
    let pass = ITEMIZE_CLOSE_RE.replace_all(&pass, "");
    let pass = OPTIONAL_ARG_RE.replace_all(&pass, "");
    let pass = HFILL_RE.replace_all(&pass, "  |  ");
    let pass = LINE_BREAK_RE.replace_all(&pass, "\n");
    let pass = ESCAPED_PERCENT_RE.replace_all(&pass, "%");
    pass.trim().to_string()
}
