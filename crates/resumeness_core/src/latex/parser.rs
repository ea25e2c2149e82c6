//! Structural parser for resume LaTeX.
//!
//! # Responsibility
//! - Extract title, contact fields and named sections from raw text.
//! - Expose section byte spans to the mutation engine.
//!
//! # Invariants
//! - `parse` is a pure total function; it never fails.
//! - Section order matches first-occurrence order in the raw text.
//! - Re-parsing the same string yields an identical outline.

use crate::model::outline::{ContactKind, DocumentOutline, Section};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static TITLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\LARGE\s*\\textbf\{([^}]+)\}").expect("valid title regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\faEnvelope\\\s*([^\s\\]+)").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\faPhone\\\s*([^\s\\]+)").expect("valid phone regex"));
static SECTION_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\section\*\{([^}]+)\}").expect("valid section header regex"));

pub(crate) const END_DOCUMENT_MARKER: &str = "\\end{document}";

/// Byte span of one section body inside the raw document.
///
/// `body_start..body_end` is the trimmed body slice, so splicing over it
/// leaves surrounding blank lines untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SectionSpan {
    pub(crate) title: String,
    pub(crate) body_start: usize,
    pub(crate) body_end: usize,
}

/// Parses raw LaTeX into a structural outline.
///
/// Total function: absent constructs degrade to empty defaults because a
/// partially written document is a normal editing state, not an error.
pub fn parse(document: &str) -> DocumentOutline {
    let title = TITLE_RE
        .captures(document)
        .and_then(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .unwrap_or_default();

    let mut contacts = BTreeMap::new();
    if let Some(caps) = EMAIL_RE.captures(document) {
        if let Some(value) = caps.get(1) {
            contacts.insert(ContactKind::Email, value.as_str().to_string());
        }
    }
    if let Some(caps) = PHONE_RE.captures(document) {
        if let Some(value) = caps.get(1) {
            contacts.insert(ContactKind::Phone, value.as_str().to_string());
        }
    }

    let sections = scan_section_spans(document)
        .into_iter()
        .map(|span| Section {
            raw_body: document[span.body_start..span.body_end].to_string(),
            title: span.title,
        })
        .collect();

    DocumentOutline {
        title,
        contacts,
        sections,
    }
}

/// Scans all section headers and computes trimmed body spans.
///
/// A body runs from the header's closing brace to the next header or the
/// end-of-document marker, whichever comes first; with neither present it
/// extends to the end of input. Headers are found by a flat scan, so
/// nesting is not recognized: every occurrence starts a new section.
pub(crate) fn scan_section_spans(document: &str) -> Vec<SectionSpan> {
    let mut headers = Vec::new();
    for caps in SECTION_HEADER_RE.captures_iter(document) {
        let (whole, title) = match (caps.get(0), caps.get(1)) {
            (Some(whole), Some(title)) => (whole, title),
            _ => continue,
        };
        headers.push((title.as_str().to_string(), whole.start(), whole.end()));
    }

    let mut spans = Vec::with_capacity(headers.len());
    for (index, (title, _, header_end)) in headers.iter().enumerate() {
        let limit = headers
            .get(index + 1)
            .map_or(document.len(), |(_, next_start, _)| *next_start);
        let body_end = document[*header_end..limit]
            .find(END_DOCUMENT_MARKER)
            .map_or(limit, |at| header_end + at);

        let raw = &document[*header_end..body_end];
        let lead = raw.len() - raw.trim_start().len();
        let body_start = header_end + lead;
        spans.push(SectionSpan {
            title: title.clone(),
            body_start,
            body_end: body_start + raw.trim().len(),
        });
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::{parse, scan_section_spans};

    const JANE_DOE: &str = "\\LARGE\\textbf{Jane Doe} \\faEnvelope\\ jane@example.com \\faPhone\\ +1-555-0100 \\section*{Experience}\\textbf{Engineer}\\\\Built systems.\\section*{Skills}\\item Go\\end{document}";

    #[test]
    fn parses_title_contacts_and_sections() {
        let outline = parse(JANE_DOE);

        assert_eq!(outline.title, "Jane Doe");
        assert_eq!(outline.email(), Some("jane@example.com"));
        assert_eq!(outline.phone(), Some("+1-555-0100"));

        let titles: Vec<&str> = outline
            .sections
            .iter()
            .map(|section| section.title.as_str())
            .collect();
        assert_eq!(titles, ["Experience", "Skills"]);
        assert_eq!(
            outline.section("Experience").unwrap().raw_body,
            "\\textbf{Engineer}\\\\Built systems."
        );
        assert_eq!(outline.section("Skills").unwrap().raw_body, "\\item Go");
    }

    #[test]
    fn parse_is_deterministic() {
        assert_eq!(parse(JANE_DOE), parse(JANE_DOE));
    }

    #[test]
    fn sections_keep_source_order() {
        let document =
            "\\section*{A}one\\section*{B}two\\section*{C}three\\end{document}";
        let titles: Vec<String> = parse(document)
            .sections
            .into_iter()
            .map(|section| section.title)
            .collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn absent_constructs_degrade_to_defaults() {
        let outline = parse("just some prose, no commands at all");

        assert_eq!(outline.title, "");
        assert!(outline.contacts.is_empty());
        assert!(outline.sections.is_empty());
    }

    #[test]
    fn contact_fields_are_independent() {
        let outline = parse("\\faPhone\\ 555-0100 and nothing else");

        assert_eq!(outline.email(), None);
        assert_eq!(outline.phone(), Some("555-0100"));
    }

    #[test]
    fn trailing_section_without_end_marker_extends_to_input_end() {
        let outline = parse("\\section*{Draft}\nstill being written");

        assert_eq!(outline.sections.len(), 1);
        assert_eq!(outline.sections[0].raw_body, "still being written");
    }

    #[test]
    fn body_stops_at_end_document_marker() {
        let outline = parse("\\section*{Skills}\\item Go\n\\end{document}\ntrailing junk");

        assert_eq!(outline.sections[0].raw_body, "\\item Go");
    }

    #[test]
    fn duplicate_headers_each_start_a_section() {
        let outline = parse("\\section*{Skills}a\\section*{Skills}b\\end{document}");

        assert_eq!(outline.sections.len(), 2);
        assert_eq!(outline.sections[0].raw_body, "a");
        assert_eq!(outline.sections[1].raw_body, "b");
    }

    #[test]
    fn spans_cover_the_trimmed_body_slice() {
        let document = "\\section*{Skills}\n  \\item Go  \n\\end{document}";
        let spans = scan_section_spans(document);

        assert_eq!(spans.len(), 1);
        assert_eq!(&document[spans[0].body_start..spans[0].body_end], "\\item Go");
    }

    #[test]
    fn all_whitespace_body_yields_empty_span() {
        let document = "\\section*{Empty}   \n\\end{document}";
        let spans = scan_section_spans(document);

        assert_eq!(spans[0].body_start, spans[0].body_end);
        assert_eq!(parse(document).sections[0].raw_body, "");
    }
}
