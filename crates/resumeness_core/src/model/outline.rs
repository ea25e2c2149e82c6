//! Resume outline domain model.
//!
//! # Responsibility
//! - Define the parsed, addressable shape of a LaTeX resume document.
//! - Keep derived views disposable: an outline is recomputed from the raw
//!   text on every render pass and never edited in place.
//!
//! # Invariants
//! - `sections` preserves first-occurrence order from the raw document.
//! - At most one value is stored per `ContactKind`.
//! - Parsing the same raw text twice yields an identical outline.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contact field kinds recognized in the resume header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactKind {
    /// Address following the envelope icon command.
    Email,
    /// Number following the phone icon command.
    Phone,
}

/// One named span of resume body text between two section headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Header text inside `\section*{...}`.
    pub title: String,
    /// Trimmed markup slice up to the next header or the end of the
    /// document environment, inline commands intact.
    pub raw_body: String,
}

/// Parsed, disposable view of one raw LaTeX resume document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutline {
    /// Candidate name from the first large bold construct. Empty when the
    /// document has none.
    pub title: String,
    /// Contact header fields, at most one value per kind.
    pub contacts: BTreeMap<ContactKind, String>,
    /// Sections in source order.
    pub sections: Vec<Section>,
}

impl DocumentOutline {
    /// Returns the email contact field when present.
    pub fn email(&self) -> Option<&str> {
        self.contacts.get(&ContactKind::Email).map(String::as_str)
    }

    /// Returns the phone contact field when present.
    pub fn phone(&self) -> Option<&str> {
        self.contacts.get(&ContactKind::Phone).map(String::as_str)
    }

    /// Finds a section by exact title match.
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.title == title)
    }
}

#[cfg(test)]
mod tests {
    use super::{ContactKind, DocumentOutline, Section};
    use std::collections::BTreeMap;

    #[test]
    fn contact_accessors_read_the_map() {
        let mut contacts = BTreeMap::new();
        contacts.insert(ContactKind::Email, "jane@example.com".to_string());
        let outline = DocumentOutline {
            title: "Jane Doe".to_string(),
            contacts,
            sections: vec![Section {
                title: "Skills".to_string(),
                raw_body: "\\item Go".to_string(),
            }],
        };

        assert_eq!(outline.email(), Some("jane@example.com"));
        assert_eq!(outline.phone(), None);
        assert_eq!(outline.section("Skills").unwrap().raw_body, "\\item Go");
        assert!(outline.section("Experience").is_none());
    }

    #[test]
    fn contact_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ContactKind::Email).unwrap();
        assert_eq!(json, "\"email\"");
    }
}
