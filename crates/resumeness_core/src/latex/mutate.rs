//! Anchored mutation engine for raw document text.
//!
//! # Responsibility
//! - Replace exactly one located span of the raw document string.
//! - Refuse to guess when an anchor does not identify a unique span.
//!
//! # Invariants
//! - On failure the input document is returned untouched to the caller by
//!   construction: the engine borrows it and only allocates on success.
//! - On success every byte outside the replaced span is preserved.
//! - The engine validates anchor uniqueness only, never markup
//!   correctness; replacement validity is the caller's contract.

use crate::latex::parser::{scan_section_spans, SectionSpan};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// One proposed text transformation, produced by the external agent layer
/// and consumed exactly once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationRequest {
    /// Literal substring expected to occur exactly once in the document.
    pub anchor: String,
    /// Text that replaces the anchored occurrence.
    pub replacement: String,
}

/// Mutation engine error for anchor and section resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutateError {
    /// The anchor is empty; an empty needle matches at every position.
    EmptyAnchor,
    /// The anchor does not occur in the document.
    AnchorNotFound { anchor: String },
    /// The anchor occurs more than once; the caller must widen it.
    AnchorAmbiguous { anchor: String, occurrences: usize },
    /// No section carries the requested title.
    SectionNotFound { title: String },
    /// Several sections carry the requested title.
    SectionAmbiguous { title: String, occurrences: usize },
}

impl Display for MutateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyAnchor => write!(f, "mutation anchor must not be empty"),
            Self::AnchorNotFound { anchor } => {
                write!(f, "anchor `{anchor}` not found in document")
            }
            Self::AnchorAmbiguous {
                anchor,
                occurrences,
            } => write!(
                f,
                "anchor `{anchor}` occurs {occurrences} times; supply a wider anchor"
            ),
            Self::SectionNotFound { title } => write!(f, "section `{title}` not found"),
            Self::SectionAmbiguous {
                title,
                occurrences,
            } => write!(
                f,
                "section title `{title}` occurs {occurrences} times; rename one first"
            ),
        }
    }
}

impl Error for MutateError {}

/// Replaces the unique occurrence of the request anchor.
///
/// # Contract
/// - Zero occurrences -> [`MutateError::AnchorNotFound`].
/// - Two or more (non-overlapping) occurrences ->
///   [`MutateError::AnchorAmbiguous`]; the first match is never picked
///   silently.
/// - Success returns a new string equal to `document` with only the
///   anchored span replaced.
pub fn apply_mutation(document: &str, request: &MutationRequest) -> Result<String, MutateError> {
    if request.anchor.is_empty() {
        return Err(MutateError::EmptyAnchor);
    }

    let mut positions = document
        .match_indices(request.anchor.as_str())
        .map(|(at, _)| at);
    let Some(at) = positions.next() else {
        return Err(MutateError::AnchorNotFound {
            anchor: request.anchor.clone(),
        });
    };
    let extra = positions.count();
    if extra > 0 {
        return Err(MutateError::AnchorAmbiguous {
            anchor: request.anchor.clone(),
            occurrences: extra + 1,
        });
    }

    let mut out =
        String::with_capacity(document.len() - request.anchor.len() + request.replacement.len());
    out.push_str(&document[..at]);
    out.push_str(&request.replacement);
    out.push_str(&document[at + request.anchor.len()..]);
    Ok(out)
}

/// Replaces the body of the uniquely titled section.
///
/// The splice covers exactly the trimmed body span, so blank lines around
/// the section survive. Header, other sections and the end-of-document
/// marker are preserved byte for byte.
pub fn replace_section_body(
    document: &str,
    section_title: &str,
    new_body: &str,
) -> Result<String, MutateError> {
    let spans: Vec<SectionSpan> = scan_section_spans(document)
        .into_iter()
        .filter(|span| span.title == section_title)
        .collect();

    let span = match spans.as_slice() {
        [] => {
            return Err(MutateError::SectionNotFound {
                title: section_title.to_string(),
            })
        }
        [only] => only,
        many => {
            return Err(MutateError::SectionAmbiguous {
                title: section_title.to_string(),
                occurrences: many.len(),
            })
        }
    };

    let mut out = String::with_capacity(
        document.len() - (span.body_end - span.body_start) + new_body.len(),
    );
    out.push_str(&document[..span.body_start]);
    out.push_str(new_body);
    out.push_str(&document[span.body_end..]);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::{apply_mutation, replace_section_body, MutateError, MutationRequest};
    use crate::latex::parser::parse;

    const JANE_DOE: &str = "\\LARGE\\textbf{Jane Doe} \\section*{Experience}\\textbf{Engineer}\\\\Built systems.\\section*{Skills}\\item Go\\end{document}";

    fn request(anchor: &str, replacement: &str) -> MutationRequest {
        MutationRequest {
            anchor: anchor.to_string(),
            replacement: replacement.to_string(),
        }
    }

    #[test]
    fn unique_anchor_is_replaced_and_everything_else_preserved() {
        let mutated = apply_mutation(JANE_DOE, &request("Engineer", "Senior Engineer")).unwrap();

        assert_eq!(mutated, JANE_DOE.replacen("Engineer", "Senior Engineer", 1));
        let body = parse(&mutated)
            .section("Experience")
            .unwrap()
            .raw_body
            .clone();
        assert_eq!(body.matches("Senior Engineer").count(), 1);
    }

    #[test]
    fn missing_anchor_is_rejected() {
        let err = apply_mutation(JANE_DOE, &request("Kubernetes", "k8s")).unwrap_err();
        assert_eq!(
            err,
            MutateError::AnchorNotFound {
                anchor: "Kubernetes".to_string()
            }
        );
    }

    #[test]
    fn ambiguous_anchor_is_rejected_with_occurrence_count() {
        let err = apply_mutation(JANE_DOE, &request("section", "chapter")).unwrap_err();
        assert_eq!(
            err,
            MutateError::AnchorAmbiguous {
                anchor: "section".to_string(),
                occurrences: 2
            }
        );
    }

    #[test]
    fn empty_anchor_is_rejected() {
        let err = apply_mutation(JANE_DOE, &request("", "anything")).unwrap_err();
        assert_eq!(err, MutateError::EmptyAnchor);
    }

    #[test]
    fn replacement_may_be_empty() {
        let mutated = apply_mutation("a unique span here", &request("unique ", "")).unwrap();
        assert_eq!(mutated, "a span here");
    }

    #[test]
    fn section_body_rewrite_touches_only_that_section() {
        let mutated = replace_section_body(JANE_DOE, "Skills", "\\item Rust").unwrap();

        let outline = parse(&mutated);
        assert_eq!(outline.section("Skills").unwrap().raw_body, "\\item Rust");
        assert_eq!(
            outline.section("Experience").unwrap().raw_body,
            "\\textbf{Engineer}\\\\Built systems."
        );
        assert!(mutated.ends_with("\\end{document}"));
    }

    #[test]
    fn section_rewrite_preserves_surrounding_blank_lines() {
        let document = "\\section*{Skills}\n\n\\item Go\n\n\\end{document}";
        let mutated = replace_section_body(document, "Skills", "\\item Rust").unwrap();
        assert_eq!(mutated, "\\section*{Skills}\n\n\\item Rust\n\n\\end{document}");
    }

    #[test]
    fn unknown_section_is_rejected() {
        let err = replace_section_body(JANE_DOE, "Education", "none").unwrap_err();
        assert_eq!(
            err,
            MutateError::SectionNotFound {
                title: "Education".to_string()
            }
        );
    }

    #[test]
    fn duplicate_section_titles_are_rejected() {
        let document = "\\section*{Skills}a\\section*{Skills}b\\end{document}";
        let err = replace_section_body(document, "Skills", "c").unwrap_err();
        assert_eq!(
            err,
            MutateError::SectionAmbiguous {
                title: "Skills".to_string(),
                occurrences: 2
            }
        );
    }
}
