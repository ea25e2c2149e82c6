//! Version history domain model.
//!
//! # Responsibility
//! - Define the snapshot record appended to the version log on every save.
//!
//! # Invariants
//! - `id` is stable and never reused for another entry.
//! - Entries are immutable once created; restoring never rewrites them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one saved document snapshot.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type VersionId = Uuid;

/// Immutable, labeled snapshot of the full document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionEntry {
    /// Stable snapshot ID used for restore and auditing.
    pub id: VersionId,
    /// Full raw LaTeX document text at save time.
    pub snapshot: String,
    /// Caller-supplied label, e.g. `Manual save`.
    pub label: String,
    /// Creation timestamp in epoch milliseconds, assigned by storage.
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::VersionEntry;
    use uuid::Uuid;

    #[test]
    fn entry_round_trips_through_json() {
        let entry = VersionEntry {
            id: Uuid::parse_str("00000000-0000-4000-8000-000000000001").unwrap(),
            snapshot: "\\section*{Skills}".to_string(),
            label: "Manual save".to_string(),
            created_at: 1234567890000,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: VersionEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
