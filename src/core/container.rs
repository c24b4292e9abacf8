//! Ordered, append-only evidence container.
//!
//! Insertion order is the chronological extension history: entries added at
//! an earlier signature level come first. Containers are immutable values;
//! [`crate::append::append`] returns a new container instead of editing one.

use serde::{Deserialize, Serialize};

use crate::core::entry::{EvidenceEntry, EvidenceKind, RepresentationTag};

/// Ordered sequence of evidence entries embedded in a signed document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceContainer {
    entries: Vec<EvidenceEntry>,
}

impl EvidenceContainer {
    /// Empty container; any encoding may be chosen for its first entries.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<EvidenceEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[EvidenceEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvidenceEntry> {
        self.entries.iter()
    }

    /// Number of (raw, structured) entries.
    pub fn tag_counts(&self) -> (usize, usize) {
        self.entries
            .iter()
            .fold((0, 0), |(raw, structured), e| match e.tag() {
                RepresentationTag::Raw => (raw + 1, structured),
                RepresentationTag::Structured => (raw, structured + 1),
            })
    }

    /// Entries of one kind, in insertion order.
    pub fn of_kind(&self, kind: EvidenceKind) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries.iter().filter(move |e| e.kind() == kind)
    }
}

impl<'a> IntoIterator for &'a EvidenceContainer {
    type Item = &'a EvidenceEntry;
    type IntoIter = std::slice::Iter<'a, EvidenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<EvidenceEntry> for EvidenceContainer {
    fn from_iter<I: IntoIterator<Item = EvidenceEntry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
