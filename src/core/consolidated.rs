//! Merged view over every revision of a revision-style container.

use bytes::Bytes;
use serde::Serialize;
use std::collections::HashMap;

use crate::core::revision::{ContentKey, ContentKind, ObjectId};

/// One distinct piece of content found across all revisions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CanonicalRecord {
    pub kind: ContentKind,
    pub content: Bytes,
    /// Id under which the content was first seen; never overwritten.
    pub representative_object_id: ObjectId,
    /// Index of the revision that introduced the content.
    pub first_seen_revision: usize,
    /// Number of revisions referencing the content.
    pub containing_revision_count: usize,
    #[serde(skip)]
    last_seen_revision: usize,
}

impl CanonicalRecord {
    pub fn key(&self) -> ContentKey {
        ContentKey::new(self.kind, self.content.clone())
    }

    /// True when the content existed before `revision` was added.
    pub fn present_before(&self, revision: usize) -> bool {
        self.first_seen_revision < revision
    }
}

/// Deduplicated evidence: each distinct content value appears exactly once.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConsolidatedEvidence {
    records: Vec<CanonicalRecord>,
    #[serde(skip)]
    index: HashMap<ContentKey, usize>,
    revision_count: usize,
    max_object_id: Option<ObjectId>,
}

impl ConsolidatedEvidence {
    /// All canonical records in order of first sighting.
    pub fn records(&self) -> &[CanonicalRecord] {
        &self.records
    }

    pub fn records_of(&self, kind: ContentKind) -> impl Iterator<Item = &CanonicalRecord> {
        self.records.iter().filter(move |r| r.kind == kind)
    }

    pub fn get(&self, kind: ContentKind, content: &[u8]) -> Option<&CanonicalRecord> {
        let key = ContentKey::new(kind, Bytes::copy_from_slice(content));
        self.index.get(&key).map(|&i| &self.records[i])
    }

    /// Records first introduced by the given revision.
    pub fn introduced_in(&self, revision: usize) -> impl Iterator<Item = &CanonicalRecord> {
        self.records
            .iter()
            .filter(move |r| r.first_seen_revision == revision)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of revisions merged.
    pub fn revision_count(&self) -> usize {
        self.revision_count
    }

    /// Highest object id used by any merged revision.
    pub fn max_object_id(&self) -> Option<ObjectId> {
        self.max_object_id
    }

    pub(crate) fn begin_revision(&mut self) -> usize {
        self.revision_count += 1;
        self.revision_count - 1
    }

    /// Record one sighting; returns true when the content is new.
    pub(crate) fn record_sighting(
        &mut self,
        key: ContentKey,
        id: ObjectId,
        revision: usize,
    ) -> bool {
        self.max_object_id = self.max_object_id.max(Some(id));

        if let Some(&i) = self.index.get(&key) {
            let record = &mut self.records[i];
            if record.last_seen_revision != revision {
                record.last_seen_revision = revision;
                record.containing_revision_count += 1;
            }
            return false;
        }

        self.index.insert(key.clone(), self.records.len());
        self.records.push(CanonicalRecord {
            kind: key.kind,
            content: key.content,
            representative_object_id: id,
            first_seen_revision: revision,
            containing_revision_count: 1,
            last_seen_revision: revision,
        });
        true
    }
}
