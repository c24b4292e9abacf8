//! Cross-revision deduplication of revision-style evidence.
//!
//! Later revisions routinely repeat certificates and revocation data added
//! earlier, often under a different object id. Merging walks the revisions in
//! order and indexes content by [`ContentKey`], so every distinct payload is
//! reported once with the id and revision where it first appeared. Object
//! ids are never compared across revisions.

use std::collections::HashMap;
use tracing::{debug, info, trace};

use crate::config::EvidenceLimits;
use crate::core::consolidated::ConsolidatedEvidence;
use crate::core::revision::{ContentKey, ObjectId, Revision, RevisionObject};
use crate::error::{EvidenceError, Result};
use crate::hashing::short_fingerprint;
use crate::log_error;
use crate::span_trace;

/// Merges revisions into a [`ConsolidatedEvidence`] view.
#[derive(Debug, Clone, Default)]
pub struct RevisionMerger {
    limits: EvidenceLimits,
}

impl RevisionMerger {
    pub fn new(limits: EvidenceLimits) -> Self {
        Self { limits }
    }

    /// Merge `revisions` in order `R0..Rn`.
    ///
    /// Fails with `DuplicateObjectIdWithDifferingContent` when one revision
    /// maps a single id to two different payloads.
    pub fn merge(&self, revisions: &[Revision]) -> Result<ConsolidatedEvidence> {
        let span = span_trace!("merge_revisions", revisions = revisions.len());
        let _guard = span.enter();

        self.limits
            .check_revisions(revisions.len())
            .map_err(|e| log_error!(e))?;

        let mut consolidated = ConsolidatedEvidence::default();
        for revision in revisions {
            self.merge_one(&mut consolidated, revision)?;
        }

        info!(
            revisions = consolidated.revision_count(),
            distinct = consolidated.len(),
            "Merged evidence revisions"
        );
        Ok(consolidated)
    }

    /// Merge one more revision on top of an existing view.
    pub fn extend(
        &self,
        previous: &ConsolidatedEvidence,
        revision: &Revision,
    ) -> Result<ConsolidatedEvidence> {
        self.limits
            .check_revisions(previous.revision_count() + 1)
            .map_err(|e| log_error!(e))?;
        let mut next = previous.clone();
        self.merge_one(&mut next, revision)?;
        Ok(next)
    }

    fn merge_one(&self, consolidated: &mut ConsolidatedEvidence, revision: &Revision) -> Result<()> {
        self.limits
            .check_objects(revision.len())
            .map_err(|e| log_error!(e))?;

        let index = consolidated.revision_count();
        validate_ids(index, revision.objects())?;

        let revision_index = consolidated.begin_revision();
        let mut introduced = 0usize;
        for object in revision.objects() {
            if consolidated.record_sighting(object.key(), object.id, revision_index) {
                introduced += 1;
                trace!(
                    revision = revision_index,
                    id = %object.id,
                    kind = %object.kind,
                    fingerprint = %short_fingerprint(&object.content),
                    "New evidence content"
                );
            }
        }

        debug!(
            revision = revision_index,
            objects = revision.len(),
            introduced,
            "Merged revision"
        );
        Ok(())
    }
}

/// Merge with default limits.
pub fn merge(revisions: &[Revision]) -> Result<ConsolidatedEvidence> {
    RevisionMerger::default().merge(revisions)
}

/// Within one revision an id may repeat only for identical content.
fn validate_ids(revision: usize, objects: &[RevisionObject]) -> Result<()> {
    let mut seen: HashMap<ObjectId, ContentKey> = HashMap::with_capacity(objects.len());
    for object in objects {
        let key = object.key();
        match seen.get(&object.id) {
            Some(existing) if *existing != key => {
                return Err(log_error!(
                    EvidenceError::DuplicateObjectIdWithDifferingContent {
                        revision,
                        object_id: object.id,
                    }
                ));
            }
            Some(_) => {}
            None => {
                seen.insert(object.id, key);
            }
        }
    }
    Ok(())
}
