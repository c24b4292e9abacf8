//! Revision-style evidence: one object-id keyed snapshot per extension event.
//!
//! Object ids are only unique inside a single revision. The same content may
//! appear under a different id in a later revision; content identity is byte
//! equality of the decoded payload, see [`ContentKey`].

use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::core::consolidated::ConsolidatedEvidence;
use crate::error::{EvidenceError, Result};
use crate::hashing::content_fingerprint;
use crate::log_error;

/// Identifier of a shared binary object within one revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ObjectId {
    fn from(value: u64) -> Self {
        ObjectId(value)
    }
}

/// Kind of a revision object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ContentKind {
    /// X.509 certificate
    Certificate,
    /// Certificate revocation list
    Crl,
    /// OCSP response
    Ocsp,
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentKind::Certificate => write!(f, "Certificate"),
            ContentKind::Crl => write!(f, "CRL"),
            ContentKind::Ocsp => write!(f, "OCSP"),
        }
    }
}

/// Content identity: kind plus decoded payload bytes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContentKey {
    pub kind: ContentKind,
    pub content: Bytes,
}

impl ContentKey {
    pub fn new(kind: ContentKind, content: impl Into<Bytes>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }

    /// Hex SHA-256 of the payload, for logs and reports.
    pub fn fingerprint(&self) -> String {
        content_fingerprint(&self.content)
    }
}

/// One object referenced by a revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevisionObject {
    pub id: ObjectId,
    pub kind: ContentKind,
    pub content: Bytes,
}

impl RevisionObject {
    pub fn key(&self) -> ContentKey {
        ContentKey::new(self.kind, self.content.clone())
    }
}

/// A snapshot added as a whole unit at one extension event.
///
/// Objects are kept as parsed, so a malformed revision reusing one id for two
/// payloads stays representable and is rejected by the merger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revision {
    objects: Vec<RevisionObject>,
}

impl Revision {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_objects(objects: impl IntoIterator<Item = RevisionObject>) -> Self {
        Self {
            objects: objects.into_iter().collect(),
        }
    }

    /// Returns a new revision with one more object.
    pub fn with(
        mut self,
        id: impl Into<ObjectId>,
        kind: ContentKind,
        content: impl Into<Bytes>,
    ) -> Self {
        self.objects.push(RevisionObject {
            id: id.into(),
            kind,
            content: content.into(),
        });
        self
    }

    pub fn objects(&self) -> &[RevisionObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Objects of one kind keyed by id, as a dictionary reader would see them.
    pub fn objects_of(&self, kind: ContentKind) -> impl Iterator<Item = &RevisionObject> {
        self.objects.iter().filter(move |o| o.kind == kind)
    }

    pub fn max_object_id(&self) -> Option<ObjectId> {
        self.objects.iter().map(|o| o.id).max()
    }
}

/// Builds the next revision, reusing ids of content already present.
#[derive(Debug)]
pub struct RevisionBuilder {
    known: HashMap<ContentKey, ObjectId>,
    assigned: HashMap<ContentKey, ObjectId>,
    used_ids: HashSet<ObjectId>,
    /// `None` once the id space above the last allocation is used up.
    next_id: Option<u64>,
    objects: Vec<RevisionObject>,
}

impl Default for RevisionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RevisionBuilder {
    /// Builder for a first revision; ids start at 1.
    pub fn new() -> Self {
        Self {
            known: HashMap::new(),
            assigned: HashMap::new(),
            used_ids: HashSet::new(),
            next_id: Some(1),
            objects: Vec::new(),
        }
    }

    /// Builder for the revision following everything in `previous`.
    ///
    /// When `previous` already uses `u64::MAX`, known content can still be
    /// added under its old id but new content fails with
    /// `ObjectIdSpaceExhausted`.
    pub fn continuing(previous: &ConsolidatedEvidence) -> Self {
        let known = previous
            .records()
            .iter()
            .map(|r| (r.key(), r.representative_object_id))
            .collect();
        let next_id = match previous.max_object_id() {
            Some(id) => id.0.checked_add(1),
            None => Some(1),
        };
        Self {
            known,
            next_id,
            ..Self::new()
        }
    }

    /// Add content and return the id it is referenced under.
    pub fn add(&mut self, kind: ContentKind, content: impl Into<Bytes>) -> Result<ObjectId> {
        let key = ContentKey::new(kind, content);
        if let Some(id) = self.assigned.get(&key) {
            return Ok(*id);
        }

        let id = match self.known.get(&key) {
            Some(id) if !self.used_ids.contains(id) => *id,
            _ => self.fresh_id()?,
        };
        self.used_ids.insert(id);
        self.assigned.insert(key.clone(), id);
        self.objects.push(RevisionObject {
            id,
            kind: key.kind,
            content: key.content,
        });
        Ok(id)
    }

    pub fn certificate(&mut self, content: impl Into<Bytes>) -> Result<ObjectId> {
        self.add(ContentKind::Certificate, content)
    }

    pub fn crl(&mut self, content: impl Into<Bytes>) -> Result<ObjectId> {
        self.add(ContentKind::Crl, content)
    }

    pub fn ocsp(&mut self, content: impl Into<Bytes>) -> Result<ObjectId> {
        self.add(ContentKind::Ocsp, content)
    }

    pub fn build(self) -> Revision {
        Revision {
            objects: self.objects,
        }
    }

    fn fresh_id(&mut self) -> Result<ObjectId> {
        loop {
            let next = self
                .next_id
                .ok_or_else(|| log_error!(EvidenceError::ObjectIdSpaceExhausted))?;
            self.next_id = next.checked_add(1);
            let candidate = ObjectId(next);
            // reused ids may already occupy this slot
            if !self.used_ids.contains(&candidate) {
                return Ok(candidate);
            }
        }
    }
}
