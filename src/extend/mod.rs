//! Document-level "extend signature" workflow.
//!
//! Runs gate, consistency check and append for every signature of a
//! document. New evidence comes from an [`EvidenceSource`], the seam where
//! timestamping and revocation fetching plug in. Any failure aborts the whole
//! attempt and no document is produced.

use tracing::info;

use crate::append::EvidenceAppender;
use crate::config::ExtensionConfig;
use crate::consistency::{check_consistent, check_entries};
use crate::core::container::EvidenceContainer;
use crate::core::entry::EvidenceEntry;
use crate::document::{SerializationShape, SignatureDocument};
use crate::error::Result;
use crate::gate::ExtensionGate;
use crate::span_trace;

/// Supplies the evidence to append to one signature.
pub trait EvidenceSource {
    /// Entries to append to signature `signature_index`, whose current
    /// evidence is `existing`. Entries must use the requested encoding.
    fn evidence_for(
        &self,
        signature_index: usize,
        existing: &EvidenceContainer,
        base64url: bool,
    ) -> Result<Vec<EvidenceEntry>>;
}

impl<F> EvidenceSource for F
where
    F: Fn(usize, &EvidenceContainer, bool) -> Result<Vec<EvidenceEntry>>,
{
    fn evidence_for(
        &self,
        signature_index: usize,
        existing: &EvidenceContainer,
        base64url: bool,
    ) -> Result<Vec<EvidenceEntry>> {
        self(signature_index, existing, base64url)
    }
}

/// Extends signature documents according to an [`ExtensionConfig`].
#[derive(Debug, Clone, Default)]
pub struct SignatureExtender {
    config: ExtensionConfig,
    appender: EvidenceAppender,
}

impl SignatureExtender {
    pub fn new(config: ExtensionConfig) -> Self {
        let appender = EvidenceAppender::new(config.limits.clone());
        Self { config, appender }
    }

    pub fn config(&self) -> &ExtensionConfig {
        &self.config
    }

    /// Extend every signature of `document`; returns the serialized result.
    pub fn extend(
        &self,
        document: &[u8],
        declared: SerializationShape,
        source: &dyn EvidenceSource,
    ) -> Result<Vec<u8>> {
        let mut current = ExtensionGate::check_eligible(document, declared)?;
        for index in 0..current.signature_count() {
            current = self.extend_parsed(&current, index, source)?;
        }
        current.to_json_bytes()
    }

    /// Extend only the signature at `index`.
    pub fn extend_signature(
        &self,
        document: &[u8],
        declared: SerializationShape,
        index: usize,
        source: &dyn EvidenceSource,
    ) -> Result<Vec<u8>> {
        let parsed = ExtensionGate::check_eligible(document, declared)?;
        self.extend_parsed(&parsed, index, source)?.to_json_bytes()
    }

    /// Extend one signature of an already admitted document.
    pub fn extend_parsed(
        &self,
        document: &SignatureDocument,
        index: usize,
        source: &dyn EvidenceSource,
    ) -> Result<SignatureDocument> {
        let span = span_trace!("extend_signature", signature = index);
        let _guard = span.enter();

        let intended = self.config.base64url_components;
        let existing = document.evidence(index)?;
        check_consistent(&existing, intended)?;

        let new_entries = source.evidence_for(index, &existing, intended)?;
        check_entries(&new_entries, intended)?;

        let container = self.appender.append(&existing, &new_entries)?;
        info!(
            signature = index,
            before = existing.len(),
            after = container.len(),
            base64url = intended,
            "Signature evidence extended"
        );
        document.with_evidence(index, &container)
    }
}
