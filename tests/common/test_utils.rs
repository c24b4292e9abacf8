//! Shared evidence sources and entry helpers.
//!
//! These stand in for the external collaborators (timestamp authority,
//! revocation fetcher) so the workflow can be driven end to end.

use serde_json::{json, Value};
use sigevidence::{EvidenceContainer, EvidenceEntry, EvidenceKind, EvidenceSource, Result, TimestampType};
use std::cell::Cell;

/// Builds one component entry in the requested encoding.
pub fn component(kind: EvidenceKind, value: Value, base64url: bool) -> EvidenceEntry {
    if base64url {
        EvidenceEntry::raw_base64url(kind, value.to_string().as_bytes())
    } else {
        EvidenceEntry::structured(kind, value)
    }
}

pub fn signature_timestamp(base64url: bool) -> EvidenceEntry {
    component(
        EvidenceKind::Timestamp(TimestampType::SignatureTimestamp),
        json!({"sigTst": {"tstTokens": [{"val": "MIIBsig"}]}}),
        base64url,
    )
}

pub fn archive_timestamp(base64url: bool) -> EvidenceEntry {
    component(
        EvidenceKind::Timestamp(TimestampType::ArchiveTimestamp),
        json!({"arcTst": {"tstTokens": [{"val": "MIIBarc"}]}}),
        base64url,
    )
}

pub fn certificate_values(base64url: bool) -> EvidenceEntry {
    component(
        EvidenceKind::CertificateRef,
        json!({"xVals": [{"x509Cert": "MIID"}]}),
        base64url,
    )
}

pub fn revocation_values(base64url: bool) -> EvidenceEntry {
    component(
        EvidenceKind::RevocationRef,
        json!({"rVals": {"ocspVals": ["MIIC"]}}),
        base64url,
    )
}

/// Source that upgrades to LT then LTA: validation data plus an archive timestamp.
#[derive(Default)]
pub struct LtaSource {
    pub calls: Cell<usize>,
}

impl EvidenceSource for LtaSource {
    fn evidence_for(
        &self,
        _signature_index: usize,
        _existing: &EvidenceContainer,
        base64url: bool,
    ) -> Result<Vec<EvidenceEntry>> {
        self.calls.set(self.calls.get() + 1);
        Ok(vec![
            certificate_values(base64url),
            revocation_values(base64url),
            archive_timestamp(base64url),
        ])
    }
}

/// Source that always returns the same fixed entries, ignoring the encoding.
pub struct FixedSource(pub Vec<EvidenceEntry>);

impl EvidenceSource for FixedSource {
    fn evidence_for(
        &self,
        _signature_index: usize,
        _existing: &EvidenceContainer,
        _base64url: bool,
    ) -> Result<Vec<EvidenceEntry>> {
        Ok(self.0.clone())
    }
}
