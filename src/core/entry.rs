//! A single unit of trust evidence attached to a signature.
//!
//! An entry is either a raw encoded string (optionally base64url) or a
//! structured object. The representation tag of every entry in one container
//! must match; see [`crate::consistency`].

use base64::{
    alphabet,
    engine::{
        general_purpose::URL_SAFE_NO_PAD, DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig,
    },
    Engine as _,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::timestamp::TimestampType;
use crate::error::{EvidenceError, Result};

/// Base64url decoder accepting both padded and unpadded input.
///
/// New components are always written unpadded; other producers pad them.
pub(crate) const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// What a piece of evidence attests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvidenceKind {
    /// A timestamp token of the given level
    Timestamp(TimestampType),
    /// Certificate values or references
    CertificateRef,
    /// Revocation values or references (CRL / OCSP)
    RevocationRef,
}

impl fmt::Display for EvidenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvidenceKind::Timestamp(t) => write!(f, "Timestamp({})", t),
            EvidenceKind::CertificateRef => write!(f, "CertificateRef"),
            EvidenceKind::RevocationRef => write!(f, "RevocationRef"),
        }
    }
}

/// Representation tag, compared once per container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepresentationTag {
    Raw,
    Structured,
}

/// How an entry is stored inside the evidence container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Representation {
    /// Encoded text exactly as it appears in the container
    RawEncoded(Bytes),
    /// Opaque structured object
    Structured(serde_json::Value),
}

impl Representation {
    pub fn tag(&self) -> RepresentationTag {
        match self {
            Representation::RawEncoded(_) => RepresentationTag::Raw,
            Representation::Structured(_) => RepresentationTag::Structured,
        }
    }
}

/// One evidence entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    kind: EvidenceKind,
    representation: Representation,
    base64url: bool,
}

impl EvidenceEntry {
    /// Raw entry whose bytes are already encoded.
    pub fn raw(kind: EvidenceKind, encoded: impl Into<Bytes>, base64url: bool) -> Self {
        Self {
            kind,
            representation: Representation::RawEncoded(encoded.into()),
            base64url,
        }
    }

    /// Raw entry built by base64url-encoding `payload` (unpadded).
    pub fn raw_base64url(kind: EvidenceKind, payload: &[u8]) -> Self {
        let encoded = URL_SAFE_NO_PAD.encode(payload);
        Self::raw(kind, encoded.into_bytes(), true)
    }

    /// Structured entry.
    pub fn structured(kind: EvidenceKind, value: serde_json::Value) -> Self {
        Self {
            kind,
            representation: Representation::Structured(value),
            base64url: false,
        }
    }

    pub fn kind(&self) -> EvidenceKind {
        self.kind
    }

    pub fn representation(&self) -> &Representation {
        &self.representation
    }

    pub fn tag(&self) -> RepresentationTag {
        self.representation.tag()
    }

    /// Base64url flag; always false for structured entries.
    pub fn is_base64url_encoded(&self) -> bool {
        matches!(self.representation, Representation::RawEncoded(_)) && self.base64url
    }

    /// Payload with any base64url layer removed.
    pub fn decoded_payload(&self) -> Result<Bytes> {
        match &self.representation {
            Representation::RawEncoded(encoded) if self.base64url => URL_SAFE_LENIENT
                .decode(encoded)
                .map(Bytes::from)
                .map_err(|e| EvidenceError::Serialization(format!("base64url payload: {}", e))),
            Representation::RawEncoded(encoded) => Ok(encoded.clone()),
            Representation::Structured(value) => Ok(Bytes::from(serde_json::to_vec(value)?)),
        }
    }
}
