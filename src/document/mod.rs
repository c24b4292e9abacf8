//! Minimal signature document model.
//!
//! Reads a JWS-style signature document in one of three shapes and exposes
//! the unsigned evidence list (`etsiU`) of each signature as an
//! [`EvidenceContainer`]. Writing back only replaces that list; every other
//! member of the document is kept as parsed.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use tracing::{debug, trace};

use crate::core::container::EvidenceContainer;
use crate::core::entry::{EvidenceEntry, EvidenceKind, Representation, URL_SAFE_LENIENT};
use crate::core::timestamp::TimestampType;
use crate::error::{EvidenceError, Result};

/// Unsigned header member holding the evidence list.
pub const EVIDENCE_MEMBER: &str = "etsiU";
/// Unprotected header member of a JSON signature.
pub const HEADER_MEMBER: &str = "header";

/// Serialization shape of a signature document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SerializationShape {
    /// `header.payload.signature` text; has no unsigned header
    Compact,
    /// JSON object with a `signatures` array
    JsonEnvelope,
    /// Flattened JSON object carrying one signature at top level
    JsonEnvelopeSingleSignature,
}

impl SerializationShape {
    /// Shapes whose evidence list can be extended in place.
    pub const EXTENDABLE: [SerializationShape; 2] = [
        SerializationShape::JsonEnvelope,
        SerializationShape::JsonEnvelopeSingleSignature,
    ];

    pub fn supports_extension(&self) -> bool {
        Self::EXTENDABLE.contains(self)
    }
}

impl fmt::Display for SerializationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerializationShape::Compact => write!(f, "compact"),
            SerializationShape::JsonEnvelope => write!(f, "JSON envelope"),
            SerializationShape::JsonEnvelopeSingleSignature => {
                write!(f, "flattened JSON envelope")
            }
        }
    }
}

/// Evidence kind named by an `etsiU` component.
pub fn kind_for_component(name: &str) -> Option<EvidenceKind> {
    let kind = match name {
        "cntTst" => EvidenceKind::Timestamp(TimestampType::ContentTimestamp),
        "sigTst" => EvidenceKind::Timestamp(TimestampType::SignatureTimestamp),
        "sigRTst" => EvidenceKind::Timestamp(TimestampType::ValidationDataTimestamp),
        "rfsTst" => EvidenceKind::Timestamp(TimestampType::ValidationDataRefsOnlyTimestamp),
        "arcTst" => EvidenceKind::Timestamp(TimestampType::ArchiveTimestamp),
        "xVals" | "axVals" | "xRefs" | "axRefs" => EvidenceKind::CertificateRef,
        "rVals" | "arVals" | "rRefs" | "arRefs" | "tstVD" => EvidenceKind::RevocationRef,
        _ => return None,
    };
    Some(kind)
}

/// A parsed signature document.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureDocument {
    shape: SerializationShape,
    root: Value,
}

impl SignatureDocument {
    /// Parse raw document bytes, detecting the serialization shape.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(data)
            .map_err(|_| EvidenceError::NotASignatureDocument("document is not UTF-8".into()))?
            .trim();

        if text.starts_with('{') {
            let root: Value = serde_json::from_str(text)
                .map_err(|e| EvidenceError::NotASignatureDocument(e.to_string()))?;
            let shape = json_shape(&root)?;
            debug!(%shape, "Parsed JSON signature document");
            return Ok(Self { shape, root });
        }

        if is_compact(text) {
            debug!("Parsed compact signature document");
            return Ok(Self {
                shape: SerializationShape::Compact,
                root: Value::String(text.to_string()),
            });
        }

        Err(EvidenceError::NotASignatureDocument(
            "neither a JSON envelope nor a compact signature".into(),
        ))
    }

    pub fn shape(&self) -> SerializationShape {
        self.shape
    }

    pub fn signature_count(&self) -> usize {
        match self.shape {
            SerializationShape::Compact | SerializationShape::JsonEnvelopeSingleSignature => 1,
            SerializationShape::JsonEnvelope => self
                .root
                .get("signatures")
                .and_then(Value::as_array)
                .map_or(0, Vec::len),
        }
    }

    /// Evidence container of the signature at `index`.
    pub fn evidence(&self, index: usize) -> Result<EvidenceContainer> {
        let signature = self.signature(index)?;
        let list = match signature
            .and_then(|s| s.get(HEADER_MEMBER))
            .and_then(|h| h.get(EVIDENCE_MEMBER))
        {
            None => return Ok(EvidenceContainer::new()),
            Some(Value::Array(list)) => list,
            Some(_) => {
                return Err(EvidenceError::NotASignatureDocument(format!(
                    "'{}' of signature {} is not an array",
                    EVIDENCE_MEMBER, index
                )))
            }
        };

        let entries = list
            .iter()
            .enumerate()
            .map(|(i, v)| parse_entry(i, v))
            .collect::<Result<Vec<_>>>()?;
        trace!(signature = index, entries = entries.len(), "Read evidence list");
        Ok(EvidenceContainer::from_entries(entries))
    }

    /// Evidence containers of every signature, in document order.
    pub fn all_evidence(&self) -> Result<Vec<EvidenceContainer>> {
        (0..self.signature_count()).map(|i| self.evidence(i)).collect()
    }

    /// New document whose signature `index` carries `container`.
    pub fn with_evidence(&self, index: usize, container: &EvidenceContainer) -> Result<Self> {
        if !self.shape.supports_extension() {
            return Err(EvidenceError::UnsupportedSerializationShape { shape: self.shape });
        }
        self.signature(index)?;

        let list = container
            .iter()
            .map(entry_to_value)
            .collect::<Result<Vec<_>>>()?;

        let mut next = self.clone();
        let signature = match next.shape {
            SerializationShape::JsonEnvelopeSingleSignature => Some(&mut next.root),
            _ => next
                .root
                .get_mut("signatures")
                .and_then(Value::as_array_mut)
                .and_then(|sigs| sigs.get_mut(index)),
        }
        .and_then(Value::as_object_mut)
        .ok_or_else(|| EvidenceError::NotASignatureDocument("signature is not an object".into()))?;

        // an empty list never creates a header that was not there
        if list.is_empty() && !signature.contains_key(HEADER_MEMBER) {
            return Ok(next);
        }

        let header = signature
            .entry(HEADER_MEMBER)
            .or_insert_with(|| Value::Object(Map::new()))
            .as_object_mut()
            .ok_or_else(|| {
                EvidenceError::NotASignatureDocument("unprotected header is not an object".into())
            })?;

        if list.is_empty() {
            header.remove(EVIDENCE_MEMBER);
        } else {
            header.insert(EVIDENCE_MEMBER.to_string(), Value::Array(list));
        }
        Ok(next)
    }

    /// Serialize the document back to bytes.
    pub fn to_json_bytes(&self) -> Result<Vec<u8>> {
        match self.shape {
            SerializationShape::Compact => Err(EvidenceError::UnsupportedSerializationShape {
                shape: self.shape,
            }),
            _ => Ok(serde_json::to_vec(&self.root)?),
        }
    }

    /// Signature object at `index`; `None` for the compact shape.
    fn signature(&self, index: usize) -> Result<Option<&Value>> {
        let count = self.signature_count();
        if index >= count {
            return Err(EvidenceError::SignatureIndexOutOfRange { index, count });
        }
        Ok(match self.shape {
            SerializationShape::Compact => None,
            SerializationShape::JsonEnvelopeSingleSignature => Some(&self.root),
            SerializationShape::JsonEnvelope => self
                .root
                .get("signatures")
                .and_then(Value::as_array)
                .and_then(|sigs| sigs.get(index)),
        })
    }
}

/// Serialization shape of raw document bytes.
pub fn serialization_shape_of(data: &[u8]) -> Result<SerializationShape> {
    SignatureDocument::parse(data).map(|doc| doc.shape())
}

fn json_shape(root: &Value) -> Result<SerializationShape> {
    let object = root
        .as_object()
        .ok_or_else(|| EvidenceError::NotASignatureDocument("root is not an object".into()))?;

    if let Some(signatures) = object.get("signatures") {
        let signatures = signatures.as_array().ok_or_else(|| {
            EvidenceError::NotASignatureDocument("'signatures' is not an array".into())
        })?;
        if signatures.iter().any(|s| !s.is_object()) {
            return Err(EvidenceError::NotASignatureDocument(
                "signature record is not an object".into(),
            ));
        }
        return Ok(SerializationShape::JsonEnvelope);
    }

    if object.get("signature").is_some_and(Value::is_string) {
        return Ok(SerializationShape::JsonEnvelopeSingleSignature);
    }

    Err(EvidenceError::NotASignatureDocument(
        "no 'signatures' or 'signature' member".into(),
    ))
}

fn is_compact(text: &str) -> bool {
    let parts: Vec<&str> = text.split('.').collect();
    if parts.len() != 3 || parts[0].is_empty() || parts[2].is_empty() {
        return false;
    }
    // payload may be empty for detached content
    parts.iter().all(|p| URL_SAFE_NO_PAD.decode(p).is_ok())
}

fn component_kind(index: usize, value: &Value) -> Result<EvidenceKind> {
    let object = value.as_object().ok_or_else(|| EvidenceError::MalformedEntry {
        index,
        message: "component is not an object".into(),
    })?;
    let mut names = object.keys();
    match (names.next(), names.next()) {
        (Some(name), None) => kind_for_component(name).ok_or_else(|| EvidenceError::MalformedEntry {
            index,
            message: format!("unknown component '{}'", name),
        }),
        _ => Err(EvidenceError::MalformedEntry {
            index,
            message: format!("expected exactly one component, found {}", object.len()),
        }),
    }
}

fn parse_entry(index: usize, value: &Value) -> Result<EvidenceEntry> {
    match value {
        Value::Object(_) => Ok(EvidenceEntry::structured(
            component_kind(index, value)?,
            value.clone(),
        )),
        Value::String(s) => {
            let (payload, base64url) = match URL_SAFE_LENIENT.decode(s) {
                Ok(decoded) => (decoded, true),
                Err(_) => (s.as_bytes().to_vec(), false),
            };
            let decoded: Value =
                serde_json::from_slice(&payload).map_err(|e| EvidenceError::MalformedEntry {
                    index,
                    message: format!("raw component is not JSON: {}", e),
                })?;
            let kind = component_kind(index, &decoded)?;
            Ok(EvidenceEntry::raw(kind, s.clone().into_bytes(), base64url))
        }
        _ => Err(EvidenceError::MalformedEntry {
            index,
            message: "component is neither a string nor an object".into(),
        }),
    }
}

fn entry_to_value(entry: &EvidenceEntry) -> Result<Value> {
    match entry.representation() {
        Representation::Structured(value) => Ok(value.clone()),
        Representation::RawEncoded(bytes) => std::str::from_utf8(bytes)
            .map(|s| Value::String(s.to_string()))
            .map_err(|_| EvidenceError::Serialization("raw evidence entry is not UTF-8".into())),
    }
}
