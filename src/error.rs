//! Error types for the signature evidence extension engine.
//!
//! Every failure is terminal for the current extension attempt. Errors carry
//! enough context for the caller to correct the input or the configuration.

use crate::core::revision::ObjectId;
use crate::document::SerializationShape;
use std::fmt;
use thiserror::Error;

/// Main error type for evidence extension operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvidenceError {
    /// The document could not be parsed into an evidence-bearing structure
    #[error("The provided document is not a valid signature document: {0}")]
    NotASignatureDocument(String),

    /// The parsed document holds zero signature records
    #[error("There is no signature to extend")]
    NoSignaturesPresent,

    /// The document shape does not support in-place extension
    #[error(
        "Signature shape {shape} cannot be extended in place; convert it to a JSON envelope first"
    )]
    UnsupportedSerializationShape { shape: SerializationShape },

    /// Raw and structured entries share one container
    #[error(
        "Evidence components have no common format ({raw} raw, {structured} structured); they shall be all raw strings or all objects"
    )]
    MixedRepresentation { raw: usize, structured: usize },

    /// Container encoding differs from the encoding about to be used
    #[error(
        "Evidence component encoding shall match (container base64url = {container_base64url}); use base64url_components({suggested})"
    )]
    EncodingMismatch {
        container_base64url: bool,
        suggested: bool,
    },

    /// One revision maps a single object id to two different payloads
    #[error("Revision {revision} uses object id {object_id} for differing content")]
    DuplicateObjectIdWithDifferingContent { revision: usize, object_id: ObjectId },

    /// An evidence component whose kind or payload cannot be read
    #[error("Malformed evidence entry at index {index}: {message}")]
    MalformedEntry { index: usize, message: String },

    /// Configured limit exceeded
    #[error("Resource limit exceeded: {resource} ({used}/{limit})")]
    ResourceExhausted {
        resource: String,
        used: usize,
        limit: usize,
    },

    /// No unused object id is left for new revision content
    #[error("Object id space exhausted; no id above {max} is available", max = u64::MAX)]
    ObjectIdSpaceExhausted,

    /// Timestamp type name not recognised
    #[error("Unknown timestamp type: {0}")]
    UnknownTimestampType(String),

    /// Requested signature does not exist in the document
    #[error("Signature index {index} out of range ({count} signatures present)")]
    SignatureIndexOutOfRange { index: usize, count: usize },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Fieldless view of [`EvidenceError`] for matching on the taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotASignatureDocument,
    NoSignaturesPresent,
    UnsupportedSerializationShape,
    MixedRepresentation,
    EncodingMismatch,
    DuplicateObjectIdWithDifferingContent,
    MalformedEntry,
    ResourceExhausted,
    ObjectIdSpaceExhausted,
    UnknownTimestampType,
    SignatureIndexOutOfRange,
    Serialization,
}

impl EvidenceError {
    /// The taxonomy kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotASignatureDocument(_) => ErrorKind::NotASignatureDocument,
            Self::NoSignaturesPresent => ErrorKind::NoSignaturesPresent,
            Self::UnsupportedSerializationShape { .. } => ErrorKind::UnsupportedSerializationShape,
            Self::MixedRepresentation { .. } => ErrorKind::MixedRepresentation,
            Self::EncodingMismatch { .. } => ErrorKind::EncodingMismatch,
            Self::DuplicateObjectIdWithDifferingContent { .. } => {
                ErrorKind::DuplicateObjectIdWithDifferingContent
            }
            Self::MalformedEntry { .. } => ErrorKind::MalformedEntry,
            Self::ResourceExhausted { .. } => ErrorKind::ResourceExhausted,
            Self::ObjectIdSpaceExhausted => ErrorKind::ObjectIdSpaceExhausted,
            Self::UnknownTimestampType(_) => ErrorKind::UnknownTimestampType,
            Self::SignatureIndexOutOfRange { .. } => ErrorKind::SignatureIndexOutOfRange,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// The encoding flag the caller should configure, for encoding mismatches.
    pub fn suggested_encoding(&self) -> Option<bool> {
        match self {
            Self::EncodingMismatch { suggested, .. } => Some(*suggested),
            _ => None,
        }
    }

    pub(crate) fn exhausted(resource: &str, used: usize, limit: usize) -> Self {
        Self::ResourceExhausted {
            resource: resource.to_string(),
            used,
            limit,
        }
    }
}

impl From<serde_json::Error> for EvidenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Result type alias for evidence operations
pub type Result<T> = std::result::Result<T, EvidenceError>;
