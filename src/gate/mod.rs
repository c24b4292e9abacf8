//! Eligibility gate run before any evidence is touched.
//!
//! The gate parses the document, requires at least one signature and only
//! admits serialization shapes that can be extended in place. Converting a
//! compact signature to a JSON envelope is left to the caller.

use tracing::{debug, info};

use crate::core::container::EvidenceContainer;
use crate::document::{SerializationShape, SignatureDocument};
use crate::error::{EvidenceError, Result};
use crate::log_error;

/// Pure validation gate; holds no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionGate;

impl ExtensionGate {
    /// Validate that `document` may be extended.
    ///
    /// Checks run in order: the document parses, it holds at least one
    /// signature, `declared` supports in-place extension, and the shape
    /// actually found in the bytes does too.
    pub fn check_eligible(
        document: &[u8],
        declared: SerializationShape,
    ) -> Result<SignatureDocument> {
        let parsed = parse_with_signatures(document)?;

        if !declared.supports_extension() {
            return Err(log_error!(
                EvidenceError::UnsupportedSerializationShape { shape: declared },
                "declared shape"
            ));
        }
        if !parsed.shape().supports_extension() {
            return Err(log_error!(
                EvidenceError::UnsupportedSerializationShape {
                    shape: parsed.shape()
                },
                "detected shape"
            ));
        }

        info!(
            shape = %parsed.shape(),
            signatures = parsed.signature_count(),
            "Document eligible for extension"
        );
        Ok(parsed)
    }
}

/// Evidence containers of every signature in `document`.
pub fn obtain_extendable_containers(document: &[u8]) -> Result<Vec<EvidenceContainer>> {
    parse_with_signatures(document)?.all_evidence()
}

/// Evidence container of the signature at `index`.
pub fn obtain_extendable_container(document: &[u8], index: usize) -> Result<EvidenceContainer> {
    parse_with_signatures(document)?.evidence(index)
}

/// Serialization shape of raw document bytes.
pub fn serialization_shape_of(document: &[u8]) -> Result<SerializationShape> {
    crate::document::serialization_shape_of(document)
}

fn parse_with_signatures(document: &[u8]) -> Result<SignatureDocument> {
    let parsed = SignatureDocument::parse(document).map_err(|e| log_error!(e))?;
    if parsed.signature_count() == 0 {
        return Err(log_error!(EvidenceError::NoSignaturesPresent));
    }
    debug!(shape = %parsed.shape(), "Signature document parsed");
    Ok(parsed)
}
