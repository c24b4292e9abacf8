//! Homogeneity checks over an evidence container.
//!
//! A verifier reads one container with one representation and one encoding
//! scheme. Before anything is appended the existing container must be all raw
//! or all structured, and its effective encoding must equal the encoding the
//! caller is about to use for new entries.

use tracing::{debug, trace};

use crate::core::container::EvidenceContainer;
use crate::core::entry::{EvidenceEntry, RepresentationTag};
use crate::error::{EvidenceError, Result};
use crate::log_error;

/// Common representation tag of `entries`, `None` when empty.
pub fn common_representation(entries: &[EvidenceEntry]) -> Result<Option<RepresentationTag>> {
    let (raw, structured) = entries
        .iter()
        .fold((0, 0), |(raw, structured), e| match e.tag() {
            RepresentationTag::Raw => (raw + 1, structured),
            RepresentationTag::Structured => (raw, structured + 1),
        });

    match (raw, structured) {
        (0, 0) => Ok(None),
        (_, 0) => Ok(Some(RepresentationTag::Raw)),
        (0, _) => Ok(Some(RepresentationTag::Structured)),
        _ => Err(log_error!(EvidenceError::MixedRepresentation { raw, structured })),
    }
}

/// True when every entry is raw and flagged base64url.
///
/// An empty slice has no effective encoding and reports false.
pub fn effective_encoding(entries: &[EvidenceEntry]) -> bool {
    !entries.is_empty() && entries.iter().all(EvidenceEntry::is_base64url_encoded)
}

/// Validate `container` before appending entries encoded as `intended_base64url`.
pub fn check_consistent(container: &EvidenceContainer, intended_base64url: bool) -> Result<()> {
    check_entries(container.entries(), intended_base64url)
}

/// Same as [`check_consistent`] over a bare slice, used for incoming entries.
pub fn check_entries(entries: &[EvidenceEntry], intended_base64url: bool) -> Result<()> {
    let Some(tag) = common_representation(entries)? else {
        trace!("Empty evidence list is trivially consistent");
        return Ok(());
    };

    let container_base64url = effective_encoding(entries);
    if container_base64url != intended_base64url {
        return Err(log_error!(EvidenceError::EncodingMismatch {
            container_base64url,
            suggested: !intended_base64url,
        }));
    }

    debug!(
        entries = entries.len(),
        representation = ?tag,
        base64url = container_base64url,
        "Evidence list is consistent"
    );
    Ok(())
}
