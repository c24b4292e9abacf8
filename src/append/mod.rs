//! Append-only growth of an evidence container.
//!
//! Appending never reorders, merges by kind or deduplicates: appending the
//! same entries twice leaves two copies. Callers that do not want repeated
//! evidence must not request it again. The input container is never
//! modified; a new container is returned.

use tracing::debug;

use crate::config::EvidenceLimits;
use crate::consistency::common_representation;
use crate::core::container::EvidenceContainer;
use crate::core::entry::EvidenceEntry;
use crate::error::Result;
use crate::log_error;

/// Appends entries within configured limits.
#[derive(Debug, Clone, Default)]
pub struct EvidenceAppender {
    limits: EvidenceLimits,
}

impl EvidenceAppender {
    pub fn new(limits: EvidenceLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &EvidenceLimits {
        &self.limits
    }

    /// Return `container ++ new_entries`.
    ///
    /// The container must already have passed
    /// [`check_consistent`](crate::consistency::check_consistent) for the
    /// encoding of `new_entries`; `new_entries` must share one representation.
    pub fn append(
        &self,
        container: &EvidenceContainer,
        new_entries: &[EvidenceEntry],
    ) -> Result<EvidenceContainer> {
        common_representation(new_entries)?;

        let total = container.len() + new_entries.len();
        self.limits
            .check_entries(total)
            .map_err(|e| log_error!(e))?;

        let mut entries = Vec::with_capacity(total);
        entries.extend_from_slice(container.entries());
        entries.extend_from_slice(new_entries);

        debug!(
            existing = container.len(),
            appended = new_entries.len(),
            total,
            "Appended evidence entries"
        );
        Ok(EvidenceContainer::from_entries(entries))
    }
}

/// Append with default limits.
pub fn append(
    container: &EvidenceContainer,
    new_entries: &[EvidenceEntry],
) -> Result<EvidenceContainer> {
    EvidenceAppender::default().append(container, new_entries)
}
