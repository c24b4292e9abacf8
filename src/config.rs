//! Configuration for evidence extension.
//!
//! Provides the caller-facing settings of the extension workflow with
//! sensible defaults. Every struct round-trips through serde.

use serde::{Deserialize, Serialize};

use crate::error::{EvidenceError, Result};

/// Master configuration for the extension workflow.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtensionConfig {
    /// Encode new evidence components as base64url strings (default: false).
    pub base64url_components: bool,
    /// Size limits applied while appending and merging.
    pub limits: EvidenceLimits,
}

impl ExtensionConfig {
    /// Builder-style setter named after the corrective hint in encoding errors.
    pub fn base64url_components(mut self, enabled: bool) -> Self {
        self.base64url_components = enabled;
        self
    }

    pub fn with_limits(mut self, limits: EvidenceLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Parse a configuration from JSON; missing fields take defaults.
    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }
}

/// Size limits guarding against oversized evidence records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvidenceLimits {
    /// Maximum entries in one list-style container (default: 4096).
    pub max_entries_per_container: usize,
    /// Maximum revisions merged at once (default: 1024).
    pub max_revisions: usize,
    /// Maximum objects in one revision (default: 16384).
    pub max_objects_per_revision: usize,
}

impl Default for EvidenceLimits {
    fn default() -> Self {
        Self {
            max_entries_per_container: 4096,
            max_revisions: 1024,
            max_objects_per_revision: 16384,
        }
    }
}

impl EvidenceLimits {
    /// No limits at all.
    pub fn unbounded() -> Self {
        Self {
            max_entries_per_container: usize::MAX,
            max_revisions: usize::MAX,
            max_objects_per_revision: usize::MAX,
        }
    }

    pub fn check_entries(&self, used: usize) -> Result<()> {
        check("container entries", used, self.max_entries_per_container)
    }

    pub fn check_revisions(&self, used: usize) -> Result<()> {
        check("revisions", used, self.max_revisions)
    }

    pub fn check_objects(&self, used: usize) -> Result<()> {
        check("revision objects", used, self.max_objects_per_revision)
    }
}

fn check(resource: &str, used: usize, limit: usize) -> Result<()> {
    if used > limit {
        return Err(EvidenceError::exhausted(resource, used, limit));
    }
    Ok(())
}
