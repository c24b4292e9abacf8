//! Timestamp sub-types carried by timestamp evidence entries.
//!
//! The textual form is the upper snake case enumeration name, used both by
//! `parse`/`print` and by serde.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{EvidenceError, Result};

/// Which signature level a timestamp attests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimestampType {
    /// Timestamp over the signed content, taken before signing
    ContentTimestamp,
    /// Timestamp over the signature value
    SignatureTimestamp,
    /// Timestamp over the signature and its validation data
    ValidationDataTimestamp,
    /// Timestamp over the signature and validation data references only
    #[serde(rename = "VALIDATION_DATA_REFSONLY_TIMESTAMP")]
    ValidationDataRefsOnlyTimestamp,
    /// Archive timestamp covering all previously added evidence
    ArchiveTimestamp,
}

impl TimestampType {
    pub const ALL: [TimestampType; 5] = [
        TimestampType::ContentTimestamp,
        TimestampType::SignatureTimestamp,
        TimestampType::ValidationDataTimestamp,
        TimestampType::ValidationDataRefsOnlyTimestamp,
        TimestampType::ArchiveTimestamp,
    ];

    /// Parse an enumeration name such as `SIGNATURE_TIMESTAMP`.
    pub fn parse(value: &str) -> Result<Self> {
        value.parse()
    }

    /// Enumeration name of this timestamp type.
    pub fn print(&self) -> &'static str {
        match self {
            TimestampType::ContentTimestamp => "CONTENT_TIMESTAMP",
            TimestampType::SignatureTimestamp => "SIGNATURE_TIMESTAMP",
            TimestampType::ValidationDataTimestamp => "VALIDATION_DATA_TIMESTAMP",
            TimestampType::ValidationDataRefsOnlyTimestamp => {
                "VALIDATION_DATA_REFSONLY_TIMESTAMP"
            }
            TimestampType::ArchiveTimestamp => "ARCHIVE_TIMESTAMP",
        }
    }

    /// True for timestamps that cover previously added evidence.
    pub fn covers_validation_data(&self) -> bool {
        matches!(
            self,
            TimestampType::ValidationDataTimestamp
                | TimestampType::ValidationDataRefsOnlyTimestamp
                | TimestampType::ArchiveTimestamp
        )
    }
}

impl FromStr for TimestampType {
    type Err = EvidenceError;

    fn from_str(s: &str) -> Result<Self> {
        TimestampType::ALL
            .into_iter()
            .find(|t| t.print() == s)
            .ok_or_else(|| EvidenceError::UnknownTimestampType(s.to_string()))
    }
}

impl fmt::Display for TimestampType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.print())
    }
}
