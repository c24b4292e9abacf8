//! Signature evidence extension engine.
//!
//! Upgrades an existing signature by appending trust evidence (timestamps,
//! certificate and revocation references) to its unsigned evidence list,
//! without touching signed bytes. Two container shapes are supported:
//!
//! - list-style: an ordered [`EvidenceContainer`] that must stay homogeneous
//!   in representation and encoding across extension rounds;
//! - revision-style: a sequence of object-id keyed [`Revision`]s merged into a
//!   content-deduplicated [`ConsolidatedEvidence`] view.
//!
//! The engine is synchronous and holds no shared state. Callers serialize
//! extension attempts on the same document.

/// Core data types module
pub mod core;

pub mod append;
pub mod config;
pub mod consistency;
pub mod document;
pub mod error;
pub mod extend;
pub mod gate;
pub mod hashing;
pub mod logging;
pub mod merge;

pub use crate::append::{append, EvidenceAppender};
pub use crate::config::{EvidenceLimits, ExtensionConfig};
pub use crate::consistency::{check_consistent, effective_encoding};
pub use crate::core::consolidated::{CanonicalRecord, ConsolidatedEvidence};
pub use crate::core::container::EvidenceContainer;
pub use crate::core::entry::{EvidenceEntry, EvidenceKind, Representation, RepresentationTag};
pub use crate::core::revision::{
    ContentKey, ContentKind, ObjectId, Revision, RevisionBuilder, RevisionObject,
};
pub use crate::core::timestamp::TimestampType;
pub use crate::document::{SerializationShape, SignatureDocument};
pub use crate::error::{ErrorKind, EvidenceError, Result};
pub use crate::extend::{EvidenceSource, SignatureExtender};
pub use crate::gate::{
    obtain_extendable_container, obtain_extendable_containers, serialization_shape_of,
    ExtensionGate,
};
pub use crate::merge::{merge, RevisionMerger};
