//! Integration tests for signature extension.
//!
//! Covers the gate, list-style extension rounds through the document model
//! and revision-style merging across extension events.

mod gate;
mod list_rounds;
